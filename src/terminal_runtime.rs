use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Size;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode, alternate screen, focus and mouse reporting for one game
/// session.
///
/// Dropping the session restores the terminal best-effort, so an early return
/// or a panic unwinding through `main` leaves the shell usable.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Switches the terminal into game mode.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the terminal rejects any of the mode changes; modes
    /// already applied are rolled back first.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableFocusChange,
            EnableMouseCapture,
            Hide
        ) {
            let _ = restore_terminal();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    /// Returns the current screen size in terminal cells.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend cannot query the size.
    pub fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Leaves game mode. Safe to call more than once.
///
/// # Errors
///
/// Returns `Err` if the terminal rejects the mode changes.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, DisableMouseCapture, DisableFocusChange, LeaveAlternateScreen)
}
