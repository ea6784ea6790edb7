use std::fs::OpenOptions;
use std::io;
use std::ops::ControlFlow;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use grid_snake::config::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, THEME_CLASSIC};
use grid_snake::engine::{EngineEvent, EngineState, GameEngine};
use grid_snake::error::ConfigError;
use grid_snake::grid::GridSize;
use grid_snake::input::{Direction, GameInput, Swipe};
use grid_snake::renderer::{self, CellSize, board_capacity};
use grid_snake::score::{FileStore, MemoryStore, ScoreStore, default_scores_path};
use grid_snake::terminal_runtime::{TerminalSession, restore_terminal};
use tracing::{debug, info, trace, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "grid_snake=info";
const MAX_POLL_WAIT: Duration = Duration::from_millis(50);
/// Approximate pixel size of a terminal cell, so drags are measured in the
/// same units as touch swipes.
const PIXELS_PER_COLUMN: f32 = 8.0;
const PIXELS_PER_ROW: f32 = 16.0;

/// Classic Snake on a cell grid sized to the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Terminal columns per grid cell.
    #[arg(long, default_value_t = DEFAULT_CELL_WIDTH)]
    cell_width: u16,

    /// Terminal rows per grid cell.
    #[arg(long, default_value_t = DEFAULT_CELL_HEIGHT)]
    cell_height: u16,

    /// High score file. Defaults to the platform data directory.
    #[arg(long, value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file. Filter with `RUST_LOG`.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(error) = init_logging(path) {
            eprintln!("cannot open log file {}: {error}", path.display());
            return ExitCode::from(2);
        }
    }

    install_panic_hook();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let mut session = TerminalSession::enter()?;
    let size = session.size()?;
    let (width, height) = board_capacity(size.width, size.height);
    let grid = GridSize::from_display(width, height, cli.cell_width, cli.cell_height)?;
    let cell = CellSize {
        width: cli.cell_width,
        height: cli.cell_height,
    };

    let store = open_store(cli.scores_file);
    let mut engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(grid, store, seed)?,
        None => GameEngine::new(grid, store)?,
    };
    info!(rows = grid.rows, cols = grid.cols, "grid ready");

    let mut drag_start = None;
    let mut dirty = true;
    loop {
        if dirty {
            session
                .terminal_mut()
                .draw(|frame| renderer::render(frame, &engine.snapshot(), cell, &THEME_CLASSIC))?;
            dirty = false;
        }

        let wait = engine
            .next_deadline()
            .map_or(MAX_POLL_WAIT, |deadline| deadline.saturating_duration_since(Instant::now()))
            .min(MAX_POLL_WAIT);

        if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = GameInput::from_key_event(key) {
                        if handle_input(&mut engine, input, Instant::now()).is_break() {
                            break;
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(direction) = track_drag(&mut drag_start, mouse) {
                        let _ = engine.set_heading(direction);
                    }
                }
                Event::FocusLost => engine.pause(),
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        engine.advance_clock(Instant::now());
        for event in engine.take_events() {
            log_event(&event);
            dirty = true;
        }
    }

    info!(high_score = engine.high_score(), "quit");
    Ok(())
}

fn handle_input<S: ScoreStore, R: rand::Rng>(
    engine: &mut GameEngine<S, R>,
    input: GameInput,
    now: Instant,
) -> ControlFlow<()> {
    match input {
        GameInput::Quit => return ControlFlow::Break(()),
        GameInput::Direction(direction) => {
            if !engine.set_heading(direction) {
                trace!(?direction, "heading ignored");
            }
        }
        GameInput::Pause => engine.toggle_pause(now),
        GameInput::Restart => engine.restart(now),
        GameInput::Confirm => match engine.state() {
            EngineState::Idle => engine.start(now),
            EngineState::GameOver | EngineState::Won => engine.restart(now),
            EngineState::Paused => engine.resume(now),
            EngineState::Running => {}
        },
    }
    ControlFlow::Continue(())
}

/// Records where a left-button drag starts and turns its release into a
/// swipe heading.
fn track_drag(start: &mut Option<(f32, f32)>, mouse: MouseEvent) -> Option<Direction> {
    let point = (
        f32::from(mouse.column) * PIXELS_PER_COLUMN,
        f32::from(mouse.row) * PIXELS_PER_ROW,
    );
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            *start = Some(point);
            None
        }
        MouseEventKind::Up(MouseButton::Left) => {
            start.take().and_then(|from| Swipe::new(from, point).direction())
        }
        _ => None,
    }
}

fn log_event(event: &EngineEvent) {
    match event {
        EngineEvent::Tick { .. } | EngineEvent::TimeChanged { .. } => trace!(?event),
        EngineEvent::ScoreChanged { score, high_score } => debug!(score, high_score, "score"),
        EngineEvent::PauseStateChanged { paused } => debug!(paused, "pause state"),
        EngineEvent::GameOver | EngineEvent::Won => debug!(?event),
    }
}

fn open_store(path: Option<PathBuf>) -> Box<dyn ScoreStore> {
    match path.map_or_else(default_scores_path, Ok) {
        Ok(path) => {
            debug!(path = %path.display(), "using score file");
            Box::new(FileStore::new(path))
        }
        Err(error) => {
            warn!(%error, "high scores will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use grid_snake::engine::{EngineState, GameEngine};
    use grid_snake::grid::GridSize;
    use grid_snake::input::{Direction, GameInput};
    use grid_snake::score::MemoryStore;

    use super::{handle_input, track_drag};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn left_drag_becomes_a_heading() {
        let mut start = None;
        let left = MouseButton::Left;
        assert_eq!(track_drag(&mut start, mouse(MouseEventKind::Down(left), 10, 10)), None);
        assert_eq!(
            track_drag(&mut start, mouse(MouseEventKind::Up(left), 10, 6)),
            Some(Direction::Up)
        );
        assert_eq!(start, None);

        // One column is below the swipe threshold.
        let _ = track_drag(&mut start, mouse(MouseEventKind::Down(left), 10, 10));
        assert_eq!(track_drag(&mut start, mouse(MouseEventKind::Up(left), 11, 10)), None);
    }

    #[test]
    fn confirm_starts_then_restarts() {
        let grid = GridSize::new(6, 6).expect("grid should be valid");
        let mut engine =
            GameEngine::with_seed(grid, MemoryStore::new(), 1).expect("start cell should fit");
        let now = Instant::now();

        assert!(handle_input(&mut engine, GameInput::Confirm, now).is_continue());
        assert_eq!(engine.state(), EngineState::Running);

        assert!(handle_input(&mut engine, GameInput::Pause, now).is_continue());
        assert_eq!(engine.state(), EngineState::Paused);
        assert!(handle_input(&mut engine, GameInput::Confirm, now).is_continue());
        assert_eq!(engine.state(), EngineState::Running);

        assert!(handle_input(&mut engine, GameInput::Quit, now).is_break());
    }
}
