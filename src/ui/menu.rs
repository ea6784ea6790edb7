use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::config::Theme;
use crate::engine::{EngineState, Snapshot};

/// Popup drawn over the board outside of active play.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    Start { high_score: u32 },
    Paused,
    Finished {
        score: u32,
        high_score: u32,
        won: bool,
    },
}

impl Overlay {
    /// Picks the overlay for the engine state, or `None` while running.
    #[must_use]
    pub fn for_snapshot(snapshot: &Snapshot<'_>) -> Option<Self> {
        match snapshot.state {
            EngineState::Idle => Some(Self::Start {
                high_score: snapshot.high_score,
            }),
            EngineState::Paused => Some(Self::Paused),
            EngineState::GameOver | EngineState::Won => Some(Self::Finished {
                score: snapshot.score,
                high_score: snapshot.high_score,
                won: snapshot.state == EngineState::Won,
            }),
            EngineState::Running => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Start { .. } => " start ",
            Self::Paused => " pause ",
            Self::Finished { won: true, .. } => " victory ",
            Self::Finished { won: false, .. } => " game over ",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Start { .. } => "SNAKE",
            Self::Paused => "PAUSED",
            Self::Finished { won: true, .. } => "BOARD CLEARED",
            Self::Finished { won: false, .. } => "GAME OVER",
        }
    }

    fn body(self) -> Vec<Line<'static>> {
        match self {
            Self::Start { high_score } => vec![
                Line::from(format!("High score: {high_score}")),
                Line::from("[Enter]/[Space] Start  [Q] Quit"),
            ],
            Self::Paused => vec![
                Line::from("[P]/[Esc] Resume"),
                Line::from("[R] Restart  [Q] Quit"),
            ],
            Self::Finished {
                score, high_score, ..
            } => {
                let mut lines = vec![Line::from(format!("Score: {score}  Best: {high_score}"))];
                // The engine raises the best score while eating, so a tie
                // with a non-zero score means this game set it.
                if score > 0 && score == high_score {
                    lines.push(Line::from("New high score!"));
                }
                lines.push(Line::from("[Enter]/[R] Play again  [Q] Quit"));
                lines
            }
        }
    }
}

/// Draws `overlay` centered in `area`, clearing whatever is beneath it.
pub fn render_overlay(frame: &mut Frame<'_>, area: Rect, overlay: Overlay, theme: &Theme) {
    let mut lines = vec![
        Line::styled(
            overlay.heading(),
            Style::new()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::default(),
    ];
    lines.extend(overlay.body());
    if matches!(overlay, Overlay::Start { .. }) {
        lines.push(Line::styled(
            "Arrows/WASD to move",
            Style::new().fg(theme.menu_footer),
        ));
    }

    // Borders take two rows.
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered(area, 80, height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(overlay.title())),
        popup,
    );
}

fn centered(area: Rect, width_percent: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
