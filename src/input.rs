use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::SWIPE_THRESHOLD;
use crate::grid::Position;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns the cell one step from `head` in `heading`.
#[must_use]
pub fn compute_next_head(heading: Direction, head: Position) -> Position {
    match heading {
        Direction::Up => Position::new(head.row - 1, head.col),
        Direction::Down => Position::new(head.row + 1, head.col),
        Direction::Left => Position::new(head.row, head.col - 1),
        Direction::Right => Position::new(head.row, head.col + 1),
    }
}

/// Returns whether a heading change is legal for a snake of `snake_len`
/// segments. A single segment has no body to reverse into.
#[must_use]
pub fn heading_change_is_valid(current: Direction, next: Direction, snake_len: usize) -> bool {
    snake_len <= 1 || next != current.opposite()
}

/// High-level commands the presentation layer sends to the engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    Confirm,
    Quit,
}

impl GameInput {
    /// Maps a key press to a command. Shift is ignored so that caps lock
    /// does not disable WASD.
    #[must_use]
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        let modifiers = event.modifiers - KeyModifiers::SHIFT;
        match (modifiers, event.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Self::Quit),
            (KeyModifiers::NONE, code) => match code {
                KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => {
                    Some(Self::Direction(Direction::Up))
                }
                KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => {
                    Some(Self::Direction(Direction::Down))
                }
                KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => {
                    Some(Self::Direction(Direction::Left))
                }
                KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => {
                    Some(Self::Direction(Direction::Right))
                }
                KeyCode::Enter | KeyCode::Char(' ') => Some(Self::Confirm),
                KeyCode::Esc | KeyCode::Char('p' | 'P') => Some(Self::Pause),
                KeyCode::Char('r' | 'R') => Some(Self::Restart),
                KeyCode::Char('q' | 'Q') => Some(Self::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Collects heading requests between ticks.
///
/// Requests are validated against the heading the snake actually moved in on
/// the last tick, and only the most recent valid one survives until the next
/// tick consumes it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionController {
    heading: Direction,
    pending: Option<Direction>,
}

impl DirectionController {
    #[must_use]
    pub fn new(heading: Direction) -> Self {
        Self {
            heading,
            pending: None,
        }
    }

    /// Heading used by the most recent tick.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Heading the next tick will use.
    #[must_use]
    pub fn effective_heading(&self) -> Direction {
        self.pending.unwrap_or(self.heading)
    }

    /// Queues `requested` for the next tick. Returns `false` (and leaves the
    /// queue untouched) when the request would reverse the snake.
    pub fn set_heading(&mut self, requested: Direction, snake_len: usize) -> bool {
        if !heading_change_is_valid(self.heading, requested, snake_len) {
            return false;
        }
        self.pending = Some(requested);
        true
    }

    /// Applies the pending request, if any, and returns the heading for this
    /// tick.
    pub fn take_for_tick(&mut self) -> Direction {
        if let Some(next) = self.pending.take() {
            self.heading = next;
        }
        self.heading
    }
}

/// Touch gesture delta between the start and end contact points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub dx: f32,
    pub dy: f32,
}

impl Swipe {
    #[must_use]
    pub fn new(start: (f32, f32), end: (f32, f32)) -> Self {
        Self {
            dx: end.0 - start.0,
            dy: end.1 - start.1,
        }
    }

    /// Maps the gesture to a heading along its dominant axis. Movements
    /// shorter than [`SWIPE_THRESHOLD`] on both axes are noise.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        if self.dx.abs() < SWIPE_THRESHOLD && self.dy.abs() < SWIPE_THRESHOLD {
            return None;
        }
        if self.dx.abs() > self.dy.abs() {
            if self.dx > 0.0 {
                Some(Direction::Right)
            } else {
                Some(Direction::Left)
            }
        } else if self.dy > 0.0 {
            Some(Direction::Down)
        } else if self.dy < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}
