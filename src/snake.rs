use std::collections::VecDeque;

use crate::grid::Position;
use crate::input::{Direction, compute_next_head};

/// Ordered snake body, front is head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            body: VecDeque::from([start]),
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // The body is never empty: both constructors guarantee a segment and
        // `advance` pushes before it pops.
        self.body[0]
    }

    /// Returns the cell the head would move to in `heading`.
    #[must_use]
    pub fn peek_next_head(&self, heading: Direction) -> Position {
        compute_next_head(heading, self.head())
    }

    /// Prepends `new_head`. Without `grow` the tail is dropped so the length
    /// is unchanged; with `grow` the old tail stays and the snake is one
    /// segment longer.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    ///
    /// The engine does not end the game on this; it is exposed for
    /// presenters that want to highlight the overlap.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Copies the body into a head-first vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Snake;
    use crate::grid::Position;
    use crate::input::Direction;

    fn three_long() -> Snake {
        Snake::from_segments(
            vec![
                Position::new(2, 4),
                Position::new(2, 3),
                Position::new(2, 2),
            ],
        )
        .expect("segments should be non-empty")
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Position::new(5, 5));

        let next = snake.peek_next_head(Direction::Right);
        snake.advance(next, false);

        assert_eq!(snake.head(), Position::new(5, 6));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let mut snake = three_long();

        snake.advance(Position::new(2, 5), true);

        assert_eq!(
            snake.to_vec(),
            vec![
                Position::new(2, 5),
                Position::new(2, 4),
                Position::new(2, 3),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn plain_move_drops_tail() {
        let mut snake = three_long();

        snake.advance(Position::new(1, 4), false);

        assert_eq!(
            snake.to_vec(),
            vec![
                Position::new(1, 4),
                Position::new(2, 4),
                Position::new(2, 3),
            ]
        );
        assert!(!snake.occupies(Position::new(2, 2)));
    }

    #[test]
    fn peek_does_not_mutate() {
        let snake = three_long();
        assert_eq!(snake.peek_next_head(Direction::Up), Position::new(1, 4));
        assert_eq!(snake.head(), Position::new(2, 4));
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert!(Snake::from_segments(Vec::new()).is_none());
    }

    #[test]
    fn head_overlap_is_detected() {
        let snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
                Position::new(1, 1),
            ],
        )
        .expect("segments should be non-empty");
        assert!(snake.head_overlaps_body());
        assert!(!three_long().head_overlaps_body());
    }
}
