use std::collections::HashSet;

use rand::Rng;

use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// Picks a free cell for the next food.
///
/// Samples uniformly over the whole grid and resamples while the snake
/// occupies the sample. Returns `None` without sampling when the snake covers
/// every cell, since no free cell exists.
#[must_use]
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Option<Position> {
    let occupied: HashSet<Position> = snake
        .segments()
        .copied()
        .filter(|p| grid.is_inside(*p))
        .collect();
    if occupied.len() >= grid.total_cells() {
        return None;
    }

    loop {
        let candidate = Position::new(
            rng.gen_range(0..i32::from(grid.rows)),
            rng.gen_range(0..i32::from(grid.cols)),
        );
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }
}
