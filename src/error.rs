use std::io;

use thiserror::Error;

/// Startup configuration that leaves the game unplayable.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be non-zero (got {width}x{height})")]
    ZeroCellSize { width: u16, height: u16 },
    #[error("display area {width}x{height} holds no grid cells of size {cell_width}x{cell_height}")]
    EmptyGrid {
        width: u16,
        height: u16,
        cell_width: u16,
        cell_height: u16,
    },
    #[error("start cell ({row}, {col}) lies outside a {rows}x{cols} grid")]
    StartOutsideGrid {
        row: i32,
        col: i32,
        rows: u16,
        cols: u16,
    },
}

/// Failure reading or writing the persisted high score.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read score file")]
    Read(#[source] io::Error),
    #[error("failed to write score file")]
    Write(#[source] io::Error),
    #[error("failed to parse score file")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize scores")]
    Serialize(#[source] serde_json::Error),
    #[error("stored value {0:?} is not a score")]
    InvalidValue(String),
}

/// Internal fault raised while applying one tick.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum StepError {
    #[error("score overflowed adding {increment} to {score}")]
    ScoreOverflow { score: u32, increment: u32 },
}
