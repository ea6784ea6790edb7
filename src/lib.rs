//! Grid Snake: a tick-driven Snake simulation engine and a terminal front
//! end that drives it.
//!
//! The engine ([`engine::GameEngine`]) owns all game state and never touches
//! the terminal; presenters feed it commands and clock instants, then read
//! [`engine::EngineEvent`]s and [`engine::Snapshot`]s back out.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod speed;
pub mod terminal_runtime;
pub mod ui;
