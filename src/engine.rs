use std::mem;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};

use crate::clock::{ClockEvent, Elapsed, GameClock};
use crate::config::{SCORE_PER_FOOD, START_HEADING, START_POSITION};
use crate::error::{ConfigError, StepError};
use crate::food;
use crate::grid::{GridSize, Position};
use crate::input::{Direction, DirectionController};
use crate::score::{HighScore, ScoreStore};
use crate::snake::Snake;
use crate::speed::tick_interval_for_score;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EngineState {
    /// Created, not yet started.
    Idle,
    Running,
    Paused,
    /// The snake left the grid.
    GameOver,
    /// The snake filled the grid and no food can be placed.
    Won,
}

impl EngineState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// Notifications for the presentation layer, drained with
/// [`GameEngine::take_events`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EngineEvent {
    Tick {
        snake: Vec<Position>,
        food: Option<Position>,
    },
    ScoreChanged {
        score: u32,
        high_score: u32,
    },
    TimeChanged {
        min: u32,
        sec: u8,
    },
    PauseStateChanged {
        paused: bool,
    },
    GameOver,
    Won,
}

/// Read-only view of the engine for renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: GridSize,
    pub snake: &'a Snake,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub elapsed: Elapsed,
    pub state: EngineState,
    pub tick_interval: Duration,
}

/// Owns all state for one play session and applies the rules on each tick.
#[derive(Debug)]
pub struct GameEngine<S, R = StdRng> {
    grid: GridSize,
    snake: Snake,
    controller: DirectionController,
    food: Option<Position>,
    score: u32,
    high_score: HighScore,
    clock: GameClock,
    state: EngineState,
    store: S,
    rng: R,
    events: Vec<EngineEvent>,
}

impl<S: ScoreStore> GameEngine<S, StdRng> {
    /// Creates an idle engine with an entropy-seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the start cell does not fit in `grid`.
    pub fn new(grid: GridSize, store: S) -> Result<Self, ConfigError> {
        Self::with_rng(grid, store, StdRng::from_entropy())
    }

    /// Creates an idle engine whose food placement is reproducible.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the start cell does not fit in `grid`.
    pub fn with_seed(grid: GridSize, store: S, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(grid, store, StdRng::seed_from_u64(seed))
    }
}

impl<S: ScoreStore, R: Rng> GameEngine<S, R> {
    /// Creates an idle engine drawing food positions from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the start cell does not fit in `grid`.
    pub fn with_rng(grid: GridSize, store: S, rng: R) -> Result<Self, ConfigError> {
        if !grid.is_inside(START_POSITION) {
            return Err(ConfigError::StartOutsideGrid {
                row: START_POSITION.row,
                col: START_POSITION.col,
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        let high_score = HighScore::load(&store);
        let mut engine = Self {
            grid,
            snake: Snake::new(START_POSITION),
            controller: DirectionController::new(START_HEADING),
            food: None,
            score: 0,
            high_score,
            clock: GameClock::new(),
            state: EngineState::Idle,
            store,
            rng,
            events: Vec::new(),
        };
        engine.reset_round();
        Ok(engine)
    }

    /// Begins the first game. Ignored unless the engine is idle.
    pub fn start(&mut self, now: Instant) {
        if self.state == EngineState::Idle {
            self.begin(now);
        }
    }

    /// Discards the current game and starts a fresh one.
    pub fn restart(&mut self, now: Instant) {
        self.begin(now);
    }

    /// Stops both timers. No-op unless running.
    pub fn pause(&mut self) {
        if self.state != EngineState::Running {
            return;
        }
        self.clock.pause();
        self.state = EngineState::Paused;
        debug!("paused");
        self.events.push(EngineEvent::PauseStateChanged { paused: true });
    }

    /// Restarts both timers at the current speed. No-op unless paused.
    pub fn resume(&mut self, now: Instant) {
        if self.state != EngineState::Paused {
            return;
        }
        self.clock.resume(now);
        self.state = EngineState::Running;
        debug!("resumed");
        self.events.push(EngineEvent::PauseStateChanged { paused: false });
    }

    /// Pauses a running game or resumes a paused one.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state {
            EngineState::Running => self.pause(),
            EngineState::Paused => self.resume(now),
            _ => {}
        }
    }

    /// Requests a heading change for the next tick. Returns whether the
    /// request was accepted; reversals and input outside play are dropped.
    pub fn set_heading(&mut self, heading: Direction) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        self.controller.set_heading(heading, self.snake.len())
    }

    /// Places the food at `position`, replacing the current one. Returns
    /// `false` and changes nothing if the cell is outside the grid or under
    /// the snake.
    pub fn force_food(&mut self, position: Position) -> bool {
        if !self.grid.is_inside(position) || self.snake.occupies(position) {
            return false;
        }
        self.food = Some(position);
        true
    }

    /// Runs every timer event due at `now`.
    pub fn advance_clock(&mut self, now: Instant) {
        while let Some(event) = self.clock.poll(now) {
            match event {
                ClockEvent::Tick => self.step(now),
                ClockEvent::Second => {
                    let Elapsed { min, sec } = self.clock.elapsed();
                    self.events.push(EngineEvent::TimeChanged { min, sec });
                }
            }
        }
    }

    /// Applies one tick. An internal fault ends the game instead of leaving
    /// half-applied state behind.
    pub fn step(&mut self, now: Instant) {
        if self.state != EngineState::Running {
            return;
        }
        if let Err(error) = self.try_step(now) {
            error!(%error, "tick failed");
            self.finish(EngineState::GameOver);
        }
    }

    fn try_step(&mut self, now: Instant) -> Result<(), StepError> {
        let heading = self.controller.take_for_tick();
        let next = self.snake.peek_next_head(heading);

        if !self.grid.is_inside(next) {
            debug!(row = next.row, col = next.col, "hit wall");
            self.finish(EngineState::GameOver);
            return Ok(());
        }

        let grow = self.food == Some(next);
        let score = if grow {
            self.score
                .checked_add(SCORE_PER_FOOD)
                .ok_or(StepError::ScoreOverflow {
                    score: self.score,
                    increment: SCORE_PER_FOOD,
                })?
        } else {
            self.score
        };

        self.snake.advance(next, grow);
        if grow {
            self.eat(score, now);
        }
        self.push_tick();

        if self.food.is_none() {
            self.finish(EngineState::Won);
        }
        Ok(())
    }

    fn eat(&mut self, score: u32, now: Instant) {
        self.food = food::spawn(&mut self.rng, self.grid, &self.snake);
        self.score = score;
        self.high_score.record(score, &mut self.store);

        let interval = tick_interval_for_score(score);
        if interval != self.clock.tick_interval() {
            debug!(score, ?interval, "speed up");
        }
        self.clock.retune(interval, now);

        debug!(score, length = self.snake.len(), "ate food");
        self.events.push(EngineEvent::ScoreChanged {
            score,
            high_score: self.high_score.value(),
        });
    }

    fn begin(&mut self, now: Instant) {
        self.reset_round();
        self.clock.start(now);
        self.state = EngineState::Running;
        info!(rows = self.grid.rows, cols = self.grid.cols, "game started");

        self.events.push(EngineEvent::ScoreChanged {
            score: 0,
            high_score: self.high_score.value(),
        });
        self.events.push(EngineEvent::TimeChanged { min: 0, sec: 0 });
        self.push_tick();
    }

    fn reset_round(&mut self) {
        self.clock.reset();
        self.snake = Snake::new(START_POSITION);
        self.controller = DirectionController::new(START_HEADING);
        self.score = 0;
        self.food = food::spawn(&mut self.rng, self.grid, &self.snake);
    }

    fn finish(&mut self, state: EngineState) {
        self.clock.pause();
        self.state = state;
        info!(score = self.score, length = self.snake.len(), ?state, "game finished");
        self.events.push(match state {
            EngineState::Won => EngineEvent::Won,
            _ => EngineEvent::GameOver,
        });
    }

    fn push_tick(&mut self) {
        self.events.push(EngineEvent::Tick {
            snake: self.snake.to_vec(),
            food: self.food,
        });
    }
}

impl<S, R> GameEngine<S, R> {
    /// Removes and returns the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        mem::take(&mut self.events)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
            score: self.score,
            high_score: self.high_score.value(),
            elapsed: self.clock.elapsed(),
            state: self.state,
            tick_interval: self.clock.tick_interval(),
        }
    }

    /// Returns the next instant at which [`GameEngine::advance_clock`] has
    /// work to do, if any timer is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.clock.next_deadline()
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score.value()
    }

    /// Heading the next tick will move in.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.controller.effective_heading()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.clock.tick_interval()
    }

    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        self.clock.elapsed()
    }
}
