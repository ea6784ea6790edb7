use std::time::{Duration, Instant};

use grid_snake::engine::{EngineEvent, EngineState, GameEngine};
use grid_snake::grid::{GridSize, Position};
use grid_snake::input::Direction;
use grid_snake::score::{FileStore, MemoryStore, ScoreStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn started(rows: u16, cols: u16, seed: u64) -> (GameEngine<MemoryStore>, Instant) {
    let grid = GridSize::new(rows, cols).expect("grid should be valid");
    let mut engine =
        GameEngine::with_seed(grid, MemoryStore::new(), seed).expect("start cell should fit");
    let now = Instant::now();
    engine.start(now);
    (engine, now)
}

fn eat_at<S: ScoreStore>(engine: &mut GameEngine<S>, food: Position, now: Instant) {
    assert!(engine.force_food(food), "food cell should be free");
    engine.step(now);
    assert_eq!(engine.snake().head(), food);
}

#[test]
fn two_steps_right_collect_food() {
    let (mut engine, now) = started(10, 10, 1);
    assert!(engine.force_food(Position::new(1, 5)));

    engine.step(now);
    assert_eq!(engine.snake().head(), Position::new(1, 4));
    assert_eq!(engine.score(), 0);

    engine.step(now);
    assert_eq!(engine.state(), EngineState::Running);
    assert_eq!(engine.snake().head(), Position::new(1, 5));
    assert_eq!(engine.snake().len(), 2);
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.high_score(), 10);
    assert_ne!(engine.food(), None);
}

#[test]
fn leaving_the_top_edge_ends_the_game() {
    let (mut engine, now) = started(10, 10, 2);
    engine.take_events();

    assert!(engine.set_heading(Direction::Up));
    engine.step(now);
    assert_eq!(engine.snake().head(), Position::new(0, 3));
    assert_eq!(engine.state(), EngineState::Running);

    engine.step(now);
    assert_eq!(engine.state(), EngineState::GameOver);
    assert_eq!(engine.snake().head(), Position::new(0, 3));
    assert_eq!(engine.next_deadline(), None);

    let events = engine.take_events();
    assert_eq!(events.last(), Some(&EngineEvent::GameOver));

    // Further ticks and input are ignored once the game is over.
    engine.step(now);
    assert!(!engine.set_heading(Direction::Left));
    assert!(engine.take_events().is_empty());
}

#[test]
fn eating_speeds_up_at_score_tiers() {
    let (mut engine, now) = started(10, 10, 3);
    assert_eq!(engine.tick_interval(), Duration::from_millis(400));

    eat_at(&mut engine, Position::new(1, 4), now);
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.tick_interval(), Duration::from_millis(400));

    eat_at(&mut engine, Position::new(1, 5), now);
    assert_eq!(engine.score(), 20);
    assert_eq!(engine.tick_interval(), Duration::from_millis(350));

    eat_at(&mut engine, Position::new(1, 6), now);
    assert_eq!(engine.score(), 30);
    assert_eq!(engine.tick_interval(), Duration::from_millis(350));
    assert_eq!(engine.snake().len(), 4);
}

#[test]
fn reversal_is_rejected_once_the_snake_has_a_body() {
    let (mut engine, now) = started(10, 10, 4);
    eat_at(&mut engine, Position::new(1, 4), now);
    eat_at(&mut engine, Position::new(1, 5), now);
    assert_eq!(engine.snake().len(), 3);

    assert!(!engine.set_heading(Direction::Left));
    assert_eq!(engine.heading(), Direction::Right);

    engine.step(now);
    assert_eq!(engine.snake().head(), Position::new(1, 6));
}

#[test]
fn single_segment_snake_may_turn_around() {
    let (mut engine, now) = started(10, 10, 5);
    assert!(engine.set_heading(Direction::Left));
    engine.step(now);
    assert_eq!(engine.snake().head(), Position::new(1, 2));
}

#[test]
fn high_score_survives_restart_and_reload() {
    let dir = tempfile::tempdir().expect("tempdir should be creatable");
    let path = dir.path().join("scores.json");
    let grid = GridSize::new(10, 10).expect("grid should be valid");
    let now = Instant::now();

    let mut engine = GameEngine::with_seed(grid, FileStore::new(path.clone()), 6)
        .expect("start cell should fit");
    engine.start(now);
    eat_at(&mut engine, Position::new(1, 4), now);
    eat_at(&mut engine, Position::new(1, 5), now);
    assert_eq!(engine.high_score(), 20);

    engine.restart(now);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.snake().len(), 1);
    eat_at(&mut engine, Position::new(1, 4), now);
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.high_score(), 20);

    let reloaded =
        GameEngine::with_seed(grid, FileStore::new(path), 7).expect("start cell should fit");
    assert_eq!(reloaded.high_score(), 20);
    assert_eq!(reloaded.state(), EngineState::Idle);
}

#[test]
fn pause_and_resume_are_idempotent() {
    let (mut engine, now) = started(10, 10, 8);
    engine.take_events();

    engine.pause();
    engine.pause();
    assert_eq!(engine.state(), EngineState::Paused);
    assert_eq!(engine.next_deadline(), None);
    assert_eq!(
        engine.take_events(),
        vec![EngineEvent::PauseStateChanged { paused: true }]
    );

    engine.step(now);
    assert_eq!(engine.snake().head(), Position::new(1, 3));

    engine.resume(now);
    engine.resume(now);
    assert_eq!(engine.state(), EngineState::Running);
    assert_eq!(
        engine.take_events(),
        vec![EngineEvent::PauseStateChanged { paused: false }]
    );
    assert_eq!(engine.next_deadline(), Some(now + Duration::from_millis(400)));
}

#[test]
fn wall_clock_drives_ticks_and_elapsed_time() {
    let (mut engine, start) = started(10, 10, 9);
    engine.take_events();

    engine.advance_clock(start + Duration::from_millis(399));
    assert_eq!(engine.snake().head(), Position::new(1, 3));

    engine.advance_clock(start + Duration::from_millis(400));
    assert_eq!(engine.snake().head(), Position::new(1, 4));

    engine.advance_clock(start + Duration::from_millis(1000));
    assert_eq!(engine.snake().head(), Position::new(1, 5));
    assert_eq!(engine.elapsed().to_string(), "0-1");

    let events = engine.take_events();
    let ticks = events
        .iter()
        .filter(|event| matches!(event, EngineEvent::Tick { .. }))
        .count();
    assert_eq!(ticks, 2);
    assert!(events.contains(&EngineEvent::TimeChanged { min: 0, sec: 1 }));
}

#[test]
fn random_play_keeps_board_consistent() {
    let mut choices = StdRng::seed_from_u64(2024);
    let directions = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    for seed in 0..20 {
        let (mut engine, now) = started(6, 8, seed);
        let grid = engine.grid();

        for _ in 0..300 {
            if engine.state().is_terminal() {
                engine.restart(now);
            }
            let direction = directions[choices.gen_range(0..directions.len())];
            let _ = engine.set_heading(direction);
            engine.step(now);

            let snake = engine.snake();
            assert!(snake.segments().all(|segment| grid.is_inside(*segment)));
            if let Some(food) = engine.food() {
                assert!(grid.is_inside(food));
                assert!(!snake.occupies(food));
            }
            assert_eq!(engine.score() % 10, 0);
            assert_eq!(engine.score() as usize, (snake.len() - 1) * 10);
            assert!(engine.high_score() >= engine.score());
        }
    }
}
