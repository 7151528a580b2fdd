//! Engine tests - tick order, row clears, scoring, speed and game over

use blockfall::core::{ActivePiece, EngineConfig, GameEngine, Grid};
use blockfall::types::{GameAction, PieceKind, Status};

fn row(y: i16, width: u16) -> Vec<(i16, i16)> {
    (0..width as i16).map(|x| (x, y)).collect()
}

#[test]
fn test_locked_bottom_row_is_cleared_on_next_tick() {
    let mut engine = GameEngine::new(EngineConfig::with_size(4, 4), 9).unwrap();
    assert!(engine.insert_locked(&row(3, 4), PieceKind::I));
    let anchor = engine.active().unwrap().anchor();

    assert!(engine.tick());

    assert_eq!(engine.score(), 4);
    assert_eq!(engine.lines(), 1);
    assert_eq!(engine.tick_interval_ms(), 910);
    assert_eq!(engine.grid().filled_count(), 0);
    for y in 0..4 {
        assert!(!engine.grid().is_row_complete(y));
    }
    // The clear ran first, then the piece stepped down.
    assert_eq!(engine.active().unwrap().anchor(), (anchor.0, anchor.1 + 1));
}

#[test]
fn test_move_left_until_wall() {
    let mut engine = GameEngine::default();
    assert!(engine.set_active(ActivePiece::new(PieceKind::O, (2, 0))));

    while engine.move_left() {}

    assert_eq!(engine.active().unwrap().anchor(), (0, 0));
    assert!(!engine.move_left());
    assert_eq!(engine.active().unwrap().anchor(), (0, 0));
}

#[test]
fn test_square_rotate_keeps_cells() {
    let mut engine = GameEngine::default();
    assert!(engine.set_active(ActivePiece::new(PieceKind::O, (5, 3))));
    let cells = engine.active().unwrap().occupied_cells();

    engine.rotate();

    let active = engine.active().unwrap();
    assert_eq!(active.orientation(), 0);
    assert_eq!(active.occupied_cells(), cells);
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let mut grid = Grid::new(15, 30);
    for x in 0..15 {
        grid.set(x, 0, Some(PieceKind::Z)).unwrap();
        grid.set(x, 1, Some(PieceKind::Z)).unwrap();
    }

    let mut engine = GameEngine::with_grid(EngineConfig::default(), 1, grid).unwrap();

    assert_eq!(engine.status(), Status::GameOver);
    assert!(engine.active().is_none());

    // Sticky until restart.
    assert!(!engine.tick());
    assert!(!engine.move_left());
    assert!(!engine.hard_drop());
    assert!(!engine.pause());
    assert_eq!(engine.status(), Status::GameOver);

    engine.restart();
    assert_eq!(engine.status(), Status::Running);
    assert!(engine.active().is_some());
    assert_eq!(engine.grid().filled_count(), 0);
}

#[test]
fn test_simultaneous_rows_score_width_each() {
    let mut engine = GameEngine::default();
    assert!(engine.insert_locked(&row(29, 15), PieceKind::I));
    assert!(engine.insert_locked(&[(0, 28), (3, 28)], PieceKind::T));
    assert!(engine.insert_locked(&row(27, 15), PieceKind::L));
    assert!(engine.insert_locked(&row(26, 15), PieceKind::S));

    engine.tick();

    assert_eq!(engine.score(), 3 * 15);
    assert_eq!(engine.lines(), 3);
    assert_eq!(engine.tick_interval_ms(), 1000 - 3 * 90);
    // The partial row fell to the floor.
    assert_eq!(engine.grid().filled_count(), 2);
    assert_eq!(engine.grid().get(3, 29), Ok(Some(PieceKind::T)));

    let ev = engine.take_last_event().unwrap();
    assert_eq!(ev.lines_cleared, 3);
    assert_eq!(ev.line_clear_score, 45);
}

#[test]
fn test_tick_interval_never_below_minimum() {
    let mut engine = GameEngine::default();
    for y in 16..30 {
        assert!(engine.insert_locked(&row(y, 15), PieceKind::J));
    }

    engine.tick();

    assert_eq!(engine.lines(), 14);
    assert_eq!(engine.tick_interval_ms(), 100);

    assert!(engine.insert_locked(&row(29, 15), PieceKind::J));
    engine.tick();
    assert_eq!(engine.tick_interval_ms(), 100);
}

#[test]
fn test_hard_drop_locks_and_spawns() {
    let mut engine = GameEngine::default();
    let episode = engine.episode_id();

    assert!(engine.apply_action(GameAction::HardDrop));

    assert_eq!(engine.grid().filled_count(), 4);
    let active = engine.active().unwrap();
    assert_eq!(active.anchor(), (5, 0));
    assert_eq!(active.orientation(), 0);
    assert_eq!(engine.episode_id(), episode);
    assert!(engine.take_last_event().unwrap().locked);
}

#[test]
fn test_row_completed_by_hard_drop_clears_on_next_tick() {
    let mut engine = GameEngine::default();
    // Flat I covering columns 5..=8 lands in the gap of the bottom row.
    assert!(engine.set_active(ActivePiece::new(PieceKind::I, (5, 0))));
    let gapped: Vec<_> = row(29, 15)
        .into_iter()
        .filter(|&(x, _)| !(5..9).contains(&x))
        .collect();
    assert!(engine.insert_locked(&gapped, PieceKind::Z));

    assert!(engine.hard_drop());

    assert!(engine.grid().is_row_complete(29));
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.lines(), 0);

    assert!(engine.tick());

    assert_eq!(engine.score(), 15);
    assert_eq!(engine.lines(), 1);
    assert!(!engine.grid().is_row_complete(29));
    assert_eq!(engine.grid().filled_count(), 0);
}

#[test]
fn test_pieces_descend_and_stack_until_game_over() {
    let mut engine = GameEngine::new(EngineConfig::with_size(6, 8), 2024).unwrap();

    for _ in 0..10_000 {
        if engine.status().is_game_over() {
            break;
        }
        engine.tick();
    }

    assert_eq!(engine.status(), Status::GameOver);
    assert!(engine.active().is_none());
    assert!(engine.grid().filled_count() > 0);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameEngine::new(EngineConfig::default(), 77).unwrap();
    let mut b = GameEngine::new(EngineConfig::default(), 77).unwrap();

    for i in 0..50 {
        let action = match i % 4 {
            0 => GameAction::MoveLeft,
            1 => GameAction::Rotate,
            2 => GameAction::MoveRight,
            _ => GameAction::HardDrop,
        };
        a.apply_action(action);
        b.apply_action(action);
        a.tick();
        b.tick();
    }

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_restart_keeps_top_score() {
    let mut engine = GameEngine::default();
    assert!(engine.insert_locked(&row(29, 15), PieceKind::I));
    engine.tick();
    assert_eq!(engine.top_score(), 15);

    assert!(engine.apply_action(GameAction::Restart));

    assert_eq!(engine.score(), 0);
    assert_eq!(engine.lines(), 0);
    assert_eq!(engine.top_score(), 15);
    assert_eq!(engine.tick_interval_ms(), 1000);
    assert_eq!(engine.status(), Status::Running);
}

#[test]
fn test_paused_engine_is_frozen() {
    let mut engine = GameEngine::default();
    assert!(engine.apply_action(GameAction::Pause));
    let before = engine.snapshot();

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
        GameAction::HardDrop,
    ] {
        assert!(!engine.apply_action(action));
    }
    assert!(!engine.tick());
    assert_eq!(engine.snapshot(), before);

    assert!(engine.apply_action(GameAction::Resume));
    assert_eq!(engine.status(), Status::Running);
}
