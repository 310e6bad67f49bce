//! End-to-end session flows: falling, landing, clearing, game over and steering

use beyond_tetris::core::{Field, GameConfig, GameState, PieceGenerator};
use beyond_tetris::term::{Rect, TopDownCamera};
use beyond_tetris::types::{Axis, GameAction, MoveDirection, PieceKind, TICK_MS};
use glam::Vec3;

fn scripted(config: GameConfig, kinds: &[PieceKind]) -> GameState {
    GameState::with_generator(config, PieceGenerator::scripted(kinds.to_vec()))
}

/// Tick until the active piece lands, panics after `limit` ticks
fn run_until_landed(game: &mut GameState, limit: u32) -> u32 {
    for n in 1..=limit {
        if game.tick(TICK_MS) {
            return n;
        }
    }
    panic!("piece did not land within {limit} ticks");
}

#[test]
fn test_piece_falls_to_the_floor_of_a_tall_well() {
    let mut game = scripted(GameConfig::with_dimensions(15, 4, 4), &[PieceKind::I]);
    let spawned = game.current().unwrap();
    assert_eq!(spawned.position, Vec3::new(1.0, 14.0, 1.0));

    run_until_landed(&mut game, 2_000);

    let field = game.field();
    for level in 0..4 {
        assert_eq!(field.get(level, 1, 1), Some(Some(PieceKind::I)), "level {level}");
    }
    assert_eq!(field.column_height(1, 1), 4);
    assert_eq!(game.pieces_placed(), 1);
    assert_eq!(game.score(), 1);
    assert!(game.fall_speed() > game.config().base_fall_speed);

    // the next piece is already falling from the top
    assert_eq!(game.current().unwrap().highest_level(), 14);
}

#[test]
fn test_filling_the_gap_clears_the_level() {
    let mut field = Field::new(10, 4, 4);
    field.set(0, 1, 1, Some(PieceKind::O));
    field.set(1, 1, 1, Some(PieceKind::O));
    field.fill_level(2, PieceKind::T);
    field.set(2, 1, 1, None);

    let mut game = GameState::with_field(
        GameConfig::default(),
        PieceGenerator::scripted(vec![PieceKind::I]),
        field,
    );
    assert_eq!(game.config().num_levels, 10);
    assert_eq!(game.current().unwrap().position, Vec3::new(1.0, 9.0, 1.0));

    run_until_landed(&mut game, 2_000);

    assert_eq!(game.levels_cleared(), 1);
    assert_eq!(game.score(), 11);

    let field = game.field();
    assert_eq!(field.get(0, 1, 1), Some(Some(PieceKind::O)));
    assert_eq!(field.get(1, 1, 1), Some(Some(PieceKind::O)));
    for level in 2..5 {
        assert_eq!(field.get(level, 1, 1), Some(Some(PieceKind::I)), "level {level}");
    }
    // the rest of the old level 2 is gone
    assert_eq!(field.level(2).iter().filter(|c| c.is_some()).count(), 1);
    assert!(!game.game_over());
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    let mut field = Field::new(8, 6, 6);
    field.fill_level(7, PieceKind::L);

    let mut game = GameState::with_field(GameConfig::default(), PieceGenerator::default(), field);
    assert!(game.game_over());
    assert!(game.current().is_none());
    assert!(!game.tick(TICK_MS));
    assert!(!game.apply_action(GameAction::Move(MoveDirection::Left)));
    assert!(!game.apply_action(GameAction::Pause));

    let snap = game.snapshot();
    assert!(snap.game_over);
    assert!(snap.active.is_none());
    assert!(snap.ghost.is_none());

    assert!(game.apply_action(GameAction::Restart));
    assert!(!game.game_over());
    assert!(game.current().is_some());
    assert_eq!(game.episode_id(), 1);
    assert!(game.field().cells().iter().all(Option::is_none));
}

#[test]
fn test_stacking_until_game_over() {
    let mut game = scripted(GameConfig::with_dimensions(6, 3, 3), &[PieceKind::I]);
    game.set_drop_multiplier(10.0);

    let mut landed = 0;
    while !game.game_over() {
        run_until_landed(&mut game, 2_000);
        landed += 1;
        assert!(landed < 10, "the well should fill up");
    }
    assert_eq!(game.pieces_placed(), landed);
    assert!(game.current().is_none());
}

#[test]
fn test_intents_resolve_on_the_next_tick() {
    let mut game = scripted(GameConfig::default(), &[PieceKind::I]);
    let start = game.current().unwrap().position;

    assert!(game.apply_action(GameAction::Move(MoveDirection::Forward)));
    assert_eq!(game.current().unwrap().position, start);

    game.tick(TICK_MS);
    let moved = game.current().unwrap().position;
    assert_eq!(moved.z, start.z + 1.0);
    assert_eq!(moved.x, start.x);

    assert!(game.apply_action(GameAction::Rotate(Axis::Z)));
    game.tick(TICK_MS);
    let piece = game.current().unwrap();
    // a vertical bar turned about z lies flat
    assert!(piece.offsets.iter().all(|o| o.y == piece.offsets[0].y));
}

#[test]
fn test_pause_holds_everything() {
    let mut game = GameState::default();
    let before = game.current().unwrap();

    game.apply_action(GameAction::Pause);
    game.apply_action(GameAction::Move(MoveDirection::Left));
    for _ in 0..10 {
        assert!(!game.tick(TICK_MS));
    }
    assert_eq!(game.current().unwrap(), before);
    assert!(game.snapshot().paused);

    game.apply_action(GameAction::Pause);
    game.tick(TICK_MS);
    assert!(game.current().unwrap().position.y < before.position.y);
}

#[test]
fn test_drop_multiplier_speeds_up_the_fall() {
    let mut game = GameState::default();
    let normal = game.fall_step(TICK_MS);

    game.set_drop_multiplier(10.0);
    assert_eq!(game.fall_step(TICK_MS), normal * 10.0);

    game.set_drop_multiplier(0.2);
    assert_eq!(game.fall_step(TICK_MS), normal);
}

#[test]
fn test_ghost_is_a_projection_only() {
    let game = scripted(GameConfig::default(), &[PieceKind::T]);
    let current = game.current().unwrap();

    let ghost = game.ghost().unwrap();
    assert_eq!(ghost.lowest_level(), 0);
    assert_eq!(ghost.offsets, current.offsets);
    assert_eq!(ghost.position.x, current.position.x);
    assert_eq!(game.current().unwrap(), current);

    let snap = game.snapshot();
    assert_eq!(snap.ghost.map(|g| g.position[1]), Some(ghost.position.y));
}

#[test]
fn test_same_seed_same_session() {
    let config = GameConfig::default().with_seed(7);
    let mut a = GameState::new(config);
    let mut b = GameState::new(config);
    a.set_drop_multiplier(10.0);
    b.set_drop_multiplier(10.0);

    for _ in 0..1_500 {
        a.tick(TICK_MS);
        b.tick(TICK_MS);
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert!(a.pieces_placed() > 0);
}

#[test]
fn test_mouse_over_top_view_steers_the_piece() {
    let mut game = scripted(GameConfig::default(), &[PieceKind::O]);
    let rect = Rect {
        x: 10,
        y: 3,
        w: 12,
        h: 6,
    };
    let camera = TopDownCamera::new(game.config(), rect);

    game.set_pointer(camera.pointer(rect.x + 4 * 2, rect.y + 3));
    game.tick(TICK_MS);
    let piece = game.current().unwrap();
    assert_eq!((piece.position.x, piece.position.z), (4.0, 3.0));

    // an O over the last column would stick out, so the pointer is ignored
    game.set_pointer(camera.pointer(rect.x + 5 * 2, rect.y + 1));
    game.tick(TICK_MS);
    let piece = game.current().unwrap();
    assert_eq!((piece.position.x, piece.position.z), (4.0, 3.0));

    // the pointer is consumed by the tick that used it
    game.apply_action(GameAction::Move(MoveDirection::Left));
    game.tick(TICK_MS);
    assert_eq!(game.current().unwrap().position.x, 3.0);
}

#[test]
fn test_landing_with_a_cell_above_the_top_locks_out() {
    let mut field = Field::new(6, 4, 4);
    for level in 0..=2 {
        field.set(level, 1, 0, Some(PieceKind::T));
    }
    let mut game = GameState::with_field(
        GameConfig::default(),
        PieceGenerator::scripted(vec![PieceKind::I]),
        field,
    );

    // two quarter turns about Z stand the I on its head, one cell above the spawn
    for action in [
        GameAction::Rotate(Axis::Z),
        GameAction::Rotate(Axis::Z),
        GameAction::Move(MoveDirection::Left),
    ] {
        game.apply_action(action);
        game.tick(TICK_MS);
    }
    let piece = game.current().unwrap();
    assert_eq!(piece.position.x, 0.0);
    assert_eq!(piece.highest_level(), 6);

    run_until_landed(&mut game, 2_000);

    assert!(game.game_over());
    assert!(game.current().is_none());
    assert_eq!(game.pieces_placed(), 0);
    assert_eq!(game.field().cells().iter().flatten().count(), 3);
}

#[test]
fn test_resting_mouse_does_not_undo_key_moves() {
    let mut game = scripted(GameConfig::default(), &[PieceKind::O]);
    let rect = Rect {
        x: 10,
        y: 3,
        w: 12,
        h: 6,
    };
    let camera = TopDownCamera::new(game.config(), rect);

    // the runner hands over a pointer only on ticks that saw a mouse event
    let mut mouse = Some((rect.x + 4 * 2, rect.y + 3));
    let mut step = |game: &mut GameState, action: Option<GameAction>| {
        if let Some(action) = action {
            game.apply_action(action);
        }
        game.set_pointer(mouse.take().and_then(|(column, row)| camera.pointer(column, row)));
        game.tick(TICK_MS);
        game.current().unwrap().position.x
    };

    assert_eq!(step(&mut game, None), 4.0);
    assert_eq!(step(&mut game, Some(GameAction::Move(MoveDirection::Left))), 3.0);
    assert_eq!(step(&mut game, None), 3.0);
    assert_eq!(step(&mut game, None), 3.0);
}
