use beyond_tetris::core::{GameConfig, GameSnapshot, GameState, PieceGenerator};
use beyond_tetris::term::{AnchorY, FrameBuffer, GameView, Viewport};
use beyond_tetris::types::{GameAction, PieceKind};

// Default 8x6x6 field in a 60x30 viewport:
// top frame at (23, 5) 14x8, front frame at (23, 14) 14x10, panel at x = 39.
const VP: Viewport = Viewport {
    width: 60,
    height: 30,
};

fn scripted_snapshot(kind: PieceKind) -> GameSnapshot {
    GameState::with_generator(
        GameConfig::default(),
        PieceGenerator::scripted(vec![kind]),
    )
    .snapshot()
}

fn row_text(fb: &FrameBuffer, y: u16, x: u16, len: u16) -> String {
    (x..x + len).map(|x| fb.get(x, y).unwrap().ch).collect()
}

#[test]
fn term_view_frames_both_projections() {
    let snap = scripted_snapshot(PieceKind::I);
    let fb = GameView::default().render(&snap, VP);

    assert_eq!(fb.get(23, 5).unwrap().ch, '┌');
    assert_eq!(fb.get(36, 5).unwrap().ch, '┐');
    assert_eq!(fb.get(23, 12).unwrap().ch, '└');
    assert_eq!(fb.get(23, 14).unwrap().ch, '┌');
    assert_eq!(fb.get(36, 23).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_active_piece_in_both_views() {
    let snap = scripted_snapshot(PieceKind::I);
    let fb = GameView::default().render(&snap, VP);

    // the vertical bar covers one column from above, two characters wide
    assert_eq!(fb.get(28, 8).unwrap().ch, '█');
    assert_eq!(fb.get(29, 8).unwrap().ch, '█');
    assert_eq!(fb.get(26, 8).unwrap().ch, '·');

    // front view: levels 7..=4 are the bar, levels 3..=0 its ghost
    for y in 15..19 {
        assert_eq!(fb.get(28, y).unwrap().ch, '█', "y {y}");
    }
    for y in 19..23 {
        assert_eq!(fb.get(28, y).unwrap().ch, '░', "y {y}");
    }
}

#[test]
fn term_view_labels_column_heights() {
    let mut snap = scripted_snapshot(PieceKind::O);
    snap.active = None;
    snap.ghost = None;
    snap.depth = None;
    snap.cells[(2 * 6) * 6] = PieceKind::L.id();

    let fb = GameView::default().render(&snap, VP);
    assert_eq!(fb.get(25, 6).unwrap().ch, '3');
    // front elevation draws level 2 five lines below its top edge
    assert_eq!(fb.get(24, 20).unwrap().ch, '█');
    assert_eq!(fb.get(24, 21).unwrap().ch, ' ');
}

#[test]
fn term_view_side_panel_shows_counters_and_next() {
    let snap = scripted_snapshot(PieceKind::Branch);
    let fb = GameView::default().render(&snap, VP);

    assert_eq!(row_text(&fb, 5, 39, 5), "SCORE");
    assert_eq!(fb.get(39, 6).unwrap().ch, '0');
    assert_eq!(row_text(&fb, 14, 39, 5), "SPEED");
    assert_eq!(row_text(&fb, 15, 39, 5), "0.040");
    assert_eq!(row_text(&fb, 17, 39, 4), "NEXT");
    assert_eq!(row_text(&fb, 18, 39, 6), "BRANCH");
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let mut game = GameState::default();
    game.apply_action(GameAction::Pause);
    let fb = GameView::default().render(&game.snapshot(), VP);
    assert_eq!(row_text(&fb, 9, 27, 6), "PAUSED");

    let mut snap = game.snapshot();
    snap.paused = false;
    snap.game_over = true;
    let fb = GameView::default().render(&snap, VP);
    assert_eq!(row_text(&fb, 9, 25, 9), "GAME OVER");
}

#[test]
fn term_view_top_anchor_starts_at_first_line() {
    let snap = scripted_snapshot(PieceKind::T);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let layout = view.layout(&snap, VP);
    assert_eq!(layout.top.y, 1);
    assert_eq!(layout.front.y, 10);

    let fb = view.render(&snap, VP);
    assert_eq!(fb.get(23, 0).unwrap().ch, '┌');
}
