//! Ghost projection - where the active piece would rest if dropped now
//!
//! The ghost covers the cells the live piece would cover after dropping by
//! whole levels. Its reported `y` is not the live `y` minus those levels: it is
//! the live `y` rounded up first, so the ghost always sits on a whole level.

use crate::field::Field;
use crate::piece::Piece;

/// Resting copy of `piece`, the live piece is never touched.
///
/// The copy is snapped up onto whole levels first, so the ghost lines up with
/// the cells the piece occupies right now. It then descends one level at a
/// time until the next level down would land it. A piece already in contact
/// projects onto itself with zero iterations.
pub fn project(piece: &Piece, field: &Field) -> Piece {
    let mut ghost = *piece;
    ghost.position.y = ghost.position.y.ceil();

    loop {
        let mut lower = ghost;
        lower.position.y -= 1.0;
        if lower.detect_collision(field, 0.0) {
            return ghost;
        }
        ghost = lower;
    }
}
