//! Collision & bounds engine
//!
//! Pure functions over `(position, offsets)` pairs, so candidates can be
//! tested before they are committed to a piece.
//!
//! - [`check_bounds`]: horizontal footprint only, pieces may poke above the ceiling
//! - [`fix_bounds`]: one rigid shift per horizontal axis
//! - [`check_collision`]: `true` when the piece fits (no overlap, not below the floor)
//! - [`detect_collision`]: landing test one `lookahead` below the current position

use glam::{IVec3, Vec3};

use crate::field::Field;
use crate::piece::cells_at;

/// True if every cell lies in `[0, max_col) x [0, max_row)`.
///
/// The vertical axis is not constrained.
pub fn check_bounds(max_row: usize, max_col: usize, position: Vec3, offsets: &[IVec3; 4]) -> bool {
    cells_at(position, offsets).iter().all(|c| {
        c.x >= 0 && (c.x as usize) < max_col && c.z >= 0 && (c.z as usize) < max_row
    })
}

/// Shift `position` so the piece lies inside the horizontal footprint.
///
/// Each axis gets the single shift that brings the most out-of-range cell
/// exactly onto the edge; all four cells move together. When a piece is
/// wider than the field it is aligned to the low edge, which keeps the
/// correction idempotent.
pub fn fix_bounds(max_row: usize, max_col: usize, position: Vec3, offsets: &[IVec3; 4]) -> Vec3 {
    let cells = cells_at(position, offsets);

    let shift_x = axis_shift(cells.iter().map(|c| c.x), max_col as i32);
    let shift_z = axis_shift(cells.iter().map(|c| c.z), max_row as i32);

    position + Vec3::new(shift_x as f32, 0.0, shift_z as f32)
}

fn axis_shift(coords: impl Iterator<Item = i32> + Clone, limit: i32) -> i32 {
    let min = coords.clone().min().unwrap_or(0);
    let max = coords.max().unwrap_or(0);
    if min < 0 {
        -min
    } else if max >= limit {
        (limit - 1 - max).max(-min)
    } else {
        0
    }
}

/// True if the piece fits: every cell inside the field is empty.
///
/// Cells at or above the ceiling count as vacant. Cells below the floor or
/// outside the horizontal footprint never fit; they are rejected without
/// touching the grid.
pub fn check_collision(field: &Field, position: Vec3, offsets: &[IVec3; 4]) -> bool {
    cells_at(position, offsets).iter().all(|c| {
        if c.y >= field.num_levels() as i32 {
            // above the stack, but still has to be over the footprint
            return c.x >= 0
                && (c.x as usize) < field.num_cols()
                && c.z >= 0
                && (c.z as usize) < field.num_rows();
        }
        field.is_vacant(c.y, c.z, c.x)
    })
}

/// True if moving down by `lookahead` levels would land the piece.
///
/// A cell whose target level drops below zero hits the floor; a cell whose
/// target maps to a filled field cell hits the stack.
pub fn detect_collision(field: &Field, position: Vec3, offsets: &[IVec3; 4], lookahead: f32) -> bool {
    let target = position - Vec3::new(0.0, lookahead, 0.0);
    cells_at(target, offsets)
        .iter()
        .any(|c| c.y < 0 || field.is_occupied(c.y, c.z, c.x))
}
