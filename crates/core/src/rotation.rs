//! Rotation engine
//!
//! Rotations are candidate-then-commit: the rotated offsets get exactly one
//! bounds correction and are committed only if the result fits. There is no
//! kick table and no persistent rotation state.

use glam::{IVec3, Vec3};

use crate::collision::{check_collision, fix_bounds};
use crate::field::Field;
use crate::piece::Piece;
use crate::types::Axis;

/// Rotate one offset 90° about `axis` through `center`.
///
/// Right-hand rule, counter-clockwise looking down the positive axis. The
/// result is truncated toward zero, not rounded.
pub fn rotate_offset(offset: IVec3, center: Vec3, axis: Axis) -> IVec3 {
    let v = offset.as_vec3() - center;
    // Exact quarter turns; a rotation matrix would leave 1e-8 residue that
    // truncation turns into off-by-one cells.
    let rotated = match axis {
        Axis::X => Vec3::new(v.x, -v.z, v.y),
        Axis::Y => Vec3::new(v.z, v.y, -v.x),
        Axis::Z => Vec3::new(-v.y, v.x, v.z),
    } + center;
    IVec3::new(
        rotated.x.trunc() as i32,
        rotated.y.trunc() as i32,
        rotated.z.trunc() as i32,
    )
}

/// Rotated copy of all four offsets
pub fn rotated_offsets(offsets: &[IVec3; 4], center: Vec3, axis: Axis) -> [IVec3; 4] {
    offsets.map(|o| rotate_offset(o, center, axis))
}

/// Rotated piece if the rotation is legal.
///
/// `None` means rejected; the caller keeps its piece untouched.
pub fn try_rotate(piece: &Piece, field: &Field, axis: Axis) -> Option<Piece> {
    let offsets = rotated_offsets(&piece.offsets, piece.rotation_center, axis);
    let position = fix_bounds(field.num_rows(), field.num_cols(), piece.position, &offsets);

    check_collision(field, position, &offsets).then(|| Piece {
        offsets,
        position,
        ..*piece
    })
}
