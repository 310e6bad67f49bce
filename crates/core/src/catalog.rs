//! Piece catalog - the eight immutable shape templates
//!
//! Shapes are data, not types: a template is four integer offsets plus the
//! pivot used for rotation. Offset `(0, 0, 0)` is the anchor cell that lands on
//! the spawn slot; the rest of the shape hangs below it.
//!
//! | Id | Kind | Offsets (x, y, z) |
//! |----|------|-------------------|
//! | 1 | I | (0,0,0) (0,-1,0) (0,-2,0) (0,-3,0) |
//! | 2 | L | (0,0,0) (0,-1,0) (0,-2,0) (1,-2,0) |
//! | 3 | S | (0,0,0) (1,0,0) (1,-1,0) (2,-1,0) |
//! | 4 | O | (0,0,0) (1,0,0) (0,-1,0) (1,-1,0) |
//! | 5 | RightScrew | (0,0,0) (1,0,0) (1,-1,0) (1,-1,1) |
//! | 6 | LeftScrew | (0,0,0) (1,0,0) (1,-1,0) (1,-1,-1) |
//! | 7 | Branch | (0,0,0) (0,-1,0) (1,-1,0) (0,-1,1) |
//! | 8 | T | (0,0,0) (0,-1,0) (-1,-1,0) (1,-1,0) |
//!
//! Every template rotates about `(0, -1, 0)`.

use glam::{IVec3, Vec3};

use crate::types::PieceKind;

/// Immutable shape definition a live piece is copied from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTemplate {
    pub kind: PieceKind,
    pub offsets: [IVec3; 4],
    pub rotation_center: Vec3,
}

impl ShapeTemplate {
    /// Cell id of the template (`1..=8`)
    pub fn id(&self) -> u8 {
        self.kind.id()
    }
}

const fn shape(kind: PieceKind, offsets: [[i32; 3]; 4]) -> ShapeTemplate {
    ShapeTemplate {
        kind,
        offsets: [
            IVec3::new(offsets[0][0], offsets[0][1], offsets[0][2]),
            IVec3::new(offsets[1][0], offsets[1][1], offsets[1][2]),
            IVec3::new(offsets[2][0], offsets[2][1], offsets[2][2]),
            IVec3::new(offsets[3][0], offsets[3][1], offsets[3][2]),
        ],
        rotation_center: Vec3::new(0.0, -1.0, 0.0),
    }
}

/// All templates, indexed by `id - 1`
pub const CATALOG: [ShapeTemplate; 8] = [
    shape(PieceKind::I, [[0, 0, 0], [0, -1, 0], [0, -2, 0], [0, -3, 0]]),
    shape(PieceKind::L, [[0, 0, 0], [0, -1, 0], [0, -2, 0], [1, -2, 0]]),
    shape(PieceKind::S, [[0, 0, 0], [1, 0, 0], [1, -1, 0], [2, -1, 0]]),
    shape(PieceKind::O, [[0, 0, 0], [1, 0, 0], [0, -1, 0], [1, -1, 0]]),
    shape(
        PieceKind::RightScrew,
        [[0, 0, 0], [1, 0, 0], [1, -1, 0], [1, -1, 1]],
    ),
    shape(
        PieceKind::LeftScrew,
        [[0, 0, 0], [1, 0, 0], [1, -1, 0], [1, -1, -1]],
    ),
    shape(PieceKind::Branch, [[0, 0, 0], [0, -1, 0], [1, -1, 0], [0, -1, 1]]),
    shape(PieceKind::T, [[0, 0, 0], [0, -1, 0], [-1, -1, 0], [1, -1, 0]]),
];

/// Template for a piece kind
pub fn template(kind: PieceKind) -> &'static ShapeTemplate {
    &CATALOG[(kind.id() - 1) as usize]
}
