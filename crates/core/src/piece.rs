//! Piece module - live tetracubes
//!
//! A piece stores one continuous position. The vertical component is
//! fractional while the piece falls; horizontal components are whole numbers
//! except in the middle of rotation math. Grid indices are always derived on
//! demand through [`grid_level`] and [`grid_coord`], so there is no second
//! discrete position that could drift out of sync.

use glam::{IVec3, Vec3};

use crate::catalog::{template, ShapeTemplate};
use crate::collision;
use crate::field::Field;
use crate::types::PieceKind;

/// Vertical discretization: a cell occupies `ceil(y)`.
///
/// A piece reaches the next integer level strictly before its continuous
/// position does, which gives landing its early, responsive feel.
#[inline]
pub fn grid_level(y: f32) -> i32 {
    y.ceil() as i32
}

/// Horizontal discretization (nearest integer)
#[inline]
pub fn grid_coord(v: f32) -> i32 {
    v.round() as i32
}

/// Active or upcoming piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub kind: PieceKind,
    /// Current offsets, differ from the template after rotation
    pub offsets: [IVec3; 4],
    pub rotation_center: Vec3,
    /// `(col, level, row)` of the offset origin
    pub position: Vec3,
}

impl Piece {
    /// Copy a kind's template to `position`
    pub fn new(kind: PieceKind, position: Vec3) -> Self {
        Self::from_template(template(kind), position)
    }

    pub fn from_template(template: &ShapeTemplate, position: Vec3) -> Self {
        Self {
            kind: template.kind,
            offsets: template.offsets,
            rotation_center: template.rotation_center,
            position,
        }
    }

    /// Cell id (`1..=8`)
    pub fn id(&self) -> u8 {
        self.kind.id()
    }

    /// Absolute grid cells as `(col, level, row)`
    pub fn cells(&self) -> [IVec3; 4] {
        cells_at(self.position, &self.offsets)
    }

    /// Largest row index covered by the piece.
    ///
    /// Renderers use it as a transparency hint; it plays no part in the physics.
    pub fn depth(&self) -> i32 {
        self.cells().iter().map(|c| c.z).max().unwrap_or(0)
    }

    pub fn lowest_level(&self) -> i32 {
        self.cells().iter().map(|c| c.y).min().unwrap_or(0)
    }

    pub fn highest_level(&self) -> i32 {
        self.cells().iter().map(|c| c.y).max().unwrap_or(0)
    }

    /// Whether moving down by `lookahead` levels would hit the floor or a block
    pub fn detect_collision(&self, field: &Field, lookahead: f32) -> bool {
        collision::detect_collision(field, self.position, &self.offsets, lookahead)
    }

    /// Same piece at another position
    pub fn at(&self, position: Vec3) -> Self {
        Self { position, ..*self }
    }
}

/// Absolute cells of `offsets` placed at `position`
pub(crate) fn cells_at(position: Vec3, offsets: &[IVec3; 4]) -> [IVec3; 4] {
    offsets.map(|o| {
        IVec3::new(
            grid_coord(o.x as f32 + position.x),
            grid_level(o.y as f32 + position.y),
            grid_coord(o.z as f32 + position.z),
        )
    })
}
