//! Outbound state for renderers and the headless runner.
//!
//! A snapshot owns copies of everything it shows, so readers can never reach
//! back into the live field. `GameState::snapshot_into` refills an existing
//! snapshot and keeps the cell buffer's allocation.

use glam::{IVec3, Vec3};
use serde::Serialize;

use crate::piece::{cells_at, Piece};

/// Piece geometry as plain arrays
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieceSnapshot {
    /// Cell id (`1..=8`)
    pub id: u8,
    /// Offsets as `[x, y, z]`
    pub offsets: [[i32; 3]; 4],
    /// Continuous `[col, level, row]` position
    pub position: [f32; 3],
}

impl PieceSnapshot {
    /// Absolute grid cells as `[col, level, row]`
    pub fn cells(&self) -> [[i32; 3]; 4] {
        let offsets = self.offsets.map(IVec3::from_array);
        cells_at(Vec3::from_array(self.position), &offsets).map(|c| c.to_array())
    }
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id(),
            offsets: piece.offsets.map(|o| o.to_array()),
            position: piece.position.to_array(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub num_levels: usize,
    pub num_rows: usize,
    pub num_cols: usize,
    /// Cell ids, level-major then row then col (0 = empty)
    pub cells: Vec<u8>,
    pub active: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    /// Largest row of the active piece (renderer transparency hint)
    pub depth: Option<i32>,
    pub score: u32,
    pub levels_cleared: u32,
    pub pieces_placed: u32,
    pub fall_speed: f32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Cell id at `(level, row, col)`, `None` outside the field
    pub fn cell(&self, level: usize, row: usize, col: usize) -> Option<u8> {
        if level >= self.num_levels || row >= self.num_rows || col >= self.num_cols {
            return None;
        }
        self.cells
            .get((level * self.num_rows + row) * self.num_cols + col)
            .copied()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            num_levels: 0,
            num_rows: 0,
            num_cols: 0,
            cells: Vec::new(),
            active: None,
            ghost: None,
            next: None,
            depth: None,
            score: 0,
            levels_cleared: 0,
            pieces_placed: 0,
            fall_speed: 0.0,
            paused: false,
            game_over: false,
        }
    }
}
