//! Field module - manages the 3D cell grid
//!
//! The field is a `num_levels x num_rows x num_cols` lattice where each cell is
//! empty or holds the kind of the piece that was placed there.
//! Uses a flat vector, level-major, for cache locality: one level is a
//! contiguous `rows * cols` slice, which makes compaction a single `copy_within`.
//!
//! Coordinates: `(level, row, col)`, level 0 is the floor.
//! Every access goes through [`Field::index`], so nothing outside the grid is
//! ever read or written.

use log::debug;

use crate::piece::Piece;
use crate::types::{Cell, PieceKind};

/// Largest size of any field axis, the range of the `u8` config dimensions
pub const MAX_DIMENSION: usize = u8::MAX as usize;

/// The play field - dimensions fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    num_levels: usize,
    num_rows: usize,
    num_cols: usize,
    /// Flat cells, `(level * rows + row) * cols + col`
    cells: Vec<Cell>,
}

impl Field {
    /// Create a new empty field.
    ///
    /// Each dimension is clamped to `1..=MAX_DIMENSION`.
    pub fn new(num_levels: usize, num_rows: usize, num_cols: usize) -> Self {
        let num_levels = num_levels.clamp(1, MAX_DIMENSION);
        let num_rows = num_rows.clamp(1, MAX_DIMENSION);
        let num_cols = num_cols.clamp(1, MAX_DIMENSION);
        Self {
            num_levels,
            num_rows,
            num_cols,
            cells: vec![None; num_levels * num_rows * num_cols],
        }
    }

    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline(always)]
    fn level_len(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// Calculate flat index, `None` outside the grid
    #[inline(always)]
    fn index(&self, level: i32, row: i32, col: i32) -> Option<usize> {
        if level < 0 || row < 0 || col < 0 {
            return None;
        }
        let (level, row, col) = (level as usize, row as usize, col as usize);
        if level >= self.num_levels || row >= self.num_rows || col >= self.num_cols {
            return None;
        }
        Some((level * self.num_rows + row) * self.num_cols + col)
    }

    /// Get cell at `(level, row, col)`
    /// Returns None if out of bounds
    pub fn get(&self, level: i32, row: i32, col: i32) -> Option<Cell> {
        self.index(level, row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(level, row, col)`
    /// Returns false if out of bounds
    pub fn set(&mut self, level: i32, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(level, row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, level: i32, row: i32, col: i32) -> bool {
        matches!(self.get(level, row, col), Some(Some(_)))
    }

    /// Check if position is within bounds and empty
    pub fn is_vacant(&self, level: i32, row: i32, col: i32) -> bool {
        matches!(self.get(level, row, col), Some(None))
    }

    /// Cells of one level in row-major order
    pub fn level(&self, level: usize) -> &[Cell] {
        if level >= self.num_levels {
            return &[];
        }
        let len = self.level_len();
        &self.cells[level * len..(level + 1) * len]
    }

    /// Check if every cell of a level is filled
    pub fn is_level_full(&self, level: usize) -> bool {
        if level >= self.num_levels {
            return false;
        }
        self.level(level).iter().all(|cell| cell.is_some())
    }

    /// Zero a level and shift every level above it down by one.
    ///
    /// The topmost level becomes empty. Content moved into `level` may itself be
    /// full, so callers re-test the same index afterwards.
    pub fn clear_and_compact(&mut self, level: usize) {
        if level >= self.num_levels {
            return;
        }
        let len = self.level_len();
        let top = self.num_levels * len;

        // copy_within handles the overlapping ranges
        self.cells.copy_within((level + 1) * len..top, level * len);

        for cell in &mut self.cells[top - len..top] {
            *cell = None;
        }
    }

    /// Write the piece's kind into its four cells.
    ///
    /// The caller has verified the target cells are in bounds and empty; cells
    /// that are nonetheless outside the grid are skipped.
    pub fn place(&mut self, piece: &Piece) {
        for cell in piece.cells() {
            self.set(cell.y, cell.z, cell.x, Some(piece.kind));
        }
        debug!(
            "placed {} at levels {}..={}",
            piece.kind.as_str(),
            piece.lowest_level(),
            piece.highest_level()
        );
    }

    /// Clear every full level, bottom to top, and return how many were cleared.
    ///
    /// After a clear the same index is examined again, because the level that
    /// slid down into it may be full as well.
    pub fn scan_and_clear_all(&mut self) -> u32 {
        let mut cleared = 0;
        let mut level = 0;
        while level < self.num_levels {
            if self.is_level_full(level) {
                self.clear_and_compact(level);
                cleared += 1;
            } else {
                level += 1;
            }
        }
        cleared
    }

    /// Index of the first level above the highest filled cell of a column.
    ///
    /// 0 for an empty column or a position outside the footprint.
    pub fn column_height(&self, row: i32, col: i32) -> usize {
        (0..self.num_levels)
            .rev()
            .find(|&level| self.is_occupied(level as i32, row, col))
            .map(|level| level + 1)
            .unwrap_or(0)
    }

    /// Kind of the highest filled cell of a column, with its level
    pub fn column_top(&self, row: i32, col: i32) -> Option<(usize, PieceKind)> {
        let height = self.column_height(row, col);
        if height == 0 {
            return None;
        }
        let level = height - 1;
        self.get(level as i32, row, col)
            .flatten()
            .map(|kind| (level, kind))
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write cell ids (0 = empty, 1..=8 = piece kind) into `out`, reusing its allocation
    pub fn write_ids(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|cell| cell.map_or(0, |kind| kind.id())));
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a whole level with one kind (scenario setup helper)
    pub fn fill_level(&mut self, level: usize, kind: PieceKind) {
        if level >= self.num_levels {
            return;
        }
        let len = self.level_len();
        self.cells[level * len..(level + 1) * len].fill(Some(kind));
    }
}
