//! Session configuration.
//!
//! Dimensions and tuning are fixed for the lifetime of a session. Defaults
//! are a 6x6 footprint with 8 levels; every value can be
//! overridden from the environment with [`GameConfig::from_env`].

use glam::Vec3;
use log::warn;

use crate::types::{
    BASE_FALL_SPEED, CELL_SIZE, DEFAULT_NUM_COLS, DEFAULT_NUM_LEVELS, DEFAULT_NUM_ROWS,
    FALL_SPEED_INCREMENT, FIELD_ORIGIN, LEVEL_CLEAR_SCORE, MAX_FALL_SPEED, PLACEMENT_SCORE,
};

/// Placement of the field in world space.
///
/// Cell `(col, level, row)` is drawn as a cube of edge `cell_size` centered at
/// `origin + cell_size * (col, level, row)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTransform {
    pub origin: Vec3,
    pub cell_size: f32,
}

impl FieldTransform {
    pub fn new(origin: Vec3, cell_size: f32) -> Self {
        Self { origin, cell_size }
    }

    /// World-space center of a cell
    pub fn cell_center(&self, col: i32, level: i32, row: i32) -> Vec3 {
        self.origin + Vec3::new(col as f32, level as f32, row as f32) * self.cell_size
    }

    /// World-space height of the field floor (bottom faces of level 0)
    pub fn floor_y(&self) -> f32 {
        self.origin.y - self.cell_size * 0.5
    }

    /// Nearest `(col, row)` for a world-space point
    pub fn world_to_column(&self, point: Vec3) -> (i32, i32) {
        let local = (point - self.origin) / self.cell_size;
        (local.x.round() as i32, local.z.round() as i32)
    }
}

impl Default for FieldTransform {
    fn default() -> Self {
        Self {
            origin: Vec3::from_array(FIELD_ORIGIN),
            cell_size: CELL_SIZE,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub num_levels: u8,
    pub num_rows: u8,
    pub num_cols: u8,
    /// Seed for the piece generator
    pub seed: u32,
    /// Fall speed at session start, in levels per nominal tick
    pub base_fall_speed: f32,
    pub fall_speed_increment: f32,
    pub max_fall_speed: f32,
    pub placement_score: u32,
    pub level_clear_score: u32,
    pub field_transform: FieldTransform,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_levels: DEFAULT_NUM_LEVELS,
            num_rows: DEFAULT_NUM_ROWS,
            num_cols: DEFAULT_NUM_COLS,
            seed: 1,
            base_fall_speed: BASE_FALL_SPEED,
            fall_speed_increment: FALL_SPEED_INCREMENT,
            max_fall_speed: MAX_FALL_SPEED,
            placement_score: PLACEMENT_SCORE,
            level_clear_score: LEVEL_CLEAR_SCORE,
            field_transform: FieldTransform::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration with custom field dimensions
    pub fn with_dimensions(num_levels: u8, num_rows: u8, num_cols: u8) -> Self {
        Self {
            num_levels,
            num_rows,
            num_cols,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Create from environment variables
    ///
    /// - `BEYOND_TETRIS_LEVELS`, `BEYOND_TETRIS_ROWS`, `BEYOND_TETRIS_COLS`: field dimensions (non-zero)
    /// - `BEYOND_TETRIS_SEED`: piece generator seed
    /// - `BEYOND_TETRIS_FALL_SPEED`: starting fall speed (positive)
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let num_levels = env_parse::<u8>("BEYOND_TETRIS_LEVELS")
            .filter(|&v| v > 0)
            .unwrap_or(defaults.num_levels);
        let num_rows = env_parse::<u8>("BEYOND_TETRIS_ROWS")
            .filter(|&v| v > 0)
            .unwrap_or(defaults.num_rows);
        let num_cols = env_parse::<u8>("BEYOND_TETRIS_COLS")
            .filter(|&v| v > 0)
            .unwrap_or(defaults.num_cols);
        let seed = env_parse::<u32>("BEYOND_TETRIS_SEED").unwrap_or(defaults.seed);
        let base_fall_speed = env_parse::<f32>("BEYOND_TETRIS_FALL_SPEED")
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.base_fall_speed);

        Self {
            num_levels,
            num_rows,
            num_cols,
            seed,
            base_fall_speed,
            ..defaults
        }
    }

    /// Where a promoted piece enters the field (before bounds correction).
    ///
    /// The template's `(0, 0, 0)` cell starts on the top level, centered on the footprint.
    pub fn spawn_position(&self) -> Vec3 {
        Vec3::new(
            ((self.num_cols.max(1) - 1) / 2) as f32,
            (self.num_levels.max(1) - 1) as f32,
            ((self.num_rows.max(1) - 1) / 2) as f32,
        )
    }

    /// Display slot of the upcoming piece, beside the field.
    pub fn preview_position(&self) -> Vec3 {
        Vec3::new(
            self.num_cols as f32 + 2.0,
            (self.num_levels.max(1) - 1) as f32,
            0.0,
        )
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!("ignoring {key}={raw:?}: not a valid value");
    }
    parsed
}
