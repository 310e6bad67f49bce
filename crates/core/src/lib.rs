//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the whole falling-block simulation on a 3D lattice.
//! It has **no dependencies** on terminal, windowing, or I/O code, making it:
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Testable**: Every rule is reachable without a renderer
//! - **Portable**: Can be driven by the terminal front end, a GPU renderer, or a headless runner
//!
//! # Module Structure
//!
//! - [`field`]: the `levels x rows x cols` grid with level clearing and compaction
//! - [`catalog`]: the eight immutable shape templates
//! - [`piece`]: live pieces with a continuous position and ceiling discretization
//! - [`collision`]: bounds checks, rigid bounds correction and overlap tests
//! - [`rotation`]: 90° rotations about an axis through the rotation center
//! - [`ghost`]: resting-position projection of the active piece
//! - [`pointer`]: projecting a 2D pointer through a camera onto a field column
//! - [`game_state`]: the fall / placement state machine and session state
//! - [`rng`]: seedable piece generator
//! - [`snapshot`]: read-only outbound state for renderers
//! - [`config`]: session dimensions, tuning and environment overrides
//!
//! # Example
//!
//! ```
//! use beyond_tetris_core::{GameConfig, GameState};
//! use beyond_tetris_types::{GameAction, MoveDirection, TICK_MS};
//!
//! let mut game = GameState::new(GameConfig::default());
//!
//! // Intents are resolved on the next tick.
//! game.apply_action(GameAction::Move(MoveDirection::Left));
//! game.tick(TICK_MS);
//!
//! let snap = game.snapshot();
//! assert!(snap.active.is_some());
//! assert!(!snap.game_over);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame with the
//! elapsed milliseconds. Gravity moves the active piece by
//! `fall_speed * drop_multiplier * elapsed_ms / TICK_MS` levels, capped at one
//! level per tick.

pub mod catalog;
pub mod collision;
pub mod config;
pub mod field;
pub mod game_state;
pub mod ghost;
pub mod piece;
pub mod pointer;
pub mod rng;
pub mod rotation;
pub mod snapshot;

pub use beyond_tetris_types as types;

// Re-export commonly used types for convenience
pub use catalog::{template, ShapeTemplate, CATALOG};
pub use collision::{check_bounds, check_collision, detect_collision, fix_bounds};
pub use config::{FieldTransform, GameConfig};
pub use field::Field;
pub use game_state::GameState;
pub use piece::{grid_coord, grid_level, Piece};
pub use pointer::{Camera, PointerInput, Ray};
pub use rng::{PieceGenerator, SimpleRng};
pub use snapshot::{GameSnapshot, PieceSnapshot};
