//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders into a simple framebuffer
//! that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Show a 3D field with two orthogonal 2D projections
//! - Allow mouse steering through the same pointer path a 3D renderer would use

pub mod camera;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use beyond_tetris_core as core;
pub use beyond_tetris_types as types;

pub use camera::TopDownCamera;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Layout, Rect, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
