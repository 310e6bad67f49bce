//! Terminal input module.
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::GameAction`] and provides a DAS/ARR input handler suitable
//! for terminal environments (including terminals without key-release events).

pub mod handler;
pub mod map;

pub use beyond_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_drop_key, move_direction, should_quit};
