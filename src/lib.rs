//! Beyond Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benches can write `beyond_tetris::{core,input,term,types}`.

pub use beyond_tetris_core as core;
pub use beyond_tetris_input as input;
pub use beyond_tetris_term as term;
pub use beyond_tetris_types as types;
