//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, terminal rendering, headless runs).
//!
//! # Field Dimensions
//!
//! The play area is a 3D lattice addressed as `(col, level, row)`:
//!
//! - **Columns**: horizontal x axis (left/right moves)
//! - **Levels**: vertical y axis, level 0 is the floor
//! - **Rows**: horizontal z axis (forward/backward moves)
//!
//! The default field is a 6x6 footprint with 8 levels.
//!
//! # Timing And Speed Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Nominal frame interval (~60 FPS), one gravity step |
//! | `BASE_FALL_SPEED` | 0.04 | Levels fallen per nominal tick at the start |
//! | `FALL_SPEED_INCREMENT` | 0.002 | Speed added on every placement |
//! | `MAX_FALL_SPEED` | 0.5 | Hard cap on the fall speed |
//! | `MAX_FALL_STEP` | 1.0 | Largest vertical step in one tick |
//! | `SOFT_DROP_MULTIPLIER` | 10 | Gravity boost while the drop key is held |
//! | `SOFT_DROP_GRACE_MS` | 150 | Held-drop timeout without key release events |
//!
//! # Examples
//!
//! ```
//! use beyond_tetris_types::{Axis, GameAction, MoveDirection, PieceKind};
//!
//! // Piece ids double as color selectors.
//! assert_eq!(PieceKind::I.id(), 1);
//! assert_eq!(PieceKind::from_id(8), Some(PieceKind::T));
//!
//! // Parse game actions (case-insensitive)
//! let action = GameAction::from_str("rotateY").unwrap();
//! assert_eq!(action, GameAction::Rotate(Axis::Y));
//! assert_eq!(
//!     GameAction::from_str("moveForward"),
//!     Some(GameAction::Move(MoveDirection::Forward))
//! );
//! ```

/// Default number of vertical levels
pub const DEFAULT_NUM_LEVELS: u8 = 8;

/// Default number of rows (z axis)
pub const DEFAULT_NUM_ROWS: u8 = 6;

/// Default number of columns (x axis)
pub const DEFAULT_NUM_COLS: u8 = 6;

/// Nominal tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall speed of a fresh session, in levels per nominal tick
pub const BASE_FALL_SPEED: f32 = 0.04;

/// Fall speed added after every placement
pub const FALL_SPEED_INCREMENT: f32 = 0.002;

/// Upper bound for the fall speed
pub const MAX_FALL_SPEED: f32 = 0.5;

/// Largest vertical distance a piece may travel in one tick.
///
/// Landing detection only looks one step ahead, so a step above one level
/// could skip over a block.
pub const MAX_FALL_STEP: f32 = 1.0;

/// Score awarded for every placed piece
pub const PLACEMENT_SCORE: u32 = 1;

/// Score awarded for every cleared level
pub const LEVEL_CLEAR_SCORE: u32 = 10;

/// Gravity multiplier while the drop key is held
pub const SOFT_DROP_MULTIPLIER: u32 = 10;

/// Held-drop timeout for terminals without key release events
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 50;

/// World units per field cell (blocks are drawn as 2x2x2 cubes)
pub const CELL_SIZE: f32 = 2.0;

/// World-space position of cell `(0, 0, 0)`
pub const FIELD_ORIGIN: [f32; 3] = [-6.0, 0.0, -6.0];


/// The eight tetracube kinds.
///
/// Each kind has a stable id in `1..=8` that is stored in field cells and
/// selects the block color:
/// - **I**: straight bar of four
/// - **L**: bar of three with a foot
/// - **S**: skew piece
/// - **O**: 2x2 square
/// - **RightScrew** / **LeftScrew**: chiral 3D pieces that leave the plane
/// - **Branch**: three arms meeting at one corner
/// - **T**: T-shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    S,
    O,
    RightScrew,
    LeftScrew,
    Branch,
    T,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; 8] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::S,
        PieceKind::O,
        PieceKind::RightScrew,
        PieceKind::LeftScrew,
        PieceKind::Branch,
        PieceKind::T,
    ];

    /// Cell id of this kind (`1..=8`)
    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::L => 2,
            PieceKind::S => 3,
            PieceKind::O => 4,
            PieceKind::RightScrew => 5,
            PieceKind::LeftScrew => 6,
            PieceKind::Branch => 7,
            PieceKind::T => 8,
        }
    }

    /// Kind for a cell id, `None` for 0 and anything above 8
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=8 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use beyond_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Branch"), Some(PieceKind::Branch));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "o" => Some(PieceKind::O),
            "rightscrew" => Some(PieceKind::RightScrew),
            "leftscrew" => Some(PieceKind::LeftScrew),
            "branch" => Some(PieceKind::Branch),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::O => "o",
            PieceKind::RightScrew => "rightscrew",
            PieceKind::LeftScrew => "leftscrew",
            PieceKind::Branch => "branch",
            PieceKind::T => "t",
        }
    }
}

/// Rotation axes.
///
/// A rotation turns the piece 90° counter-clockwise when looking down the
/// positive axis towards the origin (right-hand rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector of the axis as `[x, y, z]`
    pub fn unit(&self) -> [i32; 3] {
        match self {
            Axis::X => [1, 0, 0],
            Axis::Y => [0, 1, 0],
            Axis::Z => [0, 0, 1],
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Horizontal move directions.
///
/// Left/right move along the column axis, forward/backward along the row axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Forward,
    Backward,
}

impl MoveDirection {
    /// Displacement as `(d_col, d_row)`
    ///
    /// # Examples
    ///
    /// ```
    /// use beyond_tetris_types::MoveDirection;
    ///
    /// assert_eq!(MoveDirection::Left.delta(), (-1, 0));
    /// assert_eq!(MoveDirection::Forward.delta(), (0, 1));
    /// ```
    pub fn delta(&self) -> (i32, i32) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Forward => (0, 1),
            MoveDirection::Backward => (0, -1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
            MoveDirection::Forward => "forward",
            MoveDirection::Backward => "backward",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Moves and rotations are intents: they are stored on the game state and
/// resolved on the next tick. Illegal intents are dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the piece one cell horizontally
    Move(MoveDirection),
    /// Rotate the piece 90° about an axis through its rotation center
    Rotate(Axis),
    /// Toggle pause state
    Pause,
    /// Restart the session
    Restart,
}

impl GameAction {
    /// Parse action from string (used by the headless runner scripts)
    ///
    /// # Examples
    ///
    /// ```
    /// use beyond_tetris_types::{Axis, GameAction, MoveDirection};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::Move(MoveDirection::Left)));
    /// assert_eq!(GameAction::from_str("rotatez"), Some(GameAction::Rotate(Axis::Z)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::Move(MoveDirection::Left)),
            "moveright" => Some(GameAction::Move(MoveDirection::Right)),
            "moveforward" => Some(GameAction::Move(MoveDirection::Forward)),
            "movebackward" => Some(GameAction::Move(MoveDirection::Backward)),
            "rotatex" => Some(GameAction::Rotate(Axis::X)),
            "rotatey" => Some(GameAction::Rotate(Axis::Y)),
            "rotatez" => Some(GameAction::Rotate(Axis::Z)),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(MoveDirection::Left) => "moveLeft",
            GameAction::Move(MoveDirection::Right) => "moveRight",
            GameAction::Move(MoveDirection::Forward) => "moveForward",
            GameAction::Move(MoveDirection::Backward) => "moveBackward",
            GameAction::Rotate(Axis::X) => "rotateX",
            GameAction::Rotate(Axis::Y) => "rotateY",
            GameAction::Rotate(Axis::Z) => "rotateZ",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell of the field
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a placed piece of that kind
pub type Cell = Option<PieceKind>;
