//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, so they
//! can be used by the simulation core, the input mapper and the terminal view.
//!
//! # Board Dimensions
//!
//! Classic Tetris playfield:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Gravity by Level
//!
//! Levels start at 1. Gravity speeds up every time a level is gained
//! (milliseconds per row):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 800ms |
//! | 2 | 600ms |
//! | 3 | 450ms |
//! | 4 | 300ms |
//! | 5 | 200ms |
//! | 6+ | 20ms faster per level, floor at 60ms |
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{Command, PieceKind, RotateDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.rotation_states(), 4);
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(Command::RotateCcw.rotate_direction(), Some(RotateDirection::CounterClockwise));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// First level of a new game
pub const START_LEVEL: u32 = 1;

/// Lines needed to gain a level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity intervals for levels 1..=5 (milliseconds per row)
pub const LEVEL_SPEEDS: [u32; 5] = [800, 600, 450, 300, 200];

/// Gravity speed-up per level once past the end of `LEVEL_SPEEDS`
pub const LEVEL_SPEED_STEP_MS: u32 = 20;

/// Fastest gravity interval
pub const DROP_INTERVAL_FLOOR_MS: u32 = 60;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
///
/// Matches the 100ms movement timer of the classic game.
pub const DEFAULT_ARR_MS: u32 = 100;

/// Soft drop DAS in milliseconds (soft drop repeats right away)
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Soft drop ARR in milliseconds
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Line clear scoring table
///
/// Base points for clearing N lines at once, multiplied by the current level:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points (Tetris!)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in bag order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Number of distinct rotation states.
    ///
    /// The square looks the same in every orientation, and I/S/Z only have
    /// two distinct orientations.
    pub fn rotation_states(&self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::S | PieceKind::Z => 2,
            PieceKind::T | PieceKind::J | PieceKind::L => 4,
        }
    }

    /// Compact grid code used by snapshots (1..=7, 0 is reserved for empty)
    pub fn cell_code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::cell_code`]
    pub fn from_cell_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Advance a rotation index by one step, wrapping at `states`.
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::RotateDirection;
    ///
    /// assert_eq!(RotateDirection::Clockwise.apply(3, 4), 0);
    /// assert_eq!(RotateDirection::CounterClockwise.apply(0, 4), 3);
    /// assert_eq!(RotateDirection::Clockwise.apply(0, 1), 0);
    /// ```
    pub fn apply(&self, rotation: u8, states: u8) -> u8 {
        let states = states.max(1);
        let rotation = rotation % states;
        match self {
            RotateDirection::Clockwise => (rotation + 1) % states,
            RotateDirection::CounterClockwise => (rotation + states - 1) % states,
        }
    }
}

/// Commands the simulation core understands
///
/// Key bindings live in the input crate; the core only sees this enum.
/// Quitting is handled by the binary and never reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Rotate piece clockwise
    RotateCw,
    /// Rotate piece counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Start a new game (the high score is kept)
    Restart,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATECW"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "pause" => Some(Command::Pause),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Pause => "pause",
            Command::Restart => "restart",
        }
    }

    pub fn rotate_direction(&self) -> Option<RotateDirection> {
        match self {
            Command::RotateCw => Some(RotateDirection::Clockwise),
            Command::RotateCcw => Some(RotateDirection::CounterClockwise),
            _ => None,
        }
    }
}

/// Lifecycle of a game session
///
/// ```text
/// Running <-- pause toggle --> Paused
///    |
///    | spawn blocked
///    v
/// GameOver --- restart ---> Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
