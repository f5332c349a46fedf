//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on the terminal, input devices or wall-clock time:
//!
//! - **Deterministic**: Same seed and same command/tick sequence produce identical games
//! - **Testable**: Boards can be built from text rows and pieces placed directly
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`config`]: Rule settings read from the environment
//! - [`game_state`]: Complete game state including active piece, scoring, timing
//! - [`pieces`]: Tetromino shape definitions and rotation tables
//! - [`rng`]: Seeded piece generation (7-bag or uniform)
//! - [`scoring`]: Classic line scores, levels and gravity intervals
//! - [`snapshot`]: Read-only frame data for renderers
//!
//! # Game Rules
//!
//! - **Rotation**: In-place only, no wall kicks. A rotation that does not fit is rejected.
//! - **Locking**: Immediate. A piece that cannot fall one more row locks on the next
//!   gravity step or soft drop.
//! - **Scoring**: 100/300/500/800 points for 1/2/3/4 rows cleared by one lock, times level
//! - **Levels**: Start at 1 and go up every 10 cleared lines, speeding up gravity
//! - **Game over**: Only when a newly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use term_tetris_core::GameState;
//! use term_tetris_types::{Command, GameStatus};
//!
//! let mut game = GameState::with_seed(12345);
//!
//! game.apply_action(Command::MoveRight);
//! game.apply_action(Command::RotateCw);
//! game.apply_action(Command::HardDrop);
//!
//! assert_eq!(game.status(), GameStatus::Running);
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the elapsed
//! milliseconds. The piece falls one row each time the accumulated time reaches the
//! level's gravity interval.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use term_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::GameConfig;
pub use game_state::{GameState, LockEvent};
pub use pieces::{get_shape, Tetromino};
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
