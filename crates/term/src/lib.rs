//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a [`GameSnapshot`]
//! into a framebuffer of styled cells, and the renderer flushes only the cells
//! that changed to the terminal.
//!
//! [`GameSnapshot`]: crate::core::GameSnapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
