//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and provides a
//! DAS/ARR auto-repeat handler for held movement keys. Terminals that never
//! report key releases are handled with a release timeout.

pub mod handler;
pub mod map;

pub use term_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
