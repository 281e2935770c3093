//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events to [`crate::types::Command`]s and
//! keeps soft drop held in terminals that never report key release.

pub mod latch;
pub mod map;

pub use tui_blockfall_types as types;

pub use latch::SoftDropLatch;
pub use map::{handle_key_event, handle_mouse_event, is_soft_drop_key, should_quit, MouseAction};
