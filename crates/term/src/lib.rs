//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! framebuffer, and the renderer flushes only what changed. No widget
//! toolkit is involved, which gives precise control over the aspect ratio
//! (2 chars wide per cell).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, Effects, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
