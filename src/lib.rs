//! TUI Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_blockfall::{core,input,term,types}`
//! and hosts the headless JSON-lines runner used by the binary.

pub mod headless;

pub use tui_blockfall_core as core;
pub use tui_blockfall_input as input;
pub use tui_blockfall_term as term;
pub use tui_blockfall_types as types;
