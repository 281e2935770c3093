//! Core game logic - pure, deterministic, and testable
//!
//! Everything the game *is* lives here: the board, the shape catalog, pieces,
//! scoring and the engine that ties them together. There is no I/O; a
//! frontend feeds commands and a monotonic clock in, and reads
//! [`GameSnapshot`]s out.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and line clearing
//! - [`shapes`]: the seven shapes and clockwise rotation
//! - [`piece`]: a shape with a board position
//! - [`game_state`]: the engine (commands, locking, gravity, reset)
//! - [`rng`]: seeded generator used for piece selection
//! - [`scoring`]: line clear points, hard drop bonus, level and gravity
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules
//!
//! - Pieces are drawn uniformly at random, one at a time (no bag).
//! - Rotation is clockwise only. If the rotated shape does not fit, horizontal
//!   offsets -1, +1, -2, +2 are tried in that order.
//! - A piece locks the moment it cannot fall. Locking with any cell above
//!   the top edge ends the game.
//! - Clears score 100/300/500/800 for 1-4 rows; hard drop adds 2 per row.
//! - Level is `1 + lines / 10` and only affects gravity.
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::GameState;
//! use tui_blockfall_types::Command;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] at a fixed cadence (16ms in the terminal
//! frontend) with the current time. Gravity fires once the drop interval has
//! passed since the previous step.

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use game_state::{GameState, LockEvent};
pub use piece::Piece;
pub use rng::SimpleRng;
pub use scoring::{
    calculate_hard_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
};
pub use shapes::{random_shape, Shape};
pub use snapshot::{GameSnapshot, PieceSnapshot};
