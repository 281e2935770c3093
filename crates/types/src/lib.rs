//! Shared types and constants for the falling-block game.
//!
//! Everything here is plain data with no dependencies, so the same definitions
//! can be used by the core engine, the terminal frontend and the headless
//! protocol.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//!
//! Rows above row 0 (negative row indices) are valid space for a falling piece
//! but are never stored on the board.
//!
//! # Timing Constants
//!
//! All values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | External tick cadence used by the runner |
//! | `BASE_DROP_MS` | 450 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `MIN_DROP_MS` | 100 | Gravity interval floor |
//! | `SOFT_DROP_MS` | 50 | Gravity interval while soft drop is held |
//! | `SOFT_DROP_GRACE_MS` | 150 | Soft drop latch timeout (input side) |
//! | `LINE_FLASH_MS` | 180 | Highlight duration for cleared rows (render side) |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{Command, PieceKind, COLS, ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!((COLS, ROWS), (10, 20));
//! ```

/// Board width in cells
pub const COLS: u8 = 10;

/// Board height in cells
pub const ROWS: u8 = 20;

/// Fixed external tick cadence (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 450;

/// Gravity interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 100;

/// Gravity interval floor
pub const MIN_DROP_MS: u32 = 100;

/// Gravity interval while soft drop is held
pub const SOFT_DROP_MS: u32 = 50;

/// Soft drop latch timeout for terminals without key-release events
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// How long the frontend highlights just-cleared rows
pub const LINE_FLASH_MS: u32 = 180;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Bonus points per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table, indexed by lines cleared at once (0-4)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per line for any clear count outside the table
pub const FALLBACK_POINTS_PER_LINE: u32 = 200;

/// Horizontal kick offsets tried, in order, when a rotation collides in place
pub const ROTATION_KICKS: [i8; 4] = [-1, 1, -2, 2];


/// The seven piece kinds
///
/// The kind doubles as the color identifier of a filled cell:
/// - **I**: `#35c9ff`, 1x4 bar
/// - **O**: `#f2d74e`, 2x2 square
/// - **T**: `#b76cff`
/// - **J**: `#4e7af2`
/// - **L**: `#f29b4e`
/// - **S**: `#4ef27a`
/// - **Z**: `#f24e4e`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Grid code used in snapshots (0 is reserved for empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::J => 4,
            PieceKind::L => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// for kind in PieceKind::ALL {
    ///     assert_eq!(PieceKind::from_code(kind.code()), Some(kind));
    /// }
    /// assert_eq!(PieceKind::from_code(0), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::L),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Display color as an RGB triple
    pub fn color_rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x35, 0xc9, 0xff),
            PieceKind::O => (0xf2, 0xd7, 0x4e),
            PieceKind::T => (0xb7, 0x6c, 0xff),
            PieceKind::J => (0x4e, 0x7a, 0xf2),
            PieceKind::L => (0xf2, 0x9b, 0x4e),
            PieceKind::S => (0x4e, 0xf2, 0x7a),
            PieceKind::Z => (0xf2, 0x4e, 0x4e),
        }
    }
}

/// A cell on the board
///
/// - `None`: empty
/// - `Some(PieceKind)`: filled, tagged with the color of the piece that locked there
pub type Cell = Option<PieceKind>;

/// Engine phase
///
/// Locking is transient and completes within a single command or tick, so it
/// never shows up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// A piece is falling and commands are accepted
    Active,
    /// Terminal until reset; every command except reset is a no-op
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Active => "active",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Inbound commands accepted by the engine
///
/// Used by the terminal frontend and by the headless protocol alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate 90° clockwise with horizontal kicks
    Rotate,
    /// Start or stop the faster soft drop gravity
    SoftDrop(bool),
    /// Drop one row now, locking if blocked
    SoftDropStep,
    /// Drop to rest and lock
    HardDrop,
    /// Start a new game in place
    Reset,
}

impl Command {
    /// Parse a command name (case-insensitive, for the headless protocol)
    ///
    /// Soft drop toggles are spelled `softDropOn` / `softDropOff`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("softdropon"), Some(Command::SoftDrop(true)));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "softdropon" => Some(Command::SoftDrop(true)),
            "softdropoff" => Some(Command::SoftDrop(false)),
            "softdropstep" => Some(Command::SoftDropStep),
            "harddrop" => Some(Command::HardDrop),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }

    /// camelCase name, the inverse of [`Command::from_str`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::SoftDrop(true) => "softDropOn",
            Command::SoftDrop(false) => "softDropOff",
            Command::SoftDropStep => "softDropStep",
            Command::HardDrop => "hardDrop",
            Command::Reset => "reset",
        }
    }
}
