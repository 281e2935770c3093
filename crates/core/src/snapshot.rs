use crate::piece::Piece;
use crate::shapes::Shape;
use crate::types::{GamePhase, PieceKind, BASE_DROP_MS, COLS, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of the engine, refreshed after every command or tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Grid codes, 0 = empty, 1..=7 = [`PieceKind::code`]
    pub board: [[u8; COLS as usize]; ROWS as usize],
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    /// Row the current piece would rest on if hard-dropped now
    pub ghost_y: i8,
    pub phase: GamePhase,
    pub game_over: bool,
    pub soft_drop: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Kind stored at (col, row), if any
    pub fn cell(&self, col: usize, row: usize) -> Option<PieceKind> {
        self.board
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|&code| PieceKind::from_code(code))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let empty = PieceSnapshot::from(Piece::spawn(Shape::base(PieceKind::I)));
        Self {
            board: [[0u8; COLS as usize]; ROWS as usize],
            current: empty,
            next: empty,
            ghost_y: empty.y,
            phase: GamePhase::Active,
            game_over: false,
            soft_drop: false,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
        }
    }
}
