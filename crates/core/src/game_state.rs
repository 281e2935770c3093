//! Game state module - the engine
//!
//! Ties together the board, the current/next pieces, scoring and gravity.
//! Every command and every tick runs to completion synchronously; locking,
//! line clearing and spawning happen inside a single call and are never
//! observable half-done.

use tracing::{debug, trace};

use crate::board::{Board, ClearedRows};
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::scoring::{
    calculate_hard_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
};
use crate::shapes::random_shape;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// What happened on the most recent lock
///
/// Frontends use `cleared_rows` to flash the rows that just disappeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// Rows removed, top to bottom, in pre-clear board coordinates
    pub cleared_rows: ClearedRows,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// The lock ended the game
    pub topped_out: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Piece,
    next: Piece,
    rng: SimpleRng,
    phase: GamePhase,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    soft_drop: bool,
    /// Time of the last gravity step; unset until the first tick primes it
    last_drop_ms: Option<u64>,
    /// Last lock event (consumed by the frontend)
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Piece::spawn(random_shape(&mut rng));
        let next = Piece::spawn(random_shape(&mut rng));

        Self {
            board: Board::new(),
            current,
            next,
            rng,
            phase: GamePhase::Active,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
            soft_drop: false,
            last_drop_ms: None,
            last_event: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn soft_drop_active(&self) -> bool {
        self.soft_drop
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions (puzzles, tests)
    ///
    /// Callers are responsible for leaving the current piece collision-free.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the current piece, if it fits where it is placed
    pub fn set_current(&mut self, piece: Piece) -> bool {
        if self.game_over() || piece.collides(&self.board) {
            return false;
        }
        self.current = piece;
        true
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.current = PieceSnapshot::from(self.current);
        out.next = PieceSnapshot::from(self.next);
        out.ghost_y = self.ghost_y();
        out.phase = self.phase;
        out.game_over = self.game_over();
        out.soft_drop = self.soft_drop;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Try to move the current piece by (dx, dy)
    ///
    /// Leaves everything unchanged and returns false if the target collides.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over() {
            return false;
        }

        let moved = self.current.offset(dx, dy);
        if moved.collides(&self.board) {
            return false;
        }
        self.current = moved;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Rotate clockwise, trying horizontal kicks -1, +1, -2, +2 in that order
    ///
    /// A rotation that fits nowhere is silently rejected.
    pub fn rotate(&mut self) -> bool {
        if self.game_over() {
            return false;
        }

        let rotated = self.current.shape.rotate_cw();
        let Piece { x, y, .. } = self.current;

        if !self.board.collides(&rotated, x, y) {
            self.current = self.current.with_shape(rotated);
            return true;
        }

        for dx in ROTATION_KICKS {
            let kicked_x = x.saturating_add(dx);
            if !self.board.collides(&rotated, kicked_x, y) {
                trace!(kick = dx, "rotation kicked");
                self.current = Piece {
                    shape: rotated,
                    x: kicked_x,
                    y,
                };
                return true;
            }
        }

        false
    }

    /// Start or stop the faster soft drop gravity
    pub fn set_soft_drop(&mut self, active: bool) -> bool {
        if self.game_over() {
            return false;
        }
        self.soft_drop = active;
        true
    }

    /// Drop one row; lock in place if the piece cannot fall
    ///
    /// Returns whether the piece moved.
    pub fn soft_drop_step(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_current();
        false
    }

    /// Drop to rest, award 2 points per row travelled, then lock
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over() {
            return 0;
        }

        let mut distance: u32 = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }

        self.score = self
            .score
            .saturating_add(calculate_hard_drop_score(distance));
        self.lock_current();
        distance
    }

    /// Move the piece so it is centered on `col`, clamped to the walls
    ///
    /// The piece jumps straight to the target column; it is applied only if
    /// the shape fits there.
    pub fn drag_to_column(&mut self, col: i8) -> bool {
        if self.game_over() {
            return false;
        }

        let width = self.current.shape.width() as i16;
        let target = (col as i16 - width / 2).clamp(0, COLS as i16 - width) as i8;
        if target == self.current.x {
            return false;
        }

        let moved = Piece {
            x: target,
            ..self.current
        };
        if moved.collides(&self.board) {
            return false;
        }
        self.current = moved;
        true
    }

    /// Lock the current piece onto the board and handle line clears
    ///
    /// A piece with any cell above the top edge ends the game without
    /// touching the board. Otherwise the cells are written, full rows are
    /// cleared and scored, and `next` becomes `current`.
    pub fn lock_current(&mut self) {
        if self.game_over() {
            return;
        }

        let piece = self.current;

        if piece.is_above_top() {
            debug!(
                kind = piece.kind().as_str(),
                x = piece.x,
                y = piece.y,
                "locked above the board, game over"
            );
            self.phase = GamePhase::GameOver;
            self.soft_drop = false;
            self.last_event = Some(LockEvent {
                cleared_rows: ClearedRows::new(),
                lines_cleared: 0,
                line_clear_score: 0,
                topped_out: true,
            });
            return;
        }

        self.board.commit(&piece.shape, piece.x, piece.y);

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;

        let mut line_clear_score = 0;
        if lines_cleared > 0 {
            line_clear_score = calculate_line_score(lines_cleared);
            self.lines = self.lines.saturating_add(lines_cleared);
            self.score = self.score.saturating_add(line_clear_score);

            let level = calculate_level(self.lines);
            if level != self.level {
                debug!(level, lines = self.lines, "level up");
            }
            self.level = level;
            self.drop_interval_ms = get_drop_interval_ms(level);

            debug!(
                lines_cleared,
                rows = ?cleared_rows.as_slice(),
                score = self.score,
                "rows cleared"
            );
        }

        self.current = self.next;
        self.next = Piece::spawn(random_shape(&mut self.rng));

        let topped_out = self.current.collides(&self.board);
        if topped_out {
            debug!(
                kind = self.current.kind().as_str(),
                "spawn blocked, game over"
            );
            self.phase = GamePhase::GameOver;
            self.soft_drop = false;
        }

        self.last_event = Some(LockEvent {
            cleared_rows,
            lines_cleared,
            line_clear_score,
            topped_out,
        });
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the current piece would rest on if hard-dropped now
    pub fn ghost_y(&self) -> i8 {
        let Piece { shape, x, y } = self.current;
        let mut ghost_y = y;
        while !self.board.collides(&shape, x, ghost_y.saturating_add(1)) {
            ghost_y += 1;
        }
        ghost_y
    }

    /// Fixed-cadence entry point; applies gravity when the interval has passed
    ///
    /// `now_ms` is any monotonic clock. The first tick after construction or
    /// reset only records the time. Returns whether a gravity step ran.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.game_over() {
            return false;
        }

        let Some(last_drop_ms) = self.last_drop_ms else {
            self.last_drop_ms = Some(now_ms);
            return false;
        };

        let interval = if self.soft_drop {
            SOFT_DROP_MS
        } else {
            self.drop_interval_ms
        };

        if now_ms.saturating_sub(last_drop_ms) < interval as u64 {
            return false;
        }

        self.soft_drop_step();
        self.last_drop_ms = Some(now_ms);
        true
    }

    /// Start a new game in place
    ///
    /// The RNG keeps running, so the new game gets a fresh piece sequence.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = Piece::spawn(random_shape(&mut self.rng));
        self.next = Piece::spawn(random_shape(&mut self.rng));
        self.phase = GamePhase::Active;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = BASE_DROP_MS;
        self.soft_drop = false;
        self.last_drop_ms = None;
        self.last_event = None;
        debug!("game reset");
    }

    /// Apply a command
    ///
    /// Returns whether it had an effect; everything but `Reset` is a no-op
    /// after game over.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::SoftDrop(active) => self.set_soft_drop(active),
            Command::SoftDropStep => {
                let was_active = !self.game_over();
                self.soft_drop_step();
                was_active
            }
            Command::HardDrop => {
                let was_active = !self.game_over();
                self.hard_drop();
                was_active
            }
            Command::Reset => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
