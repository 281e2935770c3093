//! Headless mode - line-delimited JSON over stdin/stdout
//!
//! One command per input line, one JSON message per output line. Meant for
//! scripted play, bots and golden tests: nothing here reads a clock, so a
//! seed plus a command transcript always reproduces the same output.
//!
//! ```text
//! left | right | rotate | soft on | soft off | step | drop | reset
//! drag <col> | tick <now_ms> | snapshot
//! ```
//!
//! Engine command names (`moveLeft`, `hardDrop`, ...) are accepted too.

use std::io::{BufRead, Write};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{GameSnapshot, GameState, LockEvent, PieceSnapshot};
use crate::types::{Command, GamePhase};

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessCommand {
    Engine(Command),
    Drag(i8),
    Tick(u64),
    Snapshot,
}

impl HeadlessCommand {
    pub fn name(&self) -> &'static str {
        match self {
            HeadlessCommand::Engine(cmd) => cmd.as_str(),
            HeadlessCommand::Drag(_) => "drag",
            HeadlessCommand::Tick(_) => "tick",
            HeadlessCommand::Snapshot => "snapshot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "unknown_command")]
    UnknownCommand,
    #[serde(rename = "invalid_argument")]
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
}

impl ParseError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<HeadlessCommand>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(ParseError::new(
            ErrorCode::InvalidArgument,
            format!("unexpected argument '{extra}'"),
        ));
    }

    let cmd = match (head.to_ascii_lowercase().as_str(), arg) {
        ("left", None) => HeadlessCommand::Engine(Command::MoveLeft),
        ("right", None) => HeadlessCommand::Engine(Command::MoveRight),
        ("step", None) => HeadlessCommand::Engine(Command::SoftDropStep),
        ("drop", None) => HeadlessCommand::Engine(Command::HardDrop),
        ("snapshot", None) => HeadlessCommand::Snapshot,
        ("soft", Some(state)) => match state.to_ascii_lowercase().as_str() {
            "on" => HeadlessCommand::Engine(Command::SoftDrop(true)),
            "off" => HeadlessCommand::Engine(Command::SoftDrop(false)),
            other => {
                return Err(ParseError::new(
                    ErrorCode::InvalidArgument,
                    format!("soft expects on/off, got '{other}'"),
                ))
            }
        },
        ("drag", Some(col)) => HeadlessCommand::Drag(parse_arg(head, col)?),
        ("tick", Some(now)) => HeadlessCommand::Tick(parse_arg(head, now)?),
        ("soft" | "drag" | "tick", None) => {
            return Err(ParseError::new(
                ErrorCode::InvalidArgument,
                format!("{head} expects an argument"),
            ))
        }
        (_, None) => match Command::from_str(head) {
            Some(cmd) => HeadlessCommand::Engine(cmd),
            None => {
                return Err(ParseError::new(
                    ErrorCode::UnknownCommand,
                    format!("unknown command '{head}'"),
                ))
            }
        },
        (_, Some(_)) => {
            return Err(ParseError::new(
                ErrorCode::InvalidArgument,
                format!("{head} takes no argument"),
            ))
        }
    };
    Ok(Some(cmd))
}

fn parse_arg<T: std::str::FromStr>(cmd: &str, raw: &str) -> Result<T, ParseError> {
    raw.parse().map_err(|_| {
        ParseError::new(
            ErrorCode::InvalidArgument,
            format!("{cmd}: invalid number '{raw}'"),
        )
    })
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseView {
    Active,
    GameOver,
}

impl From<GamePhase> for PhaseView {
    fn from(value: GamePhase) -> Self {
        match value {
            GamePhase::Active => PhaseView::Active,
            GamePhase::GameOver => PhaseView::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub kind: String,
    pub x: i8,
    pub y: i8,
    /// Occupied cells in board coordinates, `[col, row]`
    pub cells: Vec<[i8; 2]>,
}

impl From<&PieceSnapshot> for PieceView {
    fn from(p: &PieceSnapshot) -> Self {
        Self {
            kind: p.kind().as_str().to_string(),
            x: p.x,
            y: p.y,
            cells: p.shape.cells().map(|(c, r)| [p.x + c, p.y + r]).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEvent {
    #[serde(rename = "lines_cleared")]
    pub lines_cleared: u32,
    #[serde(rename = "cleared_rows")]
    pub cleared_rows: Vec<u8>,
    #[serde(rename = "line_clear_score")]
    pub line_clear_score: u32,
    #[serde(rename = "topped_out")]
    pub topped_out: bool,
}

impl From<&LockEvent> for LastEvent {
    fn from(ev: &LockEvent) -> Self {
        Self {
            lines_cleared: ev.lines_cleared,
            cleared_rows: ev.cleared_rows.to_vec(),
            line_clear_score: ev.line_clear_score,
            topped_out: ev.topped_out,
        }
    }
}

/// Game state after a command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub command: String,
    /// Whether the command changed anything
    pub applied: bool,
    pub phase: PhaseView,
    #[serde(rename = "game_over")]
    pub game_over: bool,
    /// Rows of grid codes, 0 = empty, 1..=7 = I O T J L S Z
    pub board: Vec<Vec<u8>>,
    pub current: PieceView,
    #[serde(rename = "ghost_y")]
    pub ghost_y: i8,
    pub next: String,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    #[serde(rename = "drop_interval_ms")]
    pub drop_interval_ms: u32,
    #[serde(rename = "soft_drop")]
    pub soft_drop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "last_event")]
    #[serde(default)]
    pub last_event: Option<LastEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

pub fn build_observation(
    seq: u64,
    command: &str,
    applied: bool,
    snap: &GameSnapshot,
    last_event: Option<&LockEvent>,
) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        command: command.to_string(),
        applied,
        phase: snap.phase.into(),
        game_over: snap.game_over,
        board: snap.board.iter().map(|row| row.to_vec()).collect(),
        current: PieceView::from(&snap.current),
        ghost_y: snap.ghost_y,
        next: snap.next.kind().as_str().to_string(),
        score: snap.score,
        lines: snap.lines,
        level: snap.level,
        drop_interval_ms: snap.drop_interval_ms,
        soft_drop: snap.soft_drop,
        last_event: last_event.map(LastEvent::from),
    }
}

pub fn create_error(seq: u64, err: ParseError) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code: err.code,
        message: err.message,
    }
}

/// Run one command against the game; returns whether it had an effect.
pub fn execute(game: &mut GameState, cmd: HeadlessCommand) -> bool {
    match cmd {
        HeadlessCommand::Engine(c) => game.apply(c),
        HeadlessCommand::Drag(col) => game.drag_to_column(col),
        HeadlessCommand::Tick(now_ms) => game.tick(now_ms),
        HeadlessCommand::Snapshot => false,
    }
}

/// Counters reported when the input ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: u64,
    pub errors: u64,
}

/// Read commands until EOF (or `quit`), writing one JSON line per command.
pub fn run<R: BufRead, W: Write>(
    game: &mut GameState,
    mut input: R,
    mut out: W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut seq: u64 = 0;
    let mut snap = GameSnapshot::default();
    let mut buf = Vec::new();

    info!("headless session started");

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        let parsed = match std::str::from_utf8(&buf) {
            Ok(text) => {
                if text.trim().eq_ignore_ascii_case("quit") {
                    break;
                }
                parse_line(text)
            }
            Err(_) => Err(ParseError::new(
                ErrorCode::InvalidArgument,
                "input line is not valid UTF-8",
            )),
        };

        match parsed {
            Ok(None) => continue,
            Ok(Some(cmd)) => {
                seq += 1;
                summary.commands += 1;
                let applied = execute(game, cmd);
                debug!(seq, command = cmd.name(), applied, "command");

                let event = game.take_last_event();
                game.snapshot_into(&mut snap);
                let msg = build_observation(seq, cmd.name(), applied, &snap, event.as_ref());
                serde_json::to_writer(&mut out, &msg)?;
            }
            Err(err) => {
                seq += 1;
                summary.errors += 1;
                warn!(seq, line, error = err.message.as_str(), "rejected input");
                serde_json::to_writer(&mut out, &create_error(seq, err))?;
            }
        }
        out.write_all(b"\n")?;
        out.flush()?;
    }

    info!(
        commands = summary.commands,
        errors = summary.errors,
        score = game.score(),
        "headless session ended"
    );
    Ok(summary)
}
