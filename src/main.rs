//! Terminal runner (default binary).
//!
//! Interactive play uses crossterm for input and the framebuffer renderer in
//! `term`; `--headless` switches to the JSON-lines protocol on stdin/stdout.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, Level};
use tracing_subscriber::prelude::*;

use tui_blockfall::core::{ClearedRows, GameSnapshot, GameState};
use tui_blockfall::headless;
use tui_blockfall::input::{
    handle_key_event, handle_mouse_event, is_soft_drop_key, should_quit, MouseAction,
    SoftDropLatch,
};
use tui_blockfall::term::{Effects, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::{Command, LINE_FLASH_MS, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "tui-blockfall", version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    #[arg(long, help = "RNG seed (defaults to the wall clock)")]
    seed: Option<u32>,

    #[arg(
        long,
        default_value_t = TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..=1000),
        help = "Fixed update cadence in milliseconds"
    )]
    tick_ms: u64,

    #[arg(long, help = "Read commands from stdin and write JSON observations to stdout")]
    headless: bool,

    #[arg(long, help = "Write logs to this file (interactive mode logs nowhere otherwise)")]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = Level::INFO, help = "Maximum log level")]
    log_level: Level,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut game = GameState::new(seed);
    info!(seed, headless = cli.headless, "starting tui-blockfall");

    if cli.headless {
        let stdin = io::stdin().lock();
        let stdout = BufWriter::new(io::stdout().lock());
        headless::run(&mut game, stdin, stdout)?;
        return Ok(());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, Duration::from_millis(cli.tick_ms));

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = game.score(), lines = game.lines(), "exiting");
    result
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let file_layer = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    // stderr would tear the alternate screen, so only headless logs there
    let stderr_layer = cli.headless.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(tracing_subscriber::filter::LevelFilter::from_level(cli.log_level))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run<W: io::Write>(
    term: &mut TerminalRenderer<W>,
    game: &mut GameState,
    tick_duration: Duration,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut latch = SoftDropLatch::new();

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;
    let mut last_tick = Instant::now();
    let mut flash: Option<(ClearedRows, u64)> = None;

    loop {
        // Render.
        let now = now_ms();
        let flash_rows: &[u8] = match &flash {
            Some((rows, until)) if now < *until => rows.as_slice(),
            _ => &[],
        };
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Effects { flash_rows }, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        match handle_key_event(key) {
                            Some(Command::SoftDrop(true)) => {
                                if latch.press(now_ms()) {
                                    game.set_soft_drop(true);
                                }
                            }
                            Some(Command::Reset) => {
                                latch.release();
                                flash = None;
                                game.reset();
                            }
                            Some(cmd) => {
                                game.apply(cmd);
                            }
                            None => {}
                        }
                    }
                    KeyEventKind::Release => {
                        if is_soft_drop_key(key.code) && latch.release() {
                            game.set_soft_drop(false);
                        }
                    }
                },
                Event::Mouse(mouse) => match handle_mouse_event(mouse) {
                    Some(MouseAction::Rotate) => {
                        game.rotate();
                    }
                    Some(MouseAction::HardDrop) => {
                        game.hard_drop();
                    }
                    Some(MouseAction::DragTo { x, .. }) => {
                        if let Some(col) = view.board_column_at(viewport, x) {
                            game.drag_to_column(col);
                        }
                    }
                    None => {}
                },
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let now = now_ms();
            if latch.update(now) {
                game.set_soft_drop(false);
            }
            game.tick(now);
        }

        if let Some(ev) = game.take_last_event() {
            if !ev.cleared_rows.is_empty() {
                flash = Some((ev.cleared_rows, now_ms() + LINE_FLASH_MS as u64));
            }
            if ev.topped_out {
                latch.release();
                info!(
                    score = game.score(),
                    lines = game.lines(),
                    level = game.level(),
                    "game over"
                );
            } else {
                debug!(lines = ev.lines_cleared, "piece locked");
            }
        }
    }
}
