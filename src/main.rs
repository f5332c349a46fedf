//! Terminal Tetris runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `term-tetris-term`.
//!
//! Environment:
//! - `TETRIS_SEED`, `TETRIS_RANDOMIZER`, `TETRIS_LINES_PER_LEVEL`, `TETRIS_START_LEVEL`:
//!   game rules (see `GameConfig::from_env`)
//! - `TETRIS_LOG_PATH`: append logs to this file (logging is off when unset)
//! - `TETRIS_LOG`: log filter, default `info`

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use term_tetris::core::{GameConfig, GameSnapshot, GameState};
use term_tetris::input::{handle_key_event, should_quit, InputHandler};
use term_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use term_tetris::types::{Command, GameStatus, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;

    let config = game_config();
    info!(
        seed = config.seed,
        randomizer = config.randomizer.as_str(),
        lines_per_level = config.lines_per_level,
        start_level = config.start_level,
        "starting game"
    );

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, config));

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Err(err) = &result {
        error!(error = %err, "game loop failed");
    }
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("TETRIS_LOG_PATH") else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {path}"))?;
    let filter = EnvFilter::try_from_env("TETRIS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

/// Rules from the environment; without `TETRIS_SEED` every run gets a fresh seed.
fn game_config() -> GameConfig {
    let config = GameConfig::from_env();
    if std::env::var_os("TETRIS_SEED").is_some() {
        return config;
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1);
    config.with_seed(seed)
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut game = GameState::new(config);
    let view = GameView::default();
    let mut input = InputHandler::new();

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_status = game.status();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick; drain everything that is queued.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            loop {
                match event::read()? {
                    Event::Key(key) => {
                        if handle_key(&mut game, &mut input, key) {
                            info!(score = game.score(), high_score = game.high_score(), "quit");
                            return Ok(());
                        }
                    }
                    Event::Resize(..) => term.invalidate(),
                    Event::FocusLost => input.reset(),
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed_ms = u32::try_from(last_tick.elapsed().as_millis()).unwrap_or(u32::MAX);
            last_tick = Instant::now();

            if game.status() == GameStatus::Running {
                for command in input.update(elapsed_ms) {
                    game.apply_action(command);
                }
            }
            game.tick(elapsed_ms);
        }

        if let Some(ev) = game.take_last_event() {
            if ev.lines_cleared > 0 {
                debug!(
                    lines = ev.lines_cleared,
                    points = ev.points,
                    total = game.score(),
                    "rows cleared"
                );
            }
        }

        if game.status() != last_status {
            if game.status() != GameStatus::Running {
                input.reset();
            }
            debug!(from = last_status.as_str(), to = game.status().as_str(), "status changed");
            last_status = game.status();
        }
    }
}

/// Route one key event. Returns true when the player asked to quit.
fn handle_key(game: &mut GameState, input: &mut InputHandler, key: KeyEvent) -> bool {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            if should_quit(key) {
                return true;
            }
            if InputHandler::handles(key.code) {
                // Held movement keys repeat through DAS/ARR, not terminal auto-repeat.
                if let Some(command) = input.handle_key_press(key.code) {
                    game.apply_action(command);
                }
            } else if key.kind == KeyEventKind::Press {
                if let Some(command) = handle_key_event(key) {
                    if command == Command::Restart {
                        input.reset();
                    }
                    game.apply_action(command);
                }
            }
        }
        KeyEventKind::Release => input.handle_key_release(key.code),
    }
    false
}
