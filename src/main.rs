//! BLOCKFALL - terminal driver
//!
//! Owns everything the engine leaves out: the clock, the keyboard, the screen and the
//! settings file. All actions, from keys and from the gravity timer alike, go through
//! the game's single action queue.

use blockfall::game::{Action, Game, GameData};
use blockfall::input::{Command, KeyBindings};
use blockfall::randomizer::{UniformSource, VariantSource};
use blockfall::settings::Settings;
use blockfall::timer::GravityTimer;
use blockfall::{GameEvent, ui};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Settings key the best score is stored under
const HIGH_SCORE_KEY: &str = "classic";

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file so tracing output never lands on the game screen
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    // Bad settings stop us here, before the terminal is touched
    let mut settings = Settings::load().map_err(|e| {
        tracing::error!("failed to load settings: {}", e);
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;

    let source: Box<dyn VariantSource> = Box::new(UniformSource::from_entropy());
    let mut game = Game::new(
        settings.rules.clone(),
        source,
        settings.high_score(HIGH_SCORE_KEY),
    )
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let keys = KeyBindings::from_names(&settings.keys);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &keys, &mut settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    let last = game.state();
    settings.record_high_score(HIGH_SCORE_KEY, last.high_score.max(last.score));
    if let Err(e) = settings.save() {
        tracing::warn!("could not save settings: {}", e);
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if result.is_ok() {
        println!("\nThanks for playing BLOCKFALL!");
        println!("Final Score: {}", last.score);
        println!("Level: {} | Lines: {}", last.level, last.lines_cleared_total);
        println!("Best: {}", settings.high_score(HIGH_SCORE_KEY));
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    keys: &KeyBindings,
    settings: &mut Settings,
) -> io::Result<()> {
    let mut timer = GravityTimer::new(game.rules());

    loop {
        terminal.draw(|frame| ui::render(frame, game.state()))?;

        let timeout = timer.time_until_tick(Instant::now()).min(FRAME_DURATION);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match keys.command(key, game.state().phase) {
                        Some(Command::Exit) => return Ok(()),
                        Some(Command::Game(action)) => game.submit(action),
                        None => {}
                    }
                }
            }
        }

        if timer.poll(Instant::now(), game.state(), game.rules()) {
            game.submit(Action::Tick);
        }

        for event in game.process() {
            on_event(event, game.state(), settings);
        }
    }
}

/// Log what happened and persist a finished game's high score
fn on_event(event: GameEvent, state: &GameData, settings: &mut Settings) {
    match event {
        GameEvent::Started => tracing::info!("game started"),
        GameEvent::Paused => tracing::debug!("paused"),
        GameEvent::Resumed => tracing::debug!("resumed"),
        GameEvent::PieceLocked => {}
        GameEvent::LinesCleared(lines) => {
            tracing::info!(lines, total = state.lines_cleared_total, score = state.score, "lines cleared");
        }
        GameEvent::LevelUp(level) => tracing::info!(level, "level up"),
        GameEvent::GameOver { score, high_score } => {
            tracing::info!(score, high_score, "game finished");
            if settings.record_high_score(HIGH_SCORE_KEY, high_score) {
                if let Err(e) = settings.save() {
                    tracing::warn!("could not save high score: {}", e);
                }
            }
        }
    }
}
