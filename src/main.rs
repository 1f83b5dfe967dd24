mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::filter::EnvFilter;

use aliens::audio::{Audio, BellAudio, SilentAudio};
use aliens::config::Settings;
use aliens::game::Game;
use aliens::input::{Key, KeyState};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so traces go to a file.  A log file that
/// cannot be created only costs us the traces.
fn init_logging(path: &Path) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("logging disabled: {}: {err}", path.display());
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame drains every pending key event into `KeyState`, steps the game
/// once and redraws.  Terminals with keyboard enhancement report releases
/// directly; classic terminals only repeat presses, and `KeyState` expires
/// keys whose repeats stop arriving.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let frame_len = Duration::from_millis(game.settings().frame_ms());
    let clock = Instant::now();
    let mut keys = KeyState::new();

    loop {
        let frame_start = Instant::now();
        keys.begin_frame();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            let Some(key) = map_key(code, modifiers) else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if key == Key::Quit {
                        tracing::info!(frames = game.frames(), "quit requested");
                        return Ok(());
                    }
                    keys.press(key);
                }
                KeyEventKind::Release => keys.release(key),
            }
        }

        let now_ms = clock.elapsed().as_millis() as u64;
        game.frame(&keys, now_ms).context("frame update failed")?;
        display::render(out, game).context("render failed")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    init_logging(&settings.log_file);

    let audio: Box<dyn Audio> = if settings.bell {
        Box::new(BellAudio::new(stdout()))
    } else {
        Box::new(SilentAudio)
    };
    let mut game = Game::new(settings, audio).context("failed to start the game")?;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enter raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without the kitty protocol refuse.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(error = %err, "game aborted");
    }
    result
}
