mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_pirates::{Command, GameManager, Scene, Settings};

/// Host frame; the game's own timers run off the elapsed time between frames.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "space_pirates", about = "Fixed-field arcade shooter in the terminal")]
struct Args {
    /// TOML settings file (field size, timer intervals).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy fire, for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Char(' ') => Some(Command::FireBullet),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::StartNextLevel),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::ResetGame),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Every press (and OS key repeat) is one
/// command; releases are ignored.
fn game_loop<W: Write>(
    out: &mut W,
    manager: &mut GameManager<Scene>,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Apply every key press that arrived since the last frame.
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }
            if is_quit(code, modifiers) {
                return Ok(());
            }
            if let Some(command) = command_for(code) {
                manager.apply(command)?;
            }
        }

        manager.advance(frame_start - last_frame, rng);
        last_frame = frame_start;

        if let Some(scene) = manager.canvas() {
            display::render(out, scene, manager.state().field())?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let mut manager: GameManager<Scene> =
        GameManager::from_settings(&settings).context("invalid play-field size")?;
    manager.initialize_game(Some(Scene::new()))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("starting on a {}x{} field", settings.field_width, settings.field_height);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // With event types reported, releases can be told apart and skipped.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the frame loop only polls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut manager, &rx, &mut rng);

    // Restore the terminal even when the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("final score {}", manager.score());
    result
}
