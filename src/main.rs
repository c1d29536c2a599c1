mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use arena_shooter::entities::GameStatus;
use arena_shooter::geometry::angle_to;
use arena_shooter::{AudioCue, Buff, EventSink, GameConfig, GameEvent, HudUpdate, InputSnapshot, Schedule, Session};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈128 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Command line ──────────────────────────────────────────────────────────────

/// Top-down arena shooter in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Arena width in pixels (overrides the config).
    #[arg(long)]
    width: Option<f32>,
    /// Arena height in pixels (overrides the config).
    #[arg(long)]
    height: Option<f32>,
    /// RNG seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
    /// Where log output goes (`RUST_LOG` sets the filter). Defaults to
    /// `arena_shooter.log` in the temp directory.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Logs go to a file: stderr would draw over the alternate screen.
    fn init_logging(&self) -> anyhow::Result<PathBuf> {
        let path = self
            .log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("arena_shooter.log"));
        let file = File::create(&path).with_context(|| format!("creating log file {}", path.display()))?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
        Ok(path)
    }

    fn into_config(self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.arena.width = width;
        }
        if let Some(height) = self.height {
            config.arena.height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

// ── Presentation: HUD model and audio ─────────────────────────────────────────

/// Everything the HUD shows, kept current from simulation events.
#[derive(Debug, Default)]
pub struct Hud {
    pub health: i32,
    pub score: u32,
    pub rapid_fire: bool,
    pub shield: bool,
    pub final_score: Option<u32>,
    pub boss_music: bool,
    pub muted: bool,
    pub pointer_aim: bool,
}

impl Hud {
    /// Terminal "audio": a bell for the big moments, nothing while muted.
    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::BossSpawned => self.boss_music = true,
            AudioCue::BossDefeated => self.boss_music = false,
            _ => {}
        }
        if self.muted {
            return;
        }
        log::trace!("audio cue {}", cue.name());
        if matches!(cue, AudioCue::BossSpawned | AudioCue::PowerUpCollected) {
            print!("\x07");
        }
    }
}

impl EventSink for Hud {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::Audio(cue) => self.play(cue),
            GameEvent::Hud(HudUpdate::Stats { health, score }) => {
                self.health = health;
                self.score = score;
            }
            GameEvent::Hud(HudUpdate::BuffChanged { buff, active }) => match buff {
                Buff::RapidFire => self.rapid_fire = active,
                Buff::Shield => self.shield = active,
            },
            GameEvent::Hud(HudUpdate::GameOver { final_score }) => {
                self.final_score = Some(final_score);
                self.boss_music = false;
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and fold them into one `InputSnapshot`.
/// Mouse motion supplies the pointer aim; `T` switches to auto-aim.
fn game_loop<W: Write>(out: &mut W, session: &mut Session, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    let mut hud = Hud { pointer_aim: true, ..Hud::default() };
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut pointer: Option<(u16, u16)> = None;
    let mut mouse_down = false;
    let mut frame: u64 = 0;
    // No sprites to load in a terminal, so assets are ready immediately.
    let assets_ready = true;
    let epoch = Instant::now();

    hud.health = session.state().player.display_health();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('m') | KeyCode::Char('M') => {
                                hud.muted = !hud.muted;
                                log::info!("sound {}", if hud.muted { "muted" } else { "on" });
                            }
                            KeyCode::Char('t') | KeyCode::Char('T') => hud.pointer_aim = !hud.pointer_aim,
                            KeyCode::Char(' ') | KeyCode::Enter
                                if session.status() == GameStatus::Idle && assets_ready =>
                            {
                                session.start(&mut hud);
                            }
                            KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R')
                                if session.status() == GameStatus::GameOver =>
                            {
                                hud.final_score = None;
                                hud.boss_music = false;
                                session.restart(&mut hud);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    pointer = Some((column, row));
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => mouse_down = true,
                        MouseEventKind::Up(MouseButton::Left) => mouse_down = false,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // ── Fold held keys into this tick's input ─────────────────────────────
        let held = |keys: &[KeyCode]| any_held(&key_frame, keys, frame);
        let mut input = InputSnapshot::from_directions(
            held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        )
        .with_fire(mouse_down || held(&[KeyCode::Char(' ')]));

        let snapshot = session.snapshot();
        if hud.pointer_aim {
            if let Some((col, row)) = pointer {
                let (ax, ay) = display::cell_to_arena(&snapshot, col, row)?;
                let p = &session.state().player;
                input = input.with_aim(angle_to(p.x, p.y, ax, ay));
            }
        }

        if session.status() == GameStatus::Running {
            let now_ms = epoch.elapsed().as_millis() as u64;
            if session.frame(&input, now_ms, &mut hud) == Schedule::Halt {
                log::debug!("loop halted at frame {frame}");
            }
        }

        display::render(out, &session.snapshot(), &hud)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_path = args.init_logging()?;
    log::debug!("logging to {}", log_path.display());
    let config = args.into_config()?;
    let mut session = Session::new(&config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::warn!("input thread stopped: {err}");
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("game loop failed: {err:#}");
    } else {
        log::info!("final score {}", session.state().score);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn log_file_flag_is_optional() {
        let args = Args::try_parse_from(["arena_shooter", "--log-file", "/tmp/arena.log", "--seed", "3"]).unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/arena.log")));
        assert_eq!(args.seed, Some(3));

        let args = Args::try_parse_from(["arena_shooter"]).unwrap();
        assert_eq!(args.log_file, None);
        assert_eq!(args.into_config().unwrap().arena.width, 480.0);
    }
}
