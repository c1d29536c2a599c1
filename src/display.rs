//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! simulation (`RenderSnapshot`) plus the HUD model fed by simulation events.
//! No game logic is performed; arena coordinates are scaled onto the
//! terminal grid inside the border.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use arena_shooter::entities::{BulletOrigin, EnemyKind, GameStatus, ParticleColor, PowerUpKind};
use arena_shooter::render::{RenderSnapshot, Sprite, SpriteKind};

use crate::Hud;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_SHIELD: Color = Color::Blue;
const C_ENEMY_BASIC: Color = Color::Blue;
const C_ENEMY_SHOOTER: Color = Color::Red;
const C_ENEMY_BOSS: Color = Color::Magenta;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Red;
const C_BULLET_BOSS: Color = Color::Magenta;
const C_POWERUP_HEALTH: Color = Color::Green;
const C_POWERUP_RAPID: Color = Color::DarkYellow;
const C_POWERUP_SHIELD: Color = Color::Blue;
const C_BUFF_ACTIVE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Terminal rectangle the arena is mapped onto.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(snapshot: &RenderSnapshot, cols: u16, rows: u16) -> Self {
        // Playfield spans columns 1..cols-1 and rows 2..rows-2.
        let play_w = cols.saturating_sub(2).max(1) as f32;
        let play_h = rows.saturating_sub(4).max(1) as f32;
        Viewport {
            cols,
            rows,
            sx: play_w / snapshot.width,
            sy: play_h / snapshot.height,
        }
    }

    /// Cell for an arena point, or `None` if it falls outside the border.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = 1.0 + x * self.sx;
        let row = 2.0 + y * self.sy;
        if col < 1.0 || row < 2.0 {
            return None;
        }
        let (col, row) = (col as u16, row as u16);
        if col >= self.cols.saturating_sub(1) || row >= self.rows.saturating_sub(2) {
            return None;
        }
        Some((col, row))
    }

    /// Inverse of `cell`, for pointer aiming.
    fn arena_point(&self, col: u16, row: u16) -> (f32, f32) {
        ((col as f32 - 1.0 + 0.5) / self.sx, (row as f32 - 2.0 + 0.5) / self.sy)
    }
}

/// Map a terminal cell back to arena coordinates.
pub fn cell_to_arena(snapshot: &RenderSnapshot, col: u16, row: u16) -> std::io::Result<(f32, f32)> {
    let (cols, rows) = terminal::size()?;
    Ok(Viewport::new(snapshot, cols, rows).arena_point(col, row))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snapshot: &RenderSnapshot, hud: &Hud) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(snapshot, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, &view, hud)?;

    for sprite in &snapshot.sprites {
        draw_sprite(out, &view, sprite)?;
    }

    draw_controls_hint(out, &view, hud)?;

    match snapshot.status {
        GameStatus::Idle => draw_start_screen(out, &view)?,
        GameStatus::GameOver => draw_game_over(out, &view, hud)?,
        GameStatus::Running => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", hud.score)))?;

    // Buff indicators and boss warning — centre
    let mut tags = String::new();
    if hud.rapid_fire {
        tags.push_str("[! RAPID] ");
    }
    if hud.shield {
        tags.push_str("[○ SHIELD] ");
    }
    if hud.boss_music {
        tags.push_str("[☠ BOSS]");
    }
    if !tags.is_empty() {
        let tx = (view.cols / 2).saturating_sub(tags.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(tx, 0))?;
        out.queue(style::SetForegroundColor(C_BUFF_ACTIVE))?;
        out.queue(Print(&tags))?;
    }

    // Health — right side
    let health_str = format!("Health:{:>4}", hud.health);
    let rx = view.cols.saturating_sub(health_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(sprite.x, sprite.y) else {
        return Ok(());
    };
    let (glyph, color) = match sprite.kind {
        SpriteKind::Player { shielded, .. } => {
            (heading_arrow(sprite.angle), if shielded { C_SHIELD } else { C_PLAYER })
        }
        SpriteKind::Enemy { kind, health_fraction } => {
            let glyph = match kind {
                EnemyKind::Basic => "◆",
                EnemyKind::Shooter => "▼",
                EnemyKind::Boss => "☠",
            };
            let color = match kind {
                EnemyKind::Basic => C_ENEMY_BASIC,
                EnemyKind::Shooter => C_ENEMY_SHOOTER,
                EnemyKind::Boss if health_fraction > 0.5 => C_ENEMY_BOSS,
                EnemyKind::Boss if health_fraction > 0.25 => Color::Yellow,
                EnemyKind::Boss => Color::Red,
            };
            (glyph, color)
        }
        SpriteKind::Bullet { origin } => match origin {
            BulletOrigin::Player => ("•", C_BULLET_PLAYER),
            BulletOrigin::Shooter => ("∘", C_BULLET_ENEMY),
            BulletOrigin::Boss => ("●", C_BULLET_BOSS),
        },
        SpriteKind::PowerUp { kind } => match kind {
            PowerUpKind::Health => ("♥", C_POWERUP_HEALTH),
            PowerUpKind::RapidFire => ("!", C_POWERUP_RAPID),
            PowerUpKind::Shield => ("○", C_POWERUP_SHIELD),
        },
        SpriteKind::Particle { color, life } => {
            let glyph = if life > 0.5 { "*" } else { "·" };
            let color = match color {
                ParticleColor::Blue => Color::Blue,
                ParticleColor::Red => Color::Red,
                ParticleColor::Purple => Color::Magenta,
            };
            (glyph, color)
        }
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// One of eight arrows closest to a heading (y grows downward).
fn heading_arrow(angle: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let octant = (angle / std::f32::consts::FRAC_PI_4).round() as i32;
    ARROWS[octant.rem_euclid(8) as usize]
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    let aim = if hud.pointer_aim { "mouse" } else { "auto" };
    let sound = if hud.muted { "off" } else { "on" };
    out.queue(Print(format!(
        "WASD/←↑→↓ : Move   SPACE/click : Shoot   T : Aim ({aim})   M : Sound ({sound})   Q : Quit"
    )))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered_lines<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_start_screen<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines = [
        ("★  ARENA  SHOOTER  ★".to_string(), Color::Cyan),
        (String::new(), Color::White),
        ("Survive the waves. Score 500 to face the boss.".to_string(), Color::White),
        ("♥ heal   ! rapid fire   ○ shield".to_string(), Color::DarkGrey),
        (String::new(), Color::White),
        ("SPACE / ENTER - Start".to_string(), Color::Yellow),
    ];
    draw_centered_lines(out, view, &lines)
}

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    let final_score = hud.final_score.unwrap_or(hud.score);
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>6}", final_score), Color::Yellow),
        ("SPACE / R - Play Again  Q - Quit".to_string(), Color::White),
    ];
    draw_centered_lines(out, view, &lines)
}
