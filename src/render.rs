//! Read-only view of the simulation for an external renderer.
//!
//! The core draws nothing itself. `build_snapshot` copies out what a
//! renderer needs: kind, position, heading and visual sub-state.

use crate::entities::{BulletOrigin, EnemyKind, GameStatus, ParticleColor, PowerUpKind, SimulationState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpriteKind {
    Player { shielded: bool, rapid_fire: bool },
    Enemy { kind: EnemyKind, health_fraction: f32 },
    Bullet { origin: BulletOrigin },
    PowerUp { kind: PowerUpKind },
    /// `life` in `(0, 1]` doubles as opacity.
    Particle { color: ParticleColor, life: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
    /// Heading or cosmetic rotation in radians.
    pub angle: f32,
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub width: f32,
    pub height: f32,
    pub status: GameStatus,
    /// Clamped to `[0, max]`.
    pub health: i32,
    pub max_health: i32,
    pub score: u32,
    /// Back to front: particles, power-ups, bullets, enemies, player.
    pub sprites: Vec<Sprite>,
}

pub fn build_snapshot(state: &SimulationState) -> RenderSnapshot {
    let mut sprites = Vec::with_capacity(
        1 + state.enemies.len()
            + state.player_bullets.len()
            + state.hostile_bullets.len()
            + state.power_ups.len()
            + state.particles.len(),
    );

    sprites.extend(state.particles.iter().map(|p| Sprite {
        kind: SpriteKind::Particle { color: p.color, life: p.life },
        x: p.x,
        y: p.y,
        angle: 0.0,
        radius: p.size,
    }));
    sprites.extend(state.power_ups.iter().map(|p| Sprite {
        kind: SpriteKind::PowerUp { kind: p.kind },
        x: p.x,
        y: p.y,
        angle: p.rotation,
        radius: p.radius,
    }));
    sprites.extend(
        state
            .player_bullets
            .iter()
            .chain(&state.hostile_bullets)
            .map(|b| Sprite {
                kind: SpriteKind::Bullet { origin: b.origin },
                x: b.x,
                y: b.y,
                angle: b.angle,
                radius: b.radius,
            }),
    );
    sprites.extend(state.enemies.iter().map(|e| Sprite {
        kind: SpriteKind::Enemy { kind: e.kind, health_fraction: e.health_fraction() },
        x: e.x,
        y: e.y,
        angle: e.angle,
        radius: e.radius,
    }));

    let p = &state.player;
    sprites.push(Sprite {
        kind: SpriteKind::Player { shielded: p.is_shielded(), rapid_fire: p.has_rapid_fire() },
        x: p.x,
        y: p.y,
        angle: p.angle,
        radius: p.radius,
    });

    RenderSnapshot {
        width: state.width,
        height: state.height,
        status: state.status,
        health: p.display_health(),
        max_health: p.max_health,
        score: state.score,
        sprites,
    }
}
