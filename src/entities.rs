//! Game entity types and their per-tick behaviour.
//!
//! Each entity knows how to `advance` itself by one tick and whether it is
//! `expired` (ready to be pruned). Pairwise interactions live in `combat`,
//! emission in `spawner`.

use std::f32::consts::TAU;

use rand::Rng;

use crate::constants::*;
use crate::geometry::{angle_to, distance, random_range};
use crate::spawner::Spawner;

// ── Status ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Before the first start command.
    Idle,
    Running,
    GameOver,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Heading in radians.
    pub angle: f32,
    pub radius: f32,
    /// May dip below zero inside a tick; use `display_health` for reporting.
    pub health: i32,
    pub max_health: i32,
    /// Wall-clock time of the last shot, `None` until the first one.
    pub last_shot_ms: Option<u64>,
    /// Activation time of the shield buff, `None` while inactive.
    pub shield_since: Option<u64>,
    /// Activation time of the rapid-fire buff, `None` while inactive.
    pub rapid_fire_since: Option<u64>,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            x,
            y,
            angle: 0.0,
            radius: PLAYER_RADIUS,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            last_shot_ms: None,
            shield_since: None,
            rapid_fire_since: None,
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.shield_since.is_some()
    }

    pub fn has_rapid_fire(&self) -> bool {
        self.rapid_fire_since.is_some()
    }

    /// Minimum time between shots, halved while rapid fire is armed.
    pub fn fire_interval_ms(&self) -> u64 {
        if self.has_rapid_fire() {
            PLAYER_FIRE_INTERVAL_MS / 2
        } else {
            PLAYER_FIRE_INTERVAL_MS
        }
    }

    pub fn can_fire(&self, now_ms: u64) -> bool {
        match self.last_shot_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.fire_interval_ms(),
            None => true,
        }
    }

    /// Health clamped to `[0, max_health]`.
    pub fn display_health(&self) -> i32 {
        self.health.clamp(0, self.max_health)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn health_fraction(&self) -> f32 {
        self.display_health() as f32 / self.max_health as f32
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Who fired a bullet. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOrigin {
    Player,
    Shooter,
    /// Radial burst shot: slower, bigger, harder-hitting.
    Boss,
}

impl BulletOrigin {
    pub fn is_hostile(self) -> bool {
        !matches!(self, BulletOrigin::Player)
    }
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub speed: f32,
    pub damage: i32,
    pub radius: f32,
    pub origin: BulletOrigin,
}

impl Bullet {
    /// Build a bullet with the stock stats for its origin.
    pub fn new(origin: BulletOrigin, x: f32, y: f32, angle: f32) -> Self {
        let (speed, damage, radius) = match origin {
            BulletOrigin::Player => (PLAYER_BULLET_SPEED, PLAYER_BULLET_DAMAGE, PLAYER_BULLET_RADIUS),
            BulletOrigin::Shooter => (SHOOTER_BULLET_SPEED, SHOOTER_BULLET_DAMAGE, SHOOTER_BULLET_RADIUS),
            BulletOrigin::Boss => (BOSS_BULLET_SPEED, BOSS_BULLET_DAMAGE, BOSS_BULLET_RADIUS),
        };
        Bullet { x, y, angle, speed, damage, radius, origin }
    }

    pub fn advance(&mut self) {
        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed;
    }

    /// True once the bullet is well outside the arena.
    pub fn is_expired(&self, width: f32, height: f32) -> bool {
        self.x < -OFFSCREEN_MARGIN
            || self.x > width + OFFSCREEN_MARGIN
            || self.y < -OFFSCREEN_MARGIN
            || self.y > height + OFFSCREEN_MARGIN
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Basic,
    Shooter,
    Boss,
}

/// Cosmetic colour tag for explosion particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleColor {
    Blue,
    Red,
    Purple,
}

/// Fixed stat template for an archetype.
#[derive(Clone, Copy, Debug)]
pub struct EnemyStats {
    pub max_health: i32,
    pub speed: f32,
    /// 0 means melee only.
    pub fire_interval_ms: u64,
    pub points: u32,
    pub radius: f32,
    /// The enemy stops closing in once this near the player.
    pub stand_off: f32,
    pub particle_color: ParticleColor,
}

static BASIC_STATS: EnemyStats = EnemyStats {
    max_health: 3,
    speed: 1.5,
    fire_interval_ms: 0,
    points: 10,
    radius: 14.0,
    stand_off: 80.0,
    particle_color: ParticleColor::Blue,
};

static SHOOTER_STATS: EnemyStats = EnemyStats {
    max_health: 5,
    speed: 1.2,
    fire_interval_ms: 2_000,
    points: 25,
    radius: 14.0,
    stand_off: 80.0,
    particle_color: ParticleColor::Red,
};

static BOSS_STATS: EnemyStats = EnemyStats {
    max_health: 50,
    speed: 0.8,
    fire_interval_ms: 1_500,
    points: 200,
    radius: 30.0,
    stand_off: 150.0,
    particle_color: ParticleColor::Purple,
};

impl EnemyKind {
    pub fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyKind::Basic => &BASIC_STATS,
            EnemyKind::Shooter => &SHOOTER_STATS,
            EnemyKind::Boss => &BOSS_STATS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    /// Unique within a session; used to track the boss.
    pub id: u32,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub fire_interval_ms: u64,
    pub points: u32,
    pub radius: f32,
    pub last_shot_ms: Option<u64>,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, x: f32, y: f32) -> Self {
        let stats = kind.stats();
        Enemy {
            id,
            kind,
            x,
            y,
            angle: 0.0,
            speed: stats.speed,
            health: stats.max_health,
            max_health: stats.max_health,
            fire_interval_ms: stats.fire_interval_ms,
            points: stats.points,
            radius: stats.radius,
            last_shot_ms: None,
        }
    }

    /// Turn towards the target, close in until within stand-off range, and
    /// fire into `hostile` when the cooldown allows. Returns whether it fired.
    pub fn advance(&mut self, target_x: f32, target_y: f32, now_ms: u64, hostile: &mut Vec<Bullet>) -> bool {
        self.angle = angle_to(self.x, self.y, target_x, target_y);

        if distance(self.x, self.y, target_x, target_y) > self.kind.stats().stand_off {
            self.x += self.angle.cos() * self.speed;
            self.y += self.angle.sin() * self.speed;
        }

        if self.fire_interval_ms == 0 {
            return false;
        }
        let ready = match self.last_shot_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.fire_interval_ms,
            None => true,
        };
        if ready {
            self.shoot(hostile);
            self.last_shot_ms = Some(now_ms);
        }
        ready
    }

    fn shoot(&self, hostile: &mut Vec<Bullet>) {
        match self.kind {
            EnemyKind::Boss => {
                for k in 0..BOSS_BURST_COUNT {
                    let angle = TAU / BOSS_BURST_COUNT as f32 * k as f32;
                    hostile.push(Bullet::new(BulletOrigin::Boss, self.x, self.y, angle));
                }
            }
            EnemyKind::Shooter | EnemyKind::Basic => {
                hostile.push(Bullet::new(BulletOrigin::Shooter, self.x, self.y, self.angle));
            }
        }
    }

    /// Apply damage; returns true if this hit was lethal.
    pub fn hit(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn health_fraction(&self) -> f32 {
        self.health.max(0) as f32 / self.max_health as f32
    }
}

// ── Power-ups ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    RapidFire,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Health, PowerUpKind::RapidFire, PowerUpKind::Shield];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Cosmetic spin.
    pub rotation: f32,
    pub radius: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32) -> Self {
        PowerUp {
            x,
            y,
            speed: POWERUP_DRIFT_SPEED,
            rotation: 0.0,
            radius: POWERUP_RADIUS,
            kind,
        }
    }

    pub fn advance(&mut self) {
        self.y += self.speed;
        self.rotation += POWERUP_SPIN;
    }

    /// Power-ups only drift down, so only the bottom edge matters.
    pub fn is_expired(&self, height: f32) -> bool {
        self.y > height + OFFSCREEN_MARGIN
    }
}

// ── Particles ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Starts at 1.0, expired at or below 0.
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn random(rng: &mut impl Rng, x: f32, y: f32, color: ParticleColor) -> Self {
        Particle {
            x,
            y,
            vx: random_range(rng, -PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED),
            vy: random_range(rng, -PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED),
            life: 1.0,
            decay: random_range(rng, PARTICLE_DECAY_MIN, PARTICLE_DECAY_MAX),
            size: random_range(rng, PARTICLE_SIZE_MIN, PARTICLE_SIZE_MAX),
            color,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= self.decay;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

// ── Master simulation state ──────────────────────────────────────────────────

/// Everything one game session mutates. Owned by the session and threaded
/// through every update; there is no ambient global state.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub width: f32,
    pub height: f32,
    pub player: Player,
    /// Bullets fired by the player.
    pub player_bullets: Vec<Bullet>,
    /// Bullets fired by shooters and the boss.
    pub hostile_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Id of the live boss, if any. `Some` iff a boss is in `enemies`.
    pub boss: Option<u32>,
    pub spawner: Spawner,
    pub status: GameStatus,
    pub frame: u64,
    pub next_enemy_id: u32,
}

impl SimulationState {
    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }

    /// Create an enemy with a fresh id and add it to the field.
    pub fn add_enemy(&mut self, kind: EnemyKind, x: f32, y: f32) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        self.enemies.push(Enemy::new(id, kind, x, y));
        id
    }

    /// Append `count` explosion particles at a point.
    pub fn burst(&mut self, rng: &mut impl Rng, x: f32, y: f32, color: ParticleColor, count: usize) {
        self.particles
            .extend((0..count).map(|_| Particle::random(rng, x, y, color)));
    }

    /// The living enemy closest to `(x, y)`.
    pub fn nearest_enemy(&self, x: f32, y: f32) -> Option<&Enemy> {
        self.enemies
            .iter()
            .filter(|e| !e.is_dead())
            .min_by(|a, b| {
                distance(x, y, a.x, a.y).total_cmp(&distance(x, y, b.x, b.y))
            })
    }
}
