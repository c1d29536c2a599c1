//! Tuning constants for the simulation.
//!
//! Distances are arena pixels, speeds are pixels per tick, times are
//! milliseconds of wall-clock time.

// ── Arena ────────────────────────────────────────────────────────────────────

pub const DEFAULT_ARENA_WIDTH: f32 = 480.0;
pub const DEFAULT_ARENA_HEIGHT: f32 = 360.0;

/// Bullets further than this outside the arena are pruned.
pub const OFFSCREEN_MARGIN: f32 = 50.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_RADIUS: f32 = 15.0;
pub const PLAYER_SPEED: f32 = 4.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_FIRE_INTERVAL_MS: u64 = 250;
/// Distance from the ship centre to its nose, where bullets appear.
pub const PLAYER_TIP_OFFSET: f32 = 18.0;

pub const RAPID_FIRE_DURATION_MS: u64 = 10_000;
pub const SHIELD_DURATION_MS: u64 = 40_000;

pub const HEALTH_PICKUP_AMOUNT: i32 = 50;
pub const CONTACT_DAMAGE: i32 = 20;

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const PLAYER_BULLET_SPEED: f32 = 10.0;
pub const PLAYER_BULLET_DAMAGE: i32 = 1;
pub const PLAYER_BULLET_RADIUS: f32 = 4.0;

pub const SHOOTER_BULLET_SPEED: f32 = 6.0;
pub const SHOOTER_BULLET_DAMAGE: i32 = 10;
pub const SHOOTER_BULLET_RADIUS: f32 = 5.0;

pub const BOSS_BULLET_SPEED: f32 = 5.0;
pub const BOSS_BULLET_DAMAGE: i32 = 25;
pub const BOSS_BULLET_RADIUS: f32 = 6.0;
pub const BOSS_BURST_COUNT: usize = 8;

// ── Power-ups ────────────────────────────────────────────────────────────────

pub const POWERUP_DRIFT_SPEED: f32 = 2.0;
pub const POWERUP_SPIN: f32 = 0.05;
pub const POWERUP_RADIUS: f32 = 10.0;
pub const POWERUP_DROP_CHANCE: f64 = 0.3;
pub const POWERUP_SPAWN_CHANCE: f64 = 0.5;
/// Horizontal inset from each side for timed power-up spawns.
pub const POWERUP_SPAWN_INSET: f32 = 40.0;
pub const POWERUP_SPAWN_Y: f32 = -15.0;

// ── Spawning ─────────────────────────────────────────────────────────────────

pub const ENEMY_SPAWN_INTERVAL: u32 = 50;
pub const POWERUP_SPAWN_INTERVAL: u32 = 250;
pub const SHOOTER_CHANCE: f64 = 0.3;
/// How far outside the arena edge new enemies appear.
pub const EDGE_SPAWN_OFFSET: f32 = 30.0;

pub const BOSS_SCORE_THRESHOLD: u32 = 500;
pub const BOSS_REARM_INTERVAL: u32 = 1_000;
pub const BOSS_SPAWN_Y: f32 = -60.0;

// ── Particles ────────────────────────────────────────────────────────────────

pub const KILL_BURST: usize = 20;
pub const CONTACT_BURST: usize = 15;
pub const PARTICLE_MAX_SPEED: f32 = 2.0;
pub const PARTICLE_DECAY_MIN: f32 = 0.01;
pub const PARTICLE_DECAY_MAX: f32 = 0.03;
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_MAX: f32 = 3.0;
