//! Per-tick simulation pipeline.
//!
//! `tick` mutates the `SimulationState` it is given; all randomness comes
//! through the injected RNG and all wall-clock time through `now_ms`, so a
//! seeded RNG and explicit timestamps make every frame reproducible.

use rand::Rng;

use crate::combat::{resolve_collisions, CombatReport};
use crate::config::GameConfig;
use crate::entities::{EnemyKind, GameStatus, Player, SimulationState};
use crate::error::InvariantViolation;
use crate::events::{EventSink, HudUpdate};
use crate::input::InputSnapshot;
use crate::player::update_player;
use crate::spawner::{update_spawner, Spawner};

/// Whether the loop should schedule another tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh idle state for an arena, player centred.
pub fn init_state(config: &GameConfig) -> SimulationState {
    let (width, height) = (config.arena.width, config.arena.height);
    SimulationState {
        width,
        height,
        player: Player::new(width / 2.0, height / 2.0),
        player_bullets: Vec::new(),
        hostile_bullets: Vec::new(),
        enemies: Vec::new(),
        power_ups: Vec::new(),
        particles: Vec::new(),
        score: 0,
        boss: None,
        spawner: Spawner::new(config.spawn),
        status: GameStatus::Idle,
        frame: 0,
        next_enemy_id: 0,
    }
}

/// Restore player stats, clear every transient collection and reset score,
/// timers and boss tracking. The status is left to the caller.
pub fn reset_state(state: &mut SimulationState) {
    state.player = Player::new(state.width / 2.0, state.height / 2.0);
    state.player_bullets.clear();
    state.hostile_bullets.clear();
    state.enemies.clear();
    state.power_ups.clear();
    state.particles.clear();
    state.score = 0;
    state.boss = None;
    state.spawner.reset();
    state.frame = 0;
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame: controller, entity updates,
/// collisions, spawner. Does nothing unless the state is `Running`.
pub fn tick(
    state: &mut SimulationState,
    input: &InputSnapshot,
    now_ms: u64,
    rng: &mut impl Rng,
    events: &mut impl EventSink,
) -> TickOutcome {
    match state.status {
        GameStatus::Running => {}
        GameStatus::GameOver => return TickOutcome::GameOver,
        GameStatus::Idle => return TickOutcome::Continue,
    }

    let before = (state.player.display_health(), state.score);
    state.frame += 1;

    update_player(state, input, now_ms, events);
    advance_entities(state, now_ms);
    let report = resolve_collisions(state, now_ms, rng, events);
    update_spawner(state, rng, events);

    if report != CombatReport::default() {
        log::trace!("frame {}: {report:?}", state.frame);
    }

    let after = (state.player.display_health(), state.score);
    if after != before {
        events.hud(HudUpdate::Stats { health: after.0, score: after.1 });
    }

    debug_assert_eq!(validate_invariants(state), Ok(()), "frame {}", state.frame);

    if report.lethal || state.player.is_dead() {
        state.status = GameStatus::GameOver;
        log::info!("game over at frame {} with score {}", state.frame, state.score);
        events.hud(HudUpdate::GameOver { final_score: state.score });
        return TickOutcome::GameOver;
    }
    TickOutcome::Continue
}

/// Move every entity one step and prune whatever left the arena or faded.
pub fn advance_entities(state: &mut SimulationState, now_ms: u64) {
    let (w, h) = (state.width, state.height);

    for bullet in &mut state.player_bullets {
        bullet.advance();
    }
    state.player_bullets.retain(|b| !b.is_expired(w, h));

    for bullet in &mut state.hostile_bullets {
        bullet.advance();
    }
    state.hostile_bullets.retain(|b| !b.is_expired(w, h));

    let (px, py) = (state.player.x, state.player.y);
    for enemy in &mut state.enemies {
        enemy.advance(px, py, now_ms, &mut state.hostile_bullets);
    }

    for power_up in &mut state.power_ups {
        power_up.advance();
    }
    state.power_ups.retain(|p| !p.is_expired(h));

    for particle in &mut state.particles {
        particle.advance();
    }
    state.particles.retain(|p| !p.is_expired());
}

// ── Consistency checks ───────────────────────────────────────────────────────

/// Check the state rules that must hold between ticks.
pub fn validate_invariants(state: &SimulationState) -> Result<(), InvariantViolation> {
    let p = &state.player;
    if p.health > p.max_health {
        return Err(InvariantViolation::HealthAboveMax { health: p.health, max: p.max_health });
    }

    let bosses: Vec<u32> = state
        .enemies
        .iter()
        .filter(|e| e.kind == EnemyKind::Boss)
        .map(|e| e.id)
        .collect();
    if bosses.len() > 1 {
        return Err(InvariantViolation::MultipleBosses { count: bosses.len() });
    }
    let found = bosses.first().copied();
    if state.boss != found {
        return Err(InvariantViolation::BossTrackingMismatch { tracked: state.boss, found });
    }

    if let Some(e) = state.enemies.iter().find(|e| e.is_dead()) {
        return Err(InvariantViolation::DeadEnemyNotPruned { id: e.id, health: e.health });
    }
    if state.particles.iter().any(|p| p.is_expired()) {
        return Err(InvariantViolation::ExpiredParticleNotPruned);
    }
    Ok(())
}
