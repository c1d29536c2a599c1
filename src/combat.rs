//! Collision and combat resolution.
//!
//! All tests are circle against circle. Entities hit in one pass are marked,
//! skipped by every later check, and pruned together once all four passes
//! have run, so nothing is scored or dropped twice.

use rand::Rng;

use crate::constants::*;
use crate::entities::{PowerUpKind, SimulationState};
use crate::events::{AudioCue, Buff, EventSink, HudUpdate};
use crate::geometry::circles_overlap;
use crate::spawner::roll_drop;

/// What one resolution pass did, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub kills: u32,
    pub score_gained: u32,
    /// Damage actually applied to the player (zero while shielded).
    pub damage_taken: i32,
    pub pickups: u32,
    /// Player health reached zero; pickups later in the same resolution are skipped.
    pub lethal: bool,
}

/// Removal marks, one per entity, indexed like the collections.
struct Removals {
    player_bullets: Vec<bool>,
    hostile_bullets: Vec<bool>,
    enemies: Vec<bool>,
    power_ups: Vec<bool>,
}

impl Removals {
    fn for_state(state: &SimulationState) -> Self {
        Removals {
            player_bullets: vec![false; state.player_bullets.len()],
            hostile_bullets: vec![false; state.hostile_bullets.len()],
            enemies: vec![false; state.enemies.len()],
            power_ups: vec![false; state.power_ups.len()],
        }
    }

    fn apply(self, state: &mut SimulationState) {
        prune(&mut state.player_bullets, &self.player_bullets);
        prune(&mut state.hostile_bullets, &self.hostile_bullets);
        prune(&mut state.enemies, &self.enemies);
        prune(&mut state.power_ups, &self.power_ups);
    }
}

fn prune<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut marks = marks.iter();
    items.retain(|_| !marks.next().copied().unwrap_or(false));
}

/// Run the four collision passes in order and compact the collections.
pub fn resolve_collisions(
    state: &mut SimulationState,
    now_ms: u64,
    rng: &mut impl Rng,
    events: &mut impl EventSink,
) -> CombatReport {
    let mut report = CombatReport::default();
    let mut removals = Removals::for_state(state);

    hostile_bullets_vs_player(state, &mut removals, &mut report);
    player_bullets_vs_enemies(state, &mut removals, &mut report, rng, events);
    enemies_vs_player(state, &mut removals, &mut report, rng, events);
    power_ups_vs_player(state, &mut removals, &mut report, now_ms, events);

    removals.apply(state);
    report
}

// ── 1. Hostile bullets ↔ player ──────────────────────────────────────────────

fn hostile_bullets_vs_player(state: &mut SimulationState, removals: &mut Removals, report: &mut CombatReport) {
    let player = &mut state.player;
    for (bi, bullet) in state.hostile_bullets.iter().enumerate() {
        if !circles_overlap(bullet.x, bullet.y, bullet.radius, player.x, player.y, player.radius) {
            continue;
        }
        // Consumed whether or not the shield absorbs it.
        removals.hostile_bullets[bi] = true;
        if !player.is_shielded() {
            player.health -= bullet.damage;
            report.damage_taken += bullet.damage;
            report.lethal |= player.is_dead();
        }
    }
}

// ── 2. Player bullets ↔ enemies ──────────────────────────────────────────────

fn player_bullets_vs_enemies(
    state: &mut SimulationState,
    removals: &mut Removals,
    report: &mut CombatReport,
    rng: &mut impl Rng,
    events: &mut impl EventSink,
) {
    for ei in 0..state.enemies.len() {
        for bi in 0..state.player_bullets.len() {
            if removals.player_bullets[bi] {
                continue;
            }
            let bullet = &state.player_bullets[bi];
            let enemy = &state.enemies[ei];
            if !circles_overlap(bullet.x, bullet.y, bullet.radius, enemy.x, enemy.y, enemy.radius) {
                continue;
            }
            removals.player_bullets[bi] = true;
            let damage = bullet.damage;
            if state.enemies[ei].hit(damage) {
                removals.enemies[ei] = true;
                kill_enemy(state, ei, report, rng, events);
                // Dead enemies absorb no further bullets.
                break;
            }
        }
    }
}

/// Death effects for the enemy at `ei`: burst, score, drop roll, boss release.
fn kill_enemy(
    state: &mut SimulationState,
    ei: usize,
    report: &mut CombatReport,
    rng: &mut impl Rng,
    events: &mut impl EventSink,
) {
    let enemy = &state.enemies[ei];
    let (id, x, y, points) = (enemy.id, enemy.x, enemy.y, enemy.points);
    let color = enemy.kind.stats().particle_color;
    log::debug!("{:?} {id} destroyed, +{points}", enemy.kind);

    state.burst(rng, x, y, color, KILL_BURST);
    state.score += points;
    report.kills += 1;
    report.score_gained += points;
    events.audio(AudioCue::Explosion);

    roll_drop(state, rng, x, y);
    release_boss(state, id, events);
}

/// Stop tracking the boss if `id` was it.
fn release_boss(state: &mut SimulationState, id: u32, events: &mut impl EventSink) {
    if state.boss == Some(id) {
        state.boss = None;
        log::info!("boss {id} defeated");
        events.audio(AudioCue::BossDefeated);
    }
}

// ── 3. Enemies ↔ player (contact) ────────────────────────────────────────────

fn enemies_vs_player(
    state: &mut SimulationState,
    removals: &mut Removals,
    report: &mut CombatReport,
    rng: &mut impl Rng,
    events: &mut impl EventSink,
) {
    for ei in 0..state.enemies.len() {
        if removals.enemies[ei] {
            continue;
        }
        let enemy = &state.enemies[ei];
        let player = &state.player;
        if !circles_overlap(enemy.x, enemy.y, enemy.radius, player.x, player.y, player.radius) {
            continue;
        }
        let (id, x, y) = (enemy.id, enemy.x, enemy.y);
        let color = enemy.kind.stats().particle_color;

        if !state.player.is_shielded() {
            state.player.health -= CONTACT_DAMAGE;
            report.damage_taken += CONTACT_DAMAGE;
            report.lethal |= state.player.is_dead();
        }
        // Ramming is lethal to the enemy but scores nothing.
        state.burst(rng, x, y, color, CONTACT_BURST);
        removals.enemies[ei] = true;
        release_boss(state, id, events);
    }
}

// ── 4. Power-ups ↔ player ────────────────────────────────────────────────────

fn power_ups_vs_player(
    state: &mut SimulationState,
    removals: &mut Removals,
    report: &mut CombatReport,
    now_ms: u64,
    events: &mut impl EventSink,
) {
    // Drops from this tick's kills are collectable straight away.
    removals.power_ups.resize(state.power_ups.len(), false);
    if report.lethal {
        return;
    }
    for pi in 0..state.power_ups.len() {
        let power_up = &state.power_ups[pi];
        let player = &state.player;
        if !circles_overlap(power_up.x, power_up.y, power_up.radius, player.x, player.y, player.radius) {
            continue;
        }
        let kind = power_up.kind;
        removals.power_ups[pi] = true;
        report.pickups += 1;
        events.audio(AudioCue::PowerUpCollected);
        apply_power_up(state, kind, now_ms, events);
    }
}

/// Apply a pickup's effect. Re-arming a buff restarts its timer.
pub fn apply_power_up(state: &mut SimulationState, kind: PowerUpKind, now_ms: u64, events: &mut impl EventSink) {
    let player = &mut state.player;
    log::debug!("picked up {kind:?}");
    match kind {
        PowerUpKind::Health => {
            player.health = (player.health + HEALTH_PICKUP_AMOUNT).min(player.max_health);
        }
        PowerUpKind::RapidFire => {
            player.rapid_fire_since = Some(now_ms);
            events.hud(HudUpdate::BuffChanged { buff: Buff::RapidFire, active: true });
        }
        PowerUpKind::Shield => {
            player.shield_since = Some(now_ms);
            events.hud(HudUpdate::BuffChanged { buff: Buff::Shield, active: true });
        }
    }
}
