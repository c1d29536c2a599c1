//! Time- and score-driven emission of enemies, the boss and power-ups.

use rand::Rng;

use crate::config::SpawnConfig;
use crate::constants::*;
use crate::entities::{EnemyKind, PowerUp, PowerUpKind, SimulationState};
use crate::events::{AudioCue, EventSink};
use crate::geometry::random_range;

/// Frame counters and the boss milestone.
#[derive(Clone, Debug)]
pub struct Spawner {
    pub config: SpawnConfig,
    pub enemy_timer: u32,
    pub powerup_timer: u32,
    /// Score that arms the next boss. `None` once no further boss may spawn.
    pub next_boss_score: Option<u32>,
}

impl Spawner {
    pub fn new(config: SpawnConfig) -> Self {
        Spawner {
            config,
            enemy_timer: 0,
            powerup_timer: 0,
            next_boss_score: Some(config.boss_score),
        }
    }

    /// Back to the start-of-session counters.
    pub fn reset(&mut self) {
        *self = Spawner::new(self.config);
    }

    /// Advance the enemy timer; true on the frame it crosses its threshold.
    fn enemy_due(&mut self) -> bool {
        self.enemy_timer += 1;
        if self.enemy_timer > self.config.enemy_interval {
            self.enemy_timer = 0;
            return true;
        }
        false
    }

    fn powerup_due(&mut self) -> bool {
        self.powerup_timer += 1;
        if self.powerup_timer > self.config.powerup_interval {
            self.powerup_timer = 0;
            return true;
        }
        false
    }

    /// True when the score has reached the armed milestone and no boss lives.
    pub fn boss_due(&self, score: u32, boss_active: bool) -> bool {
        !boss_active && self.next_boss_score.is_some_and(|at| score >= at)
    }

    /// Move the milestone past the boss that was just spawned.
    fn rearm_boss(&mut self) {
        let step = self.config.boss_rearm_interval;
        self.next_boss_score = match self.next_boss_score {
            Some(at) if step > 0 => at.checked_add(step),
            _ => None,
        };
    }
}

/// One spawner evaluation: enemy timer, boss milestone, power-up timer.
pub fn update_spawner(state: &mut SimulationState, rng: &mut impl Rng, events: &mut impl EventSink) {
    if state.spawner.enemy_due() {
        spawn_enemy(state, rng);
    }

    if state.spawner.boss_due(state.score, state.boss_active()) {
        spawn_boss(state, events);
    }

    if state.spawner.powerup_due() && rng.gen_bool(POWERUP_SPAWN_CHANCE) {
        spawn_powerup(state, rng);
    }
}

/// Place a basic or shooter enemy just outside a random arena edge.
pub fn spawn_enemy(state: &mut SimulationState, rng: &mut impl Rng) -> u32 {
    let (w, h) = (state.width, state.height);
    let (x, y) = match rng.gen_range(0..4) {
        0 => (random_range(rng, 0.0, w), -EDGE_SPAWN_OFFSET),
        1 => (w + EDGE_SPAWN_OFFSET, random_range(rng, 0.0, h)),
        2 => (random_range(rng, 0.0, w), h + EDGE_SPAWN_OFFSET),
        _ => (-EDGE_SPAWN_OFFSET, random_range(rng, 0.0, h)),
    };
    let kind = if rng.gen_bool(SHOOTER_CHANCE) {
        EnemyKind::Shooter
    } else {
        EnemyKind::Basic
    };
    log::trace!("spawned {kind:?} at ({x:.0}, {y:.0})");
    state.add_enemy(kind, x, y)
}

/// Put the boss above the top-centre of the arena and start tracking it.
pub fn spawn_boss(state: &mut SimulationState, events: &mut impl EventSink) -> u32 {
    let id = state.add_enemy(EnemyKind::Boss, state.width / 2.0, BOSS_SPAWN_Y);
    state.boss = Some(id);
    state.spawner.rearm_boss();
    log::info!("boss {id} spawned at score {}", state.score);
    events.audio(AudioCue::BossSpawned);
    id
}

/// Timed power-up of a random kind just above the top edge.
pub fn spawn_powerup(state: &mut SimulationState, rng: &mut impl Rng) {
    let x = random_range(rng, POWERUP_SPAWN_INSET, state.width - POWERUP_SPAWN_INSET);
    let kind = PowerUpKind::random(rng);
    log::debug!("timed {kind:?} power-up at x={x:.0}");
    state.power_ups.push(PowerUp::new(kind, x, POWERUP_SPAWN_Y));
}

/// Independent death-drop roll. Returns whether a power-up was dropped.
pub fn roll_drop(state: &mut SimulationState, rng: &mut impl Rng, x: f32, y: f32) -> bool {
    if !rng.gen_bool(POWERUP_DROP_CHANCE) {
        return false;
    }
    let kind = PowerUpKind::random(rng);
    log::debug!("enemy dropped {kind:?} at ({x:.0}, {y:.0})");
    state.power_ups.push(PowerUp::new(kind, x, y));
    true
}
