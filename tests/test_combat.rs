use std::f32::consts::PI;

use arena_shooter::combat::{apply_power_up, resolve_collisions};
use arena_shooter::compute::{init_state, validate_invariants};
use arena_shooter::constants::*;
use arena_shooter::entities::*;
use arena_shooter::spawner::spawn_boss;
use arena_shooter::{AudioCue, GameConfig, GameEvent};

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> SimulationState {
    let mut s = init_state(&GameConfig::default());
    s.status = GameStatus::Running;
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Every probability roll succeeds.
fn lucky_rng() -> StepRng {
    StepRng::new(0, 0)
}

/// Every probability roll fails.
fn unlucky_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn player_bullet_at(x: f32, y: f32) -> Bullet {
    Bullet::new(BulletOrigin::Player, x, y, 0.0)
}

// ── 1. Hostile bullets ↔ player ───────────────────────────────────────────────

#[test]
fn hostile_bullet_damages_player() {
    let mut s = make_state(); // player at (240, 180), radius 15
    s.hostile_bullets.push(Bullet::new(BulletOrigin::Shooter, 245.0, 180.0, PI));
    let mut events: Vec<GameEvent> = Vec::new();

    let report = resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut events);

    assert_eq!(s.player.health, 90);
    assert!(s.hostile_bullets.is_empty());
    assert_eq!(report.damage_taken, 10);
}

#[test]
fn near_miss_leaves_bullet_alone() {
    let mut s = make_state();
    // 20 apart with radii 15 + 5: touching is not overlapping.
    s.hostile_bullets.push(Bullet::new(BulletOrigin::Shooter, 260.0, 180.0, 0.0));
    resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());
    assert_eq!(s.player.health, 100);
    assert_eq!(s.hostile_bullets.len(), 1);
}

#[test]
fn shield_absorbs_bullet_but_consumes_it() {
    let mut s = make_state();
    s.player.shield_since = Some(0);
    s.hostile_bullets.push(Bullet::new(BulletOrigin::Boss, 240.0, 180.0, 0.0));
    let report = resolve_collisions(&mut s, 100, &mut seeded_rng(), &mut Vec::<GameEvent>::new());
    assert_eq!(s.player.health, 100);
    assert!(s.hostile_bullets.is_empty());
    assert_eq!(report.damage_taken, 0);
}

#[test]
fn health_may_go_negative_internally() {
    let mut s = make_state();
    s.player.health = 10;
    s.hostile_bullets.push(Bullet::new(BulletOrigin::Boss, 240.0, 180.0, 0.0));
    resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());
    assert_eq!(s.player.health, -15);
    assert_eq!(s.player.display_health(), 0);
}

// ── 2. Player bullets ↔ enemies ───────────────────────────────────────────────

#[test]
fn two_hits_on_three_health_enemy() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Basic, 100.0, 100.0);
    s.player_bullets.push(player_bullet_at(100.0, 100.0));
    s.player_bullets.push(player_bullet_at(102.0, 100.0));

    let report = resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].health, 1);
    assert!(s.player_bullets.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(report.kills, 0);
}

#[test]
fn kill_scores_exactly_once() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Shooter, 100.0, 100.0);
    s.enemies[0].health = 1;
    // Three bullets overlap the enemy; only the first should be spent.
    for dx in [0.0, 1.0, 2.0] {
        s.player_bullets.push(player_bullet_at(100.0 + dx, 100.0));
    }
    let mut events: Vec<GameEvent> = Vec::new();

    let report = resolve_collisions(&mut s, 0, &mut unlucky_rng(), &mut events);

    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 25);
    assert_eq!(report.kills, 1);
    assert_eq!(s.player_bullets.len(), 2);
    let explosions = events.iter().filter(|e| **e == GameEvent::Audio(AudioCue::Explosion)).count();
    assert_eq!(explosions, 1);
    assert_eq!(s.particles.len(), KILL_BURST);
}

#[test]
fn one_bullet_hits_only_one_enemy() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Basic, 100.0, 100.0);
    s.add_enemy(EnemyKind::Basic, 104.0, 100.0);
    s.player_bullets.push(player_bullet_at(102.0, 100.0));

    resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());

    let total: i32 = s.enemies.iter().map(|e| e.health).sum();
    assert_eq!(total, 5);
    assert!(s.player_bullets.is_empty());
}

#[test]
fn kill_with_low_roll_drops_power_up_at_death_spot() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Basic, 100.0, 100.0);
    s.enemies[0].health = 1;
    s.player_bullets.push(player_bullet_at(100.0, 100.0));

    resolve_collisions(&mut s, 0, &mut lucky_rng(), &mut Vec::<GameEvent>::new());

    assert_eq!(s.power_ups.len(), 1);
    assert_eq!((s.power_ups[0].x, s.power_ups[0].y), (100.0, 100.0));
}

#[test]
fn kill_with_high_roll_drops_nothing() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Basic, 100.0, 100.0);
    s.enemies[0].health = 1;
    s.player_bullets.push(player_bullet_at(100.0, 100.0));

    resolve_collisions(&mut s, 0, &mut unlucky_rng(), &mut Vec::<GameEvent>::new());

    assert!(s.enemies.is_empty());
    assert!(s.power_ups.is_empty());
}

#[test]
fn killing_boss_clears_tracking() {
    let mut s = make_state();
    s.score = 500;
    let id = spawn_boss(&mut s, &mut Vec::<GameEvent>::new());
    assert_eq!(s.boss, Some(id));
    s.enemies[0].x = 100.0;
    s.enemies[0].y = 100.0;
    s.enemies[0].health = 1;
    s.player_bullets.push(player_bullet_at(100.0, 100.0));
    let mut events: Vec<GameEvent> = Vec::new();

    resolve_collisions(&mut s, 0, &mut unlucky_rng(), &mut events);

    assert!(!s.boss_active());
    assert_eq!(s.score, 700);
    assert!(events.contains(&GameEvent::Audio(AudioCue::BossDefeated)));
    assert_eq!(validate_invariants(&s), Ok(()));
}

// ── 3. Enemies ↔ player ───────────────────────────────────────────────────────

#[test]
fn contact_hurts_player_and_kills_enemy_without_score() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Basic, 250.0, 180.0);

    resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());

    assert_eq!(s.player.health, 100 - CONTACT_DAMAGE);
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.particles.len(), CONTACT_BURST);
}

#[test]
fn shielded_contact_still_removes_enemy() {
    let mut s = make_state();
    s.player.shield_since = Some(0);
    s.add_enemy(EnemyKind::Shooter, 240.0, 190.0);
    resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());
    assert_eq!(s.player.health, 100);
    assert!(s.enemies.is_empty());
}

#[test]
fn enemy_shot_dead_is_not_rammed_in_same_tick() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Basic, 250.0, 180.0);
    s.enemies[0].health = 1;
    s.player_bullets.push(player_bullet_at(250.0, 180.0));

    resolve_collisions(&mut s, 0, &mut unlucky_rng(), &mut Vec::<GameEvent>::new());

    assert_eq!(s.player.health, 100);
    assert_eq!(s.score, 10);
    assert_eq!(s.particles.len(), KILL_BURST);
}

#[test]
fn ramming_boss_releases_tracking() {
    let mut s = make_state();
    spawn_boss(&mut s, &mut Vec::<GameEvent>::new());
    s.enemies[0].x = 240.0;
    s.enemies[0].y = 150.0;
    resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());
    assert!(s.enemies.is_empty());
    assert!(!s.boss_active());
    assert_eq!(validate_invariants(&s), Ok(()));
}

// ── 4. Power-ups ↔ player ─────────────────────────────────────────────────────

#[test]
fn health_pickup_heals_up_to_max() {
    let mut s = make_state();
    s.player.health = 70;
    s.power_ups.push(PowerUp::new(PowerUpKind::Health, 240.0, 180.0));
    let mut events: Vec<GameEvent> = Vec::new();

    let report = resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut events);

    assert_eq!(s.player.health, 100);
    assert!(s.power_ups.is_empty());
    assert_eq!(report.pickups, 1);
    assert!(events.contains(&GameEvent::Audio(AudioCue::PowerUpCollected)));
}

#[test]
fn health_pickup_adds_fixed_amount() {
    let mut s = make_state();
    s.player.health = 30;
    apply_power_up(&mut s, PowerUpKind::Health, 0, &mut Vec::<GameEvent>::new());
    assert_eq!(s.player.health, 30 + HEALTH_PICKUP_AMOUNT);
}

#[test]
fn buff_pickups_arm_with_current_time() {
    let mut s = make_state();
    s.power_ups.push(PowerUp::new(PowerUpKind::Shield, 245.0, 180.0));
    s.power_ups.push(PowerUp::new(PowerUpKind::RapidFire, 235.0, 180.0));

    resolve_collisions(&mut s, 7_000, &mut seeded_rng(), &mut Vec::<GameEvent>::new());

    assert_eq!(s.player.shield_since, Some(7_000));
    assert_eq!(s.player.rapid_fire_since, Some(7_000));
    assert!(s.power_ups.is_empty());
}

#[test]
fn distant_power_up_is_untouched() {
    let mut s = make_state();
    s.power_ups.push(PowerUp::new(PowerUpKind::Shield, 10.0, 10.0));
    resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());
    assert_eq!(s.power_ups.len(), 1);
    assert!(!s.player.is_shielded());
}

#[test]
fn dead_player_collects_nothing() {
    let mut s = make_state();
    s.player.health = 20;
    s.add_enemy(EnemyKind::Basic, 250.0, 180.0);
    s.power_ups.push(PowerUp::new(PowerUpKind::Health, 240.0, 180.0));
    let mut events: Vec<GameEvent> = Vec::new();

    let report = resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut events);

    assert!(report.lethal);
    assert_eq!(report.pickups, 0);
    assert_eq!(s.player.health, 0);
    assert_eq!(s.power_ups.len(), 1);
    assert!(!events.contains(&GameEvent::Audio(AudioCue::PowerUpCollected)));
}

#[test]
fn survivable_hit_is_not_lethal() {
    let mut s = make_state();
    s.hostile_bullets.push(Bullet::new(BulletOrigin::Shooter, 240.0, 180.0, 0.0));
    let report = resolve_collisions(&mut s, 0, &mut seeded_rng(), &mut Vec::<GameEvent>::new());
    assert!(!report.lethal);
}
