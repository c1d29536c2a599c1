use std::f32::consts::{FRAC_PI_2, PI};

use arena_shooter::combat::apply_power_up;
use arena_shooter::compute::init_state;
use arena_shooter::constants::*;
use arena_shooter::entities::*;
use arena_shooter::events::{Buff, GameEvent, HudUpdate, NullSink};
use arena_shooter::player::{expire_buffs, try_fire, update_player};
use arena_shooter::{AudioCue, GameConfig, InputSnapshot};

fn make_state() -> SimulationState {
    let mut s = init_state(&GameConfig::default());
    s.status = GameStatus::Running;
    s
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn player_starts_centred() {
    let s = make_state();
    assert_eq!((s.player.x, s.player.y), (240.0, 180.0));
    assert_eq!(s.player.health, 100);
}

#[test]
fn move_vector_scales_by_speed() {
    let mut s = make_state();
    let input = InputSnapshot::from_directions(false, true, true, false);
    update_player(&mut s, &input, 0, &mut NullSink);
    assert!(approx(s.player.x, 240.0 - PLAYER_SPEED));
    assert!(approx(s.player.y, 180.0 + PLAYER_SPEED));
}

#[test]
fn out_of_range_axes_are_clamped() {
    let mut s = make_state();
    let input = InputSnapshot { move_x: 5.0, ..Default::default() };
    update_player(&mut s, &input, 0, &mut NullSink);
    assert!(approx(s.player.x, 240.0 + PLAYER_SPEED));
}

#[test]
fn player_is_kept_inside_arena() {
    let mut s = make_state();
    s.player.x = 470.0;
    s.player.y = 2.0;
    let input = InputSnapshot::from_directions(true, false, false, true);
    update_player(&mut s, &input, 0, &mut NullSink);
    assert_eq!(s.player.x, 480.0 - PLAYER_RADIUS);
    assert_eq!(s.player.y, PLAYER_RADIUS);
}

// ── Aiming ────────────────────────────────────────────────────────────────────

#[test]
fn pointer_angle_wins() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Basic, 400.0, 180.0);
    let input = InputSnapshot::from_directions(true, false, false, false).with_aim(PI);
    update_player(&mut s, &input, 0, &mut NullSink);
    assert!(approx(s.player.angle, PI));
}

#[test]
fn stick_mode_aims_along_movement() {
    let mut s = make_state();
    let input = InputSnapshot::from_directions(true, false, false, false);
    update_player(&mut s, &input, 0, &mut NullSink);
    assert!(approx(s.player.angle, -FRAC_PI_2));
}

#[test]
fn idle_stick_auto_aims_at_nearest_enemy() {
    let mut s = make_state();
    s.add_enemy(EnemyKind::Basic, 240.0, 20.0); // 160 away, straight up
    s.add_enemy(EnemyKind::Basic, 340.0, 180.0); // 100 away, to the right
    update_player(&mut s, &InputSnapshot::default(), 0, &mut NullSink);
    assert!(approx(s.player.angle, 0.0));
}

#[test]
fn idle_with_no_enemies_keeps_heading() {
    let mut s = make_state();
    s.player.angle = 1.25;
    update_player(&mut s, &InputSnapshot::default(), 0, &mut NullSink);
    assert!(approx(s.player.angle, 1.25));
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn shot_spawns_at_ship_tip() {
    let mut s = make_state();
    let mut events: Vec<GameEvent> = Vec::new();
    let input = InputSnapshot::default().with_aim(0.0).with_fire(true);
    update_player(&mut s, &input, 0, &mut events);

    assert_eq!(s.player_bullets.len(), 1);
    let b = &s.player_bullets[0];
    assert_eq!(b.origin, BulletOrigin::Player);
    assert!(approx(b.x, 240.0 + PLAYER_TIP_OFFSET));
    assert!(approx(b.y, 180.0));
    assert_eq!(s.player.last_shot_ms, Some(0));
    assert!(events.contains(&GameEvent::Audio(AudioCue::Shoot)));
}

#[test]
fn fire_respects_cooldown() {
    let mut s = make_state();
    let mut events: Vec<GameEvent> = Vec::new();
    assert!(try_fire(&mut s, 1_000, &mut events));
    assert!(!try_fire(&mut s, 1_249, &mut events));
    assert!(try_fire(&mut s, 1_250, &mut events));
    assert_eq!(s.player_bullets.len(), 2);
}

#[test]
fn rapid_fire_halves_interval() {
    let mut s = make_state();
    let mut events: Vec<GameEvent> = Vec::new();
    apply_power_up(&mut s, PowerUpKind::RapidFire, 0, &mut events);
    assert_eq!(s.player.fire_interval_ms(), PLAYER_FIRE_INTERVAL_MS / 2);

    assert!(try_fire(&mut s, 1_000, &mut events));
    assert!(!try_fire(&mut s, 1_124, &mut events));
    assert!(try_fire(&mut s, 1_125, &mut events));
}

#[test]
fn no_fire_intent_no_bullet() {
    let mut s = make_state();
    update_player(&mut s, &InputSnapshot::default(), 0, &mut NullSink);
    assert!(s.player_bullets.is_empty());
}

// ── Buffs ─────────────────────────────────────────────────────────────────────

#[test]
fn rapid_fire_lasts_ten_seconds() {
    let mut s = make_state();
    let mut events: Vec<GameEvent> = Vec::new();
    apply_power_up(&mut s, PowerUpKind::RapidFire, 1_000, &mut events);

    expire_buffs(&mut s, 10_999, &mut events);
    assert!(s.player.has_rapid_fire());

    expire_buffs(&mut s, 11_000, &mut events);
    assert!(!s.player.has_rapid_fire());
    assert_eq!(s.player.fire_interval_ms(), PLAYER_FIRE_INTERVAL_MS);
    assert_eq!(
        events.last(),
        Some(&GameEvent::Hud(HudUpdate::BuffChanged { buff: Buff::RapidFire, active: false }))
    );
}

#[test]
fn lapsed_rapid_fire_uses_normal_interval() {
    let mut s = make_state();
    let mut events: Vec<GameEvent> = Vec::new();
    apply_power_up(&mut s, PowerUpKind::RapidFire, 0, &mut events);
    s.player.last_shot_ms = Some(9_880);
    let fire = InputSnapshot::default().with_fire(true);

    update_player(&mut s, &fire, 10_005, &mut events);

    assert!(!s.player.has_rapid_fire());
    assert!(s.player_bullets.is_empty());

    update_player(&mut s, &fire, 9_880 + PLAYER_FIRE_INTERVAL_MS, &mut events);
    assert_eq!(s.player_bullets.len(), 1);
}

#[test]
fn retrigger_restarts_the_timer() {
    let mut s = make_state();
    let mut events: Vec<GameEvent> = Vec::new();
    apply_power_up(&mut s, PowerUpKind::RapidFire, 0, &mut events);
    apply_power_up(&mut s, PowerUpKind::RapidFire, 5_000, &mut events);

    expire_buffs(&mut s, 14_999, &mut events);
    assert!(s.player.has_rapid_fire());
    expire_buffs(&mut s, 15_000, &mut events);
    assert!(!s.player.has_rapid_fire());
}

#[test]
fn shield_lasts_forty_seconds() {
    let mut s = make_state();
    let mut events: Vec<GameEvent> = Vec::new();
    apply_power_up(&mut s, PowerUpKind::Shield, 0, &mut events);
    assert!(events.contains(&GameEvent::Hud(HudUpdate::BuffChanged { buff: Buff::Shield, active: true })));

    expire_buffs(&mut s, SHIELD_DURATION_MS - 1, &mut events);
    assert!(s.player.is_shielded());
    expire_buffs(&mut s, SHIELD_DURATION_MS, &mut events);
    assert!(!s.player.is_shielded());
}

#[test]
fn buff_expiry_is_frame_rate_independent() {
    // Only wall-clock time matters: one late tick expires the buff just like
    // many small ones would.
    let mut s = make_state();
    let mut events: Vec<GameEvent> = Vec::new();
    apply_power_up(&mut s, PowerUpKind::Shield, 0, &mut events);
    update_player(&mut s, &InputSnapshot::default(), 60_000, &mut events);
    assert!(!s.player.is_shielded());
}
