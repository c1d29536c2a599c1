//! Player controller: turns an `InputSnapshot` into movement, heading and
//! shots, and expires timed buffs.

use crate::constants::*;
use crate::entities::{Bullet, BulletOrigin, SimulationState};
use crate::events::{AudioCue, Buff, EventSink, HudUpdate};
use crate::geometry::angle_to;
use crate::input::InputSnapshot;

/// Run the controller for one tick.
pub fn update_player(
    state: &mut SimulationState,
    input: &InputSnapshot,
    now_ms: u64,
    events: &mut impl EventSink,
) {
    let input = input.clamped();
    move_player(state, &input);
    aim_player(state, &input);
    // A lapsed rapid-fire buff must not shorten this tick's cooldown.
    expire_buffs(state, now_ms, events);
    if input.fire {
        try_fire(state, now_ms, events);
    }
}

/// Step along the move vector, then keep the whole ship inside the arena.
fn move_player(state: &mut SimulationState, input: &InputSnapshot) {
    let p = &mut state.player;
    p.x += input.move_x * PLAYER_SPEED;
    p.y += input.move_y * PLAYER_SPEED;
    p.x = p.x.clamp(p.radius, state.width - p.radius);
    p.y = p.y.clamp(p.radius, state.height - p.radius);
}

/// Pointer angle if given; else the move direction; else the nearest enemy.
/// With none of those the heading is left alone.
fn aim_player(state: &mut SimulationState, input: &InputSnapshot) {
    let angle = if let Some(angle) = input.aim_angle {
        Some(angle)
    } else if input.is_moving() {
        Some(input.move_y.atan2(input.move_x))
    } else {
        let (px, py) = (state.player.x, state.player.y);
        state.nearest_enemy(px, py).map(|e| angle_to(px, py, e.x, e.y))
    };
    if let Some(angle) = angle {
        state.player.angle = angle;
    }
}

/// Fire from the ship's nose if the cooldown has elapsed.
pub fn try_fire(state: &mut SimulationState, now_ms: u64, events: &mut impl EventSink) -> bool {
    let p = &mut state.player;
    if !p.can_fire(now_ms) {
        return false;
    }
    let x = p.x + p.angle.cos() * PLAYER_TIP_OFFSET;
    let y = p.y + p.angle.sin() * PLAYER_TIP_OFFSET;
    state.player_bullets.push(Bullet::new(BulletOrigin::Player, x, y, p.angle));
    p.last_shot_ms = Some(now_ms);
    events.audio(AudioCue::Shoot);
    true
}

/// Clear buffs whose duration has run out, measured in wall-clock time.
pub fn expire_buffs(state: &mut SimulationState, now_ms: u64, events: &mut impl EventSink) {
    let p = &mut state.player;
    if p.rapid_fire_since.is_some_and(|t| now_ms.saturating_sub(t) >= RAPID_FIRE_DURATION_MS) {
        p.rapid_fire_since = None;
        log::debug!("rapid fire expired");
        events.hud(HudUpdate::BuffChanged { buff: Buff::RapidFire, active: false });
    }
    if p.shield_since.is_some_and(|t| now_ms.saturating_sub(t) >= SHIELD_DURATION_MS) {
        p.shield_since = None;
        log::debug!("shield expired");
        events.hud(HudUpdate::BuffChanged { buff: Buff::Shield, active: false });
    }
}
