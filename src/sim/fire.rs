//! Targeting and fire control
//!
//! The weapon fires on its own: every `FireStats::interval` ticks it aims at
//! the nearest enemy and releases a fan of bullets. The interval is read each
//! tick, so a rapid fire upgrade takes effect on the very next cycle.

use super::events::{GameEvent, SoundCue};
use super::state::GameState;
use crate::{angle_between, direction};

/// Count one tick and fire a volley when the interval has elapsed
pub fn update_fire_control(state: &mut GameState) {
    state.fire_counter += 1;
    if (state.fire_counter as f32) < state.fire.interval {
        return;
    }
    state.fire_counter = 0;
    fire_volley(state);
}

/// Aim at the closest enemy and emit `shots` bullets spread around that line.
/// Returns how many bullets were created (0 with no target).
pub fn fire_volley(state: &mut GameState) -> usize {
    let origin = state.store.player.pos;
    let Some(target) = state.store.nearest_enemy(origin).map(|e| e.pos) else {
        return 0;
    };

    let aim = angle_between(origin, target);
    let stats = state.fire;
    let ttl = state.tuning.bullet_lifetime;
    let center = (stats.shots as f32 - 1.0) / 2.0;
    for k in 0..stats.shots {
        let angle = aim + (k as f32 - center) * stats.spread;
        let vel = direction(angle) * stats.bullet_speed;
        state.store.spawn_bullet(origin, vel, ttl, stats.wobble);
    }
    state.emit(GameEvent::sound(SoundCue::Shoot));
    stats.shots as usize
}
