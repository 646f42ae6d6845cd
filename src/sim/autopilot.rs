//! Idle/demo mode steering
//!
//! Produces the same normalized movement vector a joystick would. Enemies
//! push the player away (bosses harder), cola bottles pull, and a weak pull
//! toward the middle keeps the player out of corners.

use glam::Vec2;

use super::state::GameState;

/// Enemies further than this are ignored
const DANGER_RADIUS: f32 = 180.0;
/// Boss repulsion multiplier
const BOSS_WEIGHT: f32 = 3.0;
/// Below this energy the bottles matter more than the threat
const THIRSTY_ENERGY: f32 = 60.0;

/// Movement vector (length <= 1) for the current state
pub fn steer(state: &GameState) -> Vec2 {
    let player = state.store.player.pos;

    let mut flee = Vec2::ZERO;
    for enemy in &state.store.enemies {
        let away = player - enemy.pos;
        let dist = away.length() - enemy.radius;
        if dist >= DANGER_RADIUS {
            continue;
        }
        let weight = if enemy.is_boss() { BOSS_WEIGHT } else { 1.0 };
        // Closer threats dominate
        flee += away.normalize_or_zero() * weight * (1.0 - dist.max(0.0) / DANGER_RADIUS);
    }

    let seek = state
        .store
        .pickups
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| (p.pos - player).normalize_or_zero())
        .unwrap_or(Vec2::ZERO);
    let thirst = if state.energy < THIRSTY_ENERGY { 1.5 } else { 0.6 };

    let center = state.bounds() / 2.0;
    let home = (center - player) / center.max(Vec2::ONE) * 0.3;

    (flee * 2.0 + seek * thirst + home).clamp_length_max(1.0)
}
