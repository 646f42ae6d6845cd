//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::autopilot;
use super::combat;
use super::fire;
use super::progression::{self, UpgradeKind};
use super::spawn;
use super::state::GameState;

/// Joystick drag (pixels) that counts as full deflection
pub const JOYSTICK_MAX_DRAG: f32 = 50.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Normalized movement, length <= 1
    pub movement: Vec2,
    /// Fire the super attack (edge-triggered)
    pub activate_super: bool,
    /// Upgrade picked on the level-up screen
    pub upgrade: Option<UpgradeKind>,
    /// Idle/demo mode - autopilot moves the player
    pub idle_mode: bool,
}

impl TickInput {
    /// Movement from a touch drag relative to where the finger went down
    pub fn joystick(drag: Vec2) -> Vec2 {
        let dist = drag.length();
        if dist <= 0.0 {
            return Vec2::ZERO;
        }
        drag / dist * dist.min(JOYSTICK_MAX_DRAG) / JOYSTICK_MAX_DRAG
    }

    /// Movement from four direction keys (screen y grows downward)
    pub fn keys(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(left, right), axis(up, down)).normalize_or_zero()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Picking an upgrade is the only way out of the level-up pause
    if let Some(kind) = input.upgrade {
        progression::select_upgrade(state, kind);
    }

    // Don't tick if paused for an upgrade or game over
    if !state.is_running() {
        return;
    }

    if input.activate_super {
        progression::activate_super(state);
    }

    state.time_ticks += 1;

    let movement = if input.idle_mode {
        autopilot::steer(state)
    } else {
        input.movement
    };
    let bounds = state.bounds();
    state.store.player.step(movement, bounds);

    spawn::run_scheduler(state);
    if state.is_running() {
        fire::update_fire_control(state);
        combat::resolve(state);
    }
    if state.is_running() {
        progression::check_level_up(state);
    }

    state.publish_hud();
}
