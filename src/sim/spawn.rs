//! Spawn scheduling
//!
//! Minions, bosses, cola bottles and energy drain each run on their own
//! cadence. A cadence is a tick accumulator advanced once per running tick,
//! so tests can drive spawns without wall-clock timers.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::{EnemyKind, GameState};
use crate::tuning::Tuning;

/// Fires once every `period` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    pub period: u32,
    /// Ticks since the last firing
    pub elapsed: u32,
}

impl Cadence {
    pub fn new(period: u32) -> Self {
        Self { period, elapsed: 0 }
    }

    /// Count one tick; true when the period has elapsed
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    /// Arrange for the next `advance` to fire
    pub fn prime(&mut self) {
        self.elapsed = self.period.saturating_sub(1);
    }
}

/// Timers for everything that appears or drains on a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler {
    pub enemy: Cadence,
    pub pickup: Cadence,
    pub drain: Cadence,
    /// Score at which the next boss is due (`None` = bosses disabled)
    pub next_boss_score: Option<u64>,
    cancelled: bool,
}

impl Scheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            enemy: Cadence::new(tuning.enemy_period),
            pickup: Cadence::new(tuning.pickup_period),
            drain: Cadence::new(tuning.drain_period),
            next_boss_score: tuning.boss_score_step,
            cancelled: false,
        }
    }

    /// Stop all timers for good (game over)
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.enemy.elapsed = 0;
        self.pickup.elapsed = 0;
        self.drain.elapsed = 0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Advance every cadence by one tick and run whatever fires
pub fn run_scheduler(state: &mut GameState) {
    if !state.is_running() || state.scheduler.is_cancelled() {
        return;
    }

    if state.scheduler.enemy.advance() {
        spawn_enemy(state);
    }
    if state.scheduler.pickup.advance() {
        spawn_pickup(state);
    }
    if state.scheduler.drain.advance() {
        drain_energy(state);
    }
}

/// True when the score has reached the next boss milestone and no boss is alive
pub fn boss_due(state: &GameState) -> bool {
    !state.boss_active
        && state.score > 0
        && matches!(state.scheduler.next_boss_score, Some(milestone) if state.score >= milestone)
}

/// Enemy cadence: a boss when one is due, nothing while a boss lives,
/// otherwise a minion at a random screen edge
pub fn spawn_enemy(state: &mut GameState) {
    if boss_due(state) {
        spawn_boss(state);
    } else if !state.boss_active {
        spawn_minion(state);
    }
}

/// Minion just outside a uniformly chosen screen edge
pub fn spawn_minion(state: &mut GameState) -> u32 {
    let bounds = state.bounds();
    let offset = state.tuning.spawn_offset;
    let side = state.rng.random_range(0..4u32);
    let pos = match side {
        0 => Vec2::new(state.rng.random::<f32>() * bounds.x, -offset),
        1 => Vec2::new(bounds.x + offset, state.rng.random::<f32>() * bounds.y),
        2 => Vec2::new(state.rng.random::<f32>() * bounds.x, bounds.y + offset),
        _ => Vec2::new(-offset, state.rng.random::<f32>() * bounds.y),
    };
    let profile = state.tuning.minion;
    let speed = profile.speed_at(state.score);
    let id = state
        .store
        .spawn_enemy(EnemyKind::Minion, pos, profile.radius, speed, profile.hp);
    log::debug!("Minion {} at ({:.0}, {:.0}) speed {:.2}", id, pos.x, pos.y, speed);
    id
}

/// Boss at top-center; suspends minion spawns until it dies
pub fn spawn_boss(state: &mut GameState) -> u32 {
    let profile = state.tuning.boss;
    let pos = Vec2::new(state.tuning.arena_width / 2.0, -profile.radius);
    let speed = profile.speed_at(state.score);
    let id = state
        .store
        .spawn_enemy(EnemyKind::Boss, pos, profile.radius, speed, profile.hp);
    state.boss_active = true;

    // Next milestone is the first multiple of the step above the current score
    if let Some(step) = state.tuning.boss_score_step {
        state.scheduler.next_boss_score = Some((state.score / step + 1) * step);
    }

    log::info!("Boss {} spawned at score {}", id, state.score);
    state.emit(GameEvent::BossSpawned { pos });
    id
}

/// Cola bottle somewhere inside the arena, inset from the edges
pub fn spawn_pickup(state: &mut GameState) -> u32 {
    let bounds = state.bounds();
    let margin = state.tuning.pickup_margin;
    let span = (bounds - Vec2::splat(margin * 2.0)).max(Vec2::ZERO);
    let pos = Vec2::new(
        state.rng.random::<f32>() * span.x + margin,
        state.rng.random::<f32>() * span.y + margin,
    );
    let id = state.store.spawn_pickup(pos, state.tuning.pickup_radius);
    log::debug!("Pickup {} at ({:.0}, {:.0})", id, pos.x, pos.y);
    id
}

/// Energy drain cadence; running dry ends the session
pub fn drain_energy(state: &mut GameState) {
    state.add_energy(-state.tuning.drain_amount);
    if state.energy <= 0.0 {
        state.end_game();
    }
}
