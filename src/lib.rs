//! Cola Rush - single-screen arcade survival
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, combat, progression)
//! - `tuning`: Data-driven game balance
//! - `web`: wasm-bindgen surface for a browser front-end

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sim::{GameEvent, GamePhase, GameState, Session, TickInput, UpgradeKind, tick};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Cola energy range is 0..=MAX_ENERGY
    pub const MAX_ENERGY: f32 = 100.0;
    /// Pickups needed to arm the super attack
    pub const MAX_SUPER_CHARGE: u8 = 3;
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// True when two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Keep a circle of `radius` fully inside the `[0, bounds]` rectangle
#[inline]
pub fn clamp_to_bounds(pos: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    // An arena narrower than the circle pins it to the near edge
    Vec2::new(
        pos.x.clamp(radius, (bounds.x - radius).max(radius)),
        pos.y.clamp(radius, (bounds.y - radius).max(radius)),
    )
}
