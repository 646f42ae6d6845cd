//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, newest-first for removals)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod combat;
pub mod driver;
pub mod events;
pub mod fire;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;

pub use driver::Session;
pub use events::{Color, GameEvent, SoundCue};
pub use progression::{Progression, UpgradeKind};
pub use spawn::{Cadence, Scheduler};
pub use state::{
    Bullet, Enemy, EnemyKind, FireStats, GamePhase, GameState, Particle, Pickup, Player, Snapshot,
};
pub use store::EntityStore;
pub use tick::{TickInput, tick};
