//! Events the simulation emits for render/audio/UI collaborators
//!
//! The core never draws or plays anything. Each tick appends to an ordered
//! event list which the driver hands out after the step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::progression::UpgradeKind;

/// Packed 0xRRGGBB
pub type Color = u32;

pub const PLAYER_CYAN: Color = 0x00ccff;
pub const ENEMY_RED: Color = 0xff4444;
pub const BOSS_ORANGE: Color = 0xff8800;
pub const SHOCKWAVE_YELLOW: Color = 0xffff00;

/// Sound effects the audio layer knows how to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Shoot,
    Hit,
    Powerup,
    Super,
}

/// Something a collaborator should show or play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Particle burst; the particles themselves are in the snapshot
    Explosion { pos: Vec2, color: Color, particles: u32 },
    Sound { cue: SoundCue },
    /// Emitted whenever one of the HUD values changed during the tick
    Hud {
        score: u64,
        energy_percent: f32,
        super_available: bool,
    },
    /// Super charge just reached the cap
    SuperAvailable,
    LevelUpOffer { level: u32, options: [UpgradeKind; 3] },
    UpgradeApplied { kind: UpgradeKind },
    BossSpawned { pos: Vec2 },
    BossDefeated { pos: Vec2 },
    /// Terminal; emitted exactly once per session
    GameOver { final_score: u64 },
}

impl GameEvent {
    pub fn sound(cue: SoundCue) -> Self {
        GameEvent::Sound { cue }
    }
}

/// HUD values as last reported
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HudValues {
    pub score: u64,
    pub energy: f32,
    pub super_available: bool,
}
