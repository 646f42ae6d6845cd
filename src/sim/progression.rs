//! Leveling, upgrades and the super attack
//!
//! Experience from kills fills a threshold. Crossing it freezes the run in
//! `GamePhase::LevelUp` with three distinct upgrade offers; picking one
//! applies it to the weapon and resumes play. The super charge is separate:
//! three pickups arm a one-shot screen clear.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::events::{ENEMY_RED, GameEvent, SHOCKWAVE_YELLOW, SoundCue};
use super::state::{FireStats, GamePhase, GameState};
use crate::tuning::Tuning;

/// Upgrade choices offered on level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Shorter fire interval
    RapidFire,
    /// More damage per bullet
    HeavyRounds,
    /// One more bullet per volley, wider fan
    MultiShot,
    /// Bullets snake sideways
    Wobble,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::RapidFire,
        UpgradeKind::HeavyRounds,
        UpgradeKind::MultiShot,
        UpgradeKind::Wobble,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::RapidFire => "rapid_fire",
            UpgradeKind::HeavyRounds => "heavy_rounds",
            UpgradeKind::MultiShot => "multi_shot",
            UpgradeKind::Wobble => "wobble",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rapid_fire" | "rapid" => Some(UpgradeKind::RapidFire),
            "heavy_rounds" | "damage" => Some(UpgradeKind::HeavyRounds),
            "multi_shot" | "multi" => Some(UpgradeKind::MultiShot),
            "wobble" => Some(UpgradeKind::Wobble),
            _ => None,
        }
    }

    /// Card text for the upgrade screen
    pub fn description(&self) -> &'static str {
        match self {
            UpgradeKind::RapidFire => "Fire 20% faster",
            UpgradeKind::HeavyRounds => "+1 bullet damage",
            UpgradeKind::MultiShot => "+1 bullet per volley",
            UpgradeKind::Wobble => "Bullets weave side to side",
        }
    }

    /// Apply this upgrade's effect to the weapon
    pub fn apply(self, fire: &mut FireStats, tuning: &Tuning) {
        match self {
            UpgradeKind::RapidFire => {
                fire.interval = (fire.interval * tuning.rapid_fire_factor).max(tuning.min_fire_interval);
            }
            UpgradeKind::HeavyRounds => fire.damage += 1.0,
            UpgradeKind::MultiShot => {
                fire.shots += 1;
                fire.spread += tuning.spread_per_shot;
            }
            UpgradeKind::Wobble => fire.wobble = true,
        }
    }
}

/// Level and experience bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub experience: u32,
    /// Experience needed for the next level
    pub next_threshold: u32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            experience: 0,
            next_threshold: tuning.first_level_threshold,
        }
    }

    pub fn ready(&self) -> bool {
        self.experience >= self.next_threshold
    }

    /// Consume one threshold worth of experience and grow the next one
    pub fn advance(&mut self, growth: f32) {
        self.level += 1;
        self.experience -= self.next_threshold;
        self.next_threshold = (self.next_threshold as f32 * growth).floor() as u32;
    }
}

/// Three distinct upgrades drawn from the pool
pub fn draw_offer<R: Rng + ?Sized>(rng: &mut R) -> [UpgradeKind; 3] {
    let mut pool = UpgradeKind::ALL;
    pool.shuffle(rng);
    [pool[0], pool[1], pool[2]]
}

/// Enter `LevelUp` if enough experience has been banked. Returns true on level-up.
pub fn check_level_up(state: &mut GameState) -> bool {
    if !state.tuning.leveling || !state.is_running() || !state.progression.ready() {
        return false;
    }

    state.progression.advance(state.tuning.level_growth);
    let offer = draw_offer(&mut state.rng);
    state.phase = GamePhase::LevelUp { offer };

    let level = state.progression.level;
    log::info!(
        "Level {} reached (next at {} xp), offering {:?}",
        level,
        state.progression.next_threshold,
        offer
    );
    state.emit(GameEvent::LevelUpOffer {
        level,
        options: offer,
    });
    true
}

/// Apply an offered upgrade and resume play. Anything not on offer is ignored.
pub fn select_upgrade(state: &mut GameState, kind: UpgradeKind) -> bool {
    let GamePhase::LevelUp { offer } = state.phase else {
        return false;
    };
    if !offer.contains(&kind) {
        log::debug!("Ignoring {:?}: not in offer {:?}", kind, offer);
        return false;
    }

    kind.apply(&mut state.fire, &state.tuning);
    state.phase = GamePhase::Running;
    log::debug!("Upgrade {:?} applied: {:?}", kind, state.fire);
    state.emit(GameEvent::UpgradeApplied { kind });
    true
}

/// Screen-clearing super attack. Only works at full charge while running.
pub fn activate_super(state: &mut GameState) -> bool {
    if !state.is_running() || !state.super_available() {
        return false;
    }

    let particles = state.tuning.explosion_particles;
    let positions: Vec<_> = state.store.enemies.iter().map(|e| e.pos).collect();
    for pos in positions {
        state.explode(pos, ENEMY_RED, particles);
    }
    let cleared = state.store.clear_enemies();
    state.boss_active = false;

    let at = state.store.player.pos;
    state.explode(at, SHOCKWAVE_YELLOW, particles);
    state.emit(GameEvent::sound(SoundCue::Super));

    state.super_charge = 0;
    state.score += state.tuning.super_bonus;
    log::info!("Super used: {} enemies cleared, score {}", cleared.len(), state.score);
    true
}
