//! Data-driven game balance
//!
//! Every number the simulation reads lives here. Defaults describe the full
//! game (leveling + bosses); `Tuning::classic()` is the original arcade mode
//! with a fixed weapon and no bosses. Front-ends may ship a JSON override,
//! any field left out keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::FireStats;

/// Reasons a tuning document is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} period must be at least one tick")]
    ZeroPeriod { field: &'static str },
    #[error("level threshold growth must be greater than 1.0 (got {0})")]
    FlatGrowth(f32),
}

/// Per-kind enemy balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub radius: f32,
    pub hp: f32,
    /// Pixels per tick at score 0
    pub base_speed: f32,
    /// Extra pixels per tick for each point of score
    pub speed_per_score: f32,
    /// Energy removed when it touches the player
    pub contact_damage: f32,
    pub score: u64,
    pub experience: u32,
}

impl EnemyProfile {
    pub const MINION: Self = Self {
        radius: 15.0,
        hp: 1.0,
        base_speed: 2.0,
        speed_per_score: 1.0 / 500.0,
        contact_damage: 20.0,
        score: 10,
        experience: 10,
    };

    pub const BOSS: Self = Self {
        radius: 40.0,
        hp: 30.0,
        base_speed: 1.0,
        speed_per_score: 0.0,
        contact_damage: 50.0,
        score: 500,
        experience: 100,
    };

    /// Homing speed for the current score
    pub fn speed_at(&self, score: u64) -> f32 {
        self.base_speed + score as f32 * self.speed_per_score
    }
}

/// Complete balance sheet for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Player ===
    pub player_radius: f32,
    /// Pixels per tick at full stick deflection
    pub player_speed: f32,

    // === Energy ===
    pub drain_period: u32,
    pub drain_amount: f32,

    // === Pickups ===
    pub pickup_period: u32,
    pub pickup_radius: f32,
    /// Inset from the arena edge for pickup placement
    pub pickup_margin: f32,
    pub pickup_energy: f32,
    pub pickup_score: u64,

    // === Enemies ===
    pub enemy_period: u32,
    /// Distance outside the arena where minions appear
    pub spawn_offset: f32,
    pub minion: EnemyProfile,
    pub boss: EnemyProfile,
    /// Score step between bosses (`None` disables bosses)
    pub boss_score_step: Option<u64>,
    /// Radius used for bullet vs enemy tests
    pub bullet_hit_radius: f32,

    // === Weapon ===
    pub weapon: FireStats,
    pub bullet_lifetime: u32,
    pub wobble_amplitude: f32,
    /// Radians of wobble phase per tick of bullet age
    pub wobble_frequency: f32,

    // === Progression ===
    pub leveling: bool,
    pub first_level_threshold: u32,
    pub level_growth: f32,
    /// Fire interval multiplier for the rapid fire upgrade
    pub rapid_fire_factor: f32,
    pub min_fire_interval: f32,
    /// Spread added with every extra shot
    pub spread_per_shot: f32,
    pub super_bonus: u64,

    // === Effects ===
    pub explosion_particles: u32,
    pub particle_lifetime: u32,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,

            player_radius: 20.0,
            player_speed: 4.0,

            // 1% every 200 ms
            drain_period: 12,
            drain_amount: 1.0,

            // one bottle every 5 s
            pickup_period: 300,
            pickup_radius: 15.0,
            pickup_margin: 20.0,
            pickup_energy: 20.0,
            pickup_score: 50,

            // one robot every 800 ms
            enemy_period: 48,
            spawn_offset: 20.0,
            minion: EnemyProfile::MINION,
            boss: EnemyProfile::BOSS,
            boss_score_step: Some(1000),
            bullet_hit_radius: 5.0,

            weapon: FireStats::default(),
            bullet_lifetime: 60,
            wobble_amplitude: 3.0,
            wobble_frequency: 0.3,

            leveling: true,
            first_level_threshold: 50,
            level_growth: 1.5,
            rapid_fire_factor: 0.8,
            min_fire_interval: 3.0,
            spread_per_shot: 0.05,
            super_bonus: 500,

            explosion_particles: 8,
            particle_lifetime: 30,
            max_particles: 512,
        }
    }
}

impl Tuning {
    /// Original arcade rules: fixed weapon, no leveling, no bosses
    pub fn classic() -> Self {
        Self {
            leveling: false,
            boss_score_step: None,
            ..Self::default()
        }
    }

    /// Same defaults with a different arena size
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("player_radius", self.player_radius),
            ("pickup_radius", self.pickup_radius),
            ("minion.radius", self.minion.radius),
            ("minion.hp", self.minion.hp),
            ("boss.radius", self.boss.radius),
            ("boss.hp", self.boss.hp),
            ("weapon.interval", self.weapon.interval),
            ("weapon.bullet_speed", self.weapon.bullet_speed),
            ("weapon.damage", self.weapon.damage),
            ("min_fire_interval", self.min_fire_interval),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let periods = [
            ("drain", self.drain_period),
            ("pickup", self.pickup_period),
            ("enemy", self.enemy_period),
        ];
        for (field, period) in periods {
            if period == 0 {
                return Err(TuningError::ZeroPeriod { field });
            }
        }

        if self.weapon.shots == 0 {
            return Err(TuningError::NotPositive {
                field: "weapon.shots",
                value: 0.0,
            });
        }
        if self.boss_score_step == Some(0) {
            return Err(TuningError::NotPositive {
                field: "boss_score_step",
                value: 0.0,
            });
        }
        if self.leveling && self.first_level_threshold == 0 {
            return Err(TuningError::NotPositive {
                field: "first_level_threshold",
                value: 0.0,
            });
        }
        if self.leveling && !(self.level_growth > 1.0) {
            return Err(TuningError::FlatGrowth(self.level_growth));
        }
        Ok(())
    }
}
