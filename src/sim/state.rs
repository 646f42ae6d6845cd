//! Game state and core simulation types
//!
//! Everything a session mutates lives in one `GameState` aggregate. Systems
//! receive it by `&mut` rather than reaching for globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{Color, GameEvent, HudValues};
use super::progression::{Progression, UpgradeKind};
use super::spawn::Scheduler;
use super::store::EntityStore;
use crate::clamp_to_bounds;
use crate::consts::{MAX_ENERGY, MAX_SUPER_CHARGE};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen until the player picks one of the offered upgrades
    LevelUp { offer: [UpgradeKind; 3] },
    /// Cola ran dry; terminal
    GameOver,
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick at full deflection
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self { pos, radius, speed }
    }

    /// Apply one tick of movement input and keep the player on screen
    pub fn step(&mut self, movement: Vec2, bounds: Vec2) {
        let movement = movement.clamp_length_max(1.0);
        self.pos = clamp_to_bounds(self.pos + movement * self.speed, self.radius, bounds);
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Minion,
    Boss,
}

/// A homing enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: f32,
}

impl Enemy {
    /// Move straight at `target` by `speed`
    pub fn home_toward(&mut self, target: Vec2) {
        self.pos += (target - self.pos).normalize_or_zero() * self.speed;
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }
}

/// A player projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub ttl_ticks: u32,
    /// Ticks since the bullet was fired
    pub age: u32,
    pub wobble: bool,
}

impl Bullet {
    /// Advance one tick along the velocity, snaking sideways when wobbling
    pub fn advance(&mut self, amplitude: f32, frequency: f32) {
        self.pos += self.vel;
        if self.wobble {
            let lateral = self.vel.normalize_or_zero().perp();
            self.pos += lateral * (self.age as f32 * frequency).sin() * amplitude;
        }
        self.age += 1;
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.ttl_ticks == 0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub life: u32,
    pub size: f32,
}

/// A cola bottle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

/// Weapon parameters; only upgrades change them mid-run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireStats {
    /// Ticks between volleys
    pub interval: f32,
    /// Pixels per tick
    pub bullet_speed: f32,
    /// Bullets per volley
    pub shots: u32,
    /// Angle between neighbouring bullets of a volley (radians)
    pub spread: f32,
    pub damage: f32,
    pub wobble: bool,
}

impl Default for FireStats {
    fn default() -> Self {
        Self {
            // 300 ms
            interval: 18.0,
            bullet_speed: 10.0,
            shots: 1,
            spread: 0.1,
            damage: 1.0,
            wobble: false,
        }
    }
}

/// Serializable view of everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub pickups: Vec<Pickup>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub energy: f32,
    pub super_charge: u8,
    pub level: u32,
    pub experience: u32,
    pub next_level_threshold: u32,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    /// Cola energy, 0..=100
    pub energy: f32,
    /// 0..=3; at 3 the super attack is armed
    pub super_charge: u8,
    pub progression: Progression,
    pub fire: FireStats,
    /// Ticks since the last volley
    pub fire_counter: u32,
    pub scheduler: Scheduler,
    /// A boss is alive; minion spawns are suspended
    pub boss_active: bool,
    pub store: EntityStore,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    last_hud: Option<HudValues>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let center = Vec2::new(tuning.arena_width, tuning.arena_height) / 2.0;
        let player = Player::new(center, tuning.player_radius, tuning.player_speed);
        Self {
            seed,
            phase: GamePhase::Running,
            time_ticks: 0,
            score: 0,
            energy: MAX_ENERGY,
            super_charge: 0,
            progression: Progression::new(&tuning),
            fire: tuning.weapon,
            fire_counter: 0,
            scheduler: Scheduler::new(&tuning),
            boss_active: false,
            store: EntityStore::new(player),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            last_hud: None,
            tuning,
        }
    }

    /// Arena size
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.tuning.arena_width, self.tuning.arena_height)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn super_available(&self) -> bool {
        self.super_charge >= MAX_SUPER_CHARGE
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events waiting to be drained
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Add (or with a negative delta, remove) energy, clamped to 0..=100
    pub fn add_energy(&mut self, delta: f32) {
        self.energy = (self.energy + delta).clamp(0.0, MAX_ENERGY);
    }

    /// Add super charge, clamped to the cap. Returns true if the cap was just reached.
    pub fn add_super_charge(&mut self, amount: u8) -> bool {
        let was_armed = self.super_available();
        self.super_charge = self.super_charge.saturating_add(amount).min(MAX_SUPER_CHARGE);
        !was_armed && self.super_available()
    }

    /// Burst of cosmetic particles plus the matching event
    pub fn explode(&mut self, pos: Vec2, color: Color, count: u32) {
        let life = self.tuning.particle_lifetime;
        let cap = self.tuning.max_particles;
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 10.0,
                (self.rng.random::<f32>() - 0.5) * 10.0,
            );
            let size = self.rng.random::<f32>() * 5.0 + 2.0;
            self.store.push_particle(
                Particle {
                    pos,
                    vel,
                    color,
                    life,
                    size,
                },
                cap,
            );
        }
        self.emit(GameEvent::Explosion {
            pos,
            color,
            particles: count,
        });
    }

    /// Enter the terminal phase. Safe to call more than once.
    pub fn end_game(&mut self) {
        if self.is_over() {
            return;
        }
        // Final HUD goes out first; nothing follows GameOver
        self.publish_hud();
        self.phase = GamePhase::GameOver;
        self.scheduler.cancel();
        log::info!(
            "Game over at tick {}: score {}, level {}",
            self.time_ticks,
            self.score,
            self.progression.level
        );
        self.emit(GameEvent::GameOver {
            final_score: self.score,
        });
    }

    /// Emit a HUD update if anything the HUD shows changed
    pub fn publish_hud(&mut self) {
        if self.is_over() {
            return;
        }
        let current = HudValues {
            score: self.score,
            energy: self.energy,
            super_available: self.super_available(),
        };
        if self.last_hud == Some(current) {
            return;
        }
        self.last_hud = Some(current);
        self.emit(GameEvent::Hud {
            score: current.score,
            energy_percent: current.energy / MAX_ENERGY * 100.0,
            super_available: current.super_available,
        });
    }

    /// Copy of all live entities for drawing
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            player: self.store.player,
            enemies: self.store.enemies.clone(),
            bullets: self.store.bullets.clone(),
            pickups: self.store.pickups.clone(),
            particles: self.store.particles.clone(),
            score: self.score,
            energy: self.energy,
            super_charge: self.super_charge,
            level: self.progression.level,
            experience: self.progression.experience,
            next_level_threshold: self.progression.next_threshold,
        }
    }
}
