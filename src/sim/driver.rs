//! Frame driver
//!
//! Turns variable frame times into fixed simulation ticks and owns the only
//! mutable handle to the session state. Front-ends feed it normalized input
//! and drain the events it returns each frame.

use glam::Vec2;

use super::events::GameEvent;
use super::progression::UpgradeKind;
use super::state::{GamePhase, GameState, Snapshot};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::tuning::Tuning;

/// One play session
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: TickInput,
    accumulator: f32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("New session (seed {})", seed);
        Self {
            state: GameState::with_tuning(seed, tuning),
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Held movement, sampled by every tick until changed
    pub fn set_movement(&mut self, movement: Vec2) {
        self.input.movement = movement.clamp_length_max(1.0);
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Queue a super activation for the next tick
    pub fn request_super(&mut self) {
        self.input.activate_super = true;
    }

    /// Queue an upgrade choice for the next tick
    pub fn choose_upgrade(&mut self, kind: UpgradeKind) {
        self.input.upgrade = Some(kind);
    }

    /// Run exactly one tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        self.run_tick();
        self.state.drain_events()
    }

    /// Run as many fixed ticks as `frame_dt` seconds cover
    pub fn advance(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        if self.state.is_over() {
            self.accumulator = 0.0;
            return self.state.drain_events();
        }

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.run_tick();
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.state.is_over() {
                self.accumulator = 0.0;
                break;
            }
        }
        self.state.drain_events()
    }

    fn run_tick(&mut self) {
        tick(&mut self.state, &self.input);
        // Clear one-shot inputs after processing
        self.input.activate_super = false;
        self.input.upgrade = None;
    }
}
