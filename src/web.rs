//! Browser surface
//!
//! Thin wasm-bindgen wrapper around `Session`. The page owns the canvas,
//! audio and DOM: it forwards input, calls `frame()` from
//! requestAnimationFrame and renders the JSON it gets back.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::sim::{Session, TickInput, UpgradeKind};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Serialization failed: {}", e);
        "null".to_string()
    })
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
}

#[wasm_bindgen]
impl WebSession {
    /// New session sized to the canvas, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebSession {
        let seed = js_sys::Date::now() as u64;
        WebSession {
            session: Session::with_tuning(seed, Tuning::with_arena(width, height)),
        }
    }

    /// New session from a JSON tuning document
    pub fn with_tuning(json: &str) -> Result<WebSession, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = js_sys::Date::now() as u64;
        Ok(WebSession {
            session: Session::with_tuning(seed, tuning),
        })
    }

    pub fn set_movement(&mut self, dx: f32, dy: f32) {
        self.session.set_movement(Vec2::new(dx, dy));
    }

    /// Touch drag relative to where the finger went down
    pub fn set_joystick(&mut self, drag_x: f32, drag_y: f32) {
        self.session
            .set_movement(TickInput::joystick(Vec2::new(drag_x, drag_y)));
    }

    pub fn set_keys(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.session
            .set_movement(TickInput::keys(up, down, left, right));
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.session.set_idle_mode(idle);
    }

    pub fn activate_super(&mut self) {
        self.session.request_super();
    }

    /// Returns false for an unknown upgrade name
    pub fn choose_upgrade(&mut self, name: &str) -> bool {
        match UpgradeKind::from_str(name) {
            Some(kind) => {
                self.session.choose_upgrade(kind);
                true
            }
            None => {
                log::warn!("Unknown upgrade '{}'", name);
                false
            }
        }
    }

    /// Advance by `dt` seconds; returns the events as a JSON array
    pub fn frame(&mut self, dt: f32) -> String {
        to_json(&self.session.advance(dt))
    }

    /// All live entities as JSON, for drawing
    pub fn snapshot(&self) -> String {
        to_json(&self.session.snapshot())
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn score(&self) -> f64 {
        self.session.state().score as f64
    }
}
