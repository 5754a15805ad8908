//! Browser bindings
//!
//! The page owns the canvas and `requestAnimationFrame`: it forwards key
//! events, calls `frame` once per animation frame and draws from
//! `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::platform::{self, Clock, LocalStorage, SystemClock};
use crate::session::GameSession;
use crate::sim::Movement;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    platform::init_logging();
    log::info!("Karen Flyver (web) starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: GameSession<LocalStorage, AudioManager>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame {
            session: GameSession::new(LocalStorage, AudioManager::new(), None),
        }
    }

    pub fn player(&self) -> Option<String> {
        self.session.player().map(str::to_string)
    }

    pub fn sign_in(&mut self, name: &str) -> Result<(), JsValue> {
        self.session
            .sign_in(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        // Start comes from a user gesture, the one moment audio may unlock
        self.session.audio().resume();
        self.session
            .start()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn is_started(&self) -> bool {
        self.session.is_started()
    }

    /// -1 left, 1 right, 0 release
    pub fn set_movement(&mut self, direction: i32) {
        let movement = match direction.signum() {
            -1 => Movement::Left,
            1 => Movement::Right,
            _ => Movement::None,
        };
        self.session.set_movement(movement);
    }

    pub fn jump(&mut self) {
        self.session.jump();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.session.set_muted(muted);
    }

    /// Master and effects volume, each 0.0 - 1.0
    pub fn set_volume(&mut self, master: f32, sfx: f32) {
        self.session.set_volume(master, sfx);
    }

    pub fn is_muted(&self) -> bool {
        self.session.settings().muted
    }

    /// Advance one frame; returns whether the run is still going
    pub fn frame(&mut self) -> bool {
        self.session.frame(SystemClock.now_ms());
        self.session.is_started()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(self.session.snapshot()).unwrap_or_default()
    }

    pub fn boss_firing(&self) -> bool {
        self.session.snapshot().boss_firing(SystemClock.now_ms())
    }

    pub fn next_boss_score(&self) -> u64 {
        self.session.snapshot().next_boss_score()
    }

    /// Best `n` entries as `[{"name":..,"score":..}]`
    pub fn high_scores_json(&self, n: usize) -> String {
        serde_json::to_string(self.session.high_scores().top(n)).unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
