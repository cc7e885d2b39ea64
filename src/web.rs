//! Browser bindings
//!
//! The page owns the canvas and the animation loop; it forwards pointer
//! events and frame timings here and draws from the returned snapshot JSON.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::input::{GestureTracker, translate_gesture};
use crate::sim::{Intent, Simulation};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("Sunsplash starting...");
}

/// One game instance bound to a canvas of the given size
#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation,
    gestures: GestureTracker,
    /// Intent decoded since the last frame, applied on the next one
    pending: Option<Intent>,
    audio: AudioManager,
}

#[wasm_bindgen]
impl WebGame {
    /// `seed` defaults to the current time when omitted
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<f64>) -> WebGame {
        let tuning = Tuning {
            field_width: width,
            field_height: height,
            ..Tuning::default()
        };
        for warning in tuning.validate() {
            log::warn!("Tuning: {warning}");
        }
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        WebGame {
            sim: Simulation::seeded(tuning, seed),
            gestures: GestureTracker::new(),
            pending: None,
            audio: AudioManager::new(),
        }
    }

    pub fn start(&mut self) -> bool {
        self.audio.resume();
        self.sim.start()
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.gestures.cancel();
        self.sim.reset_round();
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.audio.resume();
        self.gestures.pointer_down(Vec2::new(x, y));
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        let Some(gesture) = self.gestures.pointer_up(Vec2::new(x, y)) else {
            return;
        };
        let state = &self.sim.state;
        if let Some(intent) = translate_gesture(&gesture, state.tuning.field_height, state.player.x) {
            log::debug!("Gesture {gesture:?} -> {intent:?}");
            self.pending = Some(intent);
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.gestures.cancel();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.mixer.set_master_volume(volume);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.mixer.set_muted(muted);
    }

    /// Advance by `elapsed_ms` and return the snapshot as JSON
    pub fn frame(&mut self, elapsed_ms: f32) -> Result<String, JsValue> {
        self.sim.advance(elapsed_ms, self.pending.take());
        for event in self.sim.drain_events() {
            self.audio.play_event(&event);
        }
        self.sim
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
