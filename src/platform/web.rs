//! Browser binding
//!
//! The JS host owns the economy, the UI and rendering. It calls `tick` from
//! `requestAnimationFrame`, pushes progression snapshots when they change,
//! and drains events after each frame.

use wasm_bindgen::prelude::*;
use web_sys::VisibilityState;

use super::Host;
use crate::sim::catalog;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Claw Tide starting...");

    if let Err(e) = catalog::validate() {
        log::error!("Entity catalog is broken: {}", e);
    }
}

fn page_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.visibility_state() == VisibilityState::Hidden)
        .unwrap_or(false)
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game instance exposed to JS
#[wasm_bindgen]
pub struct WebGame {
    host: Host,
}

#[wasm_bindgen]
impl WebGame {
    /// New game seeded from `Math.random`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        log::info!("New game (seed {})", seed);
        Self {
            host: Host::new(seed),
        }
    }

    /// Advance one animation frame
    pub fn tick(&mut self, now_ms: f64, modal_open: bool) {
        self.host.frame(now_ms, page_hidden(), modal_open);
    }

    pub fn shoot(&mut self) {
        self.host.shoot();
    }

    pub fn set_progression(&mut self, json: &str) -> Result<(), JsValue> {
        self.host.set_progression_json(json).map_err(to_js)
    }

    pub fn force_weather(&mut self, name: &str, now_ms: f64, duration_ms: f64) -> Result<(), JsValue> {
        self.host
            .force_weather_named(name, now_ms, duration_ms)
            .map_err(to_js)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.host.snapshot_json().map_err(to_js)
    }

    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        self.host.events_json().map_err(to_js)
    }

    pub fn combo(&self) -> u32 {
        self.host.state.combo.current
    }

    pub fn max_combo(&self) -> u32 {
        self.host.state.combo.max
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
