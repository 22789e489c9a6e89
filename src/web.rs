//! Browser bindings
//!
//! The page owns the canvas, the keyboard listeners and the RAF loop. It
//! feeds key names and frame deltas in and draws the JSON frames that come
//! back out.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::input::InputEvent;
use crate::persistence::LocalStorageStore;
use crate::session::{Phase, Selection, Session};
use crate::settings::GameConfig;
use crate::sim::KeyOutcome;
use crate::tuning::Difficulty;
use crate::wordlist::StaticWordSource;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Type Rush (web) starting...");
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Menu => "menu",
        Phase::Running => "running",
        Phase::Paused => "paused",
        Phase::GameOver => "gameover",
    }
}

/// One game instance bound to a page
#[wasm_bindgen]
pub struct WebGame {
    session: Session<StaticWordSource, LocalStorageStore, WebAudio>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> WebGame {
        let config = GameConfig {
            seed,
            ..GameConfig::with_viewport(width, height)
        };
        WebGame {
            session: Session::new(
                config,
                StaticWordSource::new(),
                LocalStorageStore::new(),
                WebAudio::new(),
            ),
        }
    }

    /// Register a catalog fetched by the page
    pub fn add_catalog(&mut self, id: &str, title: &str, words: Vec<String>) {
        log::info!("Catalog {} registered ({} words)", id, words.len());
        self.session.source_mut().insert(id, title, words);
    }

    /// `[{id, title, approx_count}]`
    pub fn catalogs(&self) -> Result<String, JsValue> {
        to_json(&self.session.catalogs())
    }

    /// Previously used difficulty, if any
    pub fn selected_difficulty(&self) -> Option<String> {
        self.session
            .selection()
            .map(|s| s.difficulty.as_str().to_string())
    }

    pub fn selected_wordlist(&self) -> Option<String> {
        self.session.selection().map(|s| s.wordlist.clone())
    }

    pub fn select(&mut self, difficulty: &str, wordlist: &str) -> Result<(), JsValue> {
        let difficulty = Difficulty::from_str(difficulty)
            .ok_or_else(|| JsValue::from_str(&format!("unknown difficulty '{}'", difficulty)))?;
        self.session
            .select(Selection::new(difficulty, wordlist))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.session
            .start()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn retry(&mut self) -> Result<(), JsValue> {
        self.session
            .retry()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn exit(&mut self) {
        self.session.exit();
    }

    /// Window lost focus
    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    /// Handle a DOM `KeyboardEvent.key`; true when the page should
    /// prevent the default action
    pub fn key(&mut self, key: &str) -> bool {
        match InputEvent::from_key_name(key) {
            Some(event) => self.session.handle_input(event) != KeyOutcome::Ignored
                || matches!(event, InputEvent::TogglePause),
            None => false,
        }
    }

    /// Advance by `dt` seconds; returns the frame JSON or `null` outside a run
    pub fn frame(&mut self, dt: f32) -> Result<String, JsValue> {
        let frame = self.session.frame(dt);
        to_json(&frame)
    }

    /// Events since the last call, as JSON
    pub fn events(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.take_events())
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.set_viewport(width, height);
    }

    pub fn phase(&self) -> String {
        phase_name(self.session.phase()).to_string()
    }

    pub fn sound_enabled(&self) -> bool {
        self.session.progress().sound_enabled
    }

    pub fn set_sound(&mut self, enabled: bool) {
        self.session.set_sound_enabled(enabled);
    }

    /// Best score for a combination, 0 if none
    pub fn best(&self, difficulty: &str, wordlist: &str) -> u64 {
        Difficulty::from_str(difficulty)
            .and_then(|d| {
                self.session
                    .progress()
                    .best_score(&Selection::new(d, wordlist).best_key())
            })
            .unwrap_or(0)
    }

    /// Last run's summary JSON, or `null`
    pub fn summary(&self) -> Result<String, JsValue> {
        to_json(&self.session.summary())
    }

    pub fn last_error(&self) -> Option<String> {
        self.session.last_error().map(str::to_string)
    }
}
