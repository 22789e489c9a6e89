//! Run state machine
//!
//! `Menu` → `Running` ⇄ `Paused`, `Running` → `GameOver` → (`Running` | `Menu`).
//! Only `Running` accepts keystrokes and advances time, so pausing freezes
//! timers, positions and the spawn clock exactly.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioSink, SoundEffect};
use crate::error::{LoadError, SessionError};
use crate::input::InputEvent;
use crate::persistence::ProgressStore;
use crate::progress::{LastSelection, Progress};
use crate::settings::GameConfig;
use crate::sim::{Frame, GameEvent, KeyOutcome, RunState, build_word_pool, on_character, tick};
use crate::tuning::Difficulty;
use crate::wordlist::{Catalog, WordSource};

/// The only mode shipped today
pub const DEFAULT_MODE: &str = "classic";

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Choosing difficulty and wordlist
    Menu,
    /// Active gameplay
    Running,
    /// Run frozen
    Paused,
    /// Run ended; retry or exit
    GameOver,
}

/// Menu choices for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub difficulty: Difficulty,
    pub wordlist: String,
    pub mode: String,
}

impl Selection {
    pub fn new(difficulty: Difficulty, wordlist: impl Into<String>) -> Self {
        Self {
            difficulty,
            wordlist: wordlist.into(),
            mode: DEFAULT_MODE.to_string(),
        }
    }

    /// `difficulty|wordlist|mode`
    pub fn best_key(&self) -> String {
        Progress::best_key(self.difficulty.as_str(), &self.wordlist, &self.mode)
    }

    fn from_last(last: &LastSelection) -> Option<Self> {
        Some(Self {
            difficulty: Difficulty::from_str(last.difficulty.as_deref()?)?,
            wordlist: last.wordlist.clone()?,
            mode: last.mode.clone().unwrap_or_else(|| DEFAULT_MODE.to_string()),
        })
    }

    fn to_last(&self) -> LastSelection {
        LastSelection {
            difficulty: Some(self.difficulty.as_str().to_string()),
            wordlist: Some(self.wordlist.clone()),
            mode: Some(self.mode.clone()),
        }
    }
}

/// Stats shown after a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub wpm: u32,
    pub accuracy: f64,
    pub difficulty: Difficulty,
    pub wordlist: String,
    pub mode: String,
    pub best: u64,
    pub new_best: bool,
}

/// Owns the current run and its collaborators
pub struct Session<W: WordSource, P: ProgressStore, A: AudioSink> {
    config: GameConfig,
    source: W,
    store: P,
    audio: A,
    progress: Progress,
    phase: Phase,
    selection: Option<Selection>,
    run: Option<RunState>,
    summary: Option<RunSummary>,
    last_error: Option<String>,
    events: Vec<GameEvent>,
}

impl<W: WordSource, P: ProgressStore, A: AudioSink> Session<W, P, A> {
    pub fn new(config: GameConfig, source: W, store: P, audio: A) -> Self {
        let progress = store.load();
        let selection = Selection::from_last(&progress.last_selection);
        Self {
            config,
            source,
            store,
            audio,
            progress,
            phase: Phase::Menu,
            selection,
            run: None,
            summary: None,
            last_error: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn run(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    /// Summary of the last finished run
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Message from the last failed start, for the menu
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Hosts that register catalogs at runtime reach the source here
    pub fn source_mut(&mut self) -> &mut W {
        &mut self.source
    }

    pub fn catalogs(&self) -> Vec<Catalog> {
        self.source.list_catalogs()
    }

    /// Choose what the next run plays
    pub fn select(&mut self, selection: Selection) -> Result<(), SessionError> {
        match self.phase {
            Phase::Menu | Phase::GameOver => {
                self.selection = Some(selection);
                Ok(())
            }
            phase => Err(SessionError::InvalidTransition {
                phase,
                action: "change selection",
            }),
        }
    }

    /// Start a run from the menu, or retry from game over
    ///
    /// On load failure the session returns to `Menu` with the error recorded.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::Menu | Phase::GameOver) {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                action: "start",
            });
        }
        let Some(selection) = self.selection.clone() else {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                action: "start without a selection",
            });
        };

        self.progress.last_selection = selection.to_last();
        self.persist();

        let pool = match self.load_pool(&selection) {
            Ok(pool) => pool,
            Err(e) => {
                log::warn!("Cannot start {}: {}", selection.wordlist, e);
                self.last_error = Some(e.to_string());
                self.run = None;
                self.phase = Phase::Menu;
                return Err(e.into());
            }
        };

        let seed = self.config.seed.unwrap_or_else(rand::random);
        log::info!(
            "Run started: {} / {} ({} words, seed {})",
            selection.difficulty.as_str(),
            selection.wordlist,
            pool.len(),
            seed
        );
        self.run = Some(RunState::new(
            seed,
            &selection.difficulty.profile(),
            pool,
            &self.config,
        ));
        self.summary = None;
        self.last_error = None;
        self.events.clear();
        self.phase = Phase::Running;
        Ok(())
    }

    /// Start again after game over
    pub fn retry(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::GameOver {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                action: "retry",
            });
        }
        self.start()
    }

    /// Abandon the run and go back to the menu
    pub fn exit(&mut self) {
        if self.phase != Phase::Menu {
            log::info!("Exit to menu from {:?}", self.phase);
        }
        self.run = None;
        self.phase = Phase::Menu;
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Route a host input event
    pub fn handle_input(&mut self, event: InputEvent) -> KeyOutcome {
        match event {
            InputEvent::TogglePause => {
                self.toggle_pause();
                KeyOutcome::Ignored
            }
            InputEvent::Char(ch) => self.on_character(ch),
        }
    }

    /// Apply a keystroke; only a running game listens
    pub fn on_character(&mut self, ch: char) -> KeyOutcome {
        if self.phase != Phase::Running {
            return KeyOutcome::Ignored;
        }
        let Some(run) = self.run.as_mut() else {
            return KeyOutcome::Ignored;
        };
        let outcome = on_character(run, ch);
        self.flush_events();
        outcome
    }

    /// Advance by a host-measured frame delta and return what to draw
    pub fn frame(&mut self, dt: f32) -> Option<Frame> {
        if self.phase == Phase::Running {
            let dt = self.config.clamp_frame_dt(dt);
            if let Some(run) = self.run.as_mut() {
                tick(run, dt);
            }
            self.flush_events();
            if self.run.as_ref().is_some_and(|r| r.game_over) {
                self.finish_run();
            }
        }
        self.snapshot()
    }

    /// Drawable state without advancing
    pub fn snapshot(&self) -> Option<Frame> {
        self.run.as_ref().map(Frame::capture)
    }

    /// Events since the last call (sounds have already been played)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resize between frames; unusable sizes keep the current viewport
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if !self.config.resize(width, height) {
            return;
        }
        if let Some(run) = self.run.as_mut() {
            run.set_viewport(&self.config);
        }
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.progress.sound_enabled = enabled;
        self.persist();
    }

    fn load_pool(&self, selection: &Selection) -> Result<Vec<String>, LoadError> {
        let words = self.source.load_words(&selection.wordlist)?;
        build_word_pool(&selection.wordlist, &words, &selection.difficulty.profile())
    }

    /// Play sounds for pending run events and queue them for the host
    fn flush_events(&mut self) {
        let Some(run) = self.run.as_mut() else { return };
        for event in run.drain_events() {
            if self.progress.sound_enabled {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect.tone());
                }
            }
            self.events.push(event);
        }
    }

    /// Enter game over exactly once and record the best score
    fn finish_run(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        let (Some(run), Some(selection)) = (self.run.as_ref(), self.selection.as_ref()) else {
            return;
        };

        let key = selection.best_key();
        let new_best = self.progress.record_score(&key, run.score);
        let summary = RunSummary {
            score: run.score,
            level: run.level,
            wpm: run.wpm().round() as u32,
            accuracy: run.accuracy(),
            difficulty: selection.difficulty,
            wordlist: selection.wordlist.clone(),
            mode: selection.mode.clone(),
            best: self.progress.best_score(&key).unwrap_or(0),
            new_best,
        };
        log::info!(
            "Run over: score {} level {} wpm {} acc {:.0}%{}",
            summary.score,
            summary.level,
            summary.wpm,
            summary.accuracy * 100.0,
            if new_best { " (new best)" } else { "" }
        );

        self.summary = Some(summary);
        self.phase = Phase::GameOver;
        if new_best {
            self.persist();
        }
    }

    /// Best-effort save; failures never interrupt play
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.progress) {
            log::warn!("Failed to save progress: {}", e);
        }
    }
}
