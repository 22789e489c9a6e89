//! Run state and core simulation types
//!
//! One `RunState` exists per run. It owns every live word, the particle
//! system, the spawner and the run's RNG. Retry builds a fresh one.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticleSystem;
use super::spawner::Spawner;
use super::word::{BonusKind, WordEntity, WordId};
use crate::consts::STARTING_LIVES;
use crate::settings::GameConfig;
use crate::tuning::DifficultyProfile;

/// Something the host may want to react to (sound, flashes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Keystroke advanced the target
    KeyCorrect,
    /// Keystroke did not match the target's next letter
    KeyMistake,
    /// A word was typed out
    WordCompleted {
        id: WordId,
        points: u64,
        bonus: BonusKind,
    },
    /// A Blast cleared these words
    Blast { cleared: usize, points: u64 },
    /// A word crossed the bottom
    WordMissed { id: WordId },
    LevelUp { level: u32 },
    GameOver { score: u64 },
}

/// Complete state of a single run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Candidate words for spawning
    pub(crate) pool: Vec<String>,
    pub spawner: Spawner,
    /// Live words (spawn order)
    pub words: Vec<WordEntity>,
    pub particles: ParticleSystem,
    /// Word currently receiving keystrokes
    pub target: Option<WordId>,

    pub score: u64,
    pub level: u32,
    /// Goes to zero or below on the last miss
    pub lives: i32,
    pub streak: u32,
    /// Never below 1
    pub multiplier: f64,
    pub total_keystrokes: u64,
    pub correct_keystrokes: u64,
    /// Simulated seconds, excluding pauses
    pub elapsed: f32,

    /// Power-up countdowns (seconds, never negative)
    pub slow_time_remaining: f32,
    pub double_score_time_remaining: f32,

    pub viewport_width: f32,
    pub miss_boundary: f32,
    pub spawn_padding: f32,

    /// Set once lives run out; the run no longer advances
    pub game_over: bool,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl RunState {
    /// Start a run over an already filtered and padded pool
    pub fn new(
        seed: u64,
        profile: &DifficultyProfile,
        pool: Vec<String>,
        config: &GameConfig,
    ) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            pool,
            spawner: Spawner::new(profile),
            words: Vec::new(),
            particles: ParticleSystem::new(),
            target: None,
            score: 0,
            level: 1,
            lives: STARTING_LIVES,
            streak: 0,
            multiplier: 1.0,
            total_keystrokes: 0,
            correct_keystrokes: 0,
            elapsed: 0.0,
            slow_time_remaining: 0.0,
            double_score_time_remaining: 0.0,
            viewport_width: config.viewport_width,
            miss_boundary: config.miss_boundary(),
            spawn_padding: config.spawn_padding,
            game_over: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new word ID
    pub fn next_word_id(&mut self) -> WordId {
        let id = WordId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn word(&self, id: WordId) -> Option<&WordEntity> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn word_mut(&mut self, id: WordId) -> Option<&mut WordEntity> {
        self.words.iter_mut().find(|w| w.id == id)
    }

    /// The live target, clearing the reference if its word is gone
    pub fn resolve_target(&mut self) -> Option<WordId> {
        let id = self.target?;
        if self.word(id).is_some() {
            Some(id)
        } else {
            self.target = None;
            None
        }
    }

    /// Add a word to the live set
    pub fn insert_word(&mut self, word: WordEntity) {
        self.words.push(word);
    }

    /// Remove a word from the live set. Every removal goes through here so
    /// the target never outlives its word.
    pub fn remove_word(&mut self, id: WordId) -> Option<WordEntity> {
        let idx = self.words.iter().position(|w| w.id == id)?;
        if self.target == Some(id) {
            self.target = None;
        }
        Some(self.words.remove(idx))
    }

    /// Resize the playfield; takes effect on the next tick
    pub fn set_viewport(&mut self, config: &GameConfig) {
        self.viewport_width = config.viewport_width;
        self.miss_boundary = config.miss_boundary();
        self.spawn_padding = config.spawn_padding;
    }

    /// Words per minute, counting five correct keystrokes as a word
    pub fn wpm(&self) -> f64 {
        if self.elapsed <= 0.0 {
            return 0.0;
        }
        (self.correct_keystrokes as f64 / 5.0) / (self.elapsed as f64 / 60.0)
    }

    /// Correct share of keystrokes, 0 before any typing
    pub fn accuracy(&self) -> f64 {
        if self.total_keystrokes == 0 {
            0.0
        } else {
            self.correct_keystrokes as f64 / self.total_keystrokes as f64
        }
    }

    /// Whether a timed power-up is running
    pub fn slow_active(&self) -> bool {
        self.slow_time_remaining > 0.0
    }

    pub fn double_score_active(&self) -> bool {
        self.double_score_time_remaining > 0.0
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
