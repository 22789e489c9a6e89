//! Demo typist
//!
//! Plays the game for headless demos: keeps typing the current target, or
//! goes after the word closest to the bottom. Makes occasional mistakes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::ALPHABET;
use crate::sim::RunState;

pub struct Autopilot {
    rng: Pcg32,
    /// Typing speed
    pub chars_per_second: f32,
    /// Chance that a keystroke is wrong
    pub error_rate: f64,
    budget: f32,
}

impl Autopilot {
    pub fn new(seed: u64, chars_per_second: f32, error_rate: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            chars_per_second: if chars_per_second.is_finite() {
                chars_per_second.max(0.0)
            } else {
                0.0
            },
            // NaN would survive clamp and make random_bool panic
            error_rate: if error_rate.is_finite() {
                error_rate.clamp(0.0, 1.0)
            } else {
                0.0
            },
            budget: 0.0,
        }
    }

    /// Keystrokes earned over `dt` seconds
    pub fn keystrokes_due(&mut self, dt: f32) -> usize {
        self.budget += self.chars_per_second * dt.max(0.0);
        let due = self.budget.floor();
        self.budget -= due;
        due as usize
    }

    /// What to press next, if anything is on screen
    pub fn next_key(&mut self, run: &RunState) -> Option<char> {
        let intended = run
            .target
            .and_then(|id| run.word(id))
            .or_else(|| {
                run.words
                    .iter()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            })
            .and_then(|w| w.next_char())?;

        if self.rng.random_bool(self.error_rate) {
            let alphabet: Vec<char> = ALPHABET.chars().filter(|&c| c != intended).collect();
            let idx = self.rng.random_range(0..alphabet.len());
            return Some(alphabet[idx]);
        }
        Some(intended)
    }
}
