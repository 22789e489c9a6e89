//! Time-driven word spawning
//!
//! The word pool is built once per run: filtered by the difficulty's length
//! limits, then replicated if it is too small to feel varied.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::word::{BonusKind, WordEntity, WordId};
use crate::consts::*;
use crate::error::LoadError;
use crate::tuning::DifficultyProfile;

/// Build the run's word pool from a loaded catalog
///
/// Small pools are doubled until they reach [`PADDED_POOL_SIZE`], so every
/// word keeps the same relative frequency.
pub fn build_word_pool(
    catalog: &str,
    words: &[String],
    profile: &DifficultyProfile,
) -> Result<Vec<String>, LoadError> {
    let mut pool: Vec<String> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty() && profile.accepts(w))
        .map(str::to_string)
        .collect();

    if pool.is_empty() {
        return Err(LoadError::EmptyPool {
            catalog: catalog.to_string(),
            min: profile.min_word_length,
            max: profile.max_word_length,
        });
    }

    if pool.len() < SMALL_POOL_THRESHOLD {
        while pool.len() < PADDED_POOL_SIZE {
            pool.extend_from_within(..);
        }
    }

    Ok(pool)
}

/// Produces words on a fixed interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds between spawns; only ever tightens within a run
    pub interval: f32,
    accumulator: f32,
    /// Fall speed before the level ramp
    pub base_speed: f32,
}

impl Spawner {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            interval: profile.initial_spawn_interval,
            accumulator: 0.0,
            base_speed: profile.base_fall_speed,
        }
    }

    /// Seconds accumulated toward the next spawn
    pub fn accumulated(&self) -> f32 {
        self.accumulator
    }

    /// Fall speed for a word spawned at `level`
    pub fn speed_for_level(&self, level: u32) -> f32 {
        self.base_speed + level as f32 * LEVEL_SPEED_INCREMENT
    }

    /// Tighten the interval by one level step
    pub fn tighten(&mut self) {
        self.interval = (self.interval - SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
    }

    /// Advance the timer; returns true when a spawn is due
    pub fn advance(&mut self, dt: f32) -> bool {
        self.accumulator += dt;
        if self.accumulator >= self.interval {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }

    /// Create a word right now, ignoring the timer
    pub fn spawn<R: Rng>(
        &self,
        rng: &mut R,
        pool: &[String],
        id: WordId,
        level: u32,
        viewport_width: f32,
        padding: f32,
    ) -> Option<WordEntity> {
        let text = pool.choose(rng)?;

        let max_x = viewport_width - padding;
        let x = if max_x > padding {
            rng.random_range(padding..=max_x)
        } else {
            padding
        };

        let bonus = if rng.random_bool(BONUS_CHANCE) {
            *BonusKind::ROLLABLE.choose(rng).unwrap_or(&BonusKind::None)
        } else {
            BonusKind::None
        };

        log::debug!("Spawn {:?} '{}' at x={:.0} bonus={:?}", id, text, x, bonus);
        Some(WordEntity::new(
            id,
            text,
            Vec2::new(x, SPAWN_Y),
            self.speed_for_level(level),
            bonus,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Difficulty;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pool_padding_keeps_frequency() {
        let profile = Difficulty::Beginner.profile();
        let list = words(&["cat", "dog", "bird", "fish", "mouse", "horse", "sheep"]);
        let pool = build_word_pool("animals", &list, &profile).unwrap();
        assert!(pool.len() >= PADDED_POOL_SIZE);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for w in &pool {
            *counts.entry(w.as_str()).or_default() += 1;
        }
        assert_eq!(counts.len(), 7);
        let first = counts["cat"];
        assert!(counts.values().all(|&c| c == first));
    }

    #[test]
    fn test_pool_filters_by_length() {
        let profile = Difficulty::Beginner.profile();
        let list = words(&["ox", "cat", "  ", "elephant", " dog "]);
        let pool = build_word_pool("x", &list, &profile).unwrap();
        assert!(pool.iter().all(|w| w == "cat" || w == "dog"));
    }

    #[test]
    fn test_large_pool_is_not_padded() {
        let profile = Difficulty::Beginner.profile();
        let list: Vec<String> = (0..60).map(|i| format!("w{:03}", i)).collect();
        let pool = build_word_pool("x", &list, &profile).unwrap();
        assert_eq!(pool.len(), 60);
    }

    #[test]
    fn test_empty_pool_is_error() {
        let profile = Difficulty::Challenge.profile();
        let err = build_word_pool("tiny", &words(&["cat", "dog"]), &profile).unwrap_err();
        assert!(matches!(err, LoadError::EmptyPool { .. }));
    }

    #[test]
    fn test_empty_pool_spawns_nothing() {
        let spawner = Spawner::new(&Difficulty::Beginner.profile());
        let mut rng = Pcg32::seed_from_u64(6);
        assert!(spawner.spawn(&mut rng, &[], WordId(1), 1, 800.0, 40.0).is_none());
    }

    #[test]
    fn test_spawn_interval_and_speed() {
        let profile = Difficulty::Beginner.profile();
        let mut spawner = Spawner::new(&profile);
        let mut rng = Pcg32::seed_from_u64(3);
        let pool = words(&["cat"]);

        assert!(!spawner.advance(1.0));
        assert!(spawner.advance(0.9));
        assert_eq!(spawner.accumulated(), 0.0);
        let word = spawner
            .spawn(&mut rng, &pool, WordId(1), 1, 800.0, 40.0)
            .expect("pool is not empty");
        assert_eq!(word.speed, 44.0);
        assert_eq!(word.pos.y, SPAWN_Y);
        assert!(word.pos.x >= 40.0 && word.pos.x <= 760.0);
    }

    #[test]
    fn test_tighten_floors() {
        let mut spawner = Spawner::new(&Difficulty::Challenge.profile());
        for _ in 0..100 {
            spawner.tighten();
        }
        assert_eq!(spawner.interval, MIN_SPAWN_INTERVAL);
    }

    #[test]
    fn test_narrow_viewport_spawns_at_padding() {
        let spawner = Spawner::new(&Difficulty::Beginner.profile());
        let mut rng = Pcg32::seed_from_u64(4);
        let word = spawner
            .spawn(&mut rng, &words(&["cat"]), WordId(1), 1, 50.0, 40.0)
            .unwrap();
        assert_eq!(word.pos.x, 40.0);
    }

    #[test]
    fn test_bonus_rate_is_roughly_nine_percent() {
        let spawner = Spawner::new(&Difficulty::Beginner.profile());
        let mut rng = Pcg32::seed_from_u64(5);
        let pool = words(&["cat"]);
        let mut bonuses = 0;
        let n = 10_000;
        for i in 0..n {
            let w = spawner
                .spawn(&mut rng, &pool, WordId(i), 1, 800.0, 40.0)
                .unwrap();
            if w.bonus != BonusKind::None {
                bonuses += 1;
            }
        }
        let rate = bonuses as f64 / n as f64;
        assert!((0.07..0.11).contains(&rate), "rate was {rate}");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashMap;

        proptest! {
            #[test]
            fn padding_keeps_every_word_equally_often(
                list in proptest::collection::vec("[a-z]{3,6}", 1..60),
            ) {
                let profile = Difficulty::Beginner.profile();
                let pool = build_word_pool("props", &list, &profile).unwrap();

                let mut source: HashMap<&str, usize> = HashMap::new();
                for w in &list {
                    *source.entry(w.as_str()).or_default() += 1;
                }
                let mut padded: HashMap<&str, usize> = HashMap::new();
                for w in &pool {
                    *padded.entry(w.as_str()).or_default() += 1;
                }

                if list.len() < SMALL_POOL_THRESHOLD {
                    prop_assert!(pool.len() >= PADDED_POOL_SIZE);
                    prop_assert_eq!(pool.len() % list.len(), 0);
                } else {
                    prop_assert_eq!(pool.len(), list.len());
                }
                let factor = pool.len() / list.len();
                for (word, count) in source {
                    prop_assert_eq!(padded[word], count * factor);
                }
            }
        }
    }
}
