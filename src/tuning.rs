//! Difficulty presets
//!
//! Each preset resolves to an immutable [`DifficultyProfile`] for the run.

use serde::{Deserialize, Serialize};

/// Named difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Normal,
    Challenge,
}

/// Per-run word length limits and pacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Shortest accepted word (inclusive, in characters)
    pub min_word_length: usize,
    /// Longest accepted word (inclusive, in characters)
    pub max_word_length: usize,
    /// Fall speed before the level ramp (pixels/second)
    pub base_fall_speed: f32,
    /// Seconds between spawns at level 1
    pub initial_spawn_interval: f32,
}

impl DifficultyProfile {
    /// Whether a word's length fits this profile
    pub fn accepts(&self, word: &str) -> bool {
        let len = word.chars().count();
        (self.min_word_length..=self.max_word_length).contains(&len)
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Normal,
        Difficulty::Challenge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Normal => "normal",
            Difficulty::Challenge => "challenge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" | "easy" => Some(Difficulty::Beginner),
            "normal" => Some(Difficulty::Normal),
            "challenge" | "hard" => Some(Difficulty::Challenge),
            _ => None,
        }
    }

    /// Resolve the preset's profile
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Beginner => DifficultyProfile {
                min_word_length: 3,
                max_word_length: 6,
                base_fall_speed: 40.0,
                initial_spawn_interval: 1.8,
            },
            Difficulty::Normal => DifficultyProfile {
                min_word_length: 4,
                max_word_length: 8,
                base_fall_speed: 60.0,
                initial_spawn_interval: 1.4,
            },
            Difficulty::Challenge => DifficultyProfile {
                min_word_length: 5,
                max_word_length: 12,
                base_fall_speed: 80.0,
                initial_spawn_interval: 1.1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LEVEL_SPEED_INCREMENT;

    #[test]
    fn test_from_str_roundtrip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("CHALLENGE"), Some(Difficulty::Challenge));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_challenge_roughly_twice_beginner_at_level_one() {
        let slow = Difficulty::Beginner.profile().base_fall_speed + LEVEL_SPEED_INCREMENT;
        let fast = Difficulty::Challenge.profile().base_fall_speed + LEVEL_SPEED_INCREMENT;
        let ratio = fast / slow;
        assert!(ratio > 1.8 && ratio < 2.1, "ratio was {ratio}");
    }

    #[test]
    fn test_profile_accepts_by_char_count() {
        let p = Difficulty::Beginner.profile();
        assert!(p.accepts("cat"));
        assert!(p.accepts("rabbit"));
        assert!(!p.accepts("ox"));
        assert!(!p.accepts("giraffes"));
    }
}
