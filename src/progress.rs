//! Persisted player progress
//!
//! Best score per `difficulty|wordlist|mode`, the last menu selection and the
//! sound toggle. Stored through a [`crate::persistence::ProgressStore`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Menu choices remembered between visits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastSelection {
    pub difficulty: Option<String>,
    pub wordlist: Option<String>,
    pub mode: Option<String>,
}

/// Everything remembered between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    /// Sound on/off
    #[serde(rename = "sound")]
    pub sound_enabled: bool,
    /// Best score per key
    #[serde(rename = "best")]
    pub best_scores: BTreeMap<String, u64>,
    #[serde(rename = "last")]
    pub last_selection: LastSelection,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            best_scores: BTreeMap::new(),
            last_selection: LastSelection::default(),
        }
    }
}

impl Progress {
    /// Key for best-score lookup
    pub fn best_key(difficulty: &str, wordlist: &str, mode: &str) -> String {
        format!("{}|{}|{}", difficulty, wordlist, mode)
    }

    pub fn best_score(&self, key: &str) -> Option<u64> {
        self.best_scores.get(key).copied()
    }

    /// Check if a score beats the stored best
    pub fn qualifies(&self, key: &str, score: u64) -> bool {
        score > self.best_score(key).unwrap_or(0)
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record_score(&mut self, key: &str, score: u64) -> bool {
        if !self.qualifies(key, score) {
            return false;
        }
        self.best_scores.insert(key.to_string(), score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_improvements() {
        let mut p = Progress::default();
        let key = Progress::best_key("beginner", "animals.txt", "classic");
        assert_eq!(key, "beginner|animals.txt|classic");

        assert!(!p.record_score(&key, 0));
        assert!(p.record_score(&key, 120));
        assert!(!p.record_score(&key, 120));
        assert!(!p.record_score(&key, 80));
        assert!(p.record_score(&key, 121));
        assert_eq!(p.best_score(&key), Some(121));
    }

    #[test]
    fn test_reads_legacy_shape() {
        let json = r#"{"sound":false,"best":{"normal|food.txt|classic":340},"last":{"name":""}}"#;
        let p: Progress = serde_json::from_str(json).unwrap();
        assert!(!p.sound_enabled);
        assert_eq!(p.best_score("normal|food.txt|classic"), Some(340));
        assert_eq!(p.last_selection, LastSelection::default());
    }

    #[test]
    fn test_missing_fields_default() {
        let p: Progress = serde_json::from_str("{}").unwrap();
        assert!(p.sound_enabled);
        assert!(p.best_scores.is_empty());
    }
}
