//! Type Rush - A falling-words typing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (words, scoring, power-ups, particles)
//! - `session`: Run state machine (menu, running, paused, game over)
//! - `tuning`: Difficulty presets
//! - `wordlist`: Word catalog sources
//! - `progress` / `persistence`: Best scores and preferences
//! - `audio`: Feedback tones

pub mod audio;
pub mod autopilot;
pub mod error;
pub mod input;
pub mod persistence;
pub mod progress;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod wordlist;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{LoadError, SessionError, StoreError};
pub use progress::Progress;
pub use session::{Phase, Selection, Session};
pub use settings::GameConfig;
pub use tuning::Difficulty;

/// Game configuration constants
pub mod consts {
    /// Largest simulated step a single frame may take (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Default viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 960.0;
    pub const VIEWPORT_HEIGHT: f32 = 640.0;
    /// Words whose y passes `height - MISS_MARGIN` are missed
    pub const MISS_MARGIN: f32 = 16.0;
    /// Horizontal inset for spawn positions
    pub const SPAWN_PADDING: f32 = 40.0;
    /// Spawn height, just above the visible area
    pub const SPAWN_Y: f32 = -10.0;
    /// Lowest miss boundary; words always get this much room to fall
    pub const MIN_MISS_BOUNDARY: f32 = 48.0;

    /// Lives at the start of a run
    pub const STARTING_LIVES: i32 = 3;

    /// Chance that a spawned word carries a bonus
    pub const BONUS_CHANCE: f64 = 0.09;
    /// Fall speed scale while Slow is active
    pub const SLOW_SPEED_SCALE: f32 = 0.55;
    /// Power-up durations (seconds)
    pub const SLOW_DURATION: f32 = 5.0;
    pub const DOUBLE_SCORE_DURATION: f32 = 10.0;
    /// Words consumed by a Blast
    pub const BLAST_COUNT: usize = 3;

    /// Score needed per level before the next level-up
    pub const POINTS_PER_LEVEL: u64 = 300;
    /// Spawn interval tightening per level, and its floor
    pub const SPAWN_INTERVAL_STEP: f32 = 0.04;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.75;
    /// Fall speed added per level (pixels/second)
    pub const LEVEL_SPEED_INCREMENT: f32 = 4.0;

    /// Pools smaller than this get replicated...
    pub const SMALL_POOL_THRESHOLD: usize = 50;
    /// ...until they reach at least this many entries
    pub const PADDED_POOL_SIZE: usize = 200;
}

/// Characters the game accepts as typing input (after lowercasing)
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz-'";

/// Normalize a typed character, returning `None` for anything outside the alphabet
#[inline]
pub fn normalize_char(ch: char) -> Option<char> {
    let lower = ch.to_ascii_lowercase();
    ALPHABET.contains(lower).then_some(lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_char() {
        assert_eq!(normalize_char('a'), Some('a'));
        assert_eq!(normalize_char('Q'), Some('q'));
        assert_eq!(normalize_char('-'), Some('-'));
        assert_eq!(normalize_char('\''), Some('\''));
        assert_eq!(normalize_char('1'), None);
        assert_eq!(normalize_char(' '), None);
        assert_eq!(normalize_char('é'), None);
    }
}
