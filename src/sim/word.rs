//! Falling word entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier for a live word
///
/// Ids are never reused within a run, so a stale id simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(pub u32);

/// Special effect attached to a word at spawn, triggered on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BonusKind {
    #[default]
    None,
    /// Slows every falling word for a while
    Slow,
    /// Clears the words closest to the bottom
    Blast,
    /// Doubles word scores for a while
    DoubleScore,
}

impl BonusKind {
    /// Bonus kinds a spawn can roll
    pub const ROLLABLE: [BonusKind; 3] =
        [BonusKind::Slow, BonusKind::Blast, BonusKind::DoubleScore];
}

/// A falling piece of text with typed progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntity {
    pub id: WordId,
    text: Vec<char>,
    typed: usize,
    pub pos: Vec2,
    /// Pixels per second, fixed at spawn
    pub speed: f32,
    pub bonus: BonusKind,
}

impl WordEntity {
    pub fn new(id: WordId, text: &str, pos: Vec2, speed: f32, bonus: BonusKind) -> Self {
        Self {
            id,
            text: text.chars().collect(),
            typed: 0,
            pos,
            speed,
            bonus,
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn typed_count(&self) -> usize {
        self.typed
    }

    pub fn is_complete(&self) -> bool {
        self.typed == self.text.len()
    }

    /// First character, lowercased
    pub fn first_char(&self) -> Option<char> {
        self.text.first().map(|c| c.to_ascii_lowercase())
    }

    /// Next character to type, lowercased
    pub fn next_char(&self) -> Option<char> {
        self.text.get(self.typed).map(|c| c.to_ascii_lowercase())
    }

    /// Accept `ch` if it is the next character. Returns whether it matched.
    ///
    /// `typed` only ever grows and never passes the text length.
    pub fn accept(&mut self, ch: char) -> bool {
        if self.next_char() == Some(ch.to_ascii_lowercase()) {
            self.typed += 1;
            true
        } else {
            false
        }
    }

    /// Typed and untyped halves, for differential styling
    pub fn split(&self) -> (String, String) {
        let (done, rest) = self.text.split_at(self.typed);
        (done.iter().collect(), rest.iter().collect())
    }

    /// Fall by `speed * dt * speed_scale`
    pub fn advance(&mut self, dt: f32, speed_scale: f32) {
        self.pos.y += self.speed * dt * speed_scale;
    }
}
