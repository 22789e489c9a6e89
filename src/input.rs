//! Input surface
//!
//! Hosts translate their key events into [`InputEvent`]s. Anything that is
//! not a single accepted character or the pause key is dropped here.

use crate::normalize_char;

/// Input commands the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A typed character (already lowercased)
    Char(char),
    /// Pause / resume
    TogglePause,
}

impl InputEvent {
    /// Parse a DOM-style key name (`"a"`, `"Escape"`, `"Shift"` ...)
    pub fn from_key_name(key: &str) -> Option<Self> {
        if key == "Escape" {
            return Some(InputEvent::TogglePause);
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c == '\u{1b}' {
            return Some(InputEvent::TogglePause);
        }
        normalize_char(c).map(InputEvent::Char)
    }
}
