//! Keystroke resolution
//!
//! Maps one typed character to a target word and advances it. Called by the
//! host between ticks; it never removes a word except on completion.

use super::scoring;
use super::state::{GameEvent, RunState};
use super::word::WordId;
use crate::normalize_char;

/// What a keystroke did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not part of the alphabet, or the run is over
    Ignored,
    /// Counted, but no word could take it
    NoTarget,
    /// Advanced the target
    Correct,
    /// Advanced and finished the target
    Completed,
    /// Did not match the target's next letter
    Mistake,
}

/// Pick a word for `ch`: the lowest word whose next letter matches,
/// else the first word (spawn order) whose first letter matches.
fn acquire_target(state: &RunState, ch: char) -> Option<WordId> {
    let mut best: Option<(WordId, f32)> = None;
    for word in &state.words {
        if word.next_char() != Some(ch) {
            continue;
        }
        match best {
            Some((_, y)) if word.pos.y <= y => {}
            _ => best = Some((word.id, word.pos.y)),
        }
    }

    best.map(|(id, _)| id).or_else(|| {
        state
            .words
            .iter()
            .find(|w| w.first_char() == Some(ch))
            .map(|w| w.id)
    })
}

/// Apply one keystroke to the run
pub fn on_character(state: &mut RunState, ch: char) -> KeyOutcome {
    if state.game_over {
        return KeyOutcome::Ignored;
    }
    let Some(ch) = normalize_char(ch) else {
        return KeyOutcome::Ignored;
    };

    state.total_keystrokes += 1;

    let target = match state.resolve_target() {
        Some(id) => id,
        None => match acquire_target(state, ch) {
            Some(id) => {
                state.target = Some(id);
                id
            }
            None => return KeyOutcome::NoTarget,
        },
    };

    let Some(word) = state.word_mut(target) else {
        state.target = None;
        return KeyOutcome::NoTarget;
    };

    if !word.accept(ch) {
        state.streak = 0;
        state.events.push(GameEvent::KeyMistake);
        return KeyOutcome::Mistake;
    }

    let complete = word.is_complete();
    state.correct_keystrokes += 1;
    state.events.push(GameEvent::KeyCorrect);

    if !complete {
        return KeyOutcome::Correct;
    }

    if let Some(word) = state.remove_word(target) {
        scoring::complete_word(state, &word);
    }
    KeyOutcome::Completed
}
