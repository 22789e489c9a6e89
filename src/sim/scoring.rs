//! Scoring, power-ups and level progression

use super::particles::BURST_COLOR;
use super::state::{GameEvent, RunState};
use super::word::{BonusKind, WordEntity};
use crate::consts::*;

/// Base points for a word of `len` characters
pub fn base_points(len: usize) -> u64 {
    10 + (len as f64 * 2.5).floor() as u64
}

/// Streak multiplier: +10% per five words in a row, capped at +50%
pub fn streak_factor(streak: u32) -> f64 {
    1.0 + (streak / 5).min(5) as f64 * 0.1
}

/// Points for completing a word
///
/// `streak` is the streak *after* this completion has been counted.
pub fn word_points(
    len: usize,
    streak: u32,
    level: u32,
    multiplier: f64,
    double_score: bool,
) -> u64 {
    let level_bonus = level as u64 * 2;
    let double = if double_score { 2.0 } else { 1.0 };
    let raw = (base_points(len) + level_bonus) as f64 * streak_factor(streak) * multiplier * double;
    raw.floor() as u64
}

/// Flat points for a word consumed by a Blast
pub fn blast_points(len: usize) -> u64 {
    10 + len as u64
}

/// Score a completed word that has already left the live set
pub fn complete_word(state: &mut RunState, word: &WordEntity) {
    state.streak += 1;
    let points = word_points(
        word.len(),
        state.streak,
        state.level,
        state.multiplier,
        state.double_score_active(),
    );
    state.score += points;
    state.particles.burst(&mut state.rng, word.pos, BURST_COLOR);
    state.events.push(GameEvent::WordCompleted {
        id: word.id,
        points,
        bonus: word.bonus,
    });

    apply_bonus(state, word.bonus);
    check_level_up(state);
}

/// Trigger a completed word's bonus
pub fn apply_bonus(state: &mut RunState, bonus: BonusKind) {
    match bonus {
        BonusKind::None => {}
        BonusKind::Slow => state.slow_time_remaining = SLOW_DURATION,
        BonusKind::DoubleScore => state.double_score_time_remaining = DOUBLE_SCORE_DURATION,
        BonusKind::Blast => blast(state),
    }
}

/// Destroy up to [`BLAST_COUNT`] words nearest the bottom for flat points.
/// Streak is untouched and no bursts are spawned.
pub fn blast(state: &mut RunState) {
    let mut order: Vec<_> = state.words.iter().map(|w| (w.id, w.pos.y)).collect();
    // Stable sort keeps spawn order among equal heights
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut points = 0;
    let mut cleared = 0;
    for (id, _) in order.into_iter().take(BLAST_COUNT) {
        if let Some(word) = state.remove_word(id) {
            points += blast_points(word.len());
            cleared += 1;
        }
    }
    state.score += points;
    state.events.push(GameEvent::Blast { cleared, points });
}

/// Raise the level while the score is past the threshold, tightening spawns
pub fn check_level_up(state: &mut RunState) {
    while state.score > state.level as u64 * POINTS_PER_LEVEL {
        state.level += 1;
        state.spawner.tighten();
        log::info!(
            "Level {} (score {}, spawn interval {:.2}s)",
            state.level,
            state.score,
            state.spawner.interval
        );
        state.events.push(GameEvent::LevelUp { level: state.level });
    }
}

/// Count down active power-ups, never below zero
pub fn decay_power_ups(state: &mut RunState, dt: f32) {
    state.slow_time_remaining = (state.slow_time_remaining - dt).max(0.0);
    state.double_score_time_remaining = (state.double_score_time_remaining - dt).max(0.0);
}

/// Fall speed scale from active power-ups
pub fn speed_scale(state: &RunState) -> f32 {
    if state.slow_active() { SLOW_SPEED_SCALE } else { 1.0 }
}
