//! Simulation tick
//!
//! Advances a run by one step. Order within a step: power-up timers, spawn,
//! fall, misses, particles. The host caps `dt` before calling.

use super::scoring;
use super::state::{GameEvent, RunState};
use super::word::WordId;

/// Advance the run by `dt` seconds
pub fn tick(state: &mut RunState, dt: f32) {
    if state.game_over || !dt.is_finite() || dt <= 0.0 {
        return;
    }

    state.elapsed += dt;
    scoring::decay_power_ups(state, dt);

    if state.spawner.advance(dt) {
        let id = state.next_word_id();
        let spawned = state.spawner.spawn(
            &mut state.rng,
            &state.pool,
            id,
            state.level,
            state.viewport_width,
            state.spawn_padding,
        );
        if let Some(word) = spawned {
            state.insert_word(word);
        }
    }

    let scale = scoring::speed_scale(state);
    for word in state.words.iter_mut() {
        word.advance(dt, scale);
    }

    resolve_misses(state);
    if state.game_over {
        return;
    }

    state.particles.update(dt);
}

/// Remove every word past the bottom, costing a life each
fn resolve_misses(state: &mut RunState) {
    let boundary = state.miss_boundary;
    let missed: Vec<WordId> = state
        .words
        .iter()
        .filter(|w| w.pos.y > boundary)
        .map(|w| w.id)
        .collect();

    for id in missed {
        if state.remove_word(id).is_none() {
            continue;
        }
        state.lives -= 1;
        state.streak = 0;
        log::debug!("Missed {:?}, {} lives left", id, state.lives);
        state.events.push(GameEvent::WordMissed { id });
    }

    if state.lives <= 0 && !state.game_over {
        state.game_over = true;
        state.target = None;
        log::info!("Game over: score {} at level {}", state.score, state.level);
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::GameConfig;
    use crate::sim::input::on_character;
    use crate::sim::word::{BonusKind, WordEntity};
    use crate::tuning::Difficulty;
    use glam::Vec2;

    fn state(pool: &[&str]) -> RunState {
        RunState::new(
            42,
            &Difficulty::Beginner.profile(),
            pool.iter().map(|s| s.to_string()).collect(),
            &GameConfig::default(),
        )
    }

    fn add(state: &mut RunState, text: &str, y: f32, speed: f32) -> WordId {
        let id = state.next_word_id();
        state.insert_word(WordEntity::new(id, text, Vec2::new(100.0, y), speed, BonusKind::None));
        id
    }

    #[test]
    fn test_fall_and_slow() {
        let mut s = state(&["cat"]);
        let id = add(&mut s, "cat", SPAWN_Y, 44.0);
        tick(&mut s, 1.0);
        assert_eq!(s.word(id).unwrap().pos.y, 34.0);

        s.slow_time_remaining = SLOW_DURATION;
        tick(&mut s, 1.0);
        assert!((s.word(id).unwrap().pos.y - (34.0 + 44.0 * SLOW_SPEED_SCALE)).abs() < 1e-4);
        assert_eq!(s.slow_time_remaining, SLOW_DURATION - 1.0);
    }

    #[test]
    fn test_falling_word_typed_out() {
        let mut s = state(&["cat", "dog"]);
        let id = add(&mut s, "cat", SPAWN_Y, 44.0);
        tick(&mut s, 1.0);
        assert_eq!(s.word(id).unwrap().pos.y, 34.0);

        for ch in ['c', 'a', 't'] {
            on_character(&mut s, ch);
        }
        assert!(s.word(id).is_none());
        assert_eq!(s.score, 19);
        assert_eq!(s.streak, 1);
        assert_eq!(s.lives, STARTING_LIVES);
    }

    #[test]
    fn test_unusable_dt_is_ignored() {
        let mut s = state(&["cat"]);
        let id = add(&mut s, "cat", 100.0, 44.0);
        for dt in [f32::NAN, f32::INFINITY, -0.5, 0.0] {
            tick(&mut s, dt);
        }
        assert_eq!(s.elapsed, 0.0);
        assert_eq!(s.word(id).unwrap().pos.y, 100.0);
        assert_eq!(s.spawner.accumulated(), 0.0);
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut s = state(&["cat"]);
        for _ in 0..17 {
            tick(&mut s, 0.1);
        }
        assert!(s.words.is_empty());
        tick(&mut s, 0.2);
        assert_eq!(s.words.len(), 1);
        assert_eq!(s.words[0].text(), "cat");
    }

    #[test]
    fn test_miss_costs_life_and_clears_target() {
        let mut s = state(&["cat"]);
        let boundary = s.miss_boundary;
        let id = add(&mut s, "cat", boundary - 1.0, 44.0);
        let safe = add(&mut s, "dog", 0.0, 44.0);
        on_character(&mut s, 'c');
        s.streak = 3;
        assert_eq!(s.target, Some(id));

        tick(&mut s, 0.033);
        assert_eq!(s.lives, 2);
        assert!(s.word(id).is_none());
        assert!(s.word(safe).is_some());
        assert!(s.target.is_none());
        assert_eq!(s.streak, 0);
        assert!(s.events.contains(&GameEvent::WordMissed { id }));
    }

    #[test]
    fn test_miss_keeps_unrelated_target() {
        let mut s = state(&["cat"]);
        let boundary = s.miss_boundary;
        add(&mut s, "dog", boundary - 1.0, 44.0);
        let cat = add(&mut s, "cat", 0.0, 44.0);
        on_character(&mut s, 'c');
        tick(&mut s, 0.033);
        assert_eq!(s.target, Some(cat));
    }

    #[test]
    fn test_game_over_once() {
        let mut s = state(&["cat"]);
        s.lives = 1;
        let boundary = s.miss_boundary;
        add(&mut s, "cat", boundary, 44.0);
        add(&mut s, "dog", boundary, 44.0);
        tick(&mut s, 0.033);
        assert!(s.game_over);
        assert_eq!(s.lives, -1);
        let overs = s
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);

        let elapsed = s.elapsed;
        let score = s.score;
        tick(&mut s, 0.033);
        assert_eq!(s.elapsed, elapsed);
        add(&mut s, "cow", 10.0, 44.0);
        on_character(&mut s, 'c');
        assert_eq!(s.score, score);
    }

    #[test]
    fn test_no_word_rendered_past_boundary() {
        let mut s = state(&["cat", "dog", "bird"]);
        for _ in 0..2000 {
            tick(&mut s, MAX_FRAME_DT);
            assert!(s.words.iter().all(|w| w.pos.y <= s.miss_boundary));
            if s.game_over {
                break;
            }
        }
        assert!(s.game_over, "nobody typed, so the run must end");
    }

    #[test]
    fn test_determinism() {
        let mut a = state(&["cat", "dog", "bird", "fish"]);
        let mut b = state(&["cat", "dog", "bird", "fish"]);
        for i in 0..300 {
            tick(&mut a, 0.016);
            tick(&mut b, 0.016);
            if i % 7 == 0 {
                on_character(&mut a, 'c');
                on_character(&mut b, 'c');
            }
        }
        assert_eq!(a.words.len(), b.words.len());
        assert_eq!(a.score, b.score);
        for (wa, wb) in a.words.iter().zip(&b.words) {
            assert_eq!(wa.text(), wb.text());
            assert_eq!(wa.pos, wb.pos);
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn no_word_survives_past_the_boundary(
                seed in any::<u64>(),
                dts in proptest::collection::vec(0.0f32..0.05, 1..400),
            ) {
                let mut s = RunState::new(
                    seed,
                    &Difficulty::Challenge.profile(),
                    vec!["alpha".into(), "bravo".into(), "charlie".into()],
                    &GameConfig::default(),
                );
                let mut game_overs = 0;
                for dt in dts {
                    tick(&mut s, dt);
                    prop_assert!(s.words.iter().all(|w| w.pos.y <= s.miss_boundary));
                    game_overs += s
                        .drain_events()
                        .iter()
                        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                        .count();
                }
                prop_assert!(game_overs <= 1);
                prop_assert_eq!(game_overs == 1, s.game_over);
                prop_assert!(s.lives >= 0 || s.game_over);
            }
        }
    }
}
