//! Drawable snapshot of a run
//!
//! Everything a renderer needs for one frame, detached from the simulation.

use serde::Serialize;

use super::state::RunState;
use super::word::{BonusKind, WordId};

/// HUD numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub lives: i32,
    pub streak: u32,
    pub wpm: f64,
    /// 0..=1
    pub accuracy: f64,
    pub elapsed: f32,
}

/// A live word, split for differential styling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordView {
    pub id: WordId,
    pub typed: String,
    pub remaining: String,
    pub x: f32,
    pub y: f32,
    pub bonus: BonusKind,
    pub is_target: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub age: f32,
    /// 1 = fresh, 0 = expired
    pub alpha: f32,
    pub color: u32,
}

/// Active power-up countdowns (seconds)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUps {
    pub slow: f32,
    pub double_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub hud: Hud,
    pub words: Vec<WordView>,
    pub particles: Vec<ParticleView>,
    pub power_ups: PowerUps,
}

impl Frame {
    pub fn capture(state: &RunState) -> Self {
        let words = state
            .words
            .iter()
            .map(|w| {
                let (typed, remaining) = w.split();
                WordView {
                    id: w.id,
                    typed,
                    remaining,
                    x: w.pos.x,
                    y: w.pos.y,
                    bonus: w.bonus,
                    is_target: state.target == Some(w.id),
                }
            })
            .collect();

        let particles = state
            .particles
            .particles()
            .iter()
            .map(|p| ParticleView {
                x: p.pos.x,
                y: p.pos.y,
                age: p.age,
                alpha: p.life_fraction(),
                color: p.color,
            })
            .collect();

        Self {
            hud: Hud {
                score: state.score,
                level: state.level,
                lives: state.lives.max(0),
                streak: state.streak,
                wpm: state.wpm(),
                accuracy: state.accuracy(),
                elapsed: state.elapsed,
            },
            words,
            particles,
            power_ups: PowerUps {
                slow: state.slow_time_remaining,
                double_score: state.double_score_time_remaining,
            },
        }
    }
}
