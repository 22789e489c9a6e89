//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied time deltas only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod frame;
pub mod input;
pub mod particles;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod word;

pub use frame::{Frame, Hud, ParticleView, PowerUps, WordView};
pub use input::{KeyOutcome, on_character};
pub use particles::{Particle, ParticleSystem};
pub use spawner::{Spawner, build_word_pool};
pub use state::{GameEvent, RunState};
pub use tick::tick;
pub use word::{BonusKind, WordEntity, WordId};
