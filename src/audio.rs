//! Feedback tones
//!
//! Every sound is a single oscillator blip, so the sink contract is just
//! "play this tone". Sinks are fire-and-forget and never block the caller.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single blip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    pub waveform: Waveform,
}

impl Tone {
    pub const fn new(frequency: f32, duration: f32, waveform: Waveform) -> Self {
        Self {
            frequency,
            duration,
            waveform,
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Correct letter
    KeyHit,
    /// Wrong letter
    KeyMiss,
    /// Blast bonus went off
    Blast,
    /// Word reached the bottom
    WordLost,
    LevelUp,
    GameOver,
}

impl SoundEffect {
    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::KeyHit => Tone::new(520.0, 0.04, Waveform::Square),
            SoundEffect::KeyMiss => Tone::new(200.0, 0.06, Waveform::Sawtooth),
            SoundEffect::Blast => Tone::new(180.0, 0.12, Waveform::Triangle),
            SoundEffect::WordLost => Tone::new(110.0, 0.15, Waveform::Sine),
            SoundEffect::LevelUp => Tone::new(880.0, 0.1, Waveform::Triangle),
            SoundEffect::GameOver => Tone::new(90.0, 0.4, Waveform::Sine),
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::KeyCorrect => Some(SoundEffect::KeyHit),
            GameEvent::KeyMistake => Some(SoundEffect::KeyMiss),
            GameEvent::Blast { .. } => Some(SoundEffect::Blast),
            GameEvent::WordMissed { .. } => Some(SoundEffect::WordLost),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::WordCompleted { .. } => None,
        }
    }
}

/// Plays tones
pub trait AudioSink {
    fn play(&self, tone: Tone);
}

/// Discards every tone
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _tone: Tone) {}
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, OscillatorType};

    use super::{AudioSink, Tone, Waveform};

    /// Peak gain of a blip
    const PEAK_GAIN: f32 = 0.08;

    /// Web Audio oscillator sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        fn osc_type(waveform: Waveform) -> OscillatorType {
            match waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&self, tone: Tone) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let (Ok(osc), Ok(gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
                return;
            };
            osc.set_type(Self::osc_type(tone.waveform));
            osc.frequency().set_value(tone.frequency);
            if osc.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&ctx.destination()).is_err()
            {
                return;
            }

            let t = ctx.current_time();
            let end = t + tone.duration as f64;
            gain.gain().set_value_at_time(0.001, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(PEAK_GAIN, t + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, end)
                .ok();

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }
}
