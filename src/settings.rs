//! Engine configuration
//!
//! Loaded from JSON on native; the wasm host builds it from the canvas size.
//! Every field has a default so partial files are accepted.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Viewport and pacing configuration shared by every run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
    /// Distance above the bottom edge where words count as missed
    pub miss_margin: f32,
    /// Horizontal inset for spawn positions
    pub spawn_padding: f32,
    /// Largest simulated step per frame (seconds)
    pub max_frame_dt: f32,
    /// Fixed RNG seed; `None` draws a fresh seed per run
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            miss_margin: MISS_MARGIN,
            spawn_padding: SPAWN_PADDING,
            max_frame_dt: MAX_FRAME_DT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Config for a given viewport, other fields default
    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..Self::default()
        }
    }

    /// Parse from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// y beyond which a word is missed, never above [`MIN_MISS_BOUNDARY`]
    pub fn miss_boundary(&self) -> f32 {
        // f32::max also swallows a NaN height or margin
        (self.viewport_height - self.miss_margin).max(MIN_MISS_BOUNDARY)
    }

    /// Apply a host resize. Non-finite or non-positive sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            log::warn!("Ignoring viewport resize to {}x{}", width, height);
            return false;
        }
        self.viewport_width = width;
        self.viewport_height = height;
        true
    }

    /// Clamp a host-measured frame delta to a usable simulation step
    pub fn clamp_frame_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        }
    }

    fn sanitize(&mut self) {
        if self.max_frame_dt.is_nan() || self.max_frame_dt <= 0.0 {
            log::warn!("Invalid max_frame_dt {}, using default", self.max_frame_dt);
            self.max_frame_dt = MAX_FRAME_DT;
        }
        if !self.viewport_width.is_finite() || self.viewport_width < 0.0 {
            self.viewport_width = VIEWPORT_WIDTH;
        }
        if !self.viewport_height.is_finite() || self.viewport_height < 0.0 {
            self.viewport_height = VIEWPORT_HEIGHT;
        }
        if !self.miss_margin.is_finite() {
            self.miss_margin = MISS_MARGIN;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "viewport_height": 480, "seed": 7 }"#).unwrap();
        assert_eq!(config.viewport_height, 480.0);
        assert_eq!(config.viewport_width, VIEWPORT_WIDTH);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.miss_boundary(), 480.0 - MISS_MARGIN);
    }

    #[test]
    fn test_clamp_frame_dt() {
        let config = GameConfig::default();
        assert_eq!(config.clamp_frame_dt(0.016), 0.016);
        assert_eq!(config.clamp_frame_dt(2.5), MAX_FRAME_DT);
        assert_eq!(config.clamp_frame_dt(-1.0), 0.0);
        assert_eq!(config.clamp_frame_dt(f32::NAN), 0.0);
    }

    #[test]
    fn test_resize_rejects_unusable_sizes() {
        let mut config = GameConfig::default();
        assert!(!config.resize(960.0, 0.0));
        assert!(!config.resize(960.0, f32::NAN));
        assert!(!config.resize(-1.0, 480.0));
        assert!(!config.resize(f32::INFINITY, 480.0));
        assert_eq!(config, GameConfig::default());

        assert!(config.resize(800.0, 480.0));
        assert_eq!(config.miss_boundary(), 480.0 - MISS_MARGIN);
    }

    #[test]
    fn test_miss_boundary_has_a_floor() {
        let tiny = GameConfig::with_viewport(960.0, 4.0);
        assert_eq!(tiny.miss_boundary(), MIN_MISS_BOUNDARY);
        assert!(tiny.miss_boundary() > SPAWN_Y);

        let nan = GameConfig::with_viewport(960.0, f32::NAN);
        assert_eq!(nan.miss_boundary(), MIN_MISS_BOUNDARY);

        let json =
            GameConfig::from_json(r#"{ "viewport_height": -5, "miss_margin": 900 }"#).unwrap();
        assert_eq!(json.viewport_height, VIEWPORT_HEIGHT);
        assert_eq!(json.miss_boundary(), MIN_MISS_BOUNDARY);
    }

    #[test]
    fn test_bad_frame_cap_is_replaced() {
        let config = GameConfig::from_json(r#"{ "max_frame_dt": 0 }"#).unwrap();
        assert_eq!(config.max_frame_dt, MAX_FRAME_DT);
    }
}
