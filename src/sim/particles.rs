//! Particle bursts for completed words
//!
//! Purely visual. No gameplay state reads from here.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum live particles; the oldest are dropped first
pub const MAX_PARTICLES: usize = 256;
/// Particles per completion burst
pub const BURST_COUNT: usize = 14;
/// Lifetime of a burst particle (seconds)
pub const BURST_LIFE: f32 = 0.6;
/// Downward acceleration (pixels/s²)
pub const GRAVITY: f32 = 160.0;
/// Default burst color (0xRRGGBB)
pub const BURST_COLOR: u32 = 0x7c5cff;

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds alive
    pub age: f32,
    pub max_age: f32,
    pub color: u32,
}

impl Particle {
    /// Remaining life in 0..=1 (1 = just spawned)
    pub fn life_fraction(&self) -> f32 {
        if self.max_age <= 0.0 {
            0.0
        } else {
            (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
        }
    }
}

/// Owns every live particle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spray a burst from `origin`, mostly upward
    pub fn burst<R: Rng>(&mut self, rng: &mut R, origin: Vec2, color: u32) {
        for _ in 0..BURST_COUNT {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let vx = (rng.random::<f32>() - 0.5) * 200.0;
            let vy = (rng.random::<f32>() - 0.7) * 220.0;
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(vx, vy),
                age: 0.0,
                max_age: BURST_LIFE,
                color,
            });
        }
    }

    /// Age, move and pull down every particle; drop expired ones
    pub fn update(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.age += dt;
            p.vel.y += GRAVITY * dt;
            p.pos += p.vel * dt;
        }
        self.particles.retain(|p| p.age < p.max_age);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_and_expire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ps = ParticleSystem::new();
        ps.burst(&mut rng, Vec2::new(100.0, 100.0), BURST_COLOR);
        assert_eq!(ps.len(), BURST_COUNT);

        ps.update(0.3);
        assert_eq!(ps.len(), BURST_COUNT);
        ps.update(0.3);
        assert!(ps.is_empty(), "particles at age >= max_age must be gone");
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut ps = ParticleSystem::new();
        ps.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            age: 0.0,
            max_age: 1.0,
            color: BURST_COLOR,
        });
        ps.update(0.1);
        let p = &ps.particles()[0];
        assert!(p.vel.y > 0.0);
        assert!(p.pos.y > 0.0);
        assert!((p.life_fraction() - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut ps = ParticleSystem::new();
        for i in 0..(MAX_PARTICLES / BURST_COUNT + 2) {
            ps.burst(&mut rng, Vec2::splat(i as f32), BURST_COLOR);
        }
        assert_eq!(ps.len(), MAX_PARTICLES);
    }
}
