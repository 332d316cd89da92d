//! Explosion particles
//!
//! Purely visual. No RNG draws here so gap placement stays identical whether
//! or not an explosion happened.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Maximum live particles
pub const MAX_PARTICLES: usize = 64;

/// Particles per explosion
const BURST_COUNT: usize = 40;

/// Particle colour classes (looked up by the renderer)
pub const PARTICLE_FIRE: u32 = 0;
pub const PARTICLE_SMOKE: u32 = 1;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Burst of fire and smoke centred on `pos`
pub fn spawn_explosion(particles: &mut Vec<Particle>, pos: Vec2) {
    for i in 0..BURST_COUNT {
        let angle = i as f32 / BURST_COUNT as f32 * std::f32::consts::TAU;
        // Alternate fast/slow rings so the burst doesn't look like a perfect circle
        let speed = match i % 3 {
            0 => 220.0,
            1 => 150.0,
            _ => 90.0,
        };
        let color = if i % 4 == 0 { PARTICLE_SMOKE } else { PARTICLE_FIRE };
        particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            life: 1.0,
            size: if color == PARTICLE_SMOKE { 7.0 } else { 4.5 },
        });
    }

    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}

/// Advance particles by `dt` and drop the dead ones.
/// Runs on real time, so it keeps animating while the world is frozen.
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel *= 0.96;
        particle.life -= dt;
        particle.size *= 0.995;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_is_capped() {
        let mut particles = Vec::new();
        spawn_explosion(&mut particles, Vec2::ZERO);
        assert_eq!(particles.len(), BURST_COUNT);
        spawn_explosion(&mut particles, Vec2::ZERO);
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_particles_fade_out() {
        let mut particles = Vec::new();
        spawn_explosion(&mut particles, Vec2::new(100.0, 100.0));
        for _ in 0..60 {
            update_particles(&mut particles, 1.0 / 120.0);
        }
        assert!(!particles.is_empty());
        assert!(particles.iter().any(|p| p.pos != Vec2::new(100.0, 100.0)));

        for _ in 0..120 {
            update_particles(&mut particles, 1.0 / 120.0);
        }
        assert!(particles.is_empty());
    }
}
