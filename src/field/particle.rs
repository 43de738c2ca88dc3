//! Particle entity and the seeded factory that creates them

use glam::Vec2;
use rand::Rng;

use crate::color::Rgb;
use crate::settings::FieldConfig;
use crate::wrap_coord;

/// A drifting point. Only the position changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    opacity: f32,
    color: Rgb,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, opacity: f32, color: Rgb) -> Self {
        Self {
            pos,
            vel,
            radius,
            opacity,
            color,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Move by one frame of velocity, wrapping toroidally
    pub(crate) fn advance(&mut self, bounds: Vec2) {
        let next = self.pos + self.vel;
        self.pos = Vec2::new(wrap_coord(next.x, bounds.x), wrap_coord(next.y, bounds.y));
    }
}

/// Create `config.particle_count` particles spread uniformly over `bounds`.
///
/// Pure given the RNG: the same seed and inputs always give the same field.
/// Expects a validated config and non-zero bounds.
pub fn spawn_particles<R: Rng>(bounds: Vec2, config: &FieldConfig, rng: &mut R) -> Vec<Particle> {
    let speed = config.max_speed;

    (0..config.particle_count)
        .map(|_| {
            let pos = Vec2::new(
                wrap_coord(rng.random_range(0.0..bounds.x), bounds.x),
                wrap_coord(rng.random_range(0.0..bounds.y), bounds.y),
            );
            let vel = Vec2::new(
                rng.random_range(-speed..=speed),
                rng.random_range(-speed..=speed),
            );
            let radius = rng.random_range(config.min_radius..=config.max_radius);
            let opacity = rng.random_range(config.min_opacity..=config.max_opacity);
            let color = config.palette[rng.random_range(0..config.palette.len())];
            Particle::new(pos, vel, radius, opacity, color)
        })
        .collect()
}
