//! Particle field state: the fixed particle set and its bounds

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particle::{Particle, spawn_particles};
use crate::error::LandingError;
use crate::settings::FieldConfig;

/// A connecting line between two nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Lower particle index
    pub a: usize,
    /// Higher particle index
    pub b: usize,
    pub distance: f32,
    pub alpha: f32,
}

/// Link alpha for two particles `distance` apart.
///
/// Falls off linearly from `peak` at zero distance to nothing at `max_distance`.
#[inline]
pub fn link_alpha(distance: f32, max_distance: f32, peak: f32) -> Option<f32> {
    if distance < max_distance {
        Some((max_distance - distance) / max_distance * peak)
    } else {
        None
    }
}

/// The live particle set. Cardinality is fixed for the lifetime of the field.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    /// Frames advanced since creation
    steps: u64,
}

impl ParticleField {
    /// Spawn a field for a `width` x `height` surface
    pub fn new(width: u32, height: u32, config: &FieldConfig, seed: u64) -> Result<Self, LandingError> {
        if width == 0 || height == 0 {
            return Err(LandingError::InvalidDimensions);
        }
        config.validate()?;

        let bounds = Vec2::new(width as f32, height as f32);
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = spawn_particles(bounds, config, &mut rng);

        Ok(Self {
            particles,
            bounds,
            steps: 0,
        })
    }

    /// Build a field from explicit particles
    pub fn from_particles(particles: Vec<Particle>, width: u32, height: u32) -> Result<Self, LandingError> {
        if width == 0 || height == 0 {
            return Err(LandingError::InvalidDimensions);
        }
        Ok(Self {
            particles,
            bounds: Vec2::new(width as f32, height as f32),
            steps: 0,
        })
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

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Track a new surface size. Positions are left alone; anything now
    /// outside wraps back in on the next step.
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring zero-sized field resize ({}x{})", width, height);
            return;
        }
        self.bounds = Vec2::new(width as f32, height as f32);
    }

    /// Advance every particle by one frame
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.advance(bounds);
        }
        self.steps += 1;
    }

    /// Every unordered pair closer than `max_distance`
    pub fn links(&self, max_distance: f32, peak: f32) -> impl Iterator<Item = Link> + '_ {
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |a| {
            ((a + 1)..particles.len()).filter_map(move |b| {
                let distance = particles[a].pos().distance(particles[b].pos());
                link_alpha(distance, max_distance, peak).map(|alpha| Link {
                    a,
                    b,
                    distance,
                    alpha,
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use proptest::prelude::*;

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0, 0.5, Rgb::BLACK)
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = FieldConfig::default();
        assert!(matches!(
            ParticleField::new(0, 600, &config, 1),
            Err(LandingError::InvalidDimensions)
        ));
        assert!(matches!(
            ParticleField::new(800, 0, &config, 1),
            Err(LandingError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FieldConfig {
            palette: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            ParticleField::new(800, 600, &config, 1),
            Err(LandingError::InvalidPalette(_))
        ));
    }

    #[test]
    fn test_infinite_speed_rejected_before_spawn() {
        let settings = crate::Settings::from_json(r#"{"field": {"max_speed": 1e39}}"#);
        assert!(settings.is_err());

        let config = FieldConfig {
            max_speed: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            ParticleField::new(800, 600, &config, 1),
            Err(LandingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_step_keeps_count() {
        let mut field = ParticleField::new(320, 240, &FieldConfig::default(), 3).unwrap();
        for _ in 0..500 {
            field.step();
        }
        assert_eq!(field.len(), 50);
        assert_eq!(field.steps(), 500);
    }

    #[test]
    fn test_links_only_below_threshold() {
        let field = ParticleField::from_particles(
            vec![still(0.0, 0.0), still(50.0, 0.0), still(100.0, 0.0), still(300.0, 300.0)],
            400,
            400,
        )
        .unwrap();
        let links: Vec<Link> = field.links(100.0, 0.1).collect();

        // (0,1) at 50 and (1,2) at 50; (0,2) sits exactly on the threshold
        assert_eq!(links.len(), 2);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert_eq!((links[1].a, links[1].b), (1, 2));
        assert!((links[0].alpha - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_links_are_unordered_pairs() {
        let field = ParticleField::from_particles(
            vec![still(10.0, 10.0), still(20.0, 10.0), still(10.0, 20.0)],
            100,
            100,
        )
        .unwrap();
        let links: Vec<Link> = field.links(100.0, 0.1).collect();
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.a < l.b));
    }

    #[test]
    fn test_link_alpha_boundaries() {
        assert_eq!(link_alpha(0.0, 100.0, 0.1), Some(0.1));
        assert_eq!(link_alpha(100.0, 100.0, 0.1), None);
        assert_eq!(link_alpha(250.0, 100.0, 0.1), None);
        let near_edge = link_alpha(99.999, 100.0, 0.1).unwrap();
        assert!(near_edge > 0.0 && near_edge < 1e-5);
    }

    #[test]
    fn test_shrink_then_step_wraps_back_in() {
        let mut field = ParticleField::from_particles(
            vec![Particle::new(
                Vec2::new(1500.0, 900.0),
                Vec2::new(0.1, 0.1),
                2.0,
                0.5,
                Rgb::BLACK,
            )],
            1920,
            1080,
        )
        .unwrap();
        field.set_bounds(800, 600);
        field.step();
        let pos = field.particles()[0].pos();
        assert!(pos.x >= 0.0 && pos.x < 800.0);
        assert!(pos.y >= 0.0 && pos.y < 600.0);
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut field = ParticleField::new(640, 480, &FieldConfig::default(), 1).unwrap();
        field.set_bounds(0, 480);
        assert_eq!(field.bounds(), Vec2::new(640.0, 480.0));
    }

    proptest! {
        #[test]
        fn prop_positions_stay_in_bounds(
            seed in any::<u64>(),
            width in 1u32..2000,
            height in 1u32..2000,
            steps in 0usize..400,
        ) {
            let mut field = ParticleField::new(width, height, &FieldConfig::default(), seed).unwrap();
            for _ in 0..steps {
                field.step();
                for p in field.particles() {
                    prop_assert!(p.pos().x >= 0.0 && p.pos().x < width as f32);
                    prop_assert!(p.pos().y >= 0.0 && p.pos().y < height as f32);
                }
            }
        }

        #[test]
        fn prop_only_position_changes(seed in any::<u64>(), steps in 1usize..200) {
            let mut field = ParticleField::new(500, 400, &FieldConfig::default(), seed).unwrap();
            let before = field.particles().to_vec();
            for _ in 0..steps {
                field.step();
            }
            prop_assert_eq!(before.len(), field.len());
            for (old, new) in before.iter().zip(field.particles()) {
                prop_assert_eq!(old.vel(), new.vel());
                prop_assert_eq!(old.radius(), new.radius());
                prop_assert_eq!(old.opacity(), new.opacity());
                prop_assert_eq!(old.color(), new.color());
            }
        }

        #[test]
        fn prop_link_alpha_decreases_with_distance(
            d1 in 0.0f32..100.0,
            d2 in 0.0f32..100.0,
        ) {
            prop_assume!((d1 - d2).abs() > 1e-3);
            let (near, far) = if d1 < d2 { (d1, d2) } else { (d2, d1) };
            let a_near = link_alpha(near, 100.0, 0.1).unwrap();
            let a_far = link_alpha(far, 100.0, 0.1).unwrap();
            prop_assert!(a_near > a_far);
        }

        #[test]
        fn prop_no_link_at_or_beyond_threshold(d in 100.0f32..10_000.0) {
            prop_assert!(link_alpha(d, 100.0, 0.1).is_none());
        }
    }
}
