//! Particle field simulation
//!
//! A fixed set of slowly drifting particles on a torus the size of the
//! viewport. Deterministic for a given seed:
//! - Seeded RNG only (particles are created once per mount)
//! - One step per displayed frame, no timing input
//! - Stable particle order (links always pair lower index to higher)

pub mod animator;
pub mod particle;
pub mod state;

pub use animator::{FieldAnimator, FrameOutcome};
pub use particle::{Particle, spawn_particles};
pub use state::{Link, ParticleField, link_alpha};
