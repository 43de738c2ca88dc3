//! Helix landing page runtime
//!
//! Core modules:
//! - `field`: Particle background simulation (deterministic, seeded)
//! - `renderer`: Drawing surfaces for the particle field
//! - `gate`: Human-verification puzzle in front of the dashboard
//! - `platform`: Browser bindings (requestAnimationFrame loop, DOM form)
//! - `settings`: Page-embedded JSON configuration

pub mod color;
pub mod error;
pub mod field;
pub mod gate;
pub mod lifecycle;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use color::Rgb;
pub use error::{GateError, LandingError};
pub use lifecycle::CancelToken;
pub use settings::{FieldConfig, GateConfig, Settings};

/// Default tuning constants
pub mod consts {
    use crate::color::Rgb;

    /// Particles per mount
    pub const PARTICLE_COUNT: usize = 50;
    /// Upper bound keeping the pairwise link pass cheap
    pub const MAX_PARTICLES: usize = 1000;
    /// Max drift per axis, units per frame
    pub const PARTICLE_MAX_SPEED: f32 = 0.25;
    /// Particles closer than this get a connecting line
    pub const LINK_DISTANCE: f32 = 100.0;

    /// Blue, violet, emerald, amber
    pub const DEFAULT_PALETTE: [Rgb; 4] = [
        Rgb::new(0x3b, 0x82, 0xf6),
        Rgb::new(0x8b, 0x5c, 0xf6),
        Rgb::new(0x10, 0xb9, 0x81),
        Rgb::new(0xf5, 0x9e, 0x0b),
    ];

    /// Wrong answers allowed before the gate locks
    pub const MAX_ATTEMPTS: u32 = 3;
    /// Artificial "verifying" delay
    pub const VERIFY_DELAY_MS: u32 = 1000;
    pub const DEFAULT_REDIRECT: &str = "/dashboard";
}

/// Wrap a coordinate onto `[0, extent)` (toroidal)
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    if extent.is_nan() || extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}
