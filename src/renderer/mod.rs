//! 2D rendering for the particle field
//!
//! Drawing goes through the [`Surface`] trait so the simulation can run
//! against a browser canvas or a recording surface in tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::color::Rgb;
use crate::field::ParticleField;
use crate::settings::FieldConfig;

/// Minimal immediate-mode drawing target
pub trait Surface {
    /// Current pixel size
    fn size(&self) -> (u32, u32);

    /// Resize the backing store (clears it)
    fn resize(&mut self, width: u32, height: u32);

    /// Lay a translucent full-surface rectangle over the previous frame
    fn fade(&mut self, color: Rgb, alpha: f32);

    /// Filled circle with a soft glow in the same color
    fn fill_glow_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32, blur: f32);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgb, alpha: f32, width: f32);
}

/// Draw one frame of the field: trail fade, particles, then proximity links
pub fn draw_frame<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S, config: &FieldConfig) {
    surface.fade(config.background, config.trail_alpha);

    for particle in field.particles() {
        surface.fill_glow_circle(
            particle.pos(),
            particle.radius(),
            particle.color(),
            particle.opacity(),
            config.glow_blur,
        );
    }

    let particles = field.particles();
    for link in field.links(config.link_distance, config.link_opacity) {
        let from = &particles[link.a];
        let to = &particles[link.b];
        surface.stroke_line(from.pos(), to.pos(), from.color(), link.alpha, config.link_width);
    }
}
