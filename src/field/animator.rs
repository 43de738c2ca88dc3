//! Frame-driven lifecycle for the particle field
//!
//! The host calls [`FieldAnimator::frame`] once per display refresh and
//! schedules the next call only after it returns `Continue`. After `stop`
//! no frame touches the field or the surface, even one already queued.

use super::state::ParticleField;
use crate::error::LandingError;
use crate::lifecycle::CancelToken;
use crate::renderer::{Surface, draw_frame};
use crate::settings::FieldConfig;

/// Result of a frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame drawn; schedule the next one
    Continue,
    /// Animator was stopped; nothing was drawn
    Stopped,
}

pub struct FieldAnimator<S: Surface> {
    field: ParticleField,
    surface: S,
    config: FieldConfig,
    token: CancelToken,
}

impl<S: Surface> FieldAnimator<S> {
    /// Size `surface` to the viewport and spawn the particles
    pub fn start(
        mut surface: S,
        viewport: (u32, u32),
        config: FieldConfig,
        seed: u64,
    ) -> Result<Self, LandingError> {
        let (width, height) = viewport;
        let field = ParticleField::new(width, height, &config, seed)?;
        surface.resize(width, height);

        log::info!(
            "Particle field started: {} particles on {}x{}",
            field.len(),
            width,
            height
        );

        Ok(Self {
            field,
            surface,
            config,
            token: CancelToken::new(),
        })
    }

    /// Advance and draw one frame
    pub fn frame(&mut self) -> FrameOutcome {
        if self.token.is_cancelled() {
            return FrameOutcome::Stopped;
        }
        self.field.step();
        draw_frame(&self.field, &mut self.surface, &self.config);
        FrameOutcome::Continue
    }

    /// Track a viewport change
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.token.is_cancelled() {
            return;
        }
        if width == 0 || height == 0 {
            log::warn!("Ignoring zero-sized viewport ({}x{})", width, height);
            return;
        }
        self.surface.resize(width, height);
        self.field.set_bounds(width, height);
    }

    /// Stop animating. Takes effect immediately for every clone of the token.
    pub fn stop(&mut self) {
        if self.token.is_active() {
            self.token.cancel();
            log::info!("Particle field stopped after {} frames", self.field.steps());
        }
    }

    pub fn is_running(&self) -> bool {
        self.token.is_active()
    }

    /// Token the host scheduler checks before queuing another frame
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
