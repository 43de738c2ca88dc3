//! Canvas 2D surface (WASM only)

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use crate::color::Rgb;
use crate::error::LandingError;

/// Draws onto an `HtmlCanvasElement` through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Fails with `SurfaceUnavailable` when the browser gives no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, LandingError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(LandingError::SurfaceUnavailable)?;

        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn fade(&mut self, color: Rgb, alpha: f32) {
        let (w, h) = self.size();
        self.ctx.set_fill_style_str(&color.css_rgba(alpha));
        self.ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_glow_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32, blur: f32) {
        let hex = color.to_hex();
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha as f64);
        ctx.set_fill_style_str(&hex);
        ctx.set_shadow_blur(blur as f64);
        ctx.set_shadow_color(&hex);
        ctx.begin_path();
        if ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            ctx.fill();
        }
        ctx.restore();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgb, alpha: f32, width: f32) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha as f64);
        ctx.set_stroke_style_str(&color.to_hex());
        ctx.set_line_width(width as f64);
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
        ctx.restore();
    }
}
