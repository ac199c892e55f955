//! Canvas 2D backend

use glam::Vec2;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;

/// Draws onto an HTML canvas through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Last backdrop written, to skip redundant style updates
    background: String,
}

impl CanvasSurface {
    /// Wrap a canvas; `None` if the 2D context is unavailable
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            background: String::new(),
        })
    }

    fn disc(&self, center: Vec2, radius: f32, start: f64, end: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, start, end)
            .is_ok()
        {
            self.ctx.fill();
        }
        self.ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn set_background(&mut self, color: &str) {
        if self.background == color {
            return;
        }
        if self.canvas.style().set_property("background", color).is_ok() {
            self.background = color.to_string();
        } else {
            log::warn!("Failed to set canvas background to {}", color);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.disc(center, radius, 0.0, PI * 2.0, color);
    }

    fn fill_half_disc(&mut self, center: Vec2, radius: f32, color: &str) {
        // Canvas y grows downward, so 0..π sweeps the lower half
        self.disc(center, radius, 0.0, PI, color);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(a.x as f64, a.y as f64);
        self.ctx.line_to(b.x as f64, b.y as f64);
        self.ctx.line_to(c.x as f64, c.y as f64);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
