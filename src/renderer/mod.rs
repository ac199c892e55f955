//! 2D rendering module
//!
//! The scene is described as a handful of filled primitives drawn onto a
//! [`Surface`]. The browser backend maps them onto a canvas 2D context.

pub mod palette;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{SceneOptions, draw_frame};

use glam::Vec2;

/// An immediate-mode 2D drawing target
pub trait Surface {
    /// Wipe the previous frame
    fn clear(&mut self);
    /// Set the backdrop behind everything (CSS colour)
    fn set_background(&mut self, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    /// Lower half of a disc, flat side up
    fn fill_half_disc(&mut self, center: Vec2, radius: f32, color: &str);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str);
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: &str);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}

/// Surface that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn set_background(&mut self, _color: &str) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str) {}
    fn fill_half_disc(&mut self, _center: Vec2, _radius: f32, _color: &str) {}
    fn fill_rect(&mut self, _pos: Vec2, _size: Vec2, _color: &str) {}
    fn fill_triangle(&mut self, _a: Vec2, _b: Vec2, _c: Vec2, _color: &str) {}
    fn fill_text(&mut self, _text: &str, _pos: Vec2, _font: &str, _color: &str) {}
}
