//! Overlap tests between the ball and obstacles
//!
//! The ball is a circle, but contact is judged on its bounding box: the
//! square of side `2 * radius` centred on the ball. Obstacles are plain
//! axis-aligned rectangles anchored at their top-left corner.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and a size
    pub fn from_rect(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Bounding box of a circle
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        let half = Vec2::splat(radius);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: boxes that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Check whether a ball overlaps an obstacle rectangle
pub fn ball_rect_overlap(
    ball_pos: Vec2,
    ball_radius: f32,
    rect_pos: Vec2,
    rect_size: Vec2,
) -> bool {
    Aabb::from_circle(ball_pos, ball_radius).overlaps(&Aabb::from_rect(rect_pos, rect_size))
}
