//! Collision shapes and the geometric resolver.
//!
//! Shapes are derived on demand from an entity's live state and never stored
//! across frames.

mod collide;

pub use collide::collide;

use crate::coords::{Rect, Vec2};

/// Closed set of collision primitives.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    /// Invariant: `radius >= 0`.
    Circle { center: Vec2, radius: f32 },
    Rect(Rect),
}

impl Shape {
    #[inline]
    pub fn circle(center: Vec2, radius: f32) -> Self {
        debug_assert!(radius >= 0.0, "negative circle radius {radius}");
        Shape::Circle { center, radius }
    }

    /// Rect shape; negative extents are normalized.
    #[inline]
    pub fn rect(rect: Rect) -> Self {
        Shape::Rect(rect.normalized())
    }
}
