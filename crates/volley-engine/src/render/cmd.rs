use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Outline applied to a shape command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Renderer-agnostic draw command stream.
///
/// Shape commands carry a `fill` (transparent for stroke-only paints) and an
/// optional `border`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        rect: Rect,
        fill: Color,
        border: Option<Border>,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: Color,
        border: Option<Border>,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        fill: Color,
        border: Option<Border>,
    },
    Text {
        text: String,
        origin: Vec2,
        size: f32,
        color: Color,
    },
}

impl DrawCmd {
    /// Returns the text payload of a `Text` command.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCmd::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
