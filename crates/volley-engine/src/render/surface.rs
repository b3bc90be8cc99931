use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Measured extent of a text run in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f32,
    /// Distance from the baseline to the top of the run.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the run.
    pub descent: f32,
}

impl TextMetrics {
    #[inline]
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Drawing target handed to [`crate::entity::Entity::render`].
///
/// Style state (`fill`, `stroke`, font size) is scoped by `save`/`restore`;
/// the game brackets every entity's render call with that pair, so entities
/// never leak style into each other. Paths are built with `begin_path` and
/// the shape methods, then painted with `fill` and/or `stroke`.
pub trait Surface {
    /// Called once at the start of every rendered frame.
    fn begin_frame(&mut self) {}

    fn save(&mut self);
    fn restore(&mut self);

    fn set_fill(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color, width: f32);
    fn set_font_size(&mut self, size: f32);

    fn begin_path(&mut self);
    fn close_path(&mut self);

    /// Appends a circular arc, angles in radians measured clockwise from +x.
    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    fn rect(&mut self, rect: Rect);
    fn rounded_rect(&mut self, rect: Rect, radius: f32);

    /// Paints the current path with the fill color.
    fn fill(&mut self);
    /// Outlines the current path with the stroke color and width.
    fn stroke(&mut self);

    /// Paints `rect` with the fill color without touching the current path.
    fn fill_rect(&mut self, rect: Rect);

    fn measure_text(&self, text: &str) -> TextMetrics;
    /// Draws `text` with its baseline-left corner at `origin`.
    fn fill_text(&mut self, text: &str, origin: Vec2);
}
