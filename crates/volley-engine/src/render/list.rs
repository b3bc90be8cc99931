use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::{Border, DrawCmd, Surface, TextMetrics};

/// Advance width of one glyph as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.6;
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Style {
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    font_size: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            stroke_width: 1.0,
            font_size: 10.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum PathSeg {
    Rect(Rect),
    RoundedRect(Rect, f32),
    Arc { center: Vec2, radius: f32, start: f32, end: f32 },
}

/// Recording [`Surface`].
///
/// Commands are stored in paint order (back-to-front). The list is cleared
/// by `begin_frame`, so after a game frame it holds exactly that frame.
/// Text is measured with fixed per-glyph metrics; a backend that rasterizes
/// text should provide its own `Surface` for accurate layout.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCmd>,
    style: Style,
    saved: Vec<Style>,
    path: Vec<PathSeg>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Depth of the save stack. Zero between balanced render calls.
    #[inline]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Drains recorded commands, keeping allocation.
    pub fn take(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.saved.clear();
        self.path.clear();
        self.style = Style::default();
    }

    fn paint_path(&mut self, fill: Color, border: Option<Border>) {
        for seg in &self.path {
            let cmd = match *seg {
                PathSeg::Rect(rect) => DrawCmd::Rect { rect, fill, border },
                PathSeg::RoundedRect(rect, radius) => DrawCmd::RoundedRect { rect, radius, fill, border },
                PathSeg::Arc { center, radius, start, end } => DrawCmd::Arc {
                    center,
                    radius,
                    start,
                    end,
                    fill,
                    border,
                },
            };
            self.commands.push(cmd);
        }
    }
}

impl Surface for DrawList {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn save(&mut self) {
        self.saved.push(self.style);
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, matching canvas semantics.
        if let Some(style) = self.saved.pop() {
            self.style = style;
        }
    }

    fn set_fill(&mut self, color: Color) {
        self.style.fill = color;
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        self.style.stroke = color;
        self.style.stroke_width = width.max(0.0);
    }

    fn set_font_size(&mut self, size: f32) {
        self.style.font_size = size.max(0.0);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {}

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.path.push(PathSeg::Arc { center, radius: radius.max(0.0), start, end });
    }

    fn rect(&mut self, rect: Rect) {
        self.path.push(PathSeg::Rect(rect.normalized()));
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f32) {
        let rect = rect.normalized();
        let radius = radius.clamp(0.0, rect.width.min(rect.height) * 0.5);
        self.path.push(PathSeg::RoundedRect(rect, radius));
    }

    fn fill(&mut self) {
        self.paint_path(self.style.fill, None);
    }

    fn stroke(&mut self) {
        let border = Border::new(self.style.stroke_width, self.style.stroke);
        self.paint_path(Color::TRANSPARENT, Some(border));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::Rect { rect: rect.normalized(), fill: self.style.fill, border: None });
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        let size = self.style.font_size;
        TextMetrics {
            width: text.chars().count() as f32 * size * GLYPH_ADVANCE,
            ascent: size * ASCENT,
            descent: size * DESCENT,
        }
    }

    fn fill_text(&mut self, text: &str, origin: Vec2) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCmd::Text {
            text: text.to_owned(),
            origin,
            size: self.style.font_size,
            color: self.style.fill,
        });
    }
}
