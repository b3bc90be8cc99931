use super::Vec2;

/// Axis-aligned bounding rectangle in surface space (top-left origin).
///
/// Invariant: `width >= 0 && height >= 0`. Use [`Rect::normalized`] on
/// rectangles built from arbitrary corner pairs.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut r = self;
        if r.width < 0.0 {
            r.x += r.width;
            r.width = -r.width;
        }
        if r.height < 0.0 {
            r.y += r.height;
            r.height = -r.height;
        }
        r
    }

    /// Inclusive containment: points on any edge are inside.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Point of the rectangle closest to `p` (`p` itself when inside).
    ///
    /// Never panics: a negative extent collapses onto its origin edge and
    /// NaN bounds are ignored.
    #[inline]
    pub fn clamp_point(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.max(self.x).min(self.right()), p.y.max(self.y).min(self.bottom()))
    }

    /// Returns a copy moved horizontally by `dx`.
    #[inline]
    pub fn translate_x(self, dx: f32) -> Self {
        Self { x: self.x + dx, ..self }
    }
}
