use std::cell::Cell;
use std::rc::Rc;

use volley_engine::coords::Rect;
use volley_engine::entity::{Collisions, Entity};
use volley_engine::paint::Color;
use volley_engine::render::Surface;
use volley_engine::shape::Shape;
use volley_engine::time::FrameTime;

/// Steering input for a paddle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

/// Shared steering handle. The host writes it (keyboard, autopilot); the
/// paddle reads it on every update.
#[derive(Debug, Clone, Default)]
pub struct PaddleControl(Rc<Cell<Steer>>);

impl PaddleControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, steer: Steer) {
        self.0.set(steer);
    }

    /// Clears `steer` if it is the current direction, like releasing one of
    /// two held arrow keys.
    pub fn release(&self, steer: Steer) {
        if self.0.get() == steer {
            self.0.set(Steer::None);
        }
    }

    pub fn get(&self) -> Steer {
        self.0.get()
    }
}

#[derive(Debug, Clone)]
pub struct PaddleOptions {
    pub rect: Rect,
    /// Horizontal travel range `(left, right)`.
    pub bounds: (f32, f32),
    /// Pixels per update.
    pub speed: f32,
    pub control: PaddleControl,
}

/// Player paddle; a rect-shaped collidable.
pub struct Paddle {
    rect: Rect,
    min_left: f32,
    max_left: f32,
    speed: f32,
    control: PaddleControl,
    collisions: Collisions,
}

impl Paddle {
    pub fn new(options: PaddleOptions) -> Self {
        let rect = options.rect.normalized();
        let (left, right) = options.bounds;
        Self {
            rect,
            min_left: left,
            max_left: (right - rect.width).max(left),
            speed: options.speed,
            control: options.control,
            collisions: Collisions::new(),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl Entity for Paddle {
    fn update(&mut self, _time: &FrameTime) {
        let moved = match self.control.get() {
            Steer::None => return,
            Steer::Left => self.rect.translate_x(-self.speed),
            Steer::Right => self.rect.translate_x(self.speed),
        };
        self.rect = Rect { x: moved.x.clamp(self.min_left, self.max_left), ..moved };
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.set_fill(Color::BLACK);
        surface.fill_rect(self.rect);
    }

    fn shape(&self) -> Option<Shape> {
        Some(Shape::rect(self.rect))
    }

    fn collisions(&mut self) -> Option<&mut Collisions> {
        Some(&mut self.collisions)
    }
}
