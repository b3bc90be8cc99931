use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;

use futures::channel::oneshot;
use volley_engine::coords::Vec2;
use volley_engine::entity::{Collisions, Entity};
use volley_engine::paint::Color;
use volley_engine::render::Surface;
use volley_engine::shape::Shape;
use volley_engine::time::FrameTime;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BallOptions {
    /// Initial center.
    pub position: Vec2,
    pub radius: f32,
    /// Initial velocity is `(speed, -speed)` per frame.
    pub speed: f32,
    /// Court size; the ball reflects off its left, right and top edges.
    pub bounds: Vec2,
}

#[derive(Debug, Default)]
struct Motion {
    velocity: Cell<Vec2>,
    /// Touching something during the previous collision pass.
    in_contact: Cell<bool>,
    /// Touching something during the current collision pass.
    hit: Cell<bool>,
}

/// Read-only view of a ball's velocity, usable after the ball is placed.
#[derive(Debug, Clone)]
pub struct BallMotion(Rc<Motion>);

impl BallMotion {
    pub fn velocity(&self) -> Vec2 {
        self.0.velocity.get()
    }
}

#[derive(Debug)]
enum BottomEdge {
    Reflect,
    /// Signal is taken when the ball reaches the edge.
    Exit(Option<oneshot::Sender<()>>),
}

/// Bouncing ball.
///
/// On collision both velocity components are reversed, once per contact:
/// while it keeps overlapping the same obstacle on later frames nothing
/// changes, so it cannot get trapped inside a paddle.
pub struct Ball {
    position: Vec2,
    radius: f32,
    bounds: Vec2,
    motion: Rc<Motion>,
    collisions: Collisions,
    bottom: BottomEdge,
}

impl Ball {
    pub fn new(options: BallOptions) -> Self {
        let motion = Rc::new(Motion {
            velocity: Cell::new(Vec2::new(options.speed, -options.speed)),
            ..Motion::default()
        });

        let mut collisions = Collisions::new();
        let m = motion.clone();
        collisions.on_collision(move |_| {
            if !m.in_contact.get() && !m.hit.get() {
                m.velocity.set(-m.velocity.get());
            }
            m.hit.set(true);
            Ok(())
        });

        Self {
            position: options.position,
            radius: options.radius.max(0.0),
            bounds: options.bounds,
            motion,
            collisions,
            bottom: BottomEdge::Reflect,
        }
    }

    /// Stops reflecting off the bottom edge; the returned signal fires once
    /// the ball reaches it.
    pub fn exit_at_bottom(&mut self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        self.bottom = BottomEdge::Exit(Some(tx));
        rx
    }

    pub fn motion(&self) -> BallMotion {
        BallMotion(self.motion.clone())
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }
}

impl Entity for Ball {
    fn update(&mut self, _time: &FrameTime) {
        let m = &self.motion;
        m.in_contact.set(m.hit.replace(false));

        let r = self.radius;
        let mut v = m.velocity.get();
        let next = self.position + v;
        if next.x > self.bounds.x - r || next.x < r {
            v.x = -v.x;
        }
        let reflect_bottom = matches!(self.bottom, BottomEdge::Reflect);
        if next.y < r || (next.y > self.bounds.y - r && reflect_bottom) {
            v.y = -v.y;
        }
        m.velocity.set(v);
        self.position = self.position + v;

        if self.position.y + r >= self.bounds.y {
            if let BottomEdge::Exit(signal) = &mut self.bottom {
                if let Some(tx) = signal.take() {
                    log::debug!("ball left the court at x={:.1}", self.position.x);
                    let _ = tx.send(());
                }
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.arc(self.position, self.radius, 0.0, TAU);
        surface.set_fill(Color::from_hex(0x0095DD));
        surface.fill();
        surface.close_path();
    }

    fn destroy(&mut self) {
        // Dropping the sender cancels a pending exit signal.
        if let BottomEdge::Exit(signal) = &mut self.bottom {
            signal.take();
        }
    }

    fn shape(&self) -> Option<Shape> {
        Some(Shape::circle(self.position, self.radius))
    }

    fn collisions(&mut self) -> Option<&mut Collisions> {
        Some(&mut self.collisions)
    }
}
