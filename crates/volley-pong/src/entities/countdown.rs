use std::time::Duration;

use futures::channel::oneshot;
use volley_engine::coords::Vec2;
use volley_engine::entity::{Entity, EntityContext};
use volley_engine::paint::Color;
use volley_engine::render::Surface;
use volley_engine::time::FrameTime;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CountdownOptions {
    pub count: u32,
    /// Frame time per step.
    pub step: Duration,
    pub font_size: f32,
}

impl Default for CountdownOptions {
    fn default() -> Self {
        Self { count: 5, step: Duration::from_secs(1), font_size: 48.0 }
    }
}

/// Counts down from `count`, one step per `step` of accumulated frame time.
///
/// Time only advances while the game runs frames, so a stopped loop pauses
/// the countdown.
pub struct Countdown {
    options: CountdownOptions,
    center: Vec2,
    remaining: u32,
    elapsed: Duration,
    done: Option<oneshot::Sender<()>>,
}

impl Countdown {
    pub fn new(ctx: &EntityContext, options: CountdownOptions) -> Self {
        Self {
            options,
            center: Vec2::new(ctx.width / 2.0, ctx.height / 2.0),
            remaining: 0,
            elapsed: Duration::ZERO,
            done: None,
        }
    }

    /// Starts (or restarts) counting. The signal fires when the count
    /// reaches zero and is cancelled if the countdown is destroyed first.
    pub fn start(&mut self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        self.remaining = self.options.count;
        self.elapsed = Duration::ZERO;
        if self.remaining == 0 {
            let _ = tx.send(());
        } else {
            self.done = Some(tx);
        }
        rx
    }

    /// Number currently shown, `None` when idle.
    pub fn current(&self) -> Option<u32> {
        self.done.as_ref().map(|_| self.remaining)
    }
}

impl Entity for Countdown {
    fn update(&mut self, time: &FrameTime) {
        if self.done.is_none() || self.options.step.is_zero() {
            return;
        }
        self.elapsed += time.elapsed;
        while self.elapsed >= self.options.step {
            self.elapsed -= self.options.step;
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                if let Some(tx) = self.done.take() {
                    let _ = tx.send(());
                }
                return;
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let Some(n) = self.current() else {
            return;
        };
        let text = n.to_string();
        surface.set_font_size(self.options.font_size);
        let metrics = surface.measure_text(&text);
        surface.set_fill(Color::BLACK);
        surface.fill_text(
            &text,
            Vec2::new(self.center.x - metrics.width / 2.0, self.center.y + metrics.ascent / 2.0),
        );
    }

    fn destroy(&mut self) {
        if self.done.take().is_some() {
            log::debug!("countdown cancelled at {}", self.remaining);
        }
    }
}
