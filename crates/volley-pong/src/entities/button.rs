use std::cell::Cell;

use futures::channel::oneshot;
use volley_engine::coords::{Rect, Vec2};
use volley_engine::entity::{Entity, PressState, Pressable};
use volley_engine::paint::Color;
use volley_engine::render::Surface;
use volley_engine::time::FrameTime;

const CORNER_RADIUS: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct ButtonOptions {
    pub text: String,
    /// Top-left corner of the label.
    pub position: Vec2,
    pub padding: f32,
    pub font_size: f32,
}

impl ButtonOptions {
    pub fn new(text: impl Into<String>, position: Vec2) -> Self {
        Self { text: text.into(), position, padding: 5.0, font_size: 14.0 }
    }
}

fn fill_for(state: PressState) -> Color {
    match state {
        PressState::Idle => Color::from_hex(0xDDDDDD),
        PressState::Over { .. } => Color::from_hex(0xBBBBBB),
        PressState::Down { .. } => Color::from_hex(0xAAAAAA),
    }
}

/// Pressable text button.
///
/// The hit area is the padded label box, laid out from text metrics when
/// the button is first rendered. Until then the button cannot be hit.
pub struct Button {
    options: ButtonOptions,
    bounds: Cell<Option<Rect>>,
    pressable: Pressable,
}

impl Button {
    pub fn new(options: ButtonOptions) -> Self {
        Self { options, bounds: Cell::new(None), pressable: Pressable::new() }
    }

    /// Single-shot signal fired by the first press.
    pub fn pressed(&mut self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        let mut tx = Some(tx);
        self.pressable.on_press(move |_| {
            if let Some(tx) = tx.take() {
                log::debug!("button pressed");
                let _ = tx.send(());
            }
            Ok(())
        });
        rx
    }

    /// Laid-out hit area, once rendered.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }
}

impl Entity for Button {
    fn update(&mut self, _time: &FrameTime) {}

    fn render(&self, surface: &mut dyn Surface) {
        let ButtonOptions { text, position, padding, font_size } = &self.options;

        surface.set_font_size(*font_size);
        let metrics = surface.measure_text(text);
        let bounds = Rect::new(
            position.x - padding,
            position.y - padding,
            metrics.width + padding * 2.0,
            metrics.height() + padding * 2.0,
        );
        self.bounds.set(Some(bounds));

        surface.begin_path();
        surface.rounded_rect(bounds, CORNER_RADIUS);
        surface.set_fill(fill_for(self.pressable.state()));
        surface.set_stroke(Color::BLACK, 1.0);
        surface.fill();
        surface.stroke();
        surface.close_path();

        surface.set_fill(Color::BLACK);
        surface.fill_text(text, Vec2::new(position.x, position.y + metrics.ascent));
    }

    fn hit_test(&self, position: Vec2) -> bool {
        self.bounds.get().is_some_and(|b| b.contains(position))
    }

    fn pressable(&mut self) -> Option<&mut Pressable> {
        Some(&mut self.pressable)
    }
}
