use volley_engine::coords::Vec2;
use volley_engine::entity::{Entity, EntityContext, FpsGauge};
use volley_engine::paint::Color;
use volley_engine::render::Surface;
use volley_engine::time::FrameTime;

/// FPS readout in the top-right corner.
pub struct FpsCounter {
    fps: FpsGauge,
    origin: Vec2,
}

impl FpsCounter {
    pub fn new(ctx: &EntityContext) -> Self {
        Self { fps: ctx.fps.clone(), origin: Vec2::new(ctx.width - 100.0, 50.0) }
    }

    pub fn label(&self) -> String {
        format!("FPS:{}", self.fps.get())
    }
}

impl Entity for FpsCounter {
    fn update(&mut self, _time: &FrameTime) {}

    fn render(&self, surface: &mut dyn Surface) {
        surface.set_font_size(14.0);
        surface.set_fill(Color::BLACK);
        surface.fill_text(&self.label(), self.origin);
    }
}
