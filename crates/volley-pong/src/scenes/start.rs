use anyhow::Context;
use futures::FutureExt;
use volley_engine::coords::Vec2;
use volley_engine::scene::{Scene, SceneContext, SceneTask};

use crate::entities::ButtonOptions;
use crate::PongFactory;

/// Title screen: a ball bouncing around under a "Start game" button.
/// Resolves when the button is pressed.
#[derive(Debug, Clone)]
pub struct StartScene {
    pub button: ButtonOptions,
}

impl Default for StartScene {
    fn default() -> Self {
        Self { button: ButtonOptions::new("Start game", Vec2::new(50.0, 50.0)) }
    }
}

impl Scene<PongFactory> for StartScene {
    fn name(&self) -> &str {
        "start"
    }

    fn perform(self: Box<Self>, ctx: SceneContext<PongFactory>) -> SceneTask {
        async move {
            let bottom = ctx.create_layer(0);
            let top = ctx.create_layer(1);

            bottom.add(ctx.factory.create_ball(&ctx.entity));

            let mut button = ctx.factory.create_button(self.button.clone());
            let pressed = button.pressed();
            top.add(button);

            pressed.await.context("start button went away before it was pressed")?;
            log::info!("start pressed");
            Ok(())
        }
        .boxed_local()
    }
}
