use anyhow::Context;
use futures::FutureExt;
use volley_engine::coords::Rect;
use volley_engine::entity::EntityId;
use volley_engine::scene::{Scene, SceneContext, SceneTask};

use crate::entities::{CountdownOptions, PaddleControl, PaddleOptions};
use crate::PongFactory;

/// One level: a paddle at the bottom and a ball per round.
///
/// Every round shows a countdown, launches a ball and waits for it to leave
/// through the bottom edge. The level has `lives + 1` rounds and resolves
/// after the last one.
#[derive(Debug, Clone)]
pub struct LevelScene {
    pub lives: u32,
    pub countdown: CountdownOptions,
    pub control: PaddleControl,
}

impl LevelScene {
    pub fn new(control: PaddleControl) -> Self {
        Self { lives: 3, countdown: CountdownOptions::default(), control }
    }
}

impl Scene<PongFactory> for LevelScene {
    fn name(&self) -> &str {
        "level-1"
    }

    fn perform(self: Box<Self>, ctx: SceneContext<PongFactory>) -> SceneTask {
        let LevelScene { lives, countdown, control } = *self;
        async move {
            let layer = ctx.create_layer(0);
            let (w, h) = (ctx.width, ctx.height);

            layer.add(ctx.factory.create_paddle(PaddleOptions {
                rect: Rect::new(w / 2.0 - w / 8.0, h - h / 10.0, w / 4.0, h / 10.0),
                bounds: (0.0, w),
                speed: 5.0,
                control,
            }));

            let mut ball: Option<EntityId> = None;
            for round in 1..=lives + 1 {
                if let Some(id) = ball.take() {
                    layer.remove(id);
                }

                let mut timer = ctx.factory.create_countdown(&ctx.entity, countdown);
                let finished = timer.start();
                let timer = layer.add(timer);
                finished.await.context("countdown cancelled")?;
                layer.remove(timer);

                let mut next = ctx.factory.create_ball(&ctx.entity);
                let out = next.exit_at_bottom();
                ball = Some(layer.add(next));
                log::info!("round {round}/{} started", lives + 1);

                out.await.context("ball removed before leaving the court")?;
                log::info!("round {round} lost");
            }

            if let Some(id) = ball {
                layer.remove(id);
            }
            Ok(())
        }
        .boxed_local()
    }
}
