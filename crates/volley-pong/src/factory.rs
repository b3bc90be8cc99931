use volley_engine::coords::Vec2;
use volley_engine::entity::{Entity, EntityContext, EntityFactory};

use crate::entities::{
    Ball, BallOptions, Button, ButtonOptions, Countdown, CountdownOptions, FpsCounter, Paddle, PaddleOptions,
};

/// Builds the demo's entities.
#[derive(Debug, Default, Clone)]
pub struct PongFactory;

impl PongFactory {
    pub fn new() -> Self {
        Self
    }

    /// Ball sized and paced for the court: radius `width / 50`, speed
    /// `width / 200`, starting in the top-left corner.
    pub fn create_ball(&self, ctx: &EntityContext) -> Ball {
        let radius = ctx.width / 50.0;
        Ball::new(BallOptions {
            position: Vec2::new(radius, radius),
            radius,
            speed: ctx.width / 200.0,
            bounds: Vec2::new(ctx.width, ctx.height),
        })
    }

    pub fn create_ball_with(&self, options: BallOptions) -> Ball {
        Ball::new(options)
    }

    pub fn create_button(&self, options: ButtonOptions) -> Button {
        Button::new(options)
    }

    pub fn create_paddle(&self, options: PaddleOptions) -> Paddle {
        Paddle::new(options)
    }

    pub fn create_countdown(&self, ctx: &EntityContext, options: CountdownOptions) -> Countdown {
        Countdown::new(ctx, options)
    }
}

impl EntityFactory for PongFactory {
    fn create_fps_counter(&self, ctx: &EntityContext) -> Box<dyn Entity> {
        Box::new(FpsCounter::new(ctx))
    }
}
