//! The demo's scene sequence: title screen, then one level.

mod level;
mod start;

pub use level::LevelScene;
pub use start::StartScene;

use volley_engine::scene::Scene;

use crate::entities::PaddleControl;
use crate::PongFactory;

/// Scenes in play order.
pub fn demo_scenes(control: PaddleControl) -> Vec<Box<dyn Scene<PongFactory>>> {
    vec![Box::new(StartScene::default()), Box::new(LevelScene::new(control))]
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use futures::FutureExt;
    use volley_engine::coords::{Rect, Vec2};
    use volley_engine::input::{InputEvent, MouseButton, MouseButtonState};
    use volley_engine::render::{DrawCmd, DrawList};
    use volley_engine::scene::{SceneContext, SceneTask};
    use volley_engine::{Game, GameConfig, GameStatus};

    use super::*;
    use crate::entities::{BallMotion, BallOptions, CountdownOptions, PaddleOptions};

    type PongGame = Game<DrawList, PongFactory>;

    fn game(width: f32, height: f32) -> PongGame {
        Game::new(GameConfig::new(width, height), PongFactory::new(), |_, _| Some(DrawList::new())).unwrap()
    }

    fn run_until_done(g: &mut PongGame, t0: Instant, max_frames: u32) -> u32 {
        let step = g.frame_interval();
        for k in 1..=max_frames {
            if g.status() != GameStatus::Playing {
                return k;
            }
            g.frame(t0 + step * k).unwrap();
        }
        max_frames
    }

    fn click(g: &mut PongGame, x: f32, y: f32) {
        g.handle_input(InputEvent::moved(x, y)).unwrap();
        g.handle_input(InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, x, y)).unwrap();
        g.handle_input(InputEvent::button(MouseButton::Left, MouseButtonState::Released, x, y)).unwrap();
    }

    // ── start scene ───────────────────────────────────────────────────────

    #[test]
    fn start_scene_waits_for_the_button() {
        let mut g = game(800.0, 600.0);
        let t0 = Instant::now();
        g.start(t0, [Box::new(StartScene::default()) as Box<dyn Scene<PongFactory>>]).unwrap();
        assert_eq!(g.stage().entity_count(), 2);

        // Clicks before layout miss.
        click(&mut g, 60.0, 55.0);
        assert_eq!(g.status(), GameStatus::Playing);

        g.frame(t0 + g.frame_interval()).unwrap();
        let texts: Vec<_> = g.surface().commands().iter().filter_map(DrawCmd::text).collect();
        assert_eq!(texts, vec!["Start game"]);

        click(&mut g, 200.0, 300.0);
        assert_eq!(g.status(), GameStatus::Playing);

        click(&mut g, 60.0, 55.0);
        assert_eq!(g.status(), GameStatus::Finished);
        assert_eq!(g.stage().entity_count(), 0);
    }

    // ── level scene ───────────────────────────────────────────────────────

    #[test]
    fn level_runs_rounds_until_lives_are_gone() {
        let level = LevelScene {
            lives: 1,
            countdown: CountdownOptions { count: 1, step: Duration::from_millis(100), ..CountdownOptions::default() },
            control: PaddleControl::new(),
        };
        // Wide and short: the ball misses the centered paddle every round.
        let mut g = game(400.0, 100.0);
        let t0 = Instant::now();
        g.start(t0, [Box::new(level) as Box<dyn Scene<PongFactory>>]).unwrap();

        let frames = run_until_done(&mut g, t0, 2_000);
        assert_eq!(g.status(), GameStatus::Finished);
        assert!(frames > 80, "two rounds need countdowns and flights, took {frames}");
        assert!(!g.is_running());
    }

    #[test]
    fn demo_sequence_plays_through() {
        let control = PaddleControl::new();
        let mut scenes = demo_scenes(control.clone());
        scenes[1] = Box::new(LevelScene {
            lives: 0,
            countdown: CountdownOptions { count: 1, step: Duration::from_millis(50), ..CountdownOptions::default() },
            control,
        });

        let mut g = game(400.0, 100.0);
        let t0 = Instant::now();
        g.start(t0, scenes).unwrap();
        g.frame(t0 + g.frame_interval()).unwrap();
        click(&mut g, 60.0, 55.0);
        assert_eq!(g.scene_name(), Some("level-1"));

        let resume = t0 + g.frame_interval();
        run_until_done(&mut g, resume, 1_000);
        assert_eq!(g.status(), GameStatus::Finished);
    }

    // ── collisions ────────────────────────────────────────────────────────

    struct Court {
        ball: BallOptions,
        paddle: Rect,
        motion: Rc<RefCell<Option<BallMotion>>>,
    }

    impl Scene<PongFactory> for Court {
        fn name(&self) -> &str {
            "court"
        }

        fn perform(self: Box<Self>, ctx: SceneContext<PongFactory>) -> SceneTask {
            let Court { ball, paddle, motion } = *self;
            let ball = ctx.factory.create_ball_with(ball);
            *motion.borrow_mut() = Some(ball.motion());
            ctx.create_layer(0).add(ball);
            ctx.create_layer(1).add(ctx.factory.create_paddle(PaddleOptions {
                rect: paddle,
                bounds: (0.0, ctx.width),
                speed: 5.0,
                control: PaddleControl::new(),
            }));
            futures::future::pending().boxed_local()
        }
    }

    #[test]
    fn ball_reverses_on_paddle_contact() {
        let motion = Rc::new(RefCell::new(None));
        // Ball heads up-right at (v, -v); the paddle spans its path just above.
        let court = Court {
            ball: BallOptions {
                position: Vec2::new(100.0, 100.0),
                radius: 10.0,
                speed: 4.0,
                bounds: Vec2::new(800.0, 600.0),
            },
            paddle: Rect::new(0.0, 80.0, 200.0, 8.0),
            motion: motion.clone(),
        };

        let mut g = game(800.0, 600.0);
        let t0 = Instant::now();
        g.start(t0, [Box::new(court) as Box<dyn Scene<PongFactory>>]).unwrap();
        let motion = motion.borrow().clone().unwrap();
        assert_eq!(motion.velocity(), Vec2::new(4.0, -4.0));

        g.frame(t0 + g.frame_interval()).unwrap();
        assert_eq!(motion.velocity(), Vec2::new(-4.0, 4.0));

        // Separated on the next frame; velocity stays reversed.
        g.frame(t0 + g.frame_interval() * 2).unwrap();
        assert_eq!(motion.velocity(), Vec2::new(-4.0, 4.0));
    }
}
