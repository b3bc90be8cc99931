//! Headless host for the demo.
//!
//! Drives the game with a simulated monotonic clock and a recording
//! surface, clicks the start button once it is on screen and sweeps the
//! paddle back and forth until every scene has resolved or the frame budget
//! (first CLI argument) runs out.

use std::time::Instant;

use anyhow::Context;
use volley_engine::input::{InputEvent, MouseButton, MouseButtonState};
use volley_engine::logging::{init_logging, LoggingConfig};
use volley_engine::render::DrawList;
use volley_engine::{FrameOutcome, Game, GameConfig, GameStatus};
use volley_pong::entities::{PaddleControl, Steer};
use volley_pong::{demo_scenes, PongFactory, StartScene};

const DEFAULT_FRAME_BUDGET: u64 = 20_000;
/// Frames between paddle direction changes.
const SWEEP_FRAMES: u64 = 90;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let budget = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>().with_context(|| format!("invalid frame budget '{arg}'"))?,
        None => DEFAULT_FRAME_BUDGET,
    };

    let config = GameConfig::new(800.0, 600.0).with_target_fps(120).with_show_fps(true);
    let mut game = Game::new(config, PongFactory::new(), |_, _| Some(DrawList::new()))
        .context("failed to create game")?;

    let control = PaddleControl::new();
    let t0 = Instant::now();
    let step = game.frame_interval();
    game.start(t0, demo_scenes(control.clone())).context("failed to start game")?;

    let click = StartScene::default().button.position;
    let mut clicked = false;
    let mut rendered = 0u64;
    let mut aborted = 0u64;
    let mut offered = 0u64;

    for k in 1..=budget {
        if matches!(game.status(), GameStatus::Finished | GameStatus::Failed) {
            break;
        }
        offered = k;
        let now = t0 + step * u32::try_from(k).context("frame budget too large")?;

        match game.frame(now) {
            Ok(FrameOutcome::Rendered { .. }) => rendered += 1,
            Ok(FrameOutcome::Dropped) => {}
            Err(e) if e.is_recoverable() => {
                aborted += 1;
                log::warn!("{e}");
            }
            Err(e) => return Err(e).context("game aborted"),
        }

        // The button is hittable once it has been rendered.
        if !clicked && game.scene_name() == Some("start") && rendered > 0 {
            let (x, y) = (click.x + 10.0, click.y + 5.0);
            for ev in [
                InputEvent::moved(x, y),
                InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, x, y),
                InputEvent::button(MouseButton::Left, MouseButtonState::Released, x, y),
            ] {
                game.handle_input(ev).context("pointer dispatch failed")?;
            }
            clicked = true;
        }

        if k % SWEEP_FRAMES == 0 {
            control.set(if (k / SWEEP_FRAMES) % 2 == 0 { Steer::Left } else { Steer::Right });
        }
    }

    log::info!(
        "{:?} after {offered} host frames ({rendered} rendered, {aborted} aborted), {} fps, {} draw commands in last frame",
        game.status(),
        game.fps(),
        game.surface().len()
    );

    if game.status() != GameStatus::Finished {
        log::warn!("frame budget exhausted before the game finished");
    }
    Ok(())
}
