//! Pong-like demo content for `volley-engine`.
//!
//! Concrete entities (ball, paddle, button, countdown, FPS readout), the
//! factory that builds them, and the two scenes the demo plays in order.

pub mod entities;
pub mod factory;
pub mod scenes;

pub use factory::PongFactory;
pub use scenes::{demo_scenes, LevelScene, StartScene};
