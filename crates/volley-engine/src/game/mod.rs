//! Game orchestrator.
//!
//! [`Game`] owns the rendering surface, the frame loop, the stage of the
//! active scene and the overlay layer. The host calls [`Game::frame`] once
//! per host frame and forwards pointer input; everything else happens inside.

mod config;
mod error;
mod orchestrator;

pub use config::GameConfig;
pub use error::GameError;
pub use orchestrator::{FrameOutcome, Game, GameStatus};
