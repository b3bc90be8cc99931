//! Volley engine crate.
//!
//! A small real-time 2D game core: a rate-capped frame loop, elevation
//! ordered layers filled by async scenes, and entities that opt into
//! collision and pointer capabilities. Rendering goes through the
//! [`render::Surface`] trait; hosts own windows and clocks.

pub mod coords;
pub mod entity;
pub mod event;
pub mod game;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod shape;
pub mod time;

pub use game::{FrameOutcome, Game, GameConfig, GameError, GameStatus};
