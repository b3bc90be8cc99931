//! Frame scheduling.
//!
//! The host (an animation-frame callback, a window redraw loop, a test) calls
//! [`FrameLoop::advance`] once per host frame with a monotonic timestamp. The
//! loop caps the work rate at `target_fps` and keeps a smoothed FPS estimate.

mod fps;
mod frame_loop;

pub use fps::FpsMeter;
pub use frame_loop::{FrameLoop, FrameTime, LoopConfig, LoopState};
