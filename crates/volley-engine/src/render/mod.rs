//! Rendering surface contract and the recording backend.
//!
//! Entities draw through [`Surface`], a small immediate-mode 2D API shaped
//! after a canvas context. [`DrawList`] is the built-in implementation: it
//! records a renderer-agnostic [`DrawCmd`] stream that a host backend (or a
//! test) consumes after each frame.

mod cmd;
mod list;
mod surface;

pub use cmd::{Border, DrawCmd};
pub use list::DrawList;
pub use surface::{Surface, TextMetrics};
