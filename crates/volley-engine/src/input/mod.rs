//! Input subsystem.
//!
//! Hosts translate platform events into [`InputEvent`]s; [`PointerTracker`]
//! turns those into the [`PointerEvent`] contract the game dispatches to
//! pressable entities.

mod pointer;
mod types;

pub use pointer::{PointerEvent, PointerTracker};
pub use types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};
