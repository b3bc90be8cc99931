use crate::coords::Vec2;

use super::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Pointer input contract delivered to pressable entities.
///
/// Positions are in surface-local logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Move(Vec2),
    Down(Vec2),
    Up(Vec2),
    /// A completed click: primary button went down and came back up.
    Press(Vec2),
}

impl PointerEvent {
    #[inline]
    pub fn position(&self) -> Vec2 {
        match *self {
            PointerEvent::Move(p) | PointerEvent::Down(p) | PointerEvent::Up(p) | PointerEvent::Press(p) => p,
        }
    }
}

/// Translates raw host input into [`PointerEvent`]s.
///
/// Only the primary (left) button participates. `Press` is synthesized right
/// after the `Up` that ends a primary-button hold, which mirrors how a
/// browser follows `mouseup` with `click`.
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Option<Vec2>,
    primary_down: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position over the surface.
    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    #[inline]
    pub fn primary_down(&self) -> bool {
        self.primary_down
    }

    /// Applies one raw event and appends the resulting contract events to `out`.
    pub fn translate(&mut self, ev: InputEvent, out: &mut Vec<PointerEvent>) {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let p = Vec2::new(x, y);
                self.position = Some(p);
                out.push(PointerEvent::Move(p));
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                let p = Vec2::new(x, y);
                self.position = Some(p);
                if button != MouseButton::Left {
                    return;
                }
                match state {
                    MouseButtonState::Pressed => {
                        self.primary_down = true;
                        out.push(PointerEvent::Down(p));
                    }
                    MouseButtonState::Released => {
                        out.push(PointerEvent::Up(p));
                        if std::mem::take(&mut self.primary_down) {
                            out.push(PointerEvent::Press(p));
                        }
                    }
                }
            }

            InputEvent::PointerLeft => {
                // A release outside the surface is never seen; forget the hold
                // so it cannot turn into a click later.
                self.position = None;
                self.primary_down = false;
            }
        }
    }
}
