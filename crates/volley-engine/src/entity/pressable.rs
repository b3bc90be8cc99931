use crate::coords::Vec2;
use crate::event::{Event, EventChannel, ListenerId};
use crate::input::PointerEvent;

use super::Entity;

/// Resting states of the pointer relative to a pressable entity.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum PressState {
    #[default]
    Idle,
    Over { position: Vec2 },
    Down { position: Vec2 },
}

impl PressState {
    fn same_phase(&self, other: &PressState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Events emitted by [`Pressable`]. Each carries the state current at the
/// time of emission.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PressEvent {
    CursorStateChange(PressState),
    Over(PressState),
    Out(PressState),
    Press(PressState),
    Up(PressState),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PressKind {
    CursorStateChange,
    Over,
    Out,
    Press,
    Up,
}

impl Event for PressEvent {
    type Kind = PressKind;

    fn kind(&self) -> PressKind {
        match self {
            PressEvent::CursorStateChange(_) => PressKind::CursorStateChange,
            PressEvent::Over(_) => PressKind::Over,
            PressEvent::Out(_) => PressKind::Out,
            PressEvent::Press(_) => PressKind::Press,
            PressEvent::Up(_) => PressKind::Up,
        }
    }
}

/// Pressable capability state machine.
///
/// | from | input | within | to | emits |
/// |------|-------|--------|----|-------|
/// | idle | move  | yes    | over | state change, `Over` |
/// | over | move  | no     | idle | state change, `Out` |
/// | any  | down  | yes    | down | state change |
/// | any  | press | yes    | unchanged | `Press` |
/// | any  | up    | either | over if within, else idle | `Up`, then state change if the phase changed |
///
/// Every other combination is ignored. `Up` is emitted even outside the hit
/// area so holders can observe a release that ends elsewhere.
#[derive(Debug, Default)]
pub struct Pressable {
    state: PressState,
    events: EventChannel<PressEvent>,
}

impl Pressable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn events(&mut self) -> &mut EventChannel<PressEvent> {
        &mut self.events
    }

    /// Shorthand for subscribing to [`PressKind::Press`].
    pub fn on_press<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut(PressState) -> anyhow::Result<()> + 'static,
    {
        self.events.on(PressKind::Press, move |ev| match *ev {
            PressEvent::Press(state) => listener(state),
            _ => Ok(()),
        })
    }

    /// Feeds one pointer event; `within` is the owner's hit test at the
    /// event position.
    pub fn receive(&mut self, event: PointerEvent, within: bool) -> anyhow::Result<()> {
        match event {
            PointerEvent::Move(position) => match (self.state, within) {
                (PressState::Idle, true) => {
                    self.set_state(PressState::Over { position })?;
                    self.events.emit(&PressEvent::Over(self.state))
                }
                (PressState::Over { .. }, false) => {
                    self.set_state(PressState::Idle)?;
                    self.events.emit(&PressEvent::Out(self.state))
                }
                _ => Ok(()),
            },

            PointerEvent::Down(position) if within => self.set_state(PressState::Down { position }),
            PointerEvent::Down(_) => Ok(()),

            PointerEvent::Press(_) if within => self.events.emit(&PressEvent::Press(self.state)),
            PointerEvent::Press(_) => Ok(()),

            PointerEvent::Up(position) => {
                self.events.emit(&PressEvent::Up(self.state))?;
                let next = if within { PressState::Over { position } } else { PressState::Idle };
                if next.same_phase(&self.state) {
                    self.state = next;
                    Ok(())
                } else {
                    self.set_state(next)
                }
            }
        }
    }

    fn set_state(&mut self, state: PressState) -> anyhow::Result<()> {
        self.state = state;
        self.events.emit(&PressEvent::CursorStateChange(state))
    }

    /// Drops every listener.
    pub fn teardown(&mut self) {
        self.events.clear_all();
    }
}

/// Delivers `event` to `entity` if it carries the pressable capability.
///
/// The hit test runs against the entity at the event position. Entities
/// without the capability ignore the event.
pub fn dispatch_pointer(entity: &mut dyn Entity, event: PointerEvent) -> anyhow::Result<()> {
    let within = entity.hit_test(event.position());
    match entity.pressable() {
        Some(pressable) => pressable.receive(event, within),
        None => Ok(()),
    }
}
