use crate::event::{Event, EventChannel, ListenerId};
use crate::shape::{collide, Shape};

use super::{Entity, EntityId};

/// The other side of a detected overlap.
///
/// `shape` is the other entity's shape as sampled for this collision pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Contact {
    pub other: EntityId,
    pub shape: Shape,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CollisionEvent {
    Collision(Contact),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CollisionKind {
    Collision,
}

impl Event for CollisionEvent {
    type Kind = CollisionKind;

    fn kind(&self) -> CollisionKind {
        match self {
            CollisionEvent::Collision(_) => CollisionKind::Collision,
        }
    }
}

/// Collidable capability state.
///
/// Never polls on its own: the game's collision pass decides when two
/// entities overlap and emits on the channel of each one involved.
#[derive(Debug, Default)]
pub struct Collisions {
    events: EventChannel<CollisionEvent>,
}

impl Collisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&mut self) -> &mut EventChannel<CollisionEvent> {
        &mut self.events
    }

    /// Shorthand for subscribing to [`CollisionKind::Collision`].
    pub fn on_collision<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut(&Contact) -> anyhow::Result<()> + 'static,
    {
        self.events.on(CollisionKind::Collision, move |ev| match ev {
            CollisionEvent::Collision(contact) => listener(contact),
        })
    }

    pub(crate) fn notify(&mut self, contact: Contact) -> anyhow::Result<()> {
        self.events.emit(&CollisionEvent::Collision(contact))
    }

    /// Drops every listener.
    pub fn teardown(&mut self) {
        self.events.clear_all();
    }
}

/// Whether two entities currently overlap. `false` if either has no shape.
pub fn collides(a: &dyn Entity, b: &dyn Entity) -> bool {
    match (a.shape(), b.shape()) {
        (Some(sa), Some(sb)) => collide(&sa, &sb),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::render::Surface;
    use crate::time::FrameTime;

    struct Body(Option<Shape>);

    impl Entity for Body {
        fn update(&mut self, _time: &FrameTime) {}
        fn render(&self, _surface: &mut dyn Surface) {}
        fn shape(&self) -> Option<Shape> {
            self.0
        }
    }

    #[test]
    fn collides_delegates_to_resolver() {
        let circle = Body(Some(Shape::circle(Vec2::new(0.0, 0.0), 1.0)));
        let rect = Body(Some(Shape::rect(Rect::new(1.0, -1.0, 2.0, 2.0))));
        assert!(collides(&circle, &rect));
        assert!(collides(&rect, &circle));
    }

    #[test]
    fn missing_shape_never_collides() {
        let circle = Body(Some(Shape::circle(Vec2::zero(), 10.0)));
        let shapeless = Body(None);
        assert!(!collides(&circle, &shapeless));
        assert!(!collides(&shapeless, &circle));
    }

    #[test]
    fn notify_reaches_listener_until_teardown() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut c = Collisions::new();
        let sink = seen.clone();
        c.on_collision(move |contact| {
            sink.borrow_mut().push(contact.other);
            Ok(())
        });

        let other = EntityId::new();
        let contact = Contact { other, shape: Shape::circle(Vec2::zero(), 1.0) };
        c.notify(contact).unwrap();
        c.teardown();
        c.notify(contact).unwrap();

        assert_eq!(*seen.borrow(), vec![other]);
        assert!(c.events().is_empty());
    }
}
