//! Entity contract and capability extensions.
//!
//! An entity is any `'static` value implementing [`Entity`]. Capabilities are
//! opt-in: an entity that owns a [`Collisions`] and returns it from
//! [`Entity::collisions`] takes part in collision detection; one that owns a
//! [`Pressable`] and returns it from [`Entity::pressable`] receives pointer
//! input. The check is made once, when the entity is inserted into a layer.

mod collidable;
mod context;
mod pressable;

pub use collidable::{collides, CollisionEvent, CollisionKind, Collisions, Contact};
pub use context::{EntityContext, EntityFactory, FpsGauge};
pub use pressable::{dispatch_pointer, PressEvent, PressKind, PressState, Pressable};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::Vec2;
use crate::render::Surface;
use crate::shape::Shape;
use crate::time::FrameTime;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

// ── EntityId ──────────────────────────────────────────────────────────────

/// Identity of an entity placed in a layer.
///
/// Allocated when the entity is inserted; stable until it is removed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a new, globally unique `EntityId`.
    pub fn new() -> Self {
        EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

// ── Entity ────────────────────────────────────────────────────────────────

/// Minimal contract for anything placed in a layer.
pub trait Entity: 'static {
    /// Advances one simulation step. Must not draw.
    fn update(&mut self, time: &FrameTime);

    /// Draws the current state. Must not mutate simulation state.
    fn render(&self, surface: &mut dyn Surface);

    /// Releases listeners, timers and pending signals.
    ///
    /// Invoked exactly once, right before the owning layer drops the entity.
    fn destroy(&mut self) {}

    /// Current collision shape, or `None` when not collidable right now
    /// (e.g. not yet laid out).
    fn shape(&self) -> Option<Shape> {
        None
    }

    /// Collidable capability.
    fn collisions(&mut self) -> Option<&mut Collisions> {
        None
    }

    /// Whether `position` falls inside the pointer-sensitive area.
    fn hit_test(&self, _position: Vec2) -> bool {
        false
    }

    /// Pressable capability.
    fn pressable(&mut self) -> Option<&mut Pressable> {
        None
    }
}

/// Capability tags, resolved once at insertion.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Capabilities {
    pub collidable: bool,
    pub pressable: bool,
}

impl Capabilities {
    pub fn of(entity: &mut dyn Entity) -> Self {
        Self {
            collidable: entity.collisions().is_some(),
            pressable: entity.pressable().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inert;

    impl Entity for Inert {
        fn update(&mut self, _time: &FrameTime) {}
        fn render(&self, _surface: &mut dyn Surface) {}
    }

    struct Both {
        collisions: Collisions,
        pressable: Pressable,
    }

    impl Entity for Both {
        fn update(&mut self, _time: &FrameTime) {}
        fn render(&self, _surface: &mut dyn Surface) {}

        fn collisions(&mut self) -> Option<&mut Collisions> {
            Some(&mut self.collisions)
        }

        fn pressable(&mut self) -> Option<&mut Pressable> {
            Some(&mut self.pressable)
        }
    }

    #[test]
    fn ids_are_unique() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn capabilities_are_detected_structurally() {
        assert_eq!(Capabilities::of(&mut Inert), Capabilities::default());

        let mut both = Both { collisions: Collisions::new(), pressable: Pressable::new() };
        assert_eq!(Capabilities::of(&mut both), Capabilities { collidable: true, pressable: true });
    }

    #[test]
    fn missing_capabilities_answer_absent() {
        let inert = Inert;
        assert!(inert.shape().is_none());
        assert!(!inert.hit_test(Vec2::zero()));
    }
}
