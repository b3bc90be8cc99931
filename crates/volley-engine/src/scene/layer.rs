use crate::entity::{Capabilities, Entity, EntityId};

/// An entity owned by a layer, tagged with its capabilities.
pub(crate) struct Slot {
    pub id: EntityId,
    pub caps: Capabilities,
    pub entity: Box<dyn Entity>,
}

impl Slot {
    pub(crate) fn destroy(mut self) {
        self.entity.destroy();
        if let Some(c) = self.entity.collisions() {
            c.teardown();
        }
        if let Some(p) = self.entity.pressable() {
            p.teardown();
        }
        log::trace!("entity {} destroyed", self.id.get());
    }
}

/// Exclusive owner of the entities at one elevation.
///
/// Order inside a layer carries no meaning beyond being stable. Removal
/// always destroys the entity before it is dropped.
#[derive(Default)]
pub struct Layer {
    slots: Vec<Slot>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let id = EntityId::new();
        self.insert_as(id, entity);
        id
    }

    /// Inserts under an id allocated earlier (queued stage edits).
    pub(crate) fn insert_as(&mut self, id: EntityId, mut entity: Box<dyn Entity>) {
        let caps = Capabilities::of(entity.as_mut());
        self.slots.push(Slot { id, caps, entity });
    }

    /// Destroys and drops the entity. Returns `false` if it is not here.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.take(id) {
            Some(slot) => {
                slot.destroy();
                true
            }
            None => false,
        }
    }

    /// Detaches the slot without destroying it.
    pub(crate) fn take(&mut self, id: EntityId) -> Option<Slot> {
        let index = self.slots.iter().position(|s| s.id == id)?;
        Some(self.slots.remove(index))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Destroys every entity.
    pub fn destroy_all(&mut self) {
        for slot in self.slots.drain(..) {
            slot.destroy();
        }
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }
}

impl Drop for Layer {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::entity::Pressable;
    use crate::render::Surface;
    use crate::time::FrameTime;

    struct Probe {
        log: Rc<RefCell<Vec<&'static str>>>,
        pressable: Pressable,
    }

    impl Entity for Probe {
        fn update(&mut self, _time: &FrameTime) {}
        fn render(&self, _surface: &mut dyn Surface) {}

        fn destroy(&mut self) {
            self.log.borrow_mut().push("destroy");
        }

        fn pressable(&mut self) -> Option<&mut Pressable> {
            Some(&mut self.pressable)
        }
    }

    fn probe(log: &Rc<RefCell<Vec<&'static str>>>) -> Box<Probe> {
        Box::new(Probe { log: log.clone(), pressable: Pressable::new() })
    }

    #[test]
    fn insert_tags_capabilities() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut layer = Layer::new();
        let id = layer.insert(probe(&log));

        assert!(layer.contains(id));
        let slot = &layer.slots()[0];
        assert!(slot.caps.pressable);
        assert!(!slot.caps.collidable);
    }

    #[test]
    fn remove_destroys_before_drop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut layer = Layer::new();
        let id = layer.insert(probe(&log));

        assert!(layer.remove(id));
        assert!(!layer.remove(id));
        assert_eq!(*log.borrow(), vec!["destroy"]);
        assert!(layer.is_empty());
    }

    #[test]
    fn dropping_a_layer_destroys_members() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut layer = Layer::new();
            layer.insert(probe(&log));
            layer.insert(probe(&log));
        }
        assert_eq!(log.borrow().len(), 2);
    }
}
