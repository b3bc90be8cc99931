use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::entity::{Entity, EntityId};

use super::{Elevation, Layer, Slot};

pub(crate) type Layers = BTreeMap<Elevation, Layer>;

/// Layer edit made while the game was visiting entities.
enum Edit {
    Add { elevation: Elevation, id: EntityId, entity: Box<dyn Entity> },
    Remove { elevation: Elevation, id: EntityId },
}

/// Elevation-ordered layers of the active scene.
///
/// Cheap to clone; clones share the same layers. Iteration is always
/// ascending by elevation, regardless of creation order.
///
/// The game locks the layers while it updates, collides, renders or
/// dispatches pointer input. Adds and removes made from entity code during
/// that time are queued and applied, in order, as soon as the visit ends.
/// Queries made while locked see an empty stage.
#[derive(Clone, Default)]
pub struct Stage {
    layers: Rc<RefCell<Layers>>,
    pending: Rc<RefCell<Vec<Edit>>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the layer at `elevation`, creating it if needed.
    pub fn create_layer(&self, elevation: impl Into<Elevation>) -> LayerHandle {
        let elevation = elevation.into();
        // While locked the layer is created by the first queued add.
        if let Ok(mut layers) = self.layers.try_borrow_mut() {
            layers.entry(elevation).or_default();
        }
        self.handle(elevation)
    }

    pub fn layer(&self, elevation: impl Into<Elevation>) -> Option<LayerHandle> {
        let elevation = elevation.into();
        let exists = self.layers.try_borrow().is_ok_and(|l| l.contains_key(&elevation));
        exists.then(|| self.handle(elevation))
    }

    /// Elevations in paint order.
    pub fn elevations(&self) -> Vec<Elevation> {
        self.layers.try_borrow().map(|l| l.keys().copied().collect()).unwrap_or_default()
    }

    pub fn entity_count(&self) -> usize {
        self.layers.try_borrow().map_or(0, |l| l.values().map(Layer::len).sum())
    }

    /// Destroys every entity, queued ones included, and removes every layer.
    pub fn teardown(&self) {
        self.apply_pending();
        let layers = std::mem::take(&mut *self.layers.borrow_mut());
        let count: usize = layers.values().map(Layer::len).sum();
        // Dropping the layers destroys their members.
        drop(layers);
        if count > 0 {
            log::debug!("stage torn down ({count} entities destroyed)");
        }
    }

    /// Applies edits queued while the layers were locked.
    ///
    /// Must be called with no outstanding borrow of the layers.
    pub(crate) fn apply_pending(&self) {
        loop {
            let edits = std::mem::take(&mut *self.pending.borrow_mut());
            if edits.is_empty() {
                return;
            }
            log::trace!("applying {} queued stage edit(s)", edits.len());
            for edit in edits {
                match edit {
                    Edit::Add { elevation, id, entity } => {
                        self.layers.borrow_mut().entry(elevation).or_default().insert_as(id, entity);
                    }
                    Edit::Remove { elevation, id } => {
                        if let Some(slot) = take_slot(&self.layers, elevation, id) {
                            slot.destroy();
                        }
                    }
                }
            }
        }
    }

    pub(crate) fn layers(&self) -> Ref<'_, Layers> {
        self.layers.borrow()
    }

    pub(crate) fn layers_mut(&self) -> RefMut<'_, Layers> {
        self.layers.borrow_mut()
    }

    fn handle(&self, elevation: Elevation) -> LayerHandle {
        LayerHandle { layers: self.layers.clone(), pending: self.pending.clone(), elevation }
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        if let Ok(layers) = self.layers.try_borrow() {
            for (elevation, layer) in layers.iter() {
                map.entry(&elevation.0, &layer.len());
            }
        }
        map.finish()
    }
}

fn take_slot(layers: &RefCell<Layers>, elevation: Elevation, id: EntityId) -> Option<Slot> {
    layers.borrow_mut().get_mut(&elevation).and_then(|layer| layer.take(id))
}

/// Scene-side handle to one layer of a [`Stage`].
#[derive(Clone)]
pub struct LayerHandle {
    layers: Rc<RefCell<Layers>>,
    pending: Rc<RefCell<Vec<Edit>>>,
    elevation: Elevation,
}

impl LayerHandle {
    #[inline]
    pub fn elevation(&self) -> Elevation {
        self.elevation
    }

    /// Places `entity` in this layer.
    pub fn add(&self, entity: impl Entity) -> EntityId {
        self.add_boxed(Box::new(entity))
    }

    pub fn add_boxed(&self, entity: Box<dyn Entity>) -> EntityId {
        let id = EntityId::new();
        match self.layers.try_borrow_mut() {
            Ok(mut layers) => {
                layers.entry(self.elevation).or_default().insert_as(id, entity);
                log::trace!("entity {} added at elevation {}", id.get(), self.elevation.0);
            }
            Err(_) => {
                self.pending.borrow_mut().push(Edit::Add { elevation: self.elevation, id, entity });
                log::trace!("entity {} queued at elevation {}", id.get(), self.elevation.0);
            }
        }
        id
    }

    /// Destroys and drops the entity. Returns `false` if it is not in this layer.
    ///
    /// While the stage is locked the removal is queued and reported as done;
    /// an id that is gone by then is ignored.
    pub fn remove(&self, id: EntityId) -> bool {
        if self.layers.try_borrow_mut().is_err() {
            self.pending.borrow_mut().push(Edit::Remove { elevation: self.elevation, id });
            return true;
        }
        // Destroy outside the borrow; `destroy` may use other handles.
        match take_slot(&self.layers, self.elevation, id) {
            Some(slot) => {
                slot.destroy();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.layers
            .try_borrow()
            .is_ok_and(|l| l.get(&self.elevation).is_some_and(|l| l.contains(id)))
    }

    pub fn len(&self) -> usize {
        self.layers.try_borrow().map_or(0, |l| l.get(&self.elevation).map_or(0, Layer::len))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for LayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerHandle").field("elevation", &self.elevation.0).finish()
    }
}
