//! Layers, the stage that orders them, and the async scene lifecycle.
//!
//! A [`Scene`] populates the [`Stage`] from its `perform` future and may
//! suspend on single-shot signals (`futures::channel::oneshot`) sent by
//! entity listeners. The game polls that future once per frame, so the
//! stage keeps updating and rendering while the scene waits.

mod elevation;
mod layer;
mod stage;

pub use elevation::Elevation;
pub use layer::Layer;
pub use stage::{LayerHandle, Stage};

pub(crate) use layer::Slot;
pub(crate) use stage::Layers;

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::entity::{EntityContext, EntityFactory};

/// The in-flight `perform` lifecycle of a scene.
pub type SceneTask = LocalBoxFuture<'static, anyhow::Result<()>>;

/// Everything a scene needs to populate the stage.
pub struct SceneContext<F: EntityFactory> {
    pub width: f32,
    pub height: f32,
    pub stage: Stage,
    pub factory: Rc<F>,
    /// Context to hand to entity constructors.
    pub entity: EntityContext,
}

impl<F: EntityFactory> SceneContext<F> {
    /// Shorthand for [`Stage::create_layer`].
    pub fn create_layer(&self, elevation: impl Into<Elevation>) -> LayerHandle {
        self.stage.create_layer(elevation)
    }
}

impl<F: EntityFactory> Clone for SceneContext<F> {
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            stage: self.stage.clone(),
            factory: self.factory.clone(),
            entity: self.entity.clone(),
        }
    }
}

/// One step of the game's narrative (title screen, a level).
///
/// `perform` resolves when the scene is complete; an `Err` aborts the whole
/// scene sequence. The stage is torn down by the game after the scene
/// resolves; entities removed earlier must go through
/// [`LayerHandle::remove`], which destroys them.
pub trait Scene<F: EntityFactory> {
    fn name(&self) -> &str;

    fn perform(self: Box<Self>, ctx: SceneContext<F>) -> SceneTask;
}
