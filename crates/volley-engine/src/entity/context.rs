use std::cell::Cell;
use std::rc::Rc;

use super::Entity;

/// Live, read-only view of the loop's exposed FPS.
///
/// Cloned into entities; only the game writes it.
#[derive(Debug, Clone, Default)]
pub struct FpsGauge(Rc<Cell<f64>>);

impl FpsGauge {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.0.get()
    }

    #[inline]
    pub(crate) fn set(&self, fps: f64) {
        self.0.set(fps);
    }
}

/// Environment handed to entity constructors.
#[derive(Debug, Clone)]
pub struct EntityContext {
    /// Surface width in logical pixels.
    pub width: f32,
    /// Surface height in logical pixels.
    pub height: f32,
    pub fps: FpsGauge,
}

impl EntityContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, fps: FpsGauge::new() }
    }
}

/// Source of concrete entities.
///
/// The game only needs the FPS readout for its overlay; scenes reach the
/// factory through their context and call whatever constructors the
/// concrete type offers.
pub trait EntityFactory: 'static {
    fn create_fps_counter(&self, ctx: &EntityContext) -> Box<dyn Entity>;
}
