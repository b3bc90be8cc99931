use std::collections::VecDeque;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use futures::FutureExt;
use futures::task::noop_waker_ref;

use crate::coords::Rect;
use crate::entity::{dispatch_pointer, Contact, EntityContext, EntityFactory, EntityId};
use crate::input::{InputEvent, PointerEvent, PointerTracker};
use crate::render::Surface;
use crate::scene::{Layer, Layers, Scene, SceneContext, SceneTask, Slot, Stage};
use crate::shape::{collide, Shape};
use crate::time::{FrameLoop, FrameTime};

use super::{GameConfig, GameError};

/// Lifecycle of the scene sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameStatus {
    /// Not started yet.
    Idle,
    /// A scene is active.
    Playing,
    /// Every scene resolved.
    Finished,
    /// A scene failed and the sequence was aborted.
    Failed,
}

/// Result of offering one host frame to [`Game::frame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Loop stopped or frame arrived before the target interval elapsed.
    Dropped,
    Rendered { frame_index: u64 },
}

/// Per-frame entity visitor, run over every entity in the stage and overlay.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum FramePass {
    Update,
    Collisions,
}

struct ActiveScene {
    name: String,
    task: SceneTask,
}

/// Top-level game runtime.
///
/// Each accepted frame runs the registered passes (every `update`, then
/// collision detection), renders, and finally polls the active scene. A
/// listener error aborts the rest of that frame; the loop keeps running.
pub struct Game<S: Surface, F: EntityFactory> {
    config: GameConfig,
    surface: S,
    frame_loop: FrameLoop,
    stage: Stage,
    /// Top-most layer that never belongs to a scene.
    overlay: Layer,
    factory: Rc<F>,
    entity_ctx: EntityContext,
    passes: Vec<FramePass>,
    scenes: VecDeque<Box<dyn Scene<F>>>,
    active: Option<ActiveScene>,
    status: GameStatus,
    pointer: PointerTracker,
    pointer_buf: Vec<PointerEvent>,
}

impl<S: Surface, F: EntityFactory> Game<S, F> {
    /// Validates `config` and acquires the surface.
    ///
    /// `create_surface` receives the configured size; returning `None` is a
    /// fatal setup failure.
    pub fn new(
        config: GameConfig,
        factory: F,
        create_surface: impl FnOnce(f32, f32) -> Option<S>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let surface = create_surface(config.width, config.height).ok_or(GameError::SurfaceUnavailable {
            width: config.width,
            height: config.height,
        })?;
        log::info!(
            "game created ({}x{}, target {} fps, fps overlay {})",
            config.width,
            config.height,
            config.target_fps,
            if config.show_fps { "on" } else { "off" }
        );

        Ok(Self {
            frame_loop: FrameLoop::new(config.loop_config()),
            entity_ctx: EntityContext::new(config.width, config.height),
            config,
            surface,
            stage: Stage::new(),
            overlay: Layer::new(),
            factory: Rc::new(factory),
            passes: Vec::new(),
            scenes: VecDeque::new(),
            active: None,
            status: GameStatus::Idle,
            pointer: PointerTracker::new(),
            pointer_buf: Vec::new(),
        })
    }

    /// Starts the loop and runs `scenes` in order.
    ///
    /// The first scene is polled once before returning, so its initial
    /// entities are in place for the first frame.
    pub fn start(
        &mut self,
        now: Instant,
        scenes: impl IntoIterator<Item = Box<dyn Scene<F>>>,
    ) -> Result<(), GameError> {
        if self.status == GameStatus::Playing {
            log::warn!("game already started");
            return Ok(());
        }

        self.passes = vec![FramePass::Update, FramePass::Collisions];
        if self.config.show_fps && self.overlay.is_empty() {
            let counter = self.factory.create_fps_counter(&self.entity_ctx);
            self.overlay.insert(counter);
        }

        self.scenes = scenes.into_iter().collect();
        log::info!("starting game with {} scene(s)", self.scenes.len());
        self.frame_loop.start(now);
        self.status = GameStatus::Playing;

        if !self.activate_next() {
            self.finish();
            return Ok(());
        }
        self.poll_scene()
    }

    /// Stops the frame loop. Pending scene suspensions are left untouched.
    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    /// Offers one host frame.
    pub fn frame(&mut self, now: Instant) -> Result<FrameOutcome, GameError> {
        let Some(time) = self.frame_loop.advance(now) else {
            return Ok(FrameOutcome::Dropped);
        };
        self.entity_ctx.fps.set(time.fps);

        let tick = self.tick(&time);
        if let Err(cause) = &tick {
            log::warn!("frame {} aborted: {cause:#}", time.frame_index);
        }

        // The scene keeps running even when entity work failed.
        self.poll_scene()?;

        match tick {
            Ok(()) => Ok(FrameOutcome::Rendered { frame_index: time.frame_index }),
            Err(cause) => Err(GameError::FrameAborted { frame: time.frame_index, cause }),
        }
    }

    /// Broadcasts `event` to every pressable entity, top layer first.
    ///
    /// No occlusion: every pressable receives the event with its own hit
    /// test. A listener error stops the broadcast.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> Result<(), GameError> {
        let result = {
            let mut layers = self.stage.layers_mut();
            visit_top_down(&mut self.overlay, &mut layers, |slot| {
                if !slot.caps.pressable {
                    return Ok(());
                }
                dispatch_pointer(slot.entity.as_mut(), event)
                    .with_context(|| format!("pointer listener of entity {}", slot.id.get()))
            })
        };
        self.stage.apply_pending();
        result.map_err(|cause| GameError::Dispatch { cause })?;

        // A listener may have released the scene; let it react right away.
        self.poll_scene()
    }

    /// Translates raw host input and dispatches the resulting pointer events.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), GameError> {
        let mut events = std::mem::take(&mut self.pointer_buf);
        events.clear();
        self.pointer.translate(event, &mut events);

        let mut result = Ok(());
        for ev in events.drain(..) {
            result = self.dispatch_pointer(ev);
            if result.is_err() {
                break;
            }
        }
        self.pointer_buf = events;
        result
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Exposed FPS estimate of the loop.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.frame_loop.fps()
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        self.frame_loop.interval()
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Stage of the active scene.
    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[inline]
    pub fn entity_context(&self) -> &EntityContext {
        &self.entity_ctx
    }

    /// Name of the active scene.
    pub fn scene_name(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.name.as_str())
    }

    // ── frame ─────────────────────────────────────────────────────────────

    fn tick(&mut self, time: &FrameTime) -> anyhow::Result<()> {
        for i in 0..self.passes.len() {
            match self.passes[i] {
                FramePass::Update => self.update_all(time),
                FramePass::Collisions => self.detect_collisions()?,
            }
        }
        self.render();
        self.stage.apply_pending();
        Ok(())
    }

    fn update_all(&mut self, time: &FrameTime) {
        {
            let mut layers = self.stage.layers_mut();
            let stage_slots = layers.values_mut().rev().flat_map(|l| l.slots_mut().iter_mut());
            for slot in self.overlay.slots_mut().iter_mut().chain(stage_slots) {
                slot.entity.update(time);
            }
        }
        self.stage.apply_pending();
    }

    fn detect_collisions(&mut self) -> anyhow::Result<()> {
        let result = self.notify_contacts();
        // Edits queued by listeners land even when one of them failed.
        self.stage.apply_pending();
        result
    }

    /// Emits a contact on every collidable entity overlapping another one.
    ///
    /// Shapes are sampled once, before any listener runs.
    fn notify_contacts(&mut self) -> anyhow::Result<()> {
        let mut layers = self.stage.layers_mut();

        let samples: Vec<(EntityId, Shape)> = self
            .overlay
            .slots()
            .iter()
            .chain(layers.values().flat_map(|l| l.slots().iter()))
            .filter(|slot| slot.caps.collidable)
            .filter_map(|slot| slot.entity.shape().map(|shape| (slot.id, shape)))
            .collect();
        if samples.len() < 2 {
            return Ok(());
        }

        visit_top_down(&mut self.overlay, &mut layers, |slot| {
            let Some(&(_, own)) = samples.iter().find(|(id, _)| *id == slot.id) else {
                return Ok(());
            };
            for &(other, shape) in &samples {
                if other == slot.id || !collide(&own, &shape) {
                    continue;
                }
                if let Some(collisions) = slot.entity.collisions() {
                    collisions
                        .notify(Contact { other, shape })
                        .with_context(|| format!("collision listener of entity {}", slot.id.get()))?;
                }
            }
            Ok(())
        })
    }

    /// Paints background, then layers bottom-up, then the overlay.
    fn render(&mut self) {
        self.surface.begin_frame();

        self.surface.save();
        self.surface.set_fill(self.config.background);
        self.surface.fill_rect(Rect::new(0.0, 0.0, self.config.width, self.config.height));
        self.surface.restore();

        let layers = self.stage.layers();
        let slots = layers.values().flat_map(|l| l.slots().iter()).chain(self.overlay.slots().iter());
        for slot in slots {
            self.surface.save();
            slot.entity.render(&mut self.surface);
            self.surface.restore();
        }
    }

    // ── scenes ────────────────────────────────────────────────────────────

    fn activate_next(&mut self) -> bool {
        let Some(scene) = self.scenes.pop_front() else {
            return false;
        };
        let name = scene.name().to_owned();
        let ctx = SceneContext {
            width: self.config.width,
            height: self.config.height,
            stage: self.stage.clone(),
            factory: self.factory.clone(),
            entity: self.entity_ctx.clone(),
        };
        log::info!("scene '{name}' started");
        self.active = Some(ActiveScene { name, task: scene.perform(ctx) });
        true
    }

    /// Polls the active scene until it is pending, advancing through
    /// resolved scenes.
    fn poll_scene(&mut self) -> Result<(), GameError> {
        loop {
            let Some(active) = self.active.as_mut() else {
                return Ok(());
            };
            let mut cx = Context::from_waker(noop_waker_ref());
            let result = match active.task.poll_unpin(&mut cx) {
                Poll::Pending => return Ok(()),
                Poll::Ready(result) => result,
            };

            let Some(done) = self.active.take() else {
                return Ok(());
            };
            self.stage.teardown();

            if let Err(cause) = result {
                log::error!("scene '{}' failed: {cause:#}", done.name);
                self.scenes.clear();
                self.frame_loop.stop();
                self.status = GameStatus::Failed;
                return Err(GameError::SceneFailed { scene: done.name, cause });
            }

            log::info!("scene '{}' complete", done.name);
            if !self.activate_next() {
                self.finish();
                return Ok(());
            }
        }
    }

    fn finish(&mut self) {
        log::info!("all scenes complete");
        self.status = GameStatus::Finished;
        self.frame_loop.stop();
    }
}

/// Visits the overlay, then stage layers from the highest elevation down.
fn visit_top_down(
    overlay: &mut Layer,
    layers: &mut Layers,
    mut f: impl FnMut(&mut Slot) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    for slot in overlay.slots_mut() {
        f(slot)?;
    }
    for layer in layers.values_mut().rev() {
        for slot in layer.slots_mut() {
            f(slot)?;
        }
    }
    Ok(())
}
