use crate::paint::Color;
use crate::time::LoopConfig;

use super::GameError;

/// Game configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Surface width in logical pixels.
    pub width: f32,
    /// Surface height in logical pixels.
    pub height: f32,
    pub target_fps: u32,
    /// Places the FPS readout in the overlay layer.
    pub show_fps: bool,
    /// FPS window reset threshold as a multiple of `target_fps`.
    pub fps_reset_multiple: u32,
    /// Fill applied to the whole surface before layers are painted.
    pub background: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            target_fps: 60,
            show_fps: false,
            fps_reset_multiple: 5,
            background: Color::BLACK,
        }
    }
}

impl GameConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    pub fn with_fps_reset_multiple(mut self, multiple: u32) -> Self {
        self.fps_reset_multiple = multiple;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "surface size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.target_fps == 0 {
            return Err(GameError::InvalidConfig("target_fps must be at least 1".into()));
        }
        if self.fps_reset_multiple == 0 {
            return Err(GameError::InvalidConfig("fps_reset_multiple must be at least 1".into()));
        }
        Ok(())
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig { target_fps: self.target_fps, reset_multiple: self.fps_reset_multiple }
    }
}
