use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
    #[error("rendering surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: f32, height: f32 },
    #[error("scene '{scene}' failed: {cause:#}")]
    SceneFailed { scene: String, cause: anyhow::Error },
    #[error("frame {frame} aborted: {cause:#}")]
    FrameAborted { frame: u64, cause: anyhow::Error },
    #[error("pointer dispatch failed: {cause:#}")]
    Dispatch { cause: anyhow::Error },
}

impl GameError {
    /// Whether the game can keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::FrameAborted { .. } | GameError::Dispatch { .. })
    }
}
