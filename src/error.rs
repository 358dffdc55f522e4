//! Error taxonomy
//!
//! Gameplay outcomes (hits, misses, timeouts) are never errors; only the
//! collaborators at the edge of the engine can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The frame source could not be opened or stopped delivering frames.
    /// Fatal to the running session.
    #[error("capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// The audio backend could not start. The session keeps running silently.
    #[error("audio initialization failed: {0}")]
    AudioInitFailure(String),

    /// A resolution index outside the supported table.
    #[error("resolution index {index} out of range (0..{len})")]
    InvalidSelection { index: usize, len: usize },

    /// Spawn weights rejected by the weighted sampler.
    #[error("invalid spawn weights: {0}")]
    InvalidSpawnWeights(String),
}
