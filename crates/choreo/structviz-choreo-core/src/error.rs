//! Error types for the choreography engine.

use serde::{Deserialize, Serialize};

/// Errors surfaced at the engine's control and construction boundaries.
///
/// Every variant is local and recoverable: a rejected call leaves the engine
/// in its last valid state, with no partial mutation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChoreoError {
    /// Time quantity was negative or non-finite.
    #[error("invalid time value: {time}")]
    InvalidTime { time: f64 },

    /// Speed multiplier was zero, negative, or non-finite.
    #[error("invalid speed multiplier: {speed}")]
    InvalidSpeed { speed: f32 },

    /// Seek position was non-finite.
    #[error("invalid seek position: {position}")]
    InvalidPosition { position: f32 },

    /// Sequence failed build-time validation (inconsistent cached total,
    /// offset overflow).
    #[error("malformed sequence: {reason}")]
    MalformedSequence { reason: String },

    /// Operation is not valid for the given structure state.
    #[error("unsupported operation: {reason}")]
    UnsupportedOperation { reason: String },

    /// Stored-sequence JSON did not match the canonical schema.
    #[error("stored sequence parse error: {reason}")]
    Parse { reason: String },
}

/// Choreography engine result type.
pub type Result<T> = core::result::Result<T, ChoreoError>;
