//! Error types for calolite-rs.

use thiserror::Error;

use crate::registry::DrawableId;
use crate::source::EventId;

/// The main error type for calolite-rs operations.
#[derive(Error, Debug)]
pub enum CaloError {
    /// A channel name that is not part of the detector configuration.
    #[error("channel '{0}' is not part of any detector group")]
    UnknownChannel(String),

    /// A group name that is not part of the detector configuration.
    #[error("detector group '{0}' not found")]
    UnknownGroup(String),

    /// An event number the event source does not know about.
    #[error("event {0} not found")]
    UnknownEvent(EventId),

    /// A drawable handle that is not (or no longer) registered.
    #[error("drawable {0} not registered")]
    DrawableNotFound(DrawableId),

    /// A drawable with the given type and name is already registered.
    #[error("drawable '{0}' already exists")]
    DrawableExists(String),

    /// The detector configuration violates one of its invariants.
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),

    /// Two index-aligned lists have different lengths.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A drawable failed to render itself.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for calolite-rs operations.
pub type Result<T> = std::result::Result<T, CaloError>;
