use crate::id::ElementId;
use thiserror::Error;

/// Errors surfaced at the engine's outer boundary (load, save, config).
///
/// Gesture-level problems are never errors; they are logged and the gesture
/// resets to idle.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The external layout store rejected or failed the request.
    #[error("layout backend error: {0}")]
    Backend(String),

    #[error("could not decode layout payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("element {0} already exists")]
    DuplicateId(ElementId),

    #[error("invalid editor config: {0}")]
    InvalidConfig(String),
}
