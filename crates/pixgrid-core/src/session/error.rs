//! Session error types.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// The prior step an operation was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("no image is loaded")]
    NoImage,

    #[error("the image has not been pixelated yet")]
    NotPixelated,

    #[error("no 4-level quantization has been applied yet")]
    NotQuantized,

    #[error("the grid overlay has already been applied")]
    GridAlreadyApplied,

    #[error("history entry {index} does not exist (history has {len} entries)")]
    HistoryIndex { index: usize, len: usize },

    #[error("there is nothing to undo")]
    NothingToUndo,
}

/// Errors surfaced by session operations.
///
/// None of these are fatal: the session state is left exactly as it was
/// before the failed call.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to export image: {0}")]
    Encode(#[from] EncodeError),

    #[error("Operation not available: {0}")]
    Precondition(#[from] Precondition),
}
