//! quill-history: undo/redo for the Quill scene.
//!
//! Design rules:
//! - The engine is an owned value with an explicit lifetime. No ambient state.
//! - Snapshot history is the system of record. Restores are whole-scene, never diffs.
//! - The pointer moves only after the canvas has accepted the restored scene.
//! - A new checkpoint after an undo erases the undone future. No branches.
//! - Object-stack history moves objects between owners; it never copies them.

use quill_core::{CanvasError, ObjectId, SceneError};
use thiserror::Error;

pub mod engine;
pub mod object_stack;
pub mod timeline;

pub use engine::{HistoryConfig, HistoryEngine, HistoryStrategy};
pub use object_stack::ObjectStack;
pub use timeline::{Checkpoint, Timeline};

/// History failures. Undo/redo with nothing to do is not an error.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to encode checkpoint: {0}")]
    Encode(#[from] SceneError),

    #[error("checkpoint {index} is corrupt: {source}")]
    CorruptCheckpoint {
        index: usize,
        #[source]
        source: SceneError,
    },

    #[error("restore failed: {0}")]
    Restore(#[from] CanvasError),

    #[error("object {0} is owned by both the scene and the undo stack")]
    SharedObject(ObjectId),
}
