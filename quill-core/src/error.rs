use thiserror::Error;

use crate::ObjectId;

/// A scene state that cannot be applied.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("duplicate object id in scene state: {0}")]
    DuplicateObjectId(ObjectId),

    #[error("object {id} has invalid font size {size} (must be positive)")]
    InvalidFontSize { id: ObjectId, size: u32 },

    #[error("object {id} has non-finite or negative geometry")]
    InvalidGeometry { id: ObjectId },

    #[error("unsupported scene schema version: {found}")]
    UnsupportedSchema { found: String },

    #[error("malformed scene json: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failures reported by a rendering surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("font family '{family}' is not available")]
    FontUnavailable { family: String },

    #[error("layout failed: {0}")]
    Layout(String),
}

/// A canvas restore that was rejected. The previous scene is still shown.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("scene rejected: {0}")]
    Scene(#[from] SceneError),

    #[error("surface rejected scene: {0}")]
    Surface(#[from] SurfaceError),
}
