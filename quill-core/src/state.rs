//! Self-contained scene representation used for checkpoints.
//!
//! A [`SceneState`] carries every object's full attribute set plus the
//! background. It is an in-memory detail of the snapshot history, not a
//! public file format, but it is versioned so stale encodings are rejected
//! instead of half-applied.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{SceneError, SceneObject};

/// Schema version written into every encoded state.
pub const SCENE_SCHEMA_VERSION: &str = "1.0";

fn default_schema_version() -> String {
    SCENE_SCHEMA_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub background: String,
    /// Z-order, bottom first.
    pub objects: Vec<SceneObject>,
}

impl SceneState {
    pub fn new(background: impl Into<String>, objects: Vec<SceneObject>) -> Self {
        Self {
            schema_version: default_schema_version(),
            background: background.into(),
            objects,
        }
    }

    /// Check that this state can be applied to a scene as-is.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.schema_version != SCENE_SCHEMA_VERSION {
            return Err(SceneError::UnsupportedSchema {
                found: self.schema_version.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(self.objects.len());
        for obj in &self.objects {
            let id = obj.id();
            if !seen.insert(id) {
                return Err(SceneError::DuplicateObjectId(id));
            }

            let pos = obj.position();
            if !pos.x.is_finite() || !pos.y.is_finite() || !obj.size().is_valid() {
                return Err(SceneError::InvalidGeometry { id });
            }

            match obj {
                SceneObject::Text(t) => {
                    if t.style.font_size == 0 {
                        return Err(SceneError::InvalidFontSize {
                            id,
                            size: t.style.font_size,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let state: SceneState = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }
}
