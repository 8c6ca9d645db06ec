//! quill-core: scene model for the Quill text canvas editor.
//!
//! Design rules:
//! - Z-order is insertion order. Only explicit add/remove changes it.
//! - Object kinds are an enum; style operations check `is_stylable`.
//! - A scene state is validated in full before anything is replaced.
//! - The core never draws; it drives a [`Surface`].

pub mod canvas;
pub mod error;
pub mod object;
pub mod scene;
pub mod state;
pub mod surface;

pub use canvas::Canvas;
pub use error::{CanvasError, SceneError, SurfaceError};
pub use object::{ObjectId, Point, SceneObject, Size, StylePatch, TextBox, TextBoxSpec, TextStyle};
pub use scene::Scene;
pub use state::{SceneState, SCENE_SCHEMA_VERSION};
pub use surface::{wrap_text, LayoutSurface, Surface, TextLayout};
