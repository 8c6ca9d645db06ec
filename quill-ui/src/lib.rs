//! quill-ui: command dispatch, shortcuts and configuration for the Quill editor.

pub mod config;
pub mod editor;
pub mod logging;

pub use config::{load_config, EditorConfig, NewTextDefaults};
pub use editor::{Command, Editor, EditorError, Outcome};
