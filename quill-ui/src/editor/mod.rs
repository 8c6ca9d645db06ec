// Editor module for Quill UI.

pub mod command;
pub mod dispatcher;
pub mod history;
pub mod listeners;
pub mod tools;

pub use command::{Command, Outcome, ParseCommandError};
pub use dispatcher::Editor;
pub use history::{HistoryControls, Shortcuts};
pub use listeners::{ListenerHandle, ListenerKind, ListenerRegistry, WindowEvent};
pub use tools::{FontFamily, FontSize, StyleFlag, Toggle, Tool};

use quill_core::CanvasError;
use quill_history::HistoryError;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("history: {0}")]
    History(#[from] HistoryError),

    /// The edit could not be laid out and was rolled back.
    #[error("edit rejected: {0}")]
    Rejected(#[source] CanvasError),
}
