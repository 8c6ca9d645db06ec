//! The history engine an editor owns.
//!
//! One engine instance per editor, created from a [`HistoryConfig`] and
//! handed to whoever dispatches commands. It wraps whichever strategy was
//! chosen so callers do not branch on it.

use quill_core::{Canvas, Scene};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::{HistoryError, ObjectStack, Timeline};

/// Which history strategy backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryStrategy {
    /// Whole-scene checkpoints. Every completed edit is undoable.
    #[default]
    Snapshot,
    /// Add/remove of the topmost object only. Style edits are not undoable.
    ObjectStack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default)]
    pub strategy: HistoryStrategy,

    /// Oldest checkpoints are evicted past this many. Unbounded when unset.
    /// Only meaningful for the snapshot strategy.
    #[serde(default)]
    pub max_checkpoints: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            strategy: HistoryStrategy::Snapshot,
            max_checkpoints: None,
        }
    }
}

#[derive(Debug)]
pub enum HistoryEngine {
    Snapshot(Timeline),
    ObjectStack(ObjectStack),
}

impl HistoryEngine {
    pub fn new(config: &HistoryConfig) -> Self {
        info!(
            strategy = ?config.strategy,
            max_checkpoints = ?config.max_checkpoints,
            "creating history engine"
        );
        match config.strategy {
            HistoryStrategy::Snapshot => HistoryEngine::Snapshot(match config.max_checkpoints {
                Some(max) => Timeline::with_capacity_limit(max),
                None => Timeline::new(),
            }),
            HistoryStrategy::ObjectStack => HistoryEngine::ObjectStack(ObjectStack::new()),
        }
    }

    pub fn strategy(&self) -> HistoryStrategy {
        match self {
            HistoryEngine::Snapshot(_) => HistoryStrategy::Snapshot,
            HistoryEngine::ObjectStack(_) => HistoryStrategy::ObjectStack,
        }
    }

    /// Whether style and geometry edits can be undone.
    pub fn records_style_changes(&self) -> bool {
        matches!(self, HistoryEngine::Snapshot(_))
    }

    /// Call once after every completed, user-visible mutation. Returns the
    /// new checkpoint index, or `None` if this strategy does not record.
    pub fn record_checkpoint(&mut self, scene: &Scene) -> Result<Option<usize>, HistoryError> {
        match self {
            HistoryEngine::Snapshot(timeline) => timeline.record_checkpoint(scene).map(Some),
            HistoryEngine::ObjectStack(_) => {
                trace!("object-stack history does not record checkpoints");
                Ok(None)
            }
        }
    }

    /// Returns false when there was nothing to undo. Holding `&mut self`
    /// across the restore keeps a second call out until this one finishes.
    pub async fn undo(&mut self, canvas: &mut Canvas) -> Result<bool, HistoryError> {
        match self {
            HistoryEngine::Snapshot(timeline) => timeline.undo(canvas).await,
            HistoryEngine::ObjectStack(stack) => Ok(stack.undo(canvas)),
        }
    }

    pub async fn redo(&mut self, canvas: &mut Canvas) -> Result<bool, HistoryError> {
        match self {
            HistoryEngine::Snapshot(timeline) => timeline.redo(canvas).await,
            HistoryEngine::ObjectStack(stack) => stack.redo(canvas),
        }
    }

    pub fn can_undo(&self, scene: &Scene) -> bool {
        match self {
            HistoryEngine::Snapshot(timeline) => timeline.can_undo(),
            HistoryEngine::ObjectStack(stack) => stack.can_undo(scene),
        }
    }

    pub fn can_redo(&self) -> bool {
        match self {
            HistoryEngine::Snapshot(timeline) => timeline.can_redo(),
            HistoryEngine::ObjectStack(stack) => stack.can_redo(),
        }
    }

    pub fn as_timeline(&self) -> Option<&Timeline> {
        match self {
            HistoryEngine::Snapshot(timeline) => Some(timeline),
            HistoryEngine::ObjectStack(_) => None,
        }
    }

    pub fn as_object_stack(&self) -> Option<&ObjectStack> {
        match self {
            HistoryEngine::ObjectStack(stack) => Some(stack),
            HistoryEngine::Snapshot(_) => None,
        }
    }

    /// Drop all recorded history.
    pub fn clear(&mut self) {
        match self {
            HistoryEngine::Snapshot(timeline) => timeline.clear(),
            HistoryEngine::ObjectStack(stack) => stack.clear(),
        }
    }

    /// End of the engine's lifetime.
    pub fn dispose(self) {
        let retained = match &self {
            HistoryEngine::Snapshot(timeline) => timeline.len(),
            HistoryEngine::ObjectStack(stack) => stack.undo_stack().len(),
        };
        info!(strategy = ?self.strategy(), retained, "disposing history engine");
    }
}
