//! Snapshot history.
//!
//! Every checkpoint is the whole scene encoded as JSON. Undo and redo load
//! an encoded scene back through the [`Canvas`] and only move the pointer
//! once the canvas has accepted it. There is no branching: recording after
//! an undo drops every entry past the pointer.

use quill_core::{Canvas, Scene, SceneState};
use std::sync::Arc;
use tracing::{debug, error, info, trace};

use crate::HistoryError;

/// One recorded scene. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    seq: u64,
    json: Arc<str>,
}

impl Checkpoint {
    /// Recording order across the lifetime of the timeline, eviction included.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn as_json(&self) -> &str {
        &self.json
    }

    pub fn decode(&self) -> Result<SceneState, quill_core::SceneError> {
        SceneState::from_json(&self.json)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<Checkpoint>,
    /// `None` until the first checkpoint.
    current: Option<usize>,
    next_seq: u64,
    max_checkpoints: Option<usize>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max` checkpoints, evicting the oldest. Zero is treated as one.
    pub fn with_capacity_limit(max: usize) -> Self {
        Self {
            max_checkpoints: Some(max.max(1)),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Pointer in its signed form: -1 before anything was recorded.
    pub fn current_index(&self) -> isize {
        self.current.map_or(-1, |i| i as isize)
    }

    pub fn entries(&self) -> &[Checkpoint] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Checkpoint> {
        self.entries.get(index)
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.current, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.current, Some(i) if i + 1 < self.entries.len())
    }

    /// Append the scene as a new checkpoint and point at it. Returns the new index.
    pub fn record_checkpoint(&mut self, scene: &Scene) -> Result<usize, HistoryError> {
        self.clamp_pointer();

        // A state that cannot be restored must never enter the timeline.
        let state = scene.serialize();
        state.validate()?;
        let json = state.to_json()?;

        let keep = self.current.map_or(0, |i| i + 1);
        if keep < self.entries.len() {
            debug!(
                discarded = self.entries.len() - keep,
                "new checkpoint after undo, discarding redo entries"
            );
            self.entries.truncate(keep);
        }

        self.entries.push(Checkpoint {
            seq: self.next_seq,
            json: json.into(),
        });
        self.next_seq += 1;

        if let Some(max) = self.max_checkpoints {
            if self.entries.len() > max {
                let evicted = self.entries.len() - max;
                self.entries.drain(..evicted);
                trace!(evicted, "evicted oldest checkpoints");
            }
        }

        let index = self.entries.len() - 1;
        self.current = Some(index);
        debug!(index, total = self.entries.len(), "checkpoint recorded");
        Ok(index)
    }

    /// Step back one checkpoint. Returns false when there is nothing to undo.
    pub async fn undo(&mut self, canvas: &mut Canvas) -> Result<bool, HistoryError> {
        self.clamp_pointer();
        let Some(current) = self.current.filter(|&i| i > 0) else {
            trace!("undo at start of history ignored");
            return Ok(false);
        };

        let target = current - 1;
        self.load(canvas, target).await?;
        self.current = Some(target);
        info!(index = target, "undo");
        Ok(true)
    }

    /// Step forward one checkpoint. Returns false when there is nothing to redo.
    pub async fn redo(&mut self, canvas: &mut Canvas) -> Result<bool, HistoryError> {
        self.clamp_pointer();
        let Some(current) = self.current.filter(|&i| i + 1 < self.entries.len()) else {
            trace!("redo at end of history ignored");
            return Ok(false);
        };

        let target = current + 1;
        self.load(canvas, target).await?;
        self.current = Some(target);
        info!(index = target, "redo");
        Ok(true)
    }

    async fn load(&self, canvas: &mut Canvas, index: usize) -> Result<(), HistoryError> {
        let state = self.entries[index]
            .decode()
            .map_err(|source| HistoryError::CorruptCheckpoint { index, source })?;
        canvas.load_state(state).await?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    // Pointer must satisfy -1 <= current <= len - 1. Out of range is a bug;
    // fail loudly in debug, snap to the nearest valid position in release.
    fn clamp_pointer(&mut self) {
        let len = self.entries.len();
        let clamped = match self.current {
            None if len > 0 => Some(len - 1),
            Some(_) if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            ok => ok,
        };
        if clamped != self.current {
            error!(
                current = ?self.current,
                len,
                clamped = ?clamped,
                "timeline pointer out of bounds"
            );
            debug_assert!(false, "timeline pointer {:?} out of bounds for {len} entries", self.current);
            self.current = clamped;
        }
    }
}
