//! Object-stack history.
//!
//! A coarse alternative to [`Timeline`](crate::Timeline): undo takes the
//! topmost object off the scene and keeps it, redo puts it back on top.
//!
//! Limitations callers must know about:
//! - Only whole-object add/remove is undoable. Style, text, position and
//!   size changes are not recorded at all.
//! - Undo removes the last object in z-order, which is not necessarily the
//!   object the user touched last.
//! - Every undo clears the redo record, so undo/redo cannot interleave more
//!   than one step deep.

use quill_core::{Canvas, ObjectId, Scene, SceneObject};
use tracing::{debug, error, trace};

use crate::HistoryError;

#[derive(Debug, Default)]
pub struct ObjectStack {
    /// Objects taken off the scene by undo, most recent last. Sole owner.
    undo_stack: Vec<SceneObject>,
    /// Identities put back by redo. The scene owns those objects again.
    redo_stack: Vec<ObjectId>,
}

impl ObjectStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_stack(&self) -> &[SceneObject] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[ObjectId] {
        &self.redo_stack
    }

    pub fn can_undo(&self, scene: &Scene) -> bool {
        !scene.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Take the topmost object off the scene. Returns false on an empty scene.
    pub fn undo(&mut self, canvas: &mut Canvas) -> bool {
        let Some(object) = canvas.scene_mut().pop_object() else {
            trace!("undo on empty scene ignored");
            return false;
        };

        debug!(object_id = %object.id(), "object moved to undo stack");
        self.undo_stack.push(object);
        self.redo_stack.clear();
        canvas.render_all();
        self.debug_check(canvas.scene());
        true
    }

    /// Put the most recently undone object back on top. Returns false when
    /// nothing has been undone.
    ///
    /// An object that is already live is left on the undo stack and reported
    /// as [`HistoryError::SharedObject`]; nothing is dropped or duplicated.
    pub fn redo(&mut self, canvas: &mut Canvas) -> Result<bool, HistoryError> {
        let Some(object) = self.undo_stack.pop() else {
            trace!("redo with empty undo stack ignored");
            return Ok(false);
        };

        let id = object.id();
        if canvas.scene().contains(id) {
            self.undo_stack.push(object);
            error!(object_id = %id, "undone object is also in the scene");
            debug_assert!(false, "object {id} owned by scene and undo stack");
            return Err(HistoryError::SharedObject(id));
        }

        canvas.scene_mut().push_object(object);
        self.redo_stack.push(id);
        canvas.render_all();
        debug!(object_id = %id, "object restored from undo stack");
        self.debug_check(canvas.scene());
        Ok(true)
    }

    /// No object may be both live and on the undo stack.
    pub fn check_invariants(&self, scene: &Scene) -> Result<(), HistoryError> {
        match self.undo_stack.iter().find(|o| scene.contains(o.id())) {
            Some(shared) => Err(HistoryError::SharedObject(shared.id())),
            None => Ok(()),
        }
    }

    fn debug_check(&self, scene: &Scene) {
        if cfg!(debug_assertions) {
            if let Err(e) = self.check_invariants(scene) {
                panic!("{e}");
            }
        }
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
