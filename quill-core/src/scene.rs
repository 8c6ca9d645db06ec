// The scene is the live set of objects shown on the canvas.
// It owns no history logic; the history engines drive it through this API.

use tracing::{debug, info, trace, warn};

use crate::{
    ObjectId, Point, SceneError, SceneObject, SceneState, Size, StylePatch, TextBox, TextBoxSpec,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    background: String,
    objects: Vec<SceneObject>,
    active: Option<ObjectId>,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: impl Into<String>) -> Self {
        let background = background.into();
        info!(
            "Creating new scene of size {}x{} with background {}",
            width, height, background
        );

        Self {
            width,
            height,
            background,
            objects: Vec::new(),
            active: None,
        }
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn set_background(&mut self, background: impl Into<String>) {
        self.background = background.into();
    }

    // Objects in z-order, bottom first
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn text(&self, id: ObjectId) -> Option<&TextBox> {
        self.get(id).and_then(SceneObject::as_text)
    }

    /// Create a text box on top of the z-order and return its id.
    pub fn add_object(&mut self, spec: TextBoxSpec) -> ObjectId {
        let text_box = TextBox::from_spec(spec);
        let id = text_box.id;
        self.objects.push(SceneObject::Text(text_box));
        debug!(object_id = %id, total = self.objects.len(), "object added");
        id
    }

    /// Append an existing object on top of the z-order, taking ownership.
    pub fn push_object(&mut self, object: SceneObject) {
        let id = object.id();
        if self.contains(id) {
            // Two live copies of one identity would break ownership. Keep the live one.
            tracing::error!(object_id = %id, "object already in scene, not re-adding");
            debug_assert!(false, "object {id} pushed twice");
            return;
        }
        self.objects.push(object);
        debug!(object_id = %id, total = self.objects.len(), "object pushed");
    }

    /// Remove and return the topmost object.
    pub fn pop_object(&mut self) -> Option<SceneObject> {
        let object = self.objects.pop()?;
        self.forget_active(object.id());
        debug!(object_id = %object.id(), total = self.objects.len(), "object popped");
        Some(object)
    }

    /// Remove by identity. Absent ids are a no-op.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.index_of(id)?;
        let object = self.objects.remove(index);
        self.forget_active(id);
        debug!(object_id = %id, total = self.objects.len(), "object removed");
        Some(object)
    }

    fn forget_active(&mut self, id: ObjectId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }

    pub fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    /// Focus an object. Unknown ids clear the focus.
    pub fn set_active(&mut self, id: Option<ObjectId>) {
        self.active = id.filter(|id| self.contains(*id));
        trace!(active = ?self.active, "active object changed");
    }

    /// Merge style attributes into a stylable object. Returns false when
    /// nothing was applied.
    pub fn set_style(&mut self, id: ObjectId, patch: &StylePatch) -> bool {
        let Some(object) = self.get_mut(id) else {
            warn!(object_id = %id, "set_style on unknown object");
            return false;
        };
        if !object.is_stylable() {
            warn!(object_id = %id, kind = object.kind(), "set_style on non-stylable object");
            return false;
        }
        match object.style_mut() {
            Some(style) => style.apply(patch),
            None => false,
        }
    }

    pub fn move_object(&mut self, id: ObjectId, position: Point) -> bool {
        if !position.x.is_finite() || !position.y.is_finite() {
            warn!(object_id = %id, "rejecting non-finite position");
            return false;
        }
        match self.get_mut(id).and_then(SceneObject::as_text_mut) {
            Some(t) => {
                t.position = position;
                true
            }
            None => false,
        }
    }

    pub fn resize_object(&mut self, id: ObjectId, size: Size) -> bool {
        if !size.is_valid() {
            warn!(object_id = %id, "rejecting invalid size");
            return false;
        }
        match self.get_mut(id).and_then(SceneObject::as_text_mut) {
            Some(t) => {
                t.size = size;
                true
            }
            None => false,
        }
    }

    pub fn set_text(&mut self, id: ObjectId, text: impl Into<String>) -> bool {
        match self.get_mut(id).and_then(SceneObject::as_text_mut) {
            Some(t) if t.editable => {
                t.text = text.into();
                true
            }
            _ => false,
        }
    }

    /// Topmost object under the point.
    pub fn object_at(&self, p: Point) -> Option<ObjectId> {
        self.objects.iter().rev().find(|o| o.contains(p)).map(SceneObject::id)
    }

    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        info!("Resizing scene to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    pub fn serialize(&self) -> SceneState {
        trace!(objects = self.objects.len(), "serializing scene");
        SceneState::new(self.background.clone(), self.objects.clone())
    }

    /// Replace objects and background wholesale. Nothing changes if the
    /// state is invalid.
    pub fn restore(&mut self, state: SceneState) -> Result<(), SceneError> {
        state.validate()?;

        self.background = state.background;
        self.objects = state.objects;
        // Identities come from the state, so focus survives if the object recurs.
        if let Some(id) = self.active {
            if !self.contains(id) {
                self.active = None;
            }
        }
        debug!(objects = self.objects.len(), "scene restored");
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new(400, 600, "lightgrey")
    }
}
