// A canvas is a scene bound to the surface that displays it.
// Full-state loads go through here so the scene is never half-applied.

use tracing::{debug, info, warn};

use crate::{CanvasError, ObjectId, Point, Scene, SceneState, Surface};

pub struct Canvas {
    scene: Scene,
    surface: Box<dyn Surface>,
}

impl Canvas {
    pub fn new(scene: Scene, surface: Box<dyn Surface>) -> Self {
        info!(
            "Creating canvas {}x{} on {} surface",
            scene.width,
            scene.height,
            surface.name()
        );
        Self { scene, surface }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct scene access for mutations that are then checkpointed by the caller.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    pub fn render_all(&mut self) {
        self.surface.render_all(&self.scene);
    }

    /// Replace the scene with `state` once the surface has laid it out.
    ///
    /// Validation happens first, then the surface load is awaited. Only if
    /// both succeed is the live scene replaced and redrawn. On error the
    /// previous scene is left exactly as it was.
    pub async fn load_state(&mut self, state: SceneState) -> Result<(), CanvasError> {
        state.validate()?;

        let layout = self.surface.load(&state);
        if let Err(e) = layout.await {
            warn!(error = %e, "surface failed to load scene state");
            return Err(e.into());
        }

        self.scene.restore(state)?;
        self.render_all();
        debug!(objects = self.scene.len(), "canvas loaded state");
        Ok(())
    }

    /// Check that the live scene is valid and that the surface can lay it
    /// out. Nothing is replaced or redrawn.
    pub async fn check_layout(&mut self) -> Result<(), CanvasError> {
        let state = self.scene.serialize();
        state.validate()?;
        self.surface.load(&state).await?;
        Ok(())
    }

    /// Hit-test and focus the object under `p`. A miss clears focus.
    pub fn select_at(&mut self, p: Point) -> Option<ObjectId> {
        let hit = self.surface.hit_test(&self.scene, p);
        self.scene.set_active(hit);
        hit
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("scene", &self.scene)
            .field("surface", &self.surface.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayoutSurface, SceneError, StylePatch, SurfaceError, TextBoxSpec};
    use futures_lite::future::block_on;

    fn canvas() -> Canvas {
        Canvas::new(Scene::default(), Box::new(LayoutSurface::new(["Arial", "Times New Roman"])))
    }

    #[test]
    fn test_load_state_replaces_scene() {
        let mut canvas = canvas();
        let mut other = Scene::default();
        other.add_object(TextBoxSpec::default());
        let state = other.serialize();

        block_on(canvas.load_state(state)).unwrap();
        assert_eq!(canvas.scene().objects(), other.objects());
    }

    #[test]
    fn test_failed_surface_load_keeps_scene() {
        let mut canvas = canvas();
        canvas.scene_mut().add_object(TextBoxSpec::default());
        let before = canvas.scene().clone();

        let mut other = Scene::default();
        let id = other.add_object(TextBoxSpec::default());
        other.set_style(id, &StylePatch::font_family("Wingdings"));

        let err = block_on(canvas.load_state(other.serialize())).unwrap_err();
        assert!(matches!(err, CanvasError::Surface(_)));
        assert_eq!(canvas.scene(), &before);
    }

    #[test]
    fn test_check_layout() {
        let mut canvas = canvas();
        let id = canvas.scene_mut().add_object(TextBoxSpec::default());
        block_on(canvas.check_layout()).unwrap();

        canvas
            .scene_mut()
            .set_style(id, &StylePatch::font_family("Papyrus"));
        let err = block_on(canvas.check_layout()).unwrap_err();
        assert!(matches!(err, CanvasError::Surface(SurfaceError::FontUnavailable { .. })));
        // Checking never touches the scene.
        assert_eq!(canvas.scene().text(id).unwrap().style.font_family, "Papyrus");
    }

    #[test]
    fn test_check_layout_rejects_bad_geometry() {
        let mut canvas = canvas();
        canvas.scene_mut().add_object(TextBoxSpec {
            size: crate::Size::new(f32::NAN, 10.0),
            ..Default::default()
        });
        let err = block_on(canvas.check_layout()).unwrap_err();
        assert!(matches!(err, CanvasError::Scene(SceneError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_select_at() {
        let mut canvas = canvas();
        let id = canvas.scene_mut().add_object(TextBoxSpec::default());
        assert_eq!(canvas.select_at(Point::new(110.0, 110.0)), Some(id));
        assert_eq!(canvas.scene().active_object(), Some(id));
        assert_eq!(canvas.select_at(Point::new(1.0, 1.0)), None);
        assert_eq!(canvas.scene().active_object(), None);
    }
}
