//! Rendering surface contract.
//!
//! The core never draws. It hands full scene states to a [`Surface`], waits
//! for the surface to finish laying them out, and asks it to redraw. A
//! headless [`LayoutSurface`] is provided for tests and the command-line
//! front end.

use futures_lite::future::{self, BoxedLocal};
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

use crate::{ObjectId, Point, Scene, SceneObject, SceneState, SurfaceError, TextBox};

pub trait Surface {
    /// Lay out a full scene state. The returned future resolves once the
    /// surface could display `state`; the live scene is not replaced before
    /// that.
    fn load(&mut self, state: &SceneState) -> BoxedLocal<Result<(), SurfaceError>>;

    /// Redraw everything in `scene`.
    fn render_all(&mut self, scene: &Scene);

    /// Pick the object under a point.
    fn hit_test(&self, scene: &Scene, p: Point) -> Option<ObjectId> {
        scene.object_at(p)
    }

    fn name(&self) -> &str;
}

/// Wrapped lines for one text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub id: ObjectId,
    pub lines: Vec<String>,
}

/// Headless surface that measures text with a fixed glyph width ratio.
#[derive(Debug, Clone)]
pub struct LayoutSurface {
    fonts: BTreeSet<String>,
    glyph_ratio: f32,
    renders: usize,
    layout: Vec<TextLayout>,
}

impl LayoutSurface {
    pub fn new<I, S>(fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fonts: fonts.into_iter().map(Into::into).collect(),
            glyph_ratio: 0.5,
            renders: 0,
            layout: Vec::new(),
        }
    }

    pub fn install_font(&mut self, family: impl Into<String>) {
        self.fonts.insert(family.into());
    }

    pub fn has_font(&self, family: &str) -> bool {
        self.fonts.contains(family)
    }

    /// How many times the surface has been redrawn.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Layout produced by the latest redraw.
    pub fn layout(&self) -> &[TextLayout] {
        &self.layout
    }

    fn layout_text(&self, t: &TextBox) -> Result<TextLayout, SurfaceError> {
        if !self.has_font(&t.style.font_family) {
            return Err(SurfaceError::FontUnavailable {
                family: t.style.font_family.clone(),
            });
        }
        let mut glyph = t.style.font_size as f32 * self.glyph_ratio;
        if t.style.bold {
            glyph *= 1.1;
        }
        Ok(TextLayout {
            id: t.id,
            lines: wrap_text(&t.text, t.size.width, glyph),
        })
    }

    fn layout_objects<'a>(
        &self,
        objects: impl IntoIterator<Item = &'a SceneObject>,
    ) -> Result<Vec<TextLayout>, SurfaceError> {
        objects
            .into_iter()
            .filter_map(SceneObject::as_text)
            .map(|t| self.layout_text(t))
            .collect()
    }
}

impl Default for LayoutSurface {
    fn default() -> Self {
        LayoutSurface::new(["Times New Roman", "Arial", "Helvetica", "Courier New", "Georgia"])
    }
}

impl Surface for LayoutSurface {
    fn load(&mut self, state: &SceneState) -> BoxedLocal<Result<(), SurfaceError>> {
        let result = self.layout_objects(&state.objects).map(|lines| lines.len());
        Box::pin(async move {
            // Layout completes on a later poll, like a real text engine.
            future::yield_now().await;
            let laid_out = result?;
            debug!(laid_out, "surface layout complete");
            Ok(())
        })
    }

    fn render_all(&mut self, scene: &Scene) {
        // Editors check layout before committing, so a miss here is a bug upstream.
        let mut layout = Vec::with_capacity(scene.len());
        for t in scene.objects().iter().filter_map(SceneObject::as_text) {
            match self.layout_text(t) {
                Ok(lines) => layout.push(lines),
                Err(e) => warn!(object_id = %t.id, error = %e, "object skipped in redraw"),
            }
        }
        self.layout = layout;
        self.renders += 1;
        trace!(renders = self.renders, "surface redrawn");
    }

    fn name(&self) -> &str {
        "layout"
    }
}

/// Greedy word wrap. A word longer than the line is broken by character.
pub fn wrap_text(text: &str, width: f32, glyph_width: f32) -> Vec<String> {
    let per_line = if glyph_width > 0.0 {
        ((width / glyph_width).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > per_line {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(per_line);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let sep = usize::from(line_len > 0);
            if line_len + sep + word.len() > per_line {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            } else if sep == 1 {
                line.push(' ');
                line_len += 1;
            }
            line_len += word.len();
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StylePatch, TextBoxSpec};

    #[test]
    fn test_wrap_breaks_on_words() {
        // 10 glyphs per line
        let lines = wrap_text("hello big world", 100.0, 10.0);
        assert_eq!(lines, vec!["hello big", "world"]);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let lines = wrap_text("abcdefghij", 40.0, 10.0);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        let lines = wrap_text("a\nb", 100.0, 10.0);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_load_rejects_unknown_font() {
        let mut surface = LayoutSurface::new(["Arial"]);
        let mut scene = Scene::default();
        let id = scene.add_object(TextBoxSpec::default());
        scene.set_style(id, &StylePatch::font_family("Comic Sans MS"));

        let result = future::block_on(surface.load(&scene.serialize()));
        assert!(matches!(result, Err(SurfaceError::FontUnavailable { .. })));
    }

    #[test]
    fn test_render_counts_and_lays_out() {
        let mut surface = LayoutSurface::default();
        let mut scene = Scene::default();
        let id = scene.add_object(TextBoxSpec::default());

        surface.render_all(&scene);
        assert_eq!(surface.render_count(), 1);
        assert_eq!(surface.layout()[0].id, id);
        assert_eq!(surface.layout()[0].lines, vec!["Edit me"]);
    }
}
