// Style tools for text boxes on the canvas.

use quill_core::{ObjectId, Scene, StylePatch, TextStyle};
use tracing::{debug, trace};

pub trait Tool {
    /// Apply to one object. Returns false if nothing changed.
    fn apply(&self, scene: &mut Scene, target: ObjectId) -> bool;

    fn name(&self) -> &str;
}

/// A boolean style attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFlag {
    Bold,
    Italic,
    Underline,
}

impl StyleFlag {
    fn get(self, style: &TextStyle) -> bool {
        match self {
            StyleFlag::Bold => style.bold,
            StyleFlag::Italic => style.italic,
            StyleFlag::Underline => style.underline,
        }
    }

    fn patch(self, value: bool) -> StylePatch {
        match self {
            StyleFlag::Bold => StylePatch::bold(value),
            StyleFlag::Italic => StylePatch::italic(value),
            StyleFlag::Underline => StylePatch::underline(value),
        }
    }
}

/// Flips one boolean attribute.
#[derive(Debug, Clone, Copy)]
pub struct Toggle {
    pub flag: StyleFlag,
}

impl Toggle {
    pub fn new(flag: StyleFlag) -> Self {
        Self { flag }
    }
}

impl Tool for Toggle {
    fn apply(&self, scene: &mut Scene, target: ObjectId) -> bool {
        let Some(current) = scene.text(target).map(|t| self.flag.get(&t.style)) else {
            debug!(object_id = %target, "toggle target is not a text box");
            return false;
        };
        trace!(object_id = %target, flag = ?self.flag, to = !current, "toggling style flag");
        scene.set_style(target, &self.flag.patch(!current))
    }

    fn name(&self) -> &str {
        match self.flag {
            StyleFlag::Bold => "Bold",
            StyleFlag::Italic => "Italic",
            StyleFlag::Underline => "Underline",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FontSize {
    pub points: u32,
}

impl FontSize {
    pub fn new(points: u32) -> Self {
        Self { points }
    }
}

impl Tool for FontSize {
    fn apply(&self, scene: &mut Scene, target: ObjectId) -> bool {
        if self.points == 0 {
            debug!("font size must be positive, ignoring 0");
            return false;
        }
        scene.set_style(target, &StylePatch::font_size(self.points))
    }

    fn name(&self) -> &str {
        "Font Size"
    }
}

#[derive(Debug, Clone)]
pub struct FontFamily {
    pub family: String,
}

impl FontFamily {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }
}

impl Tool for FontFamily {
    fn apply(&self, scene: &mut Scene, target: ObjectId) -> bool {
        let family = self.family.trim();
        if family.is_empty() {
            debug!("empty font family ignored");
            return false;
        }
        scene.set_style(target, &StylePatch::font_family(family))
    }

    fn name(&self) -> &str {
        "Font Family"
    }
}
