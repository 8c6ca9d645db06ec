//! Scene objects.
//!
//! Every object on the canvas is a [`SceneObject`]. Today the only kind is an
//! editable [`TextBox`]; new kinds get a new variant so that every match over
//! object kinds is checked by the compiler.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Engine-assigned identity of a scene object. Stable across mutation and
/// across snapshot restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        ObjectId(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Position in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Object dimensions. Width drives line wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Typographic attributes of a text box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    /// Points. Always positive.
    pub font_size: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Times New Roman".into(),
            font_size: 20,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// Sparse style update. `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePatch {
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

impl StylePatch {
    pub fn bold(value: bool) -> Self {
        Self {
            bold: Some(value),
            ..Default::default()
        }
    }

    pub fn italic(value: bool) -> Self {
        Self {
            italic: Some(value),
            ..Default::default()
        }
    }

    pub fn underline(value: bool) -> Self {
        Self {
            underline: Some(value),
            ..Default::default()
        }
    }

    pub fn font_size(points: u32) -> Self {
        Self {
            font_size: Some(points),
            ..Default::default()
        }
    }

    pub fn font_family(family: impl Into<String>) -> Self {
        Self {
            font_family: Some(family.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && self.font_size.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
    }
}

impl TextStyle {
    /// Merge a patch into this style. A zero font size is not a valid size
    /// and is skipped. Returns true if anything was written.
    pub fn apply(&mut self, patch: &StylePatch) -> bool {
        let mut touched = false;
        if let Some(family) = &patch.font_family {
            self.font_family = family.clone();
            touched = true;
        }
        if let Some(size) = patch.font_size {
            if size > 0 {
                self.font_size = size;
                touched = true;
            } else {
                tracing::warn!("ignoring zero font size in style patch");
            }
        }
        if let Some(v) = patch.bold {
            self.bold = v;
            touched = true;
        }
        if let Some(v) = patch.italic {
            self.italic = v;
            touched = true;
        }
        if let Some(v) = patch.underline {
            self.underline = v;
            touched = true;
        }
        touched
    }
}

/// Initial attributes for a new text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBoxSpec {
    pub text: String,
    pub position: Point,
    pub size: Size,
    pub style: TextStyle,
    pub fill: String,
    pub editable: bool,
}

impl Default for TextBoxSpec {
    fn default() -> Self {
        Self {
            text: "Edit me".into(),
            position: Point::new(100.0, 100.0),
            size: Size::new(200.0, 22.6),
            style: TextStyle::default(),
            fill: "black".into(),
            editable: true,
        }
    }
}

/// An editable text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub id: ObjectId,
    pub position: Point,
    pub size: Size,
    pub text: String,
    pub style: TextStyle,
    pub fill: String,
    #[serde(default = "default_editable")]
    pub editable: bool,
}

fn default_editable() -> bool {
    true
}

impl TextBox {
    pub fn from_spec(spec: TextBoxSpec) -> Self {
        Self {
            id: ObjectId::new(),
            position: spec.position,
            size: spec.size,
            text: spec.text,
            style: spec.style,
            fill: spec.fill,
            editable: spec.editable,
        }
    }

    /// Axis-aligned bounds check, edges inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.position.x
            && p.y >= self.position.y
            && p.x <= self.position.x + self.size.width
            && p.y <= self.position.y + self.size.height
    }
}

/// Polymorphic scene object, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneObject {
    #[serde(rename = "textbox")]
    Text(TextBox),
}

impl SceneObject {
    pub fn id(&self) -> ObjectId {
        match self {
            SceneObject::Text(t) => t.id,
        }
    }

    /// Whether style attributes mean anything for this kind of object.
    pub fn is_stylable(&self) -> bool {
        match self {
            SceneObject::Text(_) => true,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SceneObject::Text(_) => "textbox",
        }
    }

    pub fn position(&self) -> Point {
        match self {
            SceneObject::Text(t) => t.position,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            SceneObject::Text(t) => t.size,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        match self {
            SceneObject::Text(t) => t.contains(p),
        }
    }

    pub fn as_text(&self) -> Option<&TextBox> {
        match self {
            SceneObject::Text(t) => Some(t),
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextBox> {
        match self {
            SceneObject::Text(t) => Some(t),
        }
    }

    /// Style of a stylable object.
    pub fn style_mut(&mut self) -> Option<&mut TextStyle> {
        match self {
            SceneObject::Text(t) => Some(&mut t.style),
        }
    }
}
