//! Editor configuration.
//!
//! Every field has a default so a partial (or missing) file is fine.

use anyhow::{ensure, Context};
use quill_core::{Point, Size, TextBoxSpec, TextStyle};
use quill_history::HistoryConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up when no config path is given.
pub const CONFIG_FILE_NAME: &str = "quill.json";

fn default_canvas_width() -> u32 {
    400
}

fn default_canvas_height() -> u32 {
    600
}

fn default_background() -> String {
    "lightgrey".into()
}

fn default_fonts() -> Vec<String> {
    ["Times New Roman", "Arial", "Helvetica", "Courier New", "Georgia"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Attributes of a freshly added text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTextDefaults {
    pub text: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub font_family: String,
    pub font_size: u32,
    pub fill: String,
}

impl Default for NewTextDefaults {
    fn default() -> Self {
        Self {
            text: "Edit me".into(),
            left: 100.0,
            top: 100.0,
            width: 200.0,
            font_family: "Times New Roman".into(),
            font_size: 20,
            fill: "black".into(),
        }
    }
}

impl NewTextDefaults {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.left.is_finite() && self.top.is_finite(),
            "new_text position must be finite, got ({}, {})",
            self.left,
            self.top
        );
        ensure!(
            self.width.is_finite() && self.width >= 0.0,
            "new_text width must be a non-negative number, got {}",
            self.width
        );
        ensure!(self.font_size > 0, "new_text font_size must be positive");
        Ok(())
    }

    pub fn to_spec(&self) -> TextBoxSpec {
        let font_size = self.font_size.max(1);
        TextBoxSpec {
            text: self.text.clone(),
            position: Point::new(self.left, self.top),
            // One line of text at the default line height.
            size: Size::new(self.width, font_size as f32 * 1.13),
            style: TextStyle {
                font_family: self.font_family.clone(),
                font_size,
                ..TextStyle::default()
            },
            fill: self.fill.clone(),
            editable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,

    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default)]
    pub new_text: NewTextDefaults,

    #[serde(default)]
    pub history: HistoryConfig,

    /// Record the empty scene as checkpoint 0 so the first edit can be undone.
    #[serde(default)]
    pub record_initial_state: bool,

    /// Font families the headless surface can lay out.
    #[serde(default = "default_fonts")]
    pub fonts: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            background: default_background(),
            new_text: NewTextDefaults::default(),
            history: HistoryConfig::default(),
            record_initial_state: false,
            fonts: default_fonts(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("parse editor config json")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.canvas_width > 0 && self.canvas_height > 0,
            "canvas must not be empty, got {}x{}",
            self.canvas_width,
            self.canvas_height
        );
        self.new_text.validate().context("invalid new_text defaults")
    }
}

/// Load config from disk. A missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<EditorConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(EditorConfig::default());
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config file: {}", path.display()))?;
    let config = EditorConfig::from_json(&data)
        .with_context(|| format!("load config file: {}", path.display()))?;
    tracing::info!(path = %path.display(), strategy = ?config.history.strategy, "config loaded");
    Ok(config)
}
