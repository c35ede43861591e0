use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::color::parse_css_color;
use crate::editor::ActiveTool;
use crate::scene::FontStyle;

/// Errors that can occur while loading editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Raster format produced by an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Encoder quality in 0..=1; only lossy formats use it.
    pub quality: f32,
    /// Output pixels per canvas unit.
    pub multiplier: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            quality: 1.0,
            multiplier: 1.0,
        }
    }
}

/// Starting attributes for newly created text objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub left: f32,
    pub top: f32,
    pub fill: String,
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: u16,
    pub font_style: FontStyle,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            left: 100.0,
            top: 100.0,
            fill: "rgba(0, 0, 0, 1)".to_owned(),
            font_size: 32.0,
            font_family: "Arial".to_owned(),
            font_weight: 400,
            font_style: FontStyle::Normal,
        }
    }
}

/// Tunables for an editor session. Every field falls back to its default
/// when missing from the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Offset applied to each successive paste.
    pub paste_offset: f32,
    /// Distance from a centerline within which a dragged object snaps.
    pub snap_tolerance: f32,
    pub guide_hide_delay_ms: u64,
    pub export: ExportOptions,
    pub text: TextDefaults,
    /// Lower-case format names accepted by `add_image`.
    pub accepted_image_formats: Vec<String>,
    pub initial_tool: ActiveTool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280.0,
            canvas_height: 720.0,
            paste_offset: 10.0,
            snap_tolerance: 15.0,
            guide_hide_delay_ms: 400,
            export: ExportOptions::default(),
            text: TextDefaults::default(),
            accepted_image_formats: vec!["png".to_owned(), "jpeg".to_owned()],
            initial_tool: ActiveTool::Image,
        }
    }
}

impl EditorConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.snap_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "snap tolerance must not be negative, got {}",
                self.snap_tolerance
            )));
        }
        if !(0.0..=1.0).contains(&self.export.quality) {
            return Err(ConfigError::InvalidValue(format!(
                "export quality must be within 0..=1, got {}",
                self.export.quality
            )));
        }
        if self.export.multiplier <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "export multiplier must be positive, got {}",
                self.export.multiplier
            )));
        }
        if self.text.font_size <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "default font size must be positive, got {}",
                self.text.font_size
            )));
        }
        if parse_css_color(&self.text.fill).is_none() {
            return Err(ConfigError::InvalidValue(format!(
                "default fill {:?} is not a colour",
                self.text.fill
            )));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        egui::vec2(self.canvas_width, self.canvas_height)
    }

    pub fn guide_hide_delay_secs(&self) -> f64 {
        self.guide_hide_delay_ms as f64 / 1000.0
    }

    pub fn accepts_format(&self, format: image::ImageFormat) -> bool {
        let names = format.extensions_str();
        self.accepted_image_formats
            .iter()
            .any(|accepted| names.contains(&accepted.to_ascii_lowercase().as_str()))
    }
}
