//! Typed property changes applied by the editor to selected objects, and the
//! tool-session defaults that stand in when nothing is selected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::parse_css_color;
use crate::config::TextDefaults;
use crate::scene::{FontStyle, ObjectKind, TextAlign, VisualObject};

/// Rejected property values.
#[derive(Debug, Error, PartialEq)]
pub enum PropertyError {
    #[error("opacity must be within 0..=1, got {0}")]
    Opacity(f32),
    #[error("font size must be positive, got {0}")]
    FontSize(f32),
    #[error("font weight must be within 1..=1000, got {0}")]
    FontWeight(u16),
    #[error("font family must not be empty")]
    EmptyFontFamily,
    #[error("unrecognised colour {0:?}")]
    Color(String),
}

/// A single property edit. Font properties apply only to text objects;
/// fill and opacity apply to every non-guide object.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyChange {
    FillColor(String),
    Opacity(f32),
    FontFamily(String),
    FontSize(f32),
    FontWeight(u16),
    FontStyle(FontStyle),
    Underline(bool),
    LineThrough(bool),
    TextAlign(TextAlign),
}

impl PropertyChange {
    pub fn validate(&self) -> Result<(), PropertyError> {
        match self {
            PropertyChange::FillColor(color) => {
                if parse_css_color(color).is_none() {
                    return Err(PropertyError::Color(color.clone()));
                }
            }
            PropertyChange::Opacity(value) => {
                if !(0.0..=1.0).contains(value) {
                    return Err(PropertyError::Opacity(*value));
                }
            }
            PropertyChange::FontFamily(family) => {
                if family.trim().is_empty() {
                    return Err(PropertyError::EmptyFontFamily);
                }
            }
            PropertyChange::FontSize(size) => {
                if !size.is_finite() || *size <= 0.0 {
                    return Err(PropertyError::FontSize(*size));
                }
            }
            PropertyChange::FontWeight(weight) => {
                if !(1..=1000).contains(weight) {
                    return Err(PropertyError::FontWeight(*weight));
                }
            }
            PropertyChange::FontStyle(_)
            | PropertyChange::Underline(_)
            | PropertyChange::LineThrough(_)
            | PropertyChange::TextAlign(_) => {}
        }
        Ok(())
    }

    pub fn applies_to(&self, kind: &ObjectKind) -> bool {
        match self {
            PropertyChange::FillColor(_) | PropertyChange::Opacity(_) => {
                !matches!(kind, ObjectKind::Guide { .. })
            }
            _ => kind.is_text(),
        }
    }

    /// Writes the value onto `object`. Returns whether anything changed.
    pub fn apply(&self, object: &mut VisualObject) -> bool {
        if !self.applies_to(&object.kind) {
            return false;
        }

        match self {
            PropertyChange::FillColor(color) => replace(&mut object.fill, color.clone()),
            PropertyChange::Opacity(value) => replace(&mut object.opacity, *value),
            _ => {
                let Some(style) = object.text_style_mut() else {
                    return false;
                };
                match self {
                    PropertyChange::FontFamily(family) => replace(&mut style.font_family, family.clone()),
                    PropertyChange::FontSize(size) => replace(&mut style.font_size, *size),
                    PropertyChange::FontWeight(weight) => replace(&mut style.font_weight, *weight),
                    PropertyChange::FontStyle(font_style) => replace(&mut style.font_style, *font_style),
                    PropertyChange::Underline(on) => replace(&mut style.underline, *on),
                    PropertyChange::LineThrough(on) => replace(&mut style.linethrough, *on),
                    PropertyChange::TextAlign(align) => replace(&mut style.text_align, *align),
                    PropertyChange::FillColor(_) | PropertyChange::Opacity(_) => false,
                }
            }
        }
    }

    /// Changes to font metrics alter the measured size of a text box.
    pub fn affects_geometry(&self) -> bool {
        matches!(
            self,
            PropertyChange::FontFamily(_)
                | PropertyChange::FontSize(_)
                | PropertyChange::FontWeight(_)
                | PropertyChange::FontStyle(_)
        )
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// The values the toolbar shows when nothing is selected: the last value
/// chosen for each property during this session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefaults {
    pub fill: String,
    pub opacity: f32,
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub font_style: FontStyle,
    pub underline: bool,
    pub line_through: bool,
    pub text_align: TextAlign,
}

impl ToolDefaults {
    pub fn from_text_defaults(text: &TextDefaults) -> Self {
        Self {
            fill: text.fill.clone(),
            opacity: 1.0,
            font_family: text.font_family.clone(),
            font_size: text.font_size,
            font_weight: text.font_weight,
            font_style: text.font_style,
            underline: false,
            line_through: false,
            text_align: TextAlign::Left,
        }
    }

    pub fn remember(&mut self, change: &PropertyChange) {
        match change {
            PropertyChange::FillColor(color) => self.fill = color.clone(),
            PropertyChange::Opacity(value) => self.opacity = *value,
            PropertyChange::FontFamily(family) => self.font_family = family.clone(),
            PropertyChange::FontSize(size) => self.font_size = *size,
            PropertyChange::FontWeight(weight) => self.font_weight = *weight,
            PropertyChange::FontStyle(style) => self.font_style = *style,
            PropertyChange::Underline(on) => self.underline = *on,
            PropertyChange::LineThrough(on) => self.line_through = *on,
            PropertyChange::TextAlign(align) => self.text_align = *align,
        }
    }
}
