use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a visual object.
pub type ObjectId = Uuid;

/// Name carried by the background object that stays at the bottom of the stack.
pub const WORKSPACE_NAME: &str = "workspace";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Orientation of a snap guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    /// Vertical line through the canvas center; aligns horizontal centers.
    Vertical,
    /// Horizontal line through the canvas center; aligns vertical centers.
    Horizontal,
}

/// Typed text attributes of a text-box object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub text: String,
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub linethrough: bool,
    #[serde(default)]
    pub text_align: TextAlign,
}

/// Per-kind payload of a visual object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    /// Bitmap image referenced by its source key.
    Image { src: String },
    /// Styled, editable text.
    Textbox(TextStyle),
    /// Alignment overlay drawn while dragging.
    Guide { axis: GuideAxis },
    /// Composite of several objects, produced by copying a multi-selection.
    /// Members keep absolute coordinates.
    Group { objects: Vec<VisualObject> },
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Image { .. } => "image",
            ObjectKind::Textbox(_) => "textbox",
            ObjectKind::Guide { .. } => "guide",
            ObjectKind::Group { .. } => "group",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ObjectKind::Textbox(_))
    }
}

/// A single object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualObject {
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    pub opacity: f32,
    pub selectable: bool,
    pub has_controls: bool,
    pub evented: bool,
    #[serde(default)]
    pub exclude_from_export: bool,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl VisualObject {
    /// Creates an object of the given kind with neutral styling at the origin.
    pub fn new(kind: ObjectKind, size: Vec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            left: 0.0,
            top: 0.0,
            width: size.x,
            height: size.y,
            scale_x: 1.0,
            scale_y: 1.0,
            fill: "rgba(0, 0, 0, 1)".to_owned(),
            stroke: None,
            opacity: 1.0,
            selectable: true,
            has_controls: true,
            evented: true,
            exclude_from_export: false,
            kind,
        }
    }

    pub fn image(src: impl Into<String>, natural_size: Vec2) -> Self {
        Self::new(ObjectKind::Image { src: src.into() }, natural_size)
    }

    pub fn textbox(style: TextStyle, size: Vec2) -> Self {
        Self::new(ObjectKind::Textbox(style), size)
    }

    /// Wraps `members` in a group sized to their combined bounds.
    pub fn group(members: Vec<VisualObject>) -> Self {
        let bounds = members
            .iter()
            .map(VisualObject::bounds)
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::from_min_size(Pos2::ZERO, Vec2::ZERO));

        let mut group = Self::new(ObjectKind::Group { objects: members }, bounds.size());
        group.left = bounds.min.x;
        group.top = bounds.min.y;
        group
    }

    pub fn position(&self) -> Pos2 {
        Pos2::new(self.left, self.top)
    }

    pub fn set_position(&mut self, position: Pos2) {
        let delta = position - self.position();
        self.translate(delta);
    }

    /// On-canvas size after scaling.
    pub fn scaled_size(&self) -> Vec2 {
        Vec2::new(self.width * self.scale_x, self.height * self.scale_y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position(), self.scaled_size())
    }

    pub fn center(&self) -> Pos2 {
        self.bounds().center()
    }

    /// Moves the object, and every member of a group, by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.left += delta.x;
        self.top += delta.y;
        if let ObjectKind::Group { objects } = &mut self.kind {
            for member in objects {
                member.translate(delta);
            }
        }
    }

    pub fn text_style(&self) -> Option<&TextStyle> {
        match &self.kind {
            ObjectKind::Textbox(style) => Some(style),
            _ => None,
        }
    }

    pub fn text_style_mut(&mut self) -> Option<&mut TextStyle> {
        match &mut self.kind {
            ObjectKind::Textbox(style) => Some(style),
            _ => None,
        }
    }

    pub fn is_workspace(&self) -> bool {
        self.name.as_deref() == Some(WORKSPACE_NAME)
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ObjectKind::Group { .. })
    }

    /// Deep copy with new identifiers for the object and all group members.
    pub fn with_fresh_ids(&self) -> Self {
        let mut copy = self.clone();
        copy.assign_fresh_ids();
        copy
    }

    fn assign_fresh_ids(&mut self) {
        self.id = Uuid::new_v4();
        if let ObjectKind::Group { objects } = &mut self.kind {
            for member in objects {
                member.assign_fresh_ids();
            }
        }
    }

    /// Splits a group into its members; any other object yields itself.
    pub fn into_members(self) -> Vec<VisualObject> {
        match self.kind {
            ObjectKind::Group { objects } => objects,
            _ => vec![self],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> TextStyle {
        TextStyle {
            text: content.to_owned(),
            font_family: "Arial".to_owned(),
            font_size: 32.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            underline: false,
            linethrough: false,
            text_align: TextAlign::Left,
        }
    }

    #[test]
    fn test_group_bounds_cover_members() {
        let mut a = VisualObject::textbox(text("a"), Vec2::new(10.0, 10.0));
        a.set_position(Pos2::new(5.0, 5.0));
        let mut b = VisualObject::textbox(text("b"), Vec2::new(20.0, 10.0));
        b.set_position(Pos2::new(30.0, 40.0));

        let group = VisualObject::group(vec![a, b]);
        assert_eq!(group.position(), Pos2::new(5.0, 5.0));
        assert_eq!(group.scaled_size(), Vec2::new(45.0, 45.0));
    }

    #[test]
    fn test_translate_moves_group_members() {
        let a = VisualObject::textbox(text("a"), Vec2::new(10.0, 10.0));
        let mut group = VisualObject::group(vec![a]);
        group.translate(Vec2::new(10.0, 10.0));

        let members = group.into_members();
        assert_eq!(members[0].position(), Pos2::new(10.0, 10.0));
    }

    #[test]
    fn test_fresh_ids_reach_members() {
        let a = VisualObject::textbox(text("a"), Vec2::new(10.0, 10.0));
        let member_id = a.id;
        let group = VisualObject::group(vec![a]);
        let copy = group.with_fresh_ids();

        assert_ne!(copy.id, group.id);
        assert_ne!(copy.into_members()[0].id, member_id);
    }

    #[test]
    fn test_scaled_center() {
        let mut image = VisualObject::image("photo.png", Vec2::new(200.0, 100.0));
        image.scale_x = 0.5;
        image.scale_y = 0.5;
        image.set_position(Pos2::new(10.0, 10.0));
        assert_eq!(image.center(), Pos2::new(60.0, 35.0));
    }
}
