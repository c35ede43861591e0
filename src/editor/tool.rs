use serde::{Deserialize, Serialize};

/// The side-panel mode the editor is in. Switching tools never touches the
/// scene document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTool {
    #[default]
    Select,
    Image,
    Text,
    Opacity,
    Fill,
    #[serde(rename = "font-family")]
    FontFamily,
}

impl ActiveTool {
    /// Tools that edit the selected object and are meaningless without one.
    pub fn requires_object(self) -> bool {
        matches!(self, ActiveTool::Opacity | ActiveTool::Fill | ActiveTool::FontFamily)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActiveTool::Select => "Select",
            ActiveTool::Image => "Image",
            ActiveTool::Text => "Text",
            ActiveTool::Opacity => "Opacity",
            ActiveTool::Fill => "Fill",
            ActiveTool::FontFamily => "Font",
        }
    }
}
