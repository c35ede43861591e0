mod document;
mod object;

pub use document::{SceneDocument, SCENE_VERSION};
pub use object::{
    FontStyle, GuideAxis, ObjectId, ObjectKind, TextAlign, TextStyle, VisualObject, WORKSPACE_NAME,
};
