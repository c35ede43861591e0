use serde::{Deserialize, Serialize};

use super::object::{ObjectId, VisualObject};

/// Format version written into every serialized scene.
pub const SCENE_VERSION: &str = "1.0";

/// Serializable snapshot of every object on the canvas, bottom-most first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub version: String,
    pub objects: Vec<VisualObject>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SceneDocument {
    pub fn new(objects: Vec<VisualObject>) -> Self {
        Self {
            version: SCENE_VERSION.to_owned(),
            objects,
        }
    }

    /// The empty-canvas baseline a session starts from and resets to.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> Option<&VisualObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    /// The background object, if the scene has one.
    pub fn workspace(&self) -> Option<&VisualObject> {
        self.objects.iter().find(|object| object.is_workspace())
    }

    /// Stacking index of `id`, 0 being the bottom.
    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|object| object.id == id)
    }
}
