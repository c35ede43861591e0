//! The seam between the editor and whatever draws the canvas.
//!
//! The editor only talks to a [`CanvasEngine`]. Engines report every change
//! as a queued [`CanvasEvent`] which the editor drains after each call, and
//! hand back slow work (decoding, deserialising, cloning) as an
//! [`EngineFuture`] that completes on the same event loop.

mod raster;
mod scene_canvas;

use std::path::PathBuf;
use std::sync::Arc;

use egui::{Pos2, Vec2};
use futures::future::LocalBoxFuture;

use crate::config::ExportOptions;
use crate::error::EngineError;
use crate::event::CanvasEvent;
use crate::scene::{ObjectId, SceneDocument, TextStyle, VisualObject};

pub use raster::rasterize;
pub use scene_canvas::{ImageAssets, SceneCanvas};

/// Deferred engine work, resolved on the editor's event loop.
pub type EngineFuture<T> = LocalBoxFuture<'static, Result<T, EngineError>>;

/// Where an uploaded image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Encoded bytes, typically an upload; `name` becomes the object's `src`.
    Bytes { name: String, bytes: Arc<[u8]> },
    Path(PathBuf),
}

impl ImageSource {
    pub fn bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        ImageSource::Bytes {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Key under which the decoded image is stored and referenced.
    pub fn src(&self) -> String {
        match self {
            ImageSource::Bytes { name, .. } => name.clone(),
            ImageSource::Path(path) => path.display().to_string(),
        }
    }

    /// Container format, sniffed from the bytes or taken from the extension.
    pub fn format(&self) -> Option<image::ImageFormat> {
        match self {
            ImageSource::Bytes { bytes, .. } => image::guess_format(bytes).ok(),
            ImageSource::Path(path) => image::ImageFormat::from_path(path).ok(),
        }
    }
}

/// A decoded image ready to be placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl LoadedImage {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Operations the editor needs from a rendering engine.
///
/// Object order is stacking order: index 0 is drawn first (bottom).
pub trait CanvasEngine {
    fn size(&self) -> Vec2;

    fn objects(&self) -> &[VisualObject];

    fn object(&self, id: ObjectId) -> Option<&VisualObject> {
        self.objects().iter().find(|object| object.id == id)
    }

    /// Mutable access without notification; call [`CanvasEngine::mark_modified`]
    /// once done.
    fn object_mut(&mut self, id: ObjectId) -> Option<&mut VisualObject>;

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects().iter().position(|object| object.id == id)
    }

    /// Adds `object` on top of the stack.
    fn add(&mut self, object: VisualObject);

    fn remove(&mut self, id: ObjectId) -> Option<VisualObject>;

    /// Removes every object and the selection.
    fn clear(&mut self);

    fn mark_modified(&mut self, id: ObjectId);

    /// Moves an object as one frame of an interactive drag.
    fn move_object(&mut self, id: ObjectId, position: Pos2) -> Result<(), EngineError>;

    fn bring_forward(&mut self, id: ObjectId) -> bool;

    fn send_backward(&mut self, id: ObjectId) -> bool;

    fn send_to_back(&mut self, id: ObjectId) -> bool;

    fn active_objects(&self) -> Vec<ObjectId>;

    fn set_active_objects(&mut self, ids: Vec<ObjectId>);

    fn discard_active_object(&mut self);

    /// Selects the topmost selectable object under `point`. With `additive`,
    /// toggles it within the current selection instead.
    fn select_at(&mut self, point: Pos2, additive: bool) -> Option<ObjectId>;

    /// Size of the box a text object with `style` needs.
    fn measure_text(&self, style: &TextStyle) -> Vec2;

    fn to_document(&self) -> SceneDocument;

    /// Parses a serialized document. The result is applied with
    /// [`CanvasEngine::apply_document`].
    fn load_document(&self, json: String) -> EngineFuture<SceneDocument>;

    /// Replaces the whole scene with `document`.
    fn apply_document(&mut self, document: SceneDocument);

    /// Deep clone of `object` with new identifiers.
    fn clone_object(&self, object: &VisualObject) -> EngineFuture<VisualObject>;

    fn load_image(&self, source: ImageSource) -> EngineFuture<LoadedImage>;

    /// Encodes the visible canvas.
    fn export(&self, options: &ExportOptions) -> Result<Vec<u8>, EngineError>;

    fn request_render_all(&mut self);

    /// Takes every event queued since the last call.
    fn drain_events(&mut self) -> Vec<CanvasEvent>;
}
