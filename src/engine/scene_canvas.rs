use std::collections::HashMap;
use std::sync::Arc;

use egui::{Pos2, Vec2};
use futures::FutureExt;
use image::RgbaImage;
use parking_lot::RwLock;

use super::{raster, CanvasEngine, EngineFuture, ImageSource, LoadedImage};
use crate::config::ExportOptions;
use crate::error::EngineError;
use crate::event::CanvasEvent;
use crate::scene::{ObjectId, ObjectKind, SceneDocument, TextStyle, VisualObject};

/// Decoded images keyed by `src`, shared with pending loads and renderers.
pub type ImageAssets = Arc<RwLock<HashMap<String, Arc<RgbaImage>>>>;

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f32 = 0.55;
const LINE_HEIGHT_FACTOR: f32 = 1.16;

/// In-memory canvas: holds the objects and the live selection, queues a
/// [`CanvasEvent`] for every change and decodes images with the `image` crate.
#[derive(Debug)]
pub struct SceneCanvas {
    size: Vec2,
    objects: Vec<VisualObject>,
    active: Vec<ObjectId>,
    events: Vec<CanvasEvent>,
    assets: ImageAssets,
    render_requests: u64,
}

impl SceneCanvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            objects: Vec::new(),
            active: Vec::new(),
            events: Vec::new(),
            assets: ImageAssets::default(),
            render_requests: 0,
        }
    }

    pub fn assets(&self) -> ImageAssets {
        Arc::clone(&self.assets)
    }

    pub fn image_asset(&self, src: &str) -> Option<Arc<RgbaImage>> {
        self.assets.read().get(src).cloned()
    }

    /// Decodes `bytes` and stores the result under `src` right away, for
    /// scenes loaded from disk whose images are not uploaded again.
    pub fn register_image_bytes(&self, src: impl Into<String>, bytes: &[u8]) -> Result<LoadedImage, EngineError> {
        let src = src.into();
        let decoded = decode(&src, bytes)?;
        Ok(store(&self.assets, src, decoded))
    }

    /// Number of full redraws requested so far.
    pub fn render_requests(&self) -> u64 {
        self.render_requests
    }

    fn select(&mut self, ids: Vec<ObjectId>) {
        if ids == self.active {
            return;
        }
        if ids.is_empty() {
            self.discard_active_object();
            return;
        }

        let event = if self.active.is_empty() {
            CanvasEvent::SelectionCreated(ids.clone())
        } else {
            CanvasEvent::SelectionUpdated(ids.clone())
        };
        self.active = ids;
        self.events.push(event);
    }
}

impl CanvasEngine for SceneCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn objects(&self) -> &[VisualObject] {
        &self.objects
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut VisualObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    fn add(&mut self, object: VisualObject) {
        let id = object.id;
        self.objects.push(object);
        self.events.push(CanvasEvent::ObjectAdded(id));
    }

    fn remove(&mut self, id: ObjectId) -> Option<VisualObject> {
        let index = self.index_of(id)?;
        let removed = self.objects.remove(index);
        self.events.push(CanvasEvent::ObjectRemoved(id));

        if self.active.contains(&id) {
            let remaining: Vec<_> = self.active.iter().copied().filter(|active| *active != id).collect();
            self.select(remaining);
        }
        Some(removed)
    }

    fn clear(&mut self) {
        self.discard_active_object();
        for object in self.objects.drain(..) {
            self.events.push(CanvasEvent::ObjectRemoved(object.id));
        }
    }

    fn mark_modified(&mut self, id: ObjectId) {
        if self.index_of(id).is_some() {
            self.events.push(CanvasEvent::ObjectModified(id));
        }
    }

    fn move_object(&mut self, id: ObjectId, position: Pos2) -> Result<(), EngineError> {
        let object = self.object_mut(id).ok_or(EngineError::UnknownObject(id))?;
        object.set_position(position);
        self.events.push(CanvasEvent::ObjectMoving(id));
        Ok(())
    }

    fn bring_forward(&mut self, id: ObjectId) -> bool {
        match self.index_of(id) {
            Some(index) if index + 1 < self.objects.len() => {
                self.objects.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    fn send_backward(&mut self, id: ObjectId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                self.objects.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    fn send_to_back(&mut self, id: ObjectId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                let object = self.objects.remove(index);
                self.objects.insert(0, object);
                true
            }
            _ => false,
        }
    }

    fn active_objects(&self) -> Vec<ObjectId> {
        self.active.clone()
    }

    fn set_active_objects(&mut self, ids: Vec<ObjectId>) {
        let mut known = Vec::with_capacity(ids.len());
        for id in ids {
            if self.index_of(id).is_some() && !known.contains(&id) {
                known.push(id);
            }
        }
        self.select(known);
    }

    fn discard_active_object(&mut self) {
        if !self.active.is_empty() {
            self.active.clear();
            self.events.push(CanvasEvent::SelectionCleared);
        }
    }

    fn select_at(&mut self, point: Pos2, additive: bool) -> Option<ObjectId> {
        let hit = self
            .objects
            .iter()
            .rev()
            .find(|object| object.selectable && object.evented && object.bounds().contains(point))
            .map(|object| object.id);

        match (hit, additive) {
            (Some(id), true) => {
                let mut ids = self.active.clone();
                if let Some(position) = ids.iter().position(|active| *active == id) {
                    ids.remove(position);
                } else {
                    ids.push(id);
                }
                self.select(ids);
            }
            (Some(id), false) => self.select(vec![id]),
            (None, false) => self.discard_active_object(),
            (None, true) => {}
        }
        hit
    }

    fn measure_text(&self, style: &TextStyle) -> Vec2 {
        let lines = style.text.lines().count().max(1);
        let longest = style
            .text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);
        Vec2::new(
            longest as f32 * style.font_size * GLYPH_WIDTH_FACTOR,
            lines as f32 * style.font_size * LINE_HEIGHT_FACTOR,
        )
    }

    fn to_document(&self) -> SceneDocument {
        SceneDocument::new(self.objects.clone())
    }

    fn load_document(&self, json: String) -> EngineFuture<SceneDocument> {
        async move { SceneDocument::from_json(&json).map_err(EngineError::from) }.boxed_local()
    }

    fn apply_document(&mut self, document: SceneDocument) {
        self.clear();
        for object in document.objects {
            self.add(object);
        }
    }

    fn clone_object(&self, object: &VisualObject) -> EngineFuture<VisualObject> {
        let result = match object.kind {
            ObjectKind::Guide { .. } => Err(EngineError::Clone(object.id)),
            _ => Ok(object.with_fresh_ids()),
        };
        futures::future::ready(result).boxed_local()
    }

    fn load_image(&self, source: ImageSource) -> EngineFuture<LoadedImage> {
        let assets = Arc::clone(&self.assets);
        async move {
            let src = source.src();
            let bytes: Arc<[u8]> = match source {
                ImageSource::Bytes { bytes, .. } => bytes,
                ImageSource::Path(path) => read_file(&path)?,
            };
            let decoded = decode(&src, &bytes)?;
            Ok::<_, EngineError>(store(&assets, src, decoded))
        }
        .boxed_local()
    }

    fn export(&self, options: &ExportOptions) -> Result<Vec<u8>, EngineError> {
        let assets = self.assets.read();
        raster::rasterize(&self.objects, self.size, &assets, options)
    }

    fn request_render_all(&mut self) {
        self.render_requests += 1;
    }

    fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }
}

fn decode(src: &str, bytes: &[u8]) -> Result<RgbaImage, EngineError> {
    let image = image::load_from_memory(bytes).map_err(|err| EngineError::ImageDecode {
        src: src.to_owned(),
        reason: err.to_string(),
    })?;
    log::debug!("decoded image {}: {}x{}", src, image.width(), image.height());
    Ok(image.to_rgba8())
}

fn store(assets: &ImageAssets, src: String, decoded: RgbaImage) -> LoadedImage {
    let (width, height) = decoded.dimensions();
    assets.write().insert(src.clone(), Arc::new(decoded));
    LoadedImage { src, width, height }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_file(path: &std::path::Path) -> Result<Arc<[u8]>, EngineError> {
    std::fs::read(path)
        .map(Arc::from)
        .map_err(|err| EngineError::ImageDecode {
            src: path.display().to_string(),
            reason: err.to_string(),
        })
}

#[cfg(target_arch = "wasm32")]
fn read_file(path: &std::path::Path) -> Result<Arc<[u8]>, EngineError> {
    Err(EngineError::ImageDecode {
        src: path.display().to_string(),
        reason: "file paths are not readable on the web".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{FontStyle, TextAlign};

    fn canvas_with_two_images() -> (SceneCanvas, ObjectId, ObjectId) {
        let mut canvas = SceneCanvas::new(Vec2::new(400.0, 300.0));
        let bottom = VisualObject::image("a.png", Vec2::new(100.0, 100.0));
        let mut top = VisualObject::image("b.png", Vec2::new(100.0, 100.0));
        top.set_position(Pos2::new(50.0, 50.0));
        let (bottom_id, top_id) = (bottom.id, top.id);
        canvas.add(bottom);
        canvas.add(top);
        canvas.drain_events();
        (canvas, bottom_id, top_id)
    }

    #[test]
    fn test_select_at_picks_topmost() {
        let (mut canvas, bottom, top) = canvas_with_two_images();

        assert_eq!(canvas.select_at(Pos2::new(75.0, 75.0), false), Some(top));
        assert_eq!(canvas.select_at(Pos2::new(10.0, 10.0), true), Some(bottom));
        assert_eq!(canvas.active_objects(), vec![top, bottom]);
        assert_eq!(
            canvas.drain_events(),
            vec![
                CanvasEvent::SelectionCreated(vec![top]),
                CanvasEvent::SelectionUpdated(vec![top, bottom]),
            ]
        );

        canvas.select_at(Pos2::new(390.0, 290.0), false);
        assert_eq!(canvas.drain_events(), vec![CanvasEvent::SelectionCleared]);
    }

    #[test]
    fn test_removing_active_object_updates_selection() {
        let (mut canvas, bottom, _top) = canvas_with_two_images();
        canvas.set_active_objects(vec![bottom]);
        canvas.drain_events();

        canvas.remove(bottom);
        assert_eq!(
            canvas.drain_events(),
            vec![CanvasEvent::ObjectRemoved(bottom), CanvasEvent::SelectionCleared]
        );
    }

    #[test]
    fn test_stacking_moves() {
        let (mut canvas, bottom, top) = canvas_with_two_images();
        assert!(!canvas.bring_forward(top));
        assert!(canvas.bring_forward(bottom));
        assert_eq!(canvas.index_of(bottom), Some(1));
        assert!(canvas.send_to_back(bottom));
        assert_eq!(canvas.index_of(bottom), Some(0));
    }

    #[test]
    fn test_measure_text_grows_with_lines() {
        let canvas = SceneCanvas::new(Vec2::new(400.0, 300.0));
        let mut style = TextStyle {
            text: "abcd".to_owned(),
            font_family: "Arial".to_owned(),
            font_size: 10.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            underline: false,
            linethrough: false,
            text_align: TextAlign::Left,
        };
        let single = canvas.measure_text(&style);
        style.text = "abcd\nab".to_owned();
        let double = canvas.measure_text(&style);

        assert_eq!(single.x, double.x);
        assert!(double.y > single.y);
    }

    #[test]
    fn test_undecodable_bytes_fail() {
        let canvas = SceneCanvas::new(Vec2::new(400.0, 300.0));
        let result = canvas.register_image_bytes("broken.png", b"not an image");
        assert!(matches!(result, Err(EngineError::ImageDecode { .. })));
        assert!(canvas.image_asset("broken.png").is_none());
    }
}
