use std::io::Cursor;
use std::sync::Arc;

use futures::executor::block_on;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use image_text_composer::{
    ActiveTool, CanvasEngine, Editor, EditorConfig, EditorEvent, ImageOptions, ImageSource, SceneDocument,
    TextOptions,
};
use parking_lot::Mutex;

fn new_editor() -> Editor {
    Editor::new(EditorConfig::default()).unwrap()
}

fn record_events(editor: &Editor) -> Arc<Mutex<Vec<EditorEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    editor.subscribe(move |event: &EditorEvent| sink.lock().push(event.clone()));
    events
}

fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 255])))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

// Serialized scene with two text objects, built by a separate session
fn two_text_scene() -> String {
    let mut source = new_editor();
    source.add_text("Imported one", TextOptions::default()).unwrap();
    source.add_text("Imported two", TextOptions::default()).unwrap();
    source.to_json().unwrap()
}

#[test]
fn test_load_json_replaces_scene_as_one_entry() {
    let scene = two_text_scene();
    let mut editor = new_editor();
    editor.add_text("Local", TextOptions::default()).unwrap();
    let local = editor.to_json().unwrap();

    editor.load_json(scene.clone());
    block_on(editor.settle());

    assert_eq!(editor.to_json().unwrap(), scene);
    assert_eq!(editor.history().len(), 3);
    assert_eq!(editor.history().index(), 2);
    assert!(editor.selected_objects().is_empty());

    editor.handle_undo();
    block_on(editor.settle());
    assert_eq!(editor.to_json().unwrap(), local);
}

#[test]
fn test_reset_restores_empty_baseline() {
    let mut editor = new_editor();
    editor.add_text("Caption", TextOptions::default()).unwrap();
    editor.copy_object();
    block_on(editor.settle());
    editor.change_font_size(72.0).unwrap();
    editor.change_active_tool(ActiveTool::Fill);

    editor.reset_editor();

    assert!(editor.engine().objects().is_empty());
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().index(), 0);
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert!(!editor.history().is_suppressed());
    assert!(editor.clipboard().is_empty());
    assert!(editor.selected_objects().is_empty());
    assert_eq!(editor.active_tool(), ActiveTool::Image);
    assert_eq!(editor.get_active_font_size(), 32.0);
    assert_eq!(
        editor.to_json().unwrap(),
        SceneDocument::empty().to_json().unwrap()
    );
}

#[test]
fn test_reset_discards_pending_work() {
    let mut editor = new_editor();
    editor.add_text("One", TextOptions::default()).unwrap();
    editor.add_text("Two", TextOptions::default()).unwrap();

    editor.handle_undo();
    editor
        .add_image(ImageSource::bytes("late.png", png_bytes()), ImageOptions::default())
        .unwrap();
    editor.reset_editor();
    block_on(editor.settle());

    assert!(editor.engine().objects().is_empty());
    assert_eq!(editor.history().len(), 1);
    assert!(!editor.history().is_suppressed());
}

#[test]
fn test_save_png_names_and_encodes() {
    let mut editor = new_editor();
    editor
        .add_image(ImageSource::bytes("photo.png", png_bytes()), ImageOptions::default())
        .unwrap();
    block_on(editor.settle());

    let exported = editor.save_png().unwrap();

    let (stem, extension) = exported.file_name.rsplit_once('.').unwrap();
    assert_eq!(extension, "png");
    assert!(uuid::Uuid::parse_str(stem).is_ok());
    assert_eq!(exported.mime_type, "image/png");

    let decoded = image::load_from_memory(&exported.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1280, 720));
    assert_eq!(decoded.to_rgba8().get_pixel(640, 360)[0], 200);

    let again = editor.save_png().unwrap();
    assert_ne!(again.file_name, exported.file_name);
}

#[test]
fn test_serialization_is_idempotent() {
    let scene = two_text_scene();
    let document = SceneDocument::from_json(&scene).unwrap();
    assert_eq!(document.to_json().unwrap(), scene);
    assert_eq!(SceneDocument::from_json(&document.to_json().unwrap()).unwrap(), document);
}

#[test]
fn test_each_mutation_reports_one_snapshot() {
    let mut editor = new_editor();
    let events = record_events(&editor);

    editor.add_text("Caption", TextOptions::default()).unwrap();
    editor.change_opacity(0.5).unwrap();

    let snapshots: Vec<String> = events
        .lock()
        .iter()
        .filter_map(|event| match event {
            EditorEvent::Snapshot(json) => Some(json.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[1], editor.to_json().unwrap());
}

#[test]
fn test_removing_selection_is_recorded() {
    let mut editor = new_editor();
    editor.add_text("Gone soon", TextOptions::default()).unwrap();

    editor.remove_selected();

    assert!(editor.engine().objects().is_empty());
    assert!(editor.selected_objects().is_empty());
    assert_eq!(editor.history().len(), 3);
}
