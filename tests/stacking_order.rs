use egui::Vec2;
use futures::executor::block_on;
use image_text_composer::scene::WORKSPACE_NAME;
use image_text_composer::{CanvasEngine, Editor, EditorConfig, ObjectId, VisualObject};

// Workspace at the bottom, then three plain objects
fn stacked_editor() -> (Editor, ObjectId, [ObjectId; 3]) {
    let mut editor = Editor::new(EditorConfig::default()).unwrap();

    let mut workspace = VisualObject::image("bg.png", Vec2::new(1280.0, 720.0));
    workspace.name = Some(WORKSPACE_NAME.to_owned());
    workspace.selectable = false;
    let workspace_id = workspace.id;
    editor.engine_mut().add(workspace);

    let mut ids = [ObjectId::nil(); 3];
    for (i, slot) in ids.iter_mut().enumerate() {
        let object = VisualObject::image(format!("{}.png", i), Vec2::new(50.0, 50.0));
        *slot = object.id;
        editor.engine_mut().add(object);
    }
    editor.pump_events();
    (editor, workspace_id, ids)
}

fn select(editor: &mut Editor, ids: &[ObjectId]) {
    editor.engine_mut().set_active_objects(ids.to_vec());
    editor.pump_events();
}

fn order(editor: &Editor) -> Vec<ObjectId> {
    editor.engine().objects().iter().map(|object| object.id).collect()
}

#[test]
fn test_bring_forward_moves_one_step() {
    let (mut editor, workspace, [a, b, c]) = stacked_editor();
    select(&mut editor, &[a]);
    let before = editor.history().len();

    editor.bring_forward();

    assert_eq!(order(&editor), vec![workspace, b, a, c]);
    assert_eq!(editor.history().len(), before + 1);
}

#[test]
fn test_send_backward_stops_above_workspace() {
    let (mut editor, workspace, [a, b, c]) = stacked_editor();
    select(&mut editor, &[a]);
    let before = editor.history().len();

    editor.send_backward();
    assert_eq!(order(&editor), vec![workspace, a, b, c]);
    assert_eq!(editor.history().len(), before);

    select(&mut editor, &[b]);
    editor.send_backward();
    assert_eq!(order(&editor), vec![workspace, b, a, c]);
}

#[test]
fn test_adjacent_selection_keeps_relative_order() {
    let (mut editor, workspace, [a, b, c]) = stacked_editor();

    select(&mut editor, &[b, c]);
    editor.bring_forward();
    assert_eq!(order(&editor), vec![workspace, a, b, c]);

    select(&mut editor, &[a, b]);
    editor.bring_forward();
    assert_eq!(order(&editor), vec![workspace, c, a, b]);

    editor.send_backward();
    assert_eq!(order(&editor), vec![workspace, a, b, c]);
}

#[test]
fn test_workspace_is_repinned_and_never_moved() {
    let (mut editor, workspace, [a, b, c]) = stacked_editor();

    select(&mut editor, &[workspace, c]);
    editor.bring_forward();
    assert_eq!(order(&editor), vec![workspace, a, b, c]);

    select(&mut editor, &[workspace, a]);
    editor.send_backward();
    assert_eq!(order(&editor)[0], workspace);
}

// Plain object first, workspace above it
fn workspace_on_top_scene() -> (String, ObjectId, ObjectId) {
    let mut source = Editor::new(EditorConfig::default()).unwrap();
    let plain = VisualObject::image("a.png", Vec2::new(50.0, 50.0));
    let mut workspace = VisualObject::image("bg.png", Vec2::new(1280.0, 720.0));
    workspace.name = Some(WORKSPACE_NAME.to_owned());
    workspace.selectable = false;
    let (plain_id, workspace_id) = (plain.id, workspace.id);
    source.engine_mut().add(plain);
    source.engine_mut().add(workspace);
    (source.to_json().unwrap(), plain_id, workspace_id)
}

#[test]
fn test_loaded_scene_pins_workspace_to_bottom() {
    let (scene, plain, workspace) = workspace_on_top_scene();
    let mut editor = Editor::new(EditorConfig::default()).unwrap();

    editor.load_json(scene);
    block_on(editor.settle());

    assert_eq!(order(&editor), vec![workspace, plain]);
}

#[test]
fn test_restack_pins_workspace_even_when_nothing_else_moves() {
    let mut editor = Editor::new(EditorConfig::default()).unwrap();
    let plain = VisualObject::image("a.png", Vec2::new(50.0, 50.0));
    let mut workspace = VisualObject::image("bg.png", Vec2::new(1280.0, 720.0));
    workspace.name = Some(WORKSPACE_NAME.to_owned());
    let (plain_id, workspace_id) = (plain.id, workspace.id);
    editor.engine_mut().add(plain);
    editor.engine_mut().add(workspace);
    editor.pump_events();
    select(&mut editor, &[plain_id]);
    let before = editor.history().len();

    editor.send_backward();

    assert_eq!(order(&editor), vec![workspace_id, plain_id]);
    assert_eq!(editor.history().len(), before + 1);
}
