use std::sync::Arc;

use futures::executor::block_on;
use image_text_composer::{Editor, EditorConfig, EditorEvent, Operation, TextOptions};
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

// Editor with `count` text objects, one history entry each
fn editor_with_texts(count: usize) -> Editor {
    let mut editor = new_editor();
    for i in 0..count {
        editor.add_text(&format!("Line {}", i), TextOptions::default()).unwrap();
    }
    editor
}

#[test]
fn test_each_mutation_adds_one_entry() {
    let editor = editor_with_texts(3);

    assert_eq!(editor.history().len(), 4);
    assert_eq!(editor.history().index(), 3);
    assert!(editor.can_undo());
    assert!(!editor.can_redo());
}

#[test]
fn test_fresh_session_has_nothing_to_undo() {
    let mut editor = new_editor();
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());

    editor.handle_undo();
    editor.handle_redo();
    assert_eq!(editor.pending_operations(), 0);
    assert!(!editor.history().is_suppressed());
}

#[test]
fn test_undo_restores_previous_snapshot_without_recording() {
    let mut editor = editor_with_texts(2);
    let expected = editor.history().entry(1).unwrap().to_owned();

    editor.handle_undo();
    assert!(editor.history().is_suppressed());
    block_on(editor.settle());

    assert_eq!(editor.to_json().unwrap(), expected);
    assert_eq!(editor.history().len(), 3);
    assert_eq!(editor.history().index(), 1);
    assert!(editor.can_redo());
    assert!(!editor.history().is_suppressed());
}

#[test]
fn test_redo_returns_to_newer_snapshot() {
    let mut editor = editor_with_texts(2);
    let newest = editor.to_json().unwrap();

    editor.handle_undo();
    block_on(editor.settle());
    editor.handle_redo();
    block_on(editor.settle());

    assert_eq!(editor.to_json().unwrap(), newest);
    assert_eq!(editor.history().index(), 2);
    assert!(!editor.can_redo());
}

#[test]
fn test_save_after_undo_discards_redo_branch() {
    let mut editor = editor_with_texts(2);
    editor.handle_undo();
    block_on(editor.settle());

    editor.add_text("Branch", TextOptions::default()).unwrap();

    assert_eq!(editor.history().len(), 3);
    assert_eq!(editor.history().index(), 2);
    assert!(!editor.can_redo());
}

#[test]
fn test_queued_undos_step_from_pending_target() {
    let mut editor = editor_with_texts(3);
    let expected = editor.history().entry(1).unwrap().to_owned();

    editor.handle_undo();
    editor.handle_undo();
    block_on(editor.settle());

    assert_eq!(editor.history().index(), 1);
    assert_eq!(editor.to_json().unwrap(), expected);
    assert!(!editor.history().is_suppressed());
}

#[test]
fn test_superseded_undo_is_never_applied() {
    let mut editor = editor_with_texts(3);
    let newest = editor.to_json().unwrap();

    editor.handle_undo();
    editor.handle_redo();
    block_on(editor.settle());

    assert_eq!(editor.history().index(), 3);
    assert_eq!(editor.to_json().unwrap(), newest);
    assert_eq!(editor.history().len(), 4);
}

#[test]
fn test_failed_load_clears_suppression_and_reports() {
    let mut editor = editor_with_texts(1);
    let events = record_events(&editor);
    let before = editor.to_json().unwrap();

    editor.load_json("{ not a scene");
    block_on(editor.settle());

    assert!(!editor.history().is_suppressed());
    assert_eq!(editor.to_json().unwrap(), before);
    assert_eq!(editor.history().len(), 2);
    assert!(events.lock().iter().any(|event| matches!(
        event,
        EditorEvent::OperationFailed { operation: Operation::LoadJson, .. }
    )));

    editor.add_text("Still recording", TextOptions::default()).unwrap();
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn test_skipped_save_still_reports_snapshot() {
    let mut editor = editor_with_texts(1);
    let events = record_events(&editor);

    editor.save(true);

    assert_eq!(editor.history().len(), 2);
    let events = events.lock();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], EditorEvent::Snapshot(json) if *json == editor.to_json().unwrap()));
}

#[test]
fn test_history_changed_is_broadcast() {
    let mut editor = new_editor();
    let events = record_events(&editor);

    editor.add_text("Hello", TextOptions::default()).unwrap();

    assert!(events
        .lock()
        .contains(&EditorEvent::HistoryChanged { index: 1, len: 2 }));
}

#[test]
fn test_undo_all_then_redo_all_round_trips() {
    let mut editor = new_editor();
    let baseline = editor.to_json().unwrap();
    for i in 0..5 {
        editor.add_text(&format!("Line {}", i), TextOptions::default()).unwrap();
    }
    let latest = editor.to_json().unwrap();

    for _ in 0..5 {
        editor.handle_undo();
        block_on(editor.settle());
    }
    assert_eq!(editor.to_json().unwrap(), baseline);
    assert_eq!(editor.history().index(), 0);
    assert!(!editor.can_undo());

    for _ in 0..5 {
        editor.handle_redo();
        block_on(editor.settle());
    }
    assert_eq!(editor.to_json().unwrap(), latest);
    assert_eq!(editor.history().index(), 5);
    assert!(!editor.can_redo());
    assert_eq!(editor.history().len(), 6);
}
