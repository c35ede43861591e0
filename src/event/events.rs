use crate::editor::ActiveTool;
use crate::scene::{GuideAxis, ObjectId};

/// Notifications queued by the rendering engine for the editor to drain.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ObjectAdded(ObjectId),
    ObjectRemoved(ObjectId),
    ObjectModified(ObjectId),
    /// One frame of an interactive drag.
    ObjectMoving(ObjectId),
    SelectionCreated(Vec<ObjectId>),
    SelectionUpdated(Vec<ObjectId>),
    SelectionCleared,
}

impl CanvasEvent {
    /// Whether the event reflects a change to the document that must be recorded.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            CanvasEvent::ObjectAdded(_) | CanvasEvent::ObjectRemoved(_) | CanvasEvent::ObjectModified(_)
        )
    }
}

/// Editor operations whose asynchronous failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Undo,
    Redo,
    LoadJson,
    Copy,
    Paste,
    AddImage,
    Export,
    Save,
}

/// Notifications the editor broadcasts to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    HistoryChanged { index: usize, len: usize },
    SelectionChanged(Vec<ObjectId>),
    SelectionCleared,
    ToolChanged { old: ActiveTool, new: ActiveTool },
    ClipboardChanged,
    GuideShown(GuideAxis),
    GuideHidden(GuideAxis),
    /// Serialized document captured by a save, skipped or not.
    Snapshot(String),
    OperationFailed { operation: Operation, message: String },
    /// User-facing message, shown as a toast.
    Notice(String),
}
