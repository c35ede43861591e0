#![warn(clippy::all, rust_2018_idioms)]

pub mod clipboard;
pub mod clock;
pub mod color;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod event;
pub mod history;
pub mod property;
pub mod render;
pub mod scene;
pub mod selection;
pub mod snap;

pub use clipboard::Clipboard;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EditorConfig, ExportFormat, ExportOptions, TextDefaults};
pub use editor::{ActiveTool, Editor, ExportedFile, ImageOptions, TextOptions, TextPreset};
pub use engine::{CanvasEngine, ImageSource, SceneCanvas};
pub use error::{EditorError, EditorResult, EngineError};
pub use event::{CanvasEvent, EditorEvent, EventBus, EventHandler, Operation, SubscriptionId};
pub use history::History;
pub use property::{PropertyChange, PropertyError};
pub use render::SceneRenderer;
pub use scene::{ObjectId, ObjectKind, SceneDocument, VisualObject};
pub use selection::SelectionTracker;
pub use snap::SnapAssist;
