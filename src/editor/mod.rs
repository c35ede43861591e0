//! The editor session: the single entry point the UI talks to.
//!
//! An [`Editor`] owns the engine, the history, the selection mirror, the
//! clipboard and the snap assist for one session. Every operation forwards
//! to the engine, then drains the engine's event queue with
//! [`Editor::pump_events`], which records one history entry for whatever the
//! operation changed. Slow engine work is queued and applied later by
//! [`Editor::poll_completions`] (or [`Editor::settle`]).

mod properties;
mod tool;

use std::fmt;
use std::task::{Context, Poll};

use egui::{Pos2, Vec2};
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;

use crate::clipboard::Clipboard;
use crate::clock::{Clock, SystemClock};
use crate::config::{EditorConfig, ExportFormat, ExportOptions};
use crate::engine::{CanvasEngine, ImageSource, LoadedImage, SceneCanvas};
use crate::error::{EditorError, EditorResult, EngineError};
use crate::event::{CanvasEvent, EditorEvent, EventBus, EventHandler, Operation, SubscriptionId};
use crate::history::{History, LoadKind, LoadOutcome, LoadTicket};
use crate::property::{PropertyChange, ToolDefaults};
use crate::scene::{FontStyle, ObjectId, SceneDocument, TextAlign, TextStyle, VisualObject, WORKSPACE_NAME};
use crate::selection::SelectionTracker;
use crate::snap::SnapAssist;

pub use tool::ActiveTool;

/// How an uploaded image is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageOptions {
    /// Use the image as the background: named [`WORKSPACE_NAME`], locked,
    /// kept at the bottom of the stack and never selected.
    pub as_workspace: bool,
}

impl ImageOptions {
    pub fn workspace() -> Self {
        Self { as_workspace: true }
    }
}

/// Overrides for a new text object. Unset fields come from the session's
/// tool defaults and the configured insertion point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOptions {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub fill: Option<String>,
    pub opacity: Option<f32>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<u16>,
    pub font_style: Option<FontStyle>,
    pub underline: Option<bool>,
    pub linethrough: Option<bool>,
    pub text_align: Option<TextAlign>,
}

/// Ready-made text styles offered by the text panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPreset {
    Heading,
    Subheading,
    Paragraph,
}

impl TextPreset {
    pub fn options(self) -> TextOptions {
        let (font_size, font_weight) = match self {
            TextPreset::Heading => (80.0, Some(700)),
            TextPreset::Subheading => (44.0, Some(600)),
            TextPreset::Paragraph => (32.0, None),
        };
        TextOptions {
            font_size: Some(font_size),
            font_weight,
            ..TextOptions::default()
        }
    }
}

impl From<TextPreset> for TextOptions {
    fn from(preset: TextPreset) -> Self {
        preset.options()
    }
}

/// An encoded export, named for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// `<uuid>.<extension>`
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Result of deferred engine work, applied on the session's event loop.
enum Completion {
    Load {
        ticket: LoadTicket,
        result: Result<SceneDocument, EngineError>,
    },
    Copied {
        epoch: u64,
        result: Result<VisualObject, EngineError>,
    },
    Pasted {
        epoch: u64,
        offset: Vec2,
        result: Result<VisualObject, EngineError>,
    },
    ImageLoaded {
        epoch: u64,
        options: ImageOptions,
        result: Result<LoadedImage, EngineError>,
    },
}

pub struct Editor<E: CanvasEngine = SceneCanvas> {
    config: EditorConfig,
    engine: E,
    history: History,
    selection: SelectionTracker,
    clipboard: Clipboard,
    snap: SnapAssist,
    defaults: ToolDefaults,
    active_tool: ActiveTool,
    bus: EventBus,
    selection_cleared_callbacks: Vec<Box<dyn FnMut()>>,
    clock: Box<dyn Clock>,
    pending: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
    /// Bumped by every reset; older copy, paste and image completions are dropped.
    epoch: u64,
}

impl<E: CanvasEngine> fmt::Debug for Editor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("objects", &self.engine.objects().len())
            .field("history", &self.history)
            .field("selection", &self.selection)
            .field("active_tool", &self.active_tool)
            .field("pending", &self.pending.len())
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl Editor<SceneCanvas> {
    /// Starts a session on an in-memory canvas sized by `config`.
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        let canvas = SceneCanvas::new(config.canvas_size());
        Self::with_engine(config, canvas)
    }
}

impl<E: CanvasEngine> Editor<E> {
    /// Starts a session on `engine`, recording its current scene as the
    /// first history entry.
    pub fn with_engine(config: EditorConfig, mut engine: E) -> EditorResult<Self> {
        config.validate()?;
        let baseline = engine.to_document().to_json()?;
        engine.drain_events();

        log::info!(
            "editor session started ({}x{} canvas)",
            engine.size().x,
            engine.size().y
        );

        Ok(Self {
            history: History::new(baseline),
            selection: SelectionTracker::new(),
            clipboard: Clipboard::new(),
            snap: SnapAssist::new(config.snap_tolerance, config.guide_hide_delay_secs()),
            defaults: ToolDefaults::from_text_defaults(&config.text),
            active_tool: config.initial_tool,
            bus: EventBus::new(),
            selection_cleared_callbacks: Vec::new(),
            clock: Box::new(SystemClock::default()),
            pending: FuturesUnordered::new(),
            epoch: 0,
            engine,
            config,
        })
    }

    /// Replaces the clock used for guide auto-hide.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct engine access. Call [`Editor::pump_events`] after mutating.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn tool_defaults(&self) -> &ToolDefaults {
        &self.defaults
    }

    pub fn selected_objects(&self) -> &[ObjectId] {
        self.selection.objects()
    }

    /// Visible snap guides, for drawing on top of the scene.
    pub fn guides(&self) -> impl Iterator<Item = &VisualObject> {
        self.snap.guides()
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(self.engine.to_document().to_json()?)
    }

    /// Number of engine operations still in flight.
    pub fn pending_operations(&self) -> usize {
        self.pending.len()
    }

    pub fn subscribe(&self, handler: impl EventHandler + 'static) -> SubscriptionId {
        self.bus.subscribe(Box::new(handler))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Registers a callback run whenever the selection becomes empty.
    pub fn on_selection_cleared(&mut self, callback: impl FnMut() + 'static) {
        self.selection_cleared_callbacks.push(Box::new(callback));
    }

    pub fn active_tool(&self) -> ActiveTool {
        self.active_tool
    }

    /// Switches to `tool`; choosing the tool that is already active returns
    /// to [`ActiveTool::Select`].
    pub fn change_active_tool(&mut self, tool: ActiveTool) {
        let next = if tool == self.active_tool {
            ActiveTool::Select
        } else {
            tool
        };
        self.set_tool(next);
    }

    fn set_tool(&mut self, tool: ActiveTool) {
        if tool == self.active_tool {
            return;
        }
        let old = std::mem::replace(&mut self.active_tool, tool);
        log::debug!("active tool {:?} -> {:?}", old, tool);
        self.bus.emit(EditorEvent::ToolChanged { old, new: tool });
    }

    // ---- History ----

    /// Captures the scene and records it unless `skip` is set or a
    /// programmatic load is in progress. Every call, recorded or not, is
    /// reported as [`EditorEvent::Snapshot`].
    pub fn save(&mut self, skip: bool) {
        let json = match self.engine.to_document().to_json() {
            Ok(json) => json,
            Err(err) => {
                self.report_failure(Operation::Save, &err);
                return;
            }
        };

        if self.history.save(json.clone(), skip) {
            log::debug!("history saved entry {}", self.history.index());
            self.emit_history();
        }
        self.bus.emit(EditorEvent::Snapshot(json));
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn handle_undo(&mut self) {
        match self.history.begin_undo() {
            Some(ticket) => self.queue_load(ticket),
            None => log::debug!("nothing to undo"),
        }
    }

    pub fn handle_redo(&mut self) {
        match self.history.begin_redo() {
            Some(ticket) => self.queue_load(ticket),
            None => log::debug!("nothing to redo"),
        }
    }

    /// Replaces the scene with `json`. Once loaded, the new scene is recorded
    /// as one history entry.
    pub fn load_json(&mut self, json: impl Into<String>) {
        let ticket = self.history.begin_import(json.into());
        self.queue_load(ticket);
    }

    fn queue_load(&mut self, ticket: LoadTicket) {
        log::debug!("loading {:?} (target {:?})", ticket.kind(), ticket.target());
        let load = self.engine.load_document(ticket.snapshot().to_owned());
        self.pending
            .push(async move { Completion::Load { result: load.await, ticket } }.boxed_local());
    }

    fn finish_load(&mut self, ticket: LoadTicket, result: Result<SceneDocument, EngineError>) {
        if !self.history.is_current(&ticket) {
            log::debug!("discarding superseded {:?} load", ticket.kind());
            return;
        }
        let operation = match ticket.kind() {
            LoadKind::Undo => Operation::Undo,
            LoadKind::Redo => Operation::Redo,
            LoadKind::Import => Operation::LoadJson,
        };

        match result {
            Ok(document) => {
                self.engine.apply_document(document);
                self.pin_workspace();
                self.pump_events();
                if self.history.finish_load(&ticket, true) == LoadOutcome::Applied {
                    self.engine.request_render_all();
                    if ticket.kind() == LoadKind::Import {
                        self.save(false);
                    } else {
                        self.emit_history();
                    }
                }
            }
            Err(err) => {
                self.history.finish_load(&ticket, false);
                self.report_failure(operation, &err);
            }
        }
    }

    /// Clears the canvas back to the empty baseline and starts a fresh history.
    pub fn reset_editor(&mut self) {
        self.epoch += 1;
        self.history.suppress();
        self.engine.clear();
        self.pump_events();

        self.clipboard.clear();
        self.selection.clear();
        self.snap.reset();
        self.defaults = ToolDefaults::from_text_defaults(&self.config.text);
        self.set_tool(self.config.initial_tool);

        match self.engine.to_document().to_json() {
            Ok(baseline) => self.history.initialize(baseline),
            Err(err) => {
                self.report_failure(Operation::Save, &err);
                self.history.initialize(String::new());
            }
        }
        self.engine.request_render_all();
        log::info!("editor reset");
        self.emit_history();
    }

    // ---- Engine events and completions ----

    /// Drains the engine's event queue. Selection events update the
    /// selection mirror, drag frames run snap-assist, and all mutations seen
    /// in one call are recorded as a single history entry.
    pub fn pump_events(&mut self) {
        let mut mutated = false;
        loop {
            let events = self.engine.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                match event {
                    CanvasEvent::ObjectAdded(_) | CanvasEvent::ObjectRemoved(_) | CanvasEvent::ObjectModified(_) => mutated = true,
                    CanvasEvent::ObjectMoving(id) => self.snap_object(id),
                    CanvasEvent::SelectionCreated(ids) | CanvasEvent::SelectionUpdated(ids) => {
                        self.selection.replace(ids.clone());
                        self.bus.emit(EditorEvent::SelectionChanged(ids));
                    }
                    CanvasEvent::SelectionCleared => self.clear_selection(),
                }
            }
        }
        if mutated {
            self.save(false);
        }
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
        self.bus.emit(EditorEvent::SelectionCleared);
        for callback in &mut self.selection_cleared_callbacks {
            callback();
        }
        if self.active_tool.requires_object() {
            self.set_tool(ActiveTool::Select);
        }
    }

    /// Applies every completion that is ready. Returns `Ready` once nothing
    /// is left in flight.
    pub fn poll_completions(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            match self.pending.poll_next_unpin(cx) {
                Poll::Ready(Some(completion)) => self.apply_completion(completion),
                Poll::Ready(None) => return Poll::Ready(()),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    /// Waits for every in-flight operation, applying each as it completes.
    pub async fn settle(&mut self) {
        futures::future::poll_fn(|cx| self.poll_completions(cx)).await
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Load { ticket, result } => self.finish_load(ticket, result),
            Completion::Copied { epoch, result } => {
                if self.is_stale(epoch, Operation::Copy) {
                    return;
                }
                match result {
                    Ok(clone) => {
                        self.clipboard.store(clone);
                        self.bus.emit(EditorEvent::ClipboardChanged);
                    }
                    Err(err) => self.report_failure(Operation::Copy, &err),
                }
            }
            Completion::Pasted { epoch, offset, result } => {
                if self.is_stale(epoch, Operation::Paste) {
                    return;
                }
                match result {
                    Ok(clone) => self.insert_pasted(clone),
                    Err(err) => {
                        self.clipboard.rewind(offset);
                        self.report_failure(Operation::Paste, &err);
                    }
                }
            }
            Completion::ImageLoaded { epoch, options, result } => {
                if self.is_stale(epoch, Operation::AddImage) {
                    return;
                }
                match result {
                    Ok(image) => self.place_image(image, options),
                    Err(err) => self.report_failure(Operation::AddImage, &err),
                }
            }
        }
    }

    fn is_stale(&self, epoch: u64, operation: Operation) -> bool {
        if epoch != self.epoch {
            log::debug!("dropping {:?} completion from before reset", operation);
            return true;
        }
        false
    }

    // ---- Objects ----

    /// Validates and starts loading an image. Only formats listed in the
    /// config are accepted; anything else is rejected with a notice.
    pub fn add_image(&mut self, source: ImageSource, options: ImageOptions) -> EditorResult<()> {
        let src = source.src();
        let message = match source.format() {
            Some(format) if self.config.accepts_format(format) => None,
            Some(format) => Some(format!("{} is a {:?} image; upload PNG or JPEG instead", src, format)),
            None => Some(format!("{} is not a recognised image", src)),
        };
        if let Some(message) = message {
            log::warn!("rejected upload: {}", message);
            self.bus.emit(EditorEvent::Notice(message.clone()));
            return Err(EditorError::UnsupportedImage(message));
        }

        log::info!("loading image {}", src);
        let epoch = self.epoch;
        let load = self.engine.load_image(source);
        self.pending.push(
            async move {
                Completion::ImageLoaded {
                    epoch,
                    options,
                    result: load.await,
                }
            }
            .boxed_local(),
        );
        Ok(())
    }

    /// Fits a decoded image inside the canvas, centred, preserving its aspect ratio.
    fn place_image(&mut self, loaded: LoadedImage, options: ImageOptions) {
        let canvas = self.engine.size();
        let natural = loaded.size();
        if natural.x <= 0.0 || natural.y <= 0.0 {
            let err = EngineError::ImageDecode {
                src: loaded.src,
                reason: "image has no pixels".to_owned(),
            };
            self.report_failure(Operation::AddImage, &err);
            return;
        }

        let scale = (canvas.x / natural.x).min(canvas.y / natural.y);
        let mut image = VisualObject::image(loaded.src, natural);
        image.scale_x = scale;
        image.scale_y = scale;
        image.left = (canvas.x - natural.x * scale) / 2.0;
        image.top = (canvas.y - natural.y * scale) / 2.0;
        let id = image.id;

        if options.as_workspace {
            image.name = Some(WORKSPACE_NAME.to_owned());
            image.selectable = false;
            image.has_controls = false;

            let previous: Vec<ObjectId> = self
                .engine
                .objects()
                .iter()
                .filter(|object| object.is_workspace())
                .map(|object| object.id)
                .collect();
            for old in previous {
                self.engine.remove(old);
            }
            self.engine.add(image);
            self.engine.send_to_back(id);
        } else {
            self.engine.add(image);
            self.engine.set_active_objects(vec![id]);
        }

        self.engine.request_render_all();
        self.pump_events();
    }

    /// Adds a text box at the configured insertion point and selects it.
    pub fn add_text(&mut self, content: &str, options: impl Into<TextOptions>) -> EditorResult<ObjectId> {
        let options = options.into();
        let defaults = &self.defaults;

        let fill = options.fill.unwrap_or_else(|| defaults.fill.clone());
        let opacity = options.opacity.unwrap_or(defaults.opacity);
        let style = TextStyle {
            text: content.to_owned(),
            font_family: options.font_family.unwrap_or_else(|| defaults.font_family.clone()),
            font_size: options.font_size.unwrap_or(defaults.font_size),
            font_weight: options.font_weight.unwrap_or(defaults.font_weight),
            font_style: options.font_style.unwrap_or(defaults.font_style),
            underline: options.underline.unwrap_or(defaults.underline),
            linethrough: options.linethrough.unwrap_or(defaults.line_through),
            text_align: options.text_align.unwrap_or(defaults.text_align),
        };

        for change in [
            PropertyChange::FillColor(fill.clone()),
            PropertyChange::Opacity(opacity),
            PropertyChange::FontFamily(style.font_family.clone()),
            PropertyChange::FontSize(style.font_size),
            PropertyChange::FontWeight(style.font_weight),
        ] {
            change.validate()?;
        }

        let size = self.engine.measure_text(&style);
        let mut text = VisualObject::textbox(style, size);
        text.fill = fill;
        text.opacity = opacity;
        text.left = options.left.unwrap_or(self.config.text.left);
        text.top = options.top.unwrap_or(self.config.text.top);
        let id = text.id;

        self.engine.add(text);
        self.engine.set_active_objects(vec![id]);
        self.engine.request_render_all();
        self.pump_events();
        Ok(id)
    }

    /// Removes every selected object except the workspace.
    pub fn remove_selected(&mut self) {
        let targets: Vec<ObjectId> = self
            .selected()
            .into_iter()
            .filter(|object| !object.is_workspace())
            .map(|object| object.id)
            .collect();
        if targets.is_empty() {
            log::debug!("nothing selected to remove");
            return;
        }
        for id in targets {
            self.engine.remove(id);
        }
        self.engine.request_render_all();
        self.pump_events();
    }

    /// Moves the workspace object to the bottom of the stack. Returns its id
    /// when it had to move.
    fn pin_workspace(&mut self) -> Option<ObjectId> {
        let workspace = self.engine.objects().iter().find(|object| object.is_workspace())?.id;
        self.engine.send_to_back(workspace).then_some(workspace)
    }

    /// Selected objects in selection order.
    fn selected(&self) -> Vec<&VisualObject> {
        self.selection
            .objects()
            .iter()
            .filter_map(|id| self.engine.object(*id))
            .collect()
    }

    // ---- Clipboard ----

    /// Copies the selection, minus the workspace, into the clipboard. A
    /// multi-selection is copied as one group, members in stacking order.
    pub fn copy_object(&mut self) {
        let mut selected: Vec<VisualObject> = self
            .selected()
            .into_iter()
            .filter(|object| !object.is_workspace())
            .cloned()
            .collect();
        let source = match selected.len() {
            0 => {
                log::debug!("nothing selected to copy");
                return;
            }
            1 => selected.remove(0),
            _ => {
                selected.sort_by_key(|object| self.engine.index_of(object.id));
                VisualObject::group(selected)
            }
        };

        let epoch = self.epoch;
        let clone = self.engine.clone_object(&source);
        self.pending
            .push(async move { Completion::Copied { epoch, result: clone.await } }.boxed_local());
    }

    /// Pastes a fresh copy of the clipboard, offset from the previous paste.
    /// The clipboard advances when the paste is requested and steps back if
    /// the clone fails.
    pub fn paste_object(&mut self) {
        let offset = Vec2::splat(self.config.paste_offset);
        let Some(source) = self.clipboard.take_paste_source(offset) else {
            log::debug!("clipboard is empty");
            return;
        };

        let epoch = self.epoch;
        let clone = self.engine.clone_object(&source);
        self.pending
            .push(async move { Completion::Pasted { epoch, offset, result: clone.await } }.boxed_local());
    }

    fn insert_pasted(&mut self, clone: VisualObject) {
        self.engine.discard_active_object();

        let members = clone.into_members();
        let ids: Vec<ObjectId> = members.iter().map(|member| member.id).collect();
        for mut member in members {
            member.evented = true;
            self.engine.add(member);
        }
        self.engine.set_active_objects(ids);
        self.engine.request_render_all();
        self.pump_events();
    }

    // ---- Pointer interaction ----

    /// Selects the topmost selectable object under `point`.
    pub fn select_at(&mut self, point: Pos2, additive: bool) -> Option<ObjectId> {
        let hit = self.engine.select_at(point, additive);
        self.pump_events();
        hit
    }

    /// One frame of dragging `id` to `position`; snapping is applied.
    pub fn drag_object(&mut self, id: ObjectId, position: Pos2) -> EditorResult<()> {
        self.engine.move_object(id, position)?;
        self.pump_events();
        Ok(())
    }

    /// Ends a drag, recording the final position.
    pub fn finish_drag(&mut self, id: ObjectId) {
        self.engine.mark_modified(id);
        self.pump_events();
    }

    fn snap_object(&mut self, id: ObjectId) {
        let Some(object) = self.engine.object(id).cloned() else {
            return;
        };
        let outcome = self
            .snap
            .on_moving(&object, self.engine.size(), self.clock.now_secs());

        if let Some(position) = outcome.position {
            if let Some(live) = self.engine.object_mut(id) {
                live.set_position(position);
            }
        }
        for axis in &outcome.hidden {
            self.bus.emit(EditorEvent::GuideHidden(*axis));
        }
        for axis in &outcome.shown {
            self.bus.emit(EditorEvent::GuideShown(*axis));
        }
        self.engine.request_render_all();
    }

    /// Hides guides whose display time has run out. Call once per frame.
    pub fn tick(&mut self) {
        let hidden = self.snap.tick(self.clock.now_secs());
        if hidden.is_empty() {
            return;
        }
        for axis in hidden {
            self.bus.emit(EditorEvent::GuideHidden(axis));
        }
        self.engine.request_render_all();
    }

    // ---- Export ----

    /// Exports the canvas as PNG.
    pub fn save_png(&mut self) -> EditorResult<ExportedFile> {
        let options = ExportOptions {
            format: ExportFormat::Png,
            ..self.config.export.clone()
        };
        self.export(&options)
    }

    pub fn export(&mut self, options: &ExportOptions) -> EditorResult<ExportedFile> {
        match self.engine.export(options) {
            Ok(bytes) => {
                let file_name = format!("{}.{}", uuid::Uuid::new_v4(), options.format.extension());
                log::info!("exported {} ({} bytes)", file_name, bytes.len());
                Ok(ExportedFile {
                    file_name,
                    mime_type: options.format.mime_type(),
                    bytes,
                })
            }
            Err(err) => {
                self.report_failure(Operation::Export, &err);
                Err(err.into())
            }
        }
    }

    // ---- Reporting ----

    fn emit_history(&self) {
        self.bus.emit(EditorEvent::HistoryChanged {
            index: self.history.index(),
            len: self.history.len(),
        });
    }

    fn report_failure(&self, operation: Operation, err: &dyn fmt::Display) {
        log::error!("{:?} failed: {}", operation, err);
        self.bus.emit(EditorEvent::OperationFailed {
            operation,
            message: err.to_string(),
        });
    }
}
