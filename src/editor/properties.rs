//! Paired `change_*` / `get_active_*` operations and stacking order.

use std::cmp::Reverse;

use super::Editor;
use crate::engine::CanvasEngine;
use crate::error::EditorResult;
use crate::property::PropertyChange;
use crate::scene::{FontStyle, ObjectId, TextAlign, TextStyle, VisualObject};

impl<E: CanvasEngine> Editor<E> {
    /// Applies `change` to every selected object it is eligible for and
    /// remembers it as the session default. Returns how many objects changed.
    pub fn apply_property(&mut self, change: PropertyChange) -> EditorResult<usize> {
        change.validate()?;
        self.defaults.remember(&change);

        let mut changed = 0;
        for id in self.selection.objects().to_vec() {
            let remeasure = {
                let Some(object) = self.engine.object_mut(id) else {
                    continue;
                };
                if !change.apply(object) {
                    continue;
                }
                if change.affects_geometry() {
                    object.text_style().cloned()
                } else {
                    None
                }
            };

            if let Some(style) = remeasure {
                let size = self.engine.measure_text(&style);
                if let Some(object) = self.engine.object_mut(id) {
                    object.width = size.x;
                    object.height = size.y;
                }
            }
            self.engine.mark_modified(id);
            changed += 1;
        }

        log::debug!("{:?} applied to {} object(s)", change, changed);
        self.engine.request_render_all();
        self.pump_events();
        Ok(changed)
    }

    pub fn change_fill_color(&mut self, color: impl Into<String>) -> EditorResult<()> {
        self.apply_property(PropertyChange::FillColor(color.into())).map(drop)
    }

    pub fn change_opacity(&mut self, opacity: f32) -> EditorResult<()> {
        self.apply_property(PropertyChange::Opacity(opacity)).map(drop)
    }

    pub fn change_font_family(&mut self, family: impl Into<String>) -> EditorResult<()> {
        self.apply_property(PropertyChange::FontFamily(family.into())).map(drop)
    }

    pub fn change_font_size(&mut self, size: f32) -> EditorResult<()> {
        self.apply_property(PropertyChange::FontSize(size)).map(drop)
    }

    pub fn change_font_weight(&mut self, weight: u16) -> EditorResult<()> {
        self.apply_property(PropertyChange::FontWeight(weight)).map(drop)
    }

    pub fn change_font_style(&mut self, style: FontStyle) -> EditorResult<()> {
        self.apply_property(PropertyChange::FontStyle(style)).map(drop)
    }

    pub fn change_font_underline(&mut self, underline: bool) -> EditorResult<()> {
        self.apply_property(PropertyChange::Underline(underline)).map(drop)
    }

    pub fn change_font_line_through(&mut self, line_through: bool) -> EditorResult<()> {
        self.apply_property(PropertyChange::LineThrough(line_through)).map(drop)
    }

    pub fn change_text_align(&mut self, align: TextAlign) -> EditorResult<()> {
        self.apply_property(PropertyChange::TextAlign(align)).map(drop)
    }

    fn first_selected(&self) -> Option<&VisualObject> {
        self.selection.first().and_then(|id| self.engine.object(id))
    }

    fn active_text_style(&self) -> Option<&TextStyle> {
        self.first_selected().and_then(VisualObject::text_style)
    }

    pub fn get_active_fill_color(&self) -> String {
        self.first_selected()
            .map(|object| object.fill.clone())
            .unwrap_or_else(|| self.defaults.fill.clone())
    }

    pub fn get_active_opacity(&self) -> f32 {
        self.first_selected()
            .map(|object| object.opacity)
            .unwrap_or(self.defaults.opacity)
    }

    pub fn get_active_font_family(&self) -> String {
        self.active_text_style()
            .map(|style| style.font_family.clone())
            .unwrap_or_else(|| self.defaults.font_family.clone())
    }

    pub fn get_active_font_size(&self) -> f32 {
        self.active_text_style()
            .map(|style| style.font_size)
            .unwrap_or(self.defaults.font_size)
    }

    pub fn get_active_font_weight(&self) -> u16 {
        self.active_text_style()
            .map(|style| style.font_weight)
            .unwrap_or(self.defaults.font_weight)
    }

    pub fn get_active_font_style(&self) -> FontStyle {
        self.active_text_style()
            .map(|style| style.font_style)
            .unwrap_or(self.defaults.font_style)
    }

    pub fn get_active_font_underline(&self) -> bool {
        self.active_text_style()
            .map(|style| style.underline)
            .unwrap_or(self.defaults.underline)
    }

    pub fn get_active_font_line_through(&self) -> bool {
        self.active_text_style()
            .map(|style| style.linethrough)
            .unwrap_or(self.defaults.line_through)
    }

    pub fn get_active_text_align(&self) -> TextAlign {
        self.active_text_style()
            .map(|style| style.text_align)
            .unwrap_or(self.defaults.text_align)
    }

    // ---- Stacking ----

    /// Selected objects other than the workspace, with their stacking index.
    fn stacking_targets(&self) -> Vec<(usize, ObjectId)> {
        self.selection
            .objects()
            .iter()
            .filter_map(|id| {
                let object = self.engine.object(*id)?;
                if object.is_workspace() {
                    return None;
                }
                Some((self.engine.index_of(*id)?, *id))
            })
            .collect()
    }

    /// Raises each selected object one step. Selected neighbours keep their
    /// relative order.
    pub fn bring_forward(&mut self) {
        let mut targets = self.stacking_targets();
        targets.sort_by_key(|(index, _)| Reverse(*index));

        let mut ceiling = self.engine.objects().len();
        let mut moved = Vec::new();
        for (index, id) in targets {
            if index + 1 < ceiling && self.engine.bring_forward(id) {
                moved.push(id);
            } else {
                ceiling = index;
            }
        }
        self.finish_restack(moved);
    }

    /// Lowers each selected object one step, never below the workspace.
    pub fn send_backward(&mut self) {
        let mut targets = self.stacking_targets();
        targets.sort_by_key(|(index, _)| *index);

        let mut floor = 0;
        for object in self.engine.objects() {
            if object.is_workspace() {
                floor += 1;
            } else {
                break;
            }
        }

        let mut moved = Vec::new();
        for (index, id) in targets {
            if index > floor && self.engine.send_backward(id) {
                moved.push(id);
            } else {
                floor = index + 1;
            }
        }
        self.finish_restack(moved);
    }

    fn finish_restack(&mut self, mut moved: Vec<ObjectId>) {
        moved.extend(self.pin_workspace());
        if moved.is_empty() {
            log::debug!("stacking order unchanged");
            return;
        }

        for id in moved {
            self.engine.mark_modified(id);
        }
        self.engine.request_render_all();
        self.pump_events();
    }
}
