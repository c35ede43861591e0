use egui::Vec2;

use crate::scene::VisualObject;

/// Single-slot holding area for the most recently copied object or group.
///
/// Copying replaces the slot, pasting never empties it. Each paste request
/// returns a copy offset from the stored clone and moves the stored clone by
/// the same offset, so successive pastes cascade diagonally.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<VisualObject>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, object: VisualObject) {
        log::debug!("clipboard holds {} {}", object.kind.name(), object.id);
        self.slot = Some(object);
    }

    /// Returns the object to paste, already offset by `offset`, and advances
    /// the stored clone. `None` when empty.
    pub fn take_paste_source(&mut self, offset: Vec2) -> Option<VisualObject> {
        let stored = self.slot.as_mut()?;
        stored.translate(offset);
        Some(stored.clone())
    }

    /// Undoes one [`Clipboard::take_paste_source`] step, for a paste that
    /// failed before anything was inserted.
    pub fn rewind(&mut self, offset: Vec2) {
        if let Some(stored) = self.slot.as_mut() {
            stored.translate(-offset);
        }
    }

    pub fn peek(&self) -> Option<&VisualObject> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
