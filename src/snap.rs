//! Centre-line snapping for dragged objects.
//!
//! Each axis is evaluated on its own. A guide is an overlay object owned by
//! [`SnapAssist`]; it is created on first use, then repositioned and toggled
//! instead of being recreated, and it never enters the scene document.

use egui::{Pos2, Vec2};

use crate::scene::{GuideAxis, ObjectKind, VisualObject};

const GUIDE_COLOR: &str = "rgba(255, 0, 255, 1)";

#[derive(Debug, Clone)]
struct Guide {
    object: VisualObject,
    visible: bool,
    shown_at: f64,
}

impl Guide {
    fn new(axis: GuideAxis) -> Self {
        let mut object = VisualObject::new(ObjectKind::Guide { axis }, Vec2::ZERO);
        object.fill = GUIDE_COLOR.to_owned();
        object.stroke = Some(GUIDE_COLOR.to_owned());
        object.selectable = false;
        object.has_controls = false;
        object.evented = false;
        object.exclude_from_export = true;
        Self {
            object,
            visible: false,
            shown_at: 0.0,
        }
    }

    /// Stretches the guide across the canvas through its centre.
    fn place(&mut self, axis: GuideAxis, canvas_size: Vec2) {
        let center = canvas_size / 2.0;
        match axis {
            GuideAxis::Vertical => {
                self.object.left = center.x;
                self.object.top = 0.0;
                self.object.width = 0.0;
                self.object.height = canvas_size.y;
            }
            GuideAxis::Horizontal => {
                self.object.left = 0.0;
                self.object.top = center.y;
                self.object.width = canvas_size.x;
                self.object.height = 0.0;
            }
        }
    }
}

/// Result of evaluating one drag frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapOutcome {
    /// Corrected top-left position, when at least one axis snapped.
    pub position: Option<Pos2>,
    /// Guides that became visible on this frame.
    pub shown: Vec<GuideAxis>,
    /// Guides that were hidden on this frame.
    pub hidden: Vec<GuideAxis>,
}

#[derive(Debug, Clone)]
pub struct SnapAssist {
    tolerance: f32,
    hide_delay: f64,
    vertical: Option<Guide>,
    horizontal: Option<Guide>,
}

impl SnapAssist {
    pub fn new(tolerance: f32, hide_delay_secs: f64) -> Self {
        Self {
            tolerance,
            hide_delay: hide_delay_secs,
            vertical: None,
            horizontal: None,
        }
    }

    /// Evaluates a drag frame for `object` at time `now` (seconds).
    pub fn on_moving(&mut self, object: &VisualObject, canvas_size: Vec2, now: f64) -> SnapOutcome {
        let mut outcome = SnapOutcome::default();
        let size = object.scaled_size();
        let center = object.center();
        let canvas_center = canvas_size / 2.0;
        let mut position = object.position();
        let mut snapped = false;

        if (center.x - canvas_center.x).abs() < self.tolerance {
            position.x = canvas_center.x - size.x / 2.0;
            snapped = true;
            self.show(GuideAxis::Vertical, canvas_size, now, &mut outcome);
        } else {
            self.hide(GuideAxis::Vertical, &mut outcome.hidden);
        }

        if (center.y - canvas_center.y).abs() < self.tolerance {
            position.y = canvas_center.y - size.y / 2.0;
            snapped = true;
            self.show(GuideAxis::Horizontal, canvas_size, now, &mut outcome);
        } else {
            self.hide(GuideAxis::Horizontal, &mut outcome.hidden);
        }

        if snapped {
            outcome.position = Some(position);
        }
        outcome
    }

    /// Hides every guide whose delay has elapsed. Returns the axes hidden.
    pub fn tick(&mut self, now: f64) -> Vec<GuideAxis> {
        let mut hidden = Vec::new();
        for axis in [GuideAxis::Vertical, GuideAxis::Horizontal] {
            let expired = self
                .guide(axis)
                .is_some_and(|guide| guide.visible && now >= guide.shown_at + self.hide_delay);
            if expired {
                self.hide(axis, &mut hidden);
            }
        }
        hidden
    }

    /// Currently visible guide objects.
    pub fn guides(&self) -> impl Iterator<Item = &VisualObject> {
        [&self.vertical, &self.horizontal]
            .into_iter()
            .flatten()
            .filter(|guide| guide.visible)
            .map(|guide| &guide.object)
    }

    pub fn is_visible(&self, axis: GuideAxis) -> bool {
        self.guide(axis).is_some_and(|guide| guide.visible)
    }

    /// The guide object for `axis`, if it was ever created.
    pub fn guide_object(&self, axis: GuideAxis) -> Option<&VisualObject> {
        self.guide(axis).map(|guide| &guide.object)
    }

    /// Drops both guides.
    pub fn reset(&mut self) {
        self.vertical = None;
        self.horizontal = None;
    }

    fn guide(&self, axis: GuideAxis) -> Option<&Guide> {
        match axis {
            GuideAxis::Vertical => self.vertical.as_ref(),
            GuideAxis::Horizontal => self.horizontal.as_ref(),
        }
    }

    fn slot(&mut self, axis: GuideAxis) -> &mut Option<Guide> {
        match axis {
            GuideAxis::Vertical => &mut self.vertical,
            GuideAxis::Horizontal => &mut self.horizontal,
        }
    }

    fn show(&mut self, axis: GuideAxis, canvas_size: Vec2, now: f64, outcome: &mut SnapOutcome) {
        let guide = self.slot(axis).get_or_insert_with(|| Guide::new(axis));
        guide.place(axis, canvas_size);
        if !guide.visible {
            guide.visible = true;
            outcome.shown.push(axis);
        }
        guide.shown_at = now;
    }

    fn hide(&mut self, axis: GuideAxis, hidden: &mut Vec<GuideAxis>) {
        if let Some(guide) = self.slot(axis) {
            if guide.visible {
                guide.visible = false;
                hidden.push(axis);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(1000.0, 600.0);

    fn object_centered_at(x: f32, y: f32) -> VisualObject {
        let mut object = VisualObject::image("photo.png", Vec2::new(100.0, 50.0));
        object.set_position(Pos2::new(x - 50.0, y - 25.0));
        object
    }

    #[test]
    fn test_snaps_to_vertical_centerline_only() {
        let mut snap = SnapAssist::new(15.0, 0.4);
        let outcome = snap.on_moving(&object_centered_at(508.0, 100.0), CANVAS, 0.0);

        assert_eq!(outcome.position, Some(Pos2::new(450.0, 75.0)));
        assert_eq!(outcome.shown, vec![GuideAxis::Vertical]);
        assert!(snap.is_visible(GuideAxis::Vertical));
        assert!(!snap.is_visible(GuideAxis::Horizontal));
    }

    #[test]
    fn test_guide_is_reused() {
        let mut snap = SnapAssist::new(15.0, 0.4);
        snap.on_moving(&object_centered_at(500.0, 100.0), CANVAS, 0.0);
        let first = snap.guide_object(GuideAxis::Vertical).unwrap().id;

        snap.on_moving(&object_centered_at(900.0, 100.0), CANVAS, 0.1);
        snap.on_moving(&object_centered_at(505.0, 100.0), CANVAS, 0.2);
        assert_eq!(snap.guide_object(GuideAxis::Vertical).unwrap().id, first);
    }

    #[test]
    fn test_guide_is_never_interactive() {
        let mut snap = SnapAssist::new(15.0, 0.4);
        snap.on_moving(&object_centered_at(500.0, 300.0), CANVAS, 0.0);

        for guide in snap.guides() {
            assert!(!guide.selectable);
            assert!(!guide.evented);
            assert!(guide.exclude_from_export);
        }
        assert_eq!(snap.guides().count(), 2);
    }

    #[test]
    fn test_tick_hides_after_delay() {
        let mut snap = SnapAssist::new(15.0, 0.4);
        snap.on_moving(&object_centered_at(500.0, 100.0), CANVAS, 0.0);

        assert!(snap.tick(0.3).is_empty());
        assert_eq!(snap.tick(0.4), vec![GuideAxis::Vertical]);
        assert!(!snap.is_visible(GuideAxis::Vertical));
    }
}
