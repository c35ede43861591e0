use crate::scene::ObjectId;

/// Mirror of the engine's live selection. Holds identifiers only; the
/// objects themselves stay owned by the scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    objects: Vec<ObjectId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with exactly `objects`, in the order reported.
    pub fn replace(&mut self, objects: Vec<ObjectId>) {
        self.objects = objects;
    }

    /// Empties the selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_selection = !self.objects.is_empty();
        self.objects.clear();
        had_selection
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    pub fn first(&self) -> Option<ObjectId> {
        self.objects.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_replace_keeps_reported_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = SelectionTracker::new();
        selection.replace(vec![b, a]);

        assert_eq!(selection.first(), Some(b));
        assert!(selection.contains(a));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_clear_reports_previous_state() {
        let mut selection = SelectionTracker::new();
        assert!(!selection.clear());

        selection.replace(vec![Uuid::new_v4()]);
        assert!(selection.clear());
        assert!(selection.is_empty());
    }
}
