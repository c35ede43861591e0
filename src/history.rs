//! Undo/redo over serialized scene snapshots.
//!
//! The history owns an ordered list of snapshots and a cursor pointing at
//! the one currently on screen. Programmatic loads (undo, redo, import) are
//! asynchronous: starting one sets the suppression flag and hands out a
//! [`LoadTicket`]; only the completion of the newest ticket clears the flag
//! again, so the mutation events a load produces are never recorded.

/// What a programmatic load is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Undo,
    Redo,
    /// Replace the document with an external one, recorded as a new entry.
    Import,
}

/// Handle for one in-flight programmatic load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    kind: LoadKind,
    target: Option<usize>,
    snapshot: String,
}

impl LoadTicket {
    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    /// History index the cursor moves to when the load succeeds.
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingLoad {
    generation: u64,
    target: Option<usize>,
}

/// How a finished load was taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The cursor now points at the loaded entry (or, for imports, nothing moved yet).
    Applied,
    /// The load failed; cursor unchanged.
    Failed,
    /// A newer load superseded this one; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: usize,
    suppressed: bool,
    pending: Option<PendingLoad>,
    next_generation: u64,
}

impl History {
    /// Creates a history whose only entry is `initial`.
    pub fn new(initial: String) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            suppressed: false,
            pending: None,
            next_generation: 0,
        }
    }

    /// Resets to a single entry and invalidates any in-flight load.
    pub fn initialize(&mut self, document: String) {
        self.entries.clear();
        self.entries.push(document);
        self.index = 0;
        self.suppressed = false;
        self.pending = None;
        self.next_generation += 1;
    }

    /// Records `snapshot` as the newest entry, discarding anything after the
    /// cursor. Returns `false` without recording when `skip` is set or saves
    /// are suppressed.
    pub fn save(&mut self, snapshot: String, skip: bool) -> bool {
        if skip || self.suppressed {
            log::trace!("history save skipped (skip={}, suppressed={})", skip, self.suppressed);
            return false;
        }

        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;
        true
    }

    /// Index the next undo/redo steps from: the pending target if a load is
    /// in flight, otherwise the cursor.
    fn effective_index(&self) -> usize {
        self.pending
            .and_then(|pending| pending.target)
            .unwrap_or(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.effective_index() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.effective_index() + 1 < self.entries.len()
    }

    pub fn begin_undo(&mut self) -> Option<LoadTicket> {
        if !self.can_undo() {
            return None;
        }
        let target = self.effective_index() - 1;
        Some(self.begin_load(LoadKind::Undo, Some(target), self.entries[target].clone()))
    }

    pub fn begin_redo(&mut self) -> Option<LoadTicket> {
        if !self.can_redo() {
            return None;
        }
        let target = self.effective_index() + 1;
        Some(self.begin_load(LoadKind::Redo, Some(target), self.entries[target].clone()))
    }

    /// Starts loading an external document. The caller records it with
    /// [`History::save`] once the load has been applied.
    pub fn begin_import(&mut self, document: String) -> LoadTicket {
        self.begin_load(LoadKind::Import, None, document)
    }

    fn begin_load(&mut self, kind: LoadKind, target: Option<usize>, snapshot: String) -> LoadTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.suppressed = true;
        self.pending = Some(PendingLoad { generation, target });
        LoadTicket {
            generation,
            kind,
            target,
            snapshot,
        }
    }

    /// Whether `ticket` belongs to the newest load still in flight.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.pending
            .is_some_and(|pending| pending.generation == ticket.generation)
    }

    /// Completes a load. Only the newest ticket moves the cursor and clears
    /// the suppression flag; stale tickets are ignored.
    pub fn finish_load(&mut self, ticket: &LoadTicket, succeeded: bool) -> LoadOutcome {
        if !self.is_current(ticket) {
            return LoadOutcome::Stale;
        }

        self.pending = None;
        self.suppressed = false;

        if !succeeded {
            return LoadOutcome::Failed;
        }
        if let Some(target) = ticket.target {
            if target < self.entries.len() {
                self.index = target;
            }
        }
        LoadOutcome::Applied
    }

    /// Suppresses saves until the next [`History::initialize`] or finished load.
    pub fn suppress(&mut self) {
        self.suppressed = true;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// The snapshot the cursor points at.
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }
}
