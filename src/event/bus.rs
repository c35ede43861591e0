use std::cell::{Cell, RefCell};

use crate::event::{EditorEvent, EventHandler};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Broadcasts editor events to the UI, in subscription order.
pub struct EventBus {
    handlers: RefCell<Vec<(SubscriptionId, Box<dyn EventHandler>)>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handler_count()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Removes a handler. Returns whether it was still subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Delivers `event` to every handler. An event emitted from inside a
    /// handler is dropped with a warning.
    pub fn emit(&self, event: EditorEvent) {
        log::trace!("emit {:?}", event);
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            log::warn!("dropping re-entrant event {:?}", event);
            return;
        };
        for (_, handler) in handlers.iter_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.try_borrow().map(|handlers| handlers.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder(seen: &Arc<Mutex<Vec<EditorEvent>>>) -> Box<dyn EventHandler> {
        let seen = Arc::clone(seen);
        Box::new(move |event: &EditorEvent| seen.lock().push(event.clone()))
    }

    #[test]
    fn test_emit_reaches_every_handler() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        bus.subscribe(recorder(&seen));
        bus.subscribe(recorder(&seen));

        bus.emit(EditorEvent::SelectionCleared);
        assert_eq!(bus.handler_count(), 2);
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_unsubscribed_handler_is_silent() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let id = bus.subscribe(recorder(&seen));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(EditorEvent::ClipboardChanged);
        assert!(seen.lock().is_empty());
    }
}
