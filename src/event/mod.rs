mod bus;
mod events;

pub use bus::{EventBus, SubscriptionId};
pub use events::{CanvasEvent, EditorEvent, Operation};

/// Receives every [`EditorEvent`] broadcast by an editor session.
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&EditorEvent) + Send,
{
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}
