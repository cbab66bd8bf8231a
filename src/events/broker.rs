//! Broker seam — where blackboard change notifications leave this crate.
//!
//! The broker is an injected capability rather than a process-wide
//! singleton: each store instance is constructed with its own sink, so
//! stores can be tested in isolation and wired to different distribution
//! backends.

use parking_lot::Mutex;

use super::types::BlackboardEvent;

/// Sink for blackboard change notifications.
///
/// Publish is fire-and-forget: the store invokes it synchronously, in-line
/// with the mutating call, and never consumes a return value. Whatever
/// dispatch or threading the implementation does behind it is outside the
/// store's contract.
pub trait EventBroker: Send + Sync {
    fn publish(&self, event: BlackboardEvent);
}

// ---------------------------------------------------------------------------
// NullBroker
// ---------------------------------------------------------------------------

/// Broker that discards every event, for detached stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBroker;

impl EventBroker for NullBroker {
    fn publish(&self, _event: BlackboardEvent) {}
}

// ---------------------------------------------------------------------------
// RecordingBroker
// ---------------------------------------------------------------------------

/// Broker that records every published event in order.
///
/// Primarily for assertions in tests, but also usable to buffer events for
/// an inspector.
#[derive(Debug, Default)]
pub struct RecordingBroker {
    events: Mutex<Vec<BlackboardEvent>>,
}

impl RecordingBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    pub fn events(&self) -> Vec<BlackboardEvent> {
        self.events.lock().clone()
    }

    /// Drain the recorded events, leaving the broker empty.
    pub fn take(&self) -> Vec<BlackboardEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventBroker for RecordingBroker {
    fn publish(&self, event: BlackboardEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackboard::Value;
    use crate::events::types::EntryAddedEvent;

    #[test]
    fn test_recording_broker_preserves_order() {
        let broker = RecordingBroker::new();
        broker.publish(BlackboardEvent::EntryAdded(EntryAddedEvent::new(
            "a",
            Value::Int(1),
        )));
        broker.publish(BlackboardEvent::EntryAdded(EntryAddedEvent::new(
            "b",
            Value::Int(2),
        )));

        let events = broker.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].key(), "a");
        assert_eq!(events[1].key(), "b");

        let drained = broker.take();
        assert_eq!(drained.len(), 2);
        assert!(broker.events().is_empty());
    }

    #[test]
    fn test_null_broker_discards() {
        // Compiles and does nothing; publish has no observable effect.
        NullBroker.publish(BlackboardEvent::EntryAdded(EntryAddedEvent::new(
            "k",
            Value::Bool(true),
        )));
    }
}
