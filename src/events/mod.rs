//! Change-notification events and the broker seam.
//!
//! Every successful add, update, and remove on a
//! [`Blackboard`](crate::blackboard::Blackboard) publishes one event to
//! the [`EventBroker`] the store was constructed with. Event distribution
//! itself (fan-out, threading, subscriptions) lives behind the trait and
//! is not implemented here.

/// Broker trait and the bundled sink implementations.
pub mod broker;

/// Event payload structs and the [`BlackboardEvent`] wrapper.
pub mod types;

pub use broker::{EventBroker, NullBroker, RecordingBroker};
pub use types::{BlackboardEvent, EntryAddedEvent, EntryDeletedEvent, EntryUpdatedEvent};
