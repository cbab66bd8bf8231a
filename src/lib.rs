//! # Blackboard
//!
//! A small, strongly-typed associative store for sharing named values
//! between independent decision-making modules, with change notifications
//! delivered through an injected broker.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use blackboard::{Blackboard, BlackboardEvent, RecordingBroker};
//!
//! let broker = Arc::new(RecordingBroker::new());
//! let mut bb = Blackboard::new(broker.clone());
//!
//! bb.add("score", 10);
//! bb.update("score", 25);
//! assert_eq!(bb.get_value::<i64>("score"), 25);
//!
//! bb.remove("score");
//! assert_eq!(bb.value_or::<i64>("score", -1), -1);
//!
//! let events = broker.events();
//! assert_eq!(events.len(), 3);
//! assert!(matches!(events[2], BlackboardEvent::EntryDeleted(_)));
//! ```

pub mod blackboard;
pub mod events;

pub use blackboard::{
    fingerprint, Blackboard, BlackboardError, BlackboardType, KeySelector, ObjectRef, Value,
    ValueKind, Vec2, Vec3,
};
pub use events::{
    BlackboardEvent, EntryAddedEvent, EntryDeletedEvent, EntryUpdatedEvent, EventBroker,
    NullBroker, RecordingBroker,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
