//! Event payloads emitted by the blackboard on mutation.
//!
//! One struct per event shape, each stamped with its creation time. The
//! [`BlackboardEvent`] wrapper is what actually crosses the broker seam.

use chrono::{DateTime, Utc};

use crate::blackboard::Value;

// ---------------------------------------------------------------------------
// EntryAddedEvent
// ---------------------------------------------------------------------------

/// Emitted after a new entry is inserted.
#[derive(Debug, Clone)]
pub struct EntryAddedEvent {
    /// The entry's key string.
    pub key: String,
    /// The inserted value.
    pub value: Value,
    /// UTC timestamp of event creation.
    pub timestamp: DateTime<Utc>,
}

impl EntryAddedEvent {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EntryUpdatedEvent
// ---------------------------------------------------------------------------

/// Emitted after an existing entry's value is replaced.
#[derive(Debug, Clone)]
pub struct EntryUpdatedEvent {
    /// The entry's key string.
    pub key: String,
    /// The value the entry held before the update.
    pub previous: Value,
    /// The value the entry holds now.
    pub value: Value,
    /// UTC timestamp of event creation.
    pub timestamp: DateTime<Utc>,
}

impl EntryUpdatedEvent {
    pub fn new(key: impl Into<String>, previous: Value, value: Value) -> Self {
        Self {
            key: key.into(),
            previous,
            value,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EntryDeletedEvent
// ---------------------------------------------------------------------------

/// Emitted after an entry is removed.
#[derive(Debug, Clone)]
pub struct EntryDeletedEvent {
    /// The removed entry's key string.
    pub key: String,
    /// UTC timestamp of event creation.
    pub timestamp: DateTime<Utc>,
}

impl EntryDeletedEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// BlackboardEvent
// ---------------------------------------------------------------------------

/// The payload handed to [`EventBroker::publish`](super::EventBroker::publish).
#[derive(Debug, Clone)]
pub enum BlackboardEvent {
    EntryAdded(EntryAddedEvent),
    EntryUpdated(EntryUpdatedEvent),
    EntryDeleted(EntryDeletedEvent),
}

impl BlackboardEvent {
    /// Event type discriminator string.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::EntryAdded(_) => "blackboard_entry_added",
            Self::EntryUpdated(_) => "blackboard_entry_updated",
            Self::EntryDeleted(_) => "blackboard_entry_deleted",
        }
    }

    /// The key of the entry this event concerns.
    pub fn key(&self) -> &str {
        match self {
            Self::EntryAdded(e) => &e.key,
            Self::EntryUpdated(e) => &e.key,
            Self::EntryDeleted(e) => &e.key,
        }
    }
}
