//! Key selectors — typed handles naming a kind-specific blackboard entry.

use std::marker::PhantomData;

use crate::blackboard::value::BlackboardType;

/// A typed key selector.
///
/// Wraps a key string together with the kind the call site expects at that
/// key. The store's `Index` impls accept selectors for the unchecked
/// accessor form: call sites that have guaranteed an entry's presence and
/// kind by construction index the store directly instead of going through
/// `value_or`. The store only ever reads [`key`](KeySelector::key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySelector<T> {
    /// The entry's key string.
    pub key: String,
    _kind: PhantomData<fn() -> T>,
}

impl<T: BlackboardType> KeySelector<T> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _kind: PhantomData,
        }
    }
}
