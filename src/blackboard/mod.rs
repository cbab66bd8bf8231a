//! Blackboard — a strongly-typed associative store for decision modules.
//!
//! Independent consumers (behaviour-tree nodes, planners, sensors) share
//! named, typed values through the blackboard without holding references
//! to each other. The store enforces a closed set of permitted value
//! kinds, detects duplicate keys and kind mismatches before mutating, and
//! forwards every successful mutation to an injected
//! [`EventBroker`](crate::events::EventBroker).
//!
//! Keys are strings, addressed internally through a deterministic 64-bit
//! fingerprint; see [`store::fingerprint`].
//!
//! All checked operations fail softly: a `false` return (or the supplied
//! default) plus a logged diagnostic. The only hard-failure surface is the
//! indexed accessor form via [`KeySelector`], which is documented to panic
//! on absence or kind mismatch.

pub mod error;
pub mod selector;
pub mod store;
pub mod value;

pub use error::BlackboardError;
pub use selector::KeySelector;
pub use store::{fingerprint, Blackboard};
pub use value::{BlackboardType, ObjectRef, Value, ValueKind, Vec2, Vec3};
