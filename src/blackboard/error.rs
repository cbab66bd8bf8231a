//! Error types for blackboard operations.

use thiserror::Error;

use crate::blackboard::value::ValueKind;

/// Errors reported by the checked blackboard operations.
///
/// All of these are soft failures: the bool-returning operations log them
/// at the appropriate severity and return `false`, leaving the store
/// untouched. The `try_*` forms surface them directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    /// Add on a key that is already present.
    #[error("key {key:?} already exists")]
    DuplicateKey { key: String },

    /// Two distinct key strings produced the same fingerprint.
    #[error("key {key:?} collides with existing key {existing:?} (same fingerprint)")]
    KeyCollision { key: String, existing: String },

    /// Dynamic add with a type outside the permitted set.
    #[error("unsupported type: {type_name}")]
    UnsupportedKind { type_name: &'static str },

    /// Update or lookup on an absent key.
    #[error("key {key:?} does not exist")]
    MissingKey { key: String },

    /// Requested kind differs from the stored entry's kind.
    #[error("type mismatch for key {key:?}: requested {requested}, stored {stored}")]
    KindMismatch {
        key: String,
        requested: ValueKind,
        stored: ValueKind,
    },
}

impl BlackboardError {
    /// Emit this error at the severity the diagnostic contract assigns it:
    /// unsupported kinds and fingerprint collisions are errors, the rest
    /// are warnings.
    pub(crate) fn log(&self) {
        match self {
            Self::UnsupportedKind { .. } | Self::KeyCollision { .. } => log::error!("{self}"),
            _ => log::warn!("{self}"),
        }
    }
}
