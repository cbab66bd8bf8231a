//! The blackboard store — a fingerprint-keyed map of typed entries.
//!
//! Keys are strings, but the map's actual lookup key is a deterministic
//! 64-bit fingerprint of the string. Each entry retains its original key
//! so that a genuine fingerprint collision between two distinct strings is
//! detected and reported rather than silently blocking one of them.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;
use std::ops::Index;
use std::sync::Arc;

use crate::blackboard::error::BlackboardError;
use crate::blackboard::selector::KeySelector;
use crate::blackboard::value::{BlackboardType, ObjectRef, Value, Vec2, Vec3};
use crate::events::{
    BlackboardEvent, EntryAddedEvent, EntryDeletedEvent, EntryUpdatedEvent, EventBroker,
    NullBroker,
};

// ---------------------------------------------------------------------------
// Fingerprinting
// ---------------------------------------------------------------------------

/// 64-bit FNV-1a offset basis.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
/// 64-bit FNV-1a prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Derive the integer fingerprint the store uses as its lookup key.
///
/// FNV-1a over the key's UTF-8 bytes. Deterministic across processes, so
/// fingerprints in a [`dump`](Blackboard::dump) can be compared against
/// earlier recordings.
pub fn fingerprint(key: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in key.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One (key, value) association held by the store.
#[derive(Debug, Clone)]
struct Entry {
    /// Original key string, kept for diagnostics and collision detection.
    key: String,
    value: Value,
}

// ---------------------------------------------------------------------------
// Blackboard
// ---------------------------------------------------------------------------

/// A strongly-typed associative store shared between decision-making
/// modules.
///
/// Consumers read and write named values without holding references to
/// each other; every mutation is forwarded to the injected [`EventBroker`]
/// as a fire-and-forget notification. All checked operations validate
/// before mutating and fail softly (a `false` return plus a diagnostic),
/// so the store is never left partially mutated.
///
/// # Example
///
/// ```
/// use blackboard::Blackboard;
///
/// let mut bb = Blackboard::detached();
/// assert!(bb.add("score", 10));
/// assert_eq!(bb.get_value::<i64>("score"), 10);
/// assert!(bb.update("score", 25));
/// assert!(bb.remove("score"));
/// assert_eq!(bb.value_or::<i64>("score", -1), -1);
/// ```
pub struct Blackboard {
    map: HashMap<u64, Entry>,
    broker: Arc<dyn EventBroker>,
}

impl Default for Blackboard {
    fn default() -> Self {
        Self::detached()
    }
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blackboard")
            .field("entries", &self.map.len())
            .finish_non_exhaustive()
    }
}

impl Blackboard {
    /// Create a store that publishes change notifications to `broker`.
    pub fn new(broker: Arc<dyn EventBroker>) -> Self {
        Self {
            map: HashMap::new(),
            broker,
        }
    }

    /// Create a store with no notification sink.
    pub fn detached() -> Self {
        Self::new(Arc::new(NullBroker))
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    /// Insert a new entry.
    ///
    /// Fails (logging a warning) if the key is already present; the
    /// existing entry is left untouched. Emits an entry-added notification
    /// on success.
    pub fn add(&mut self, key: &str, value: impl Into<Value>) -> bool {
        self.try_add(key, value).map_err(|err| err.log()).is_ok()
    }

    /// Result-returning form of [`add`](Self::add).
    pub fn try_add(&mut self, key: &str, value: impl Into<Value>) -> Result<(), BlackboardError> {
        let value = value.into();
        let fp = fingerprint(key);

        if let Some(existing) = self.map.get(&fp) {
            if existing.key != key {
                return Err(BlackboardError::KeyCollision {
                    key: key.to_string(),
                    existing: existing.key.clone(),
                });
            }
            return Err(BlackboardError::DuplicateKey {
                key: key.to_string(),
            });
        }

        self.map.insert(
            fp,
            Entry {
                key: key.to_string(),
                value: value.clone(),
            },
        );
        self.broker
            .publish(BlackboardEvent::EntryAdded(EntryAddedEvent::new(key, value)));
        Ok(())
    }

    /// Insert a type-erased payload, rejecting kinds outside the permitted
    /// set at runtime.
    ///
    /// The statically-typed [`add`](Self::add) cannot be called with an
    /// unsupported kind at all; this entry point exists for callers that
    /// only hold a generic payload. Unsupported kinds log an error and
    /// leave the store unchanged.
    pub fn add_any<T: Any + Send + Sync>(&mut self, key: &str, value: T) -> bool {
        self.try_add_any(key, value).map_err(|err| err.log()).is_ok()
    }

    /// Result-returning form of [`add_any`](Self::add_any).
    pub fn try_add_any<T: Any + Send + Sync>(
        &mut self,
        key: &str,
        value: T,
    ) -> Result<(), BlackboardError> {
        let value = coerce(Box::new(value)).ok_or(BlackboardError::UnsupportedKind {
            type_name: std::any::type_name::<T>(),
        })?;
        self.try_add(key, value)
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    /// Replace the value of an existing entry.
    ///
    /// Fails (logging a warning) if the key is absent or the new value's
    /// kind differs from the kind already stored at the key — an update
    /// can never silently change an entry's kind. Emits an entry-updated
    /// notification carrying the previous value on success.
    pub fn update(&mut self, key: &str, value: impl Into<Value>) -> bool {
        self.try_update(key, value).map_err(|err| err.log()).is_ok()
    }

    /// Result-returning form of [`update`](Self::update).
    pub fn try_update(
        &mut self,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<(), BlackboardError> {
        let value = value.into();
        let entry = self
            .map
            .get_mut(&fingerprint(key))
            .ok_or_else(|| BlackboardError::MissingKey {
                key: key.to_string(),
            })?;

        if entry.value.kind() != value.kind() {
            return Err(BlackboardError::KindMismatch {
                key: key.to_string(),
                requested: value.kind(),
                stored: entry.value.kind(),
            });
        }

        let previous = std::mem::replace(&mut entry.value, value.clone());
        self.broker.publish(BlackboardEvent::EntryUpdated(
            EntryUpdatedEvent::new(key, previous, value),
        ));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read
    // -----------------------------------------------------------------------

    /// Get the stored value narrowed to `T`, or `T`'s default if the key
    /// is absent or of a different kind.
    pub fn get_value<T: BlackboardType + Clone + Default>(&self, key: &str) -> T {
        self.value_or(key, T::default())
    }

    /// Get the stored value narrowed to `T`, or `default` if the key is
    /// absent or of a different kind (either case logs a warning).
    ///
    /// No mutation, no notification.
    pub fn value_or<T: BlackboardType + Clone>(&self, key: &str, default: T) -> T {
        match self.try_get::<T>(key) {
            Ok(value) => value.clone(),
            Err(err) => {
                err.log();
                default
            }
        }
    }

    /// Borrowing lookup: `None` on absence or kind mismatch, no
    /// diagnostics.
    pub fn get<T: BlackboardType>(&self, key: &str) -> Option<&T> {
        self.map
            .get(&fingerprint(key))
            .and_then(|entry| entry.value.get::<T>())
    }

    fn try_get<T: BlackboardType>(&self, key: &str) -> Result<&T, BlackboardError> {
        let entry = self
            .map
            .get(&fingerprint(key))
            .ok_or_else(|| BlackboardError::MissingKey {
                key: key.to_string(),
            })?;
        entry
            .value
            .get::<T>()
            .ok_or_else(|| BlackboardError::KindMismatch {
                key: key.to_string(),
                requested: T::KIND,
                stored: entry.value.kind(),
            })
    }

    /// Whether an entry exists at `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(&fingerprint(key))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    // -----------------------------------------------------------------------
    // Remove
    // -----------------------------------------------------------------------

    /// Remove the entry at `key`, returning whether one was present.
    ///
    /// The entry-deleted notification fires only when an entry was
    /// actually removed; removing an absent key returns `false` without
    /// notifying.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.map.remove(&fingerprint(key)) {
            Some(_) => {
                self.broker
                    .publish(BlackboardEvent::EntryDeleted(EntryDeletedEvent::new(key)));
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Human-readable dump of all current (fingerprint, value) pairs.
    ///
    /// Formatting only; iteration order is unspecified.
    pub fn dump(&self) -> String {
        let mut out = String::from("{\n");
        for (fp, entry) in &self.map {
            let _ = writeln!(out, "\t{fp}: {},", entry.value);
        }
        out.push('}');
        out
    }

    /// Emit [`dump`](Self::dump) at info level.
    pub fn log(&self) {
        log::info!("{}", self.dump());
    }
}

// ---------------------------------------------------------------------------
// Indexed accessors
// ---------------------------------------------------------------------------
//
// Unchecked, terse access for call sites that have guaranteed presence and
// kind by construction. Absence or a kind mismatch is a programming error
// at the call site and panics.

impl Index<&KeySelector<ObjectRef>> for Blackboard {
    type Output = ObjectRef;

    fn index(&self, selector: &KeySelector<ObjectRef>) -> &ObjectRef {
        self.get::<ObjectRef>(&selector.key)
            .unwrap_or_else(|| panic!("no object entry at key {:?}", selector.key))
    }
}

impl Index<&KeySelector<bool>> for Blackboard {
    type Output = bool;

    fn index(&self, selector: &KeySelector<bool>) -> &bool {
        self.get::<bool>(&selector.key)
            .unwrap_or_else(|| panic!("no bool entry at key {:?}", selector.key))
    }
}

impl Index<&KeySelector<Vec2>> for Blackboard {
    type Output = Vec2;

    fn index(&self, selector: &KeySelector<Vec2>) -> &Vec2 {
        self.get::<Vec2>(&selector.key)
            .unwrap_or_else(|| panic!("no vec2 entry at key {:?}", selector.key))
    }
}

// ---------------------------------------------------------------------------
// Dynamic coercion
// ---------------------------------------------------------------------------

/// Coerce a type-erased payload into a permitted [`Value`], if it is one.
fn coerce(value: Box<dyn Any + Send + Sync>) -> Option<Value> {
    let value = match value.downcast::<Value>() {
        Ok(v) => return Some(*v),
        Err(v) => v,
    };
    let value = match value.downcast::<i64>() {
        Ok(v) => return Some(Value::Int(*v)),
        Err(v) => v,
    };
    let value = match value.downcast::<i32>() {
        Ok(v) => return Some(Value::Int(i64::from(*v))),
        Err(v) => v,
    };
    let value = match value.downcast::<f64>() {
        Ok(v) => return Some(Value::Float(*v)),
        Err(v) => v,
    };
    let value = match value.downcast::<f32>() {
        Ok(v) => return Some(Value::Float(f64::from(*v))),
        Err(v) => v,
    };
    let value = match value.downcast::<bool>() {
        Ok(v) => return Some(Value::Bool(*v)),
        Err(v) => v,
    };
    let value = match value.downcast::<String>() {
        Ok(v) => return Some(Value::Text(*v)),
        Err(v) => v,
    };
    let value = match value.downcast::<&'static str>() {
        Ok(v) => return Some(Value::Text((*v).to_string())),
        Err(v) => v,
    };
    let value = match value.downcast::<Vec2>() {
        Ok(v) => return Some(Value::Vec2(*v)),
        Err(v) => v,
    };
    let value = match value.downcast::<Vec3>() {
        Ok(v) => return Some(Value::Vec3(*v)),
        Err(v) => v,
    };
    match value.downcast::<ObjectRef>() {
        Ok(v) => Some(Value::Object(*v)),
        Err(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackboard::value::ValueKind;
    use crate::events::RecordingBroker;

    fn recording() -> (Arc<RecordingBroker>, Blackboard) {
        let broker = Arc::new(RecordingBroker::new());
        let bb = Blackboard::new(broker.clone());
        (broker, bb)
    }

    #[test]
    fn test_fingerprint_known_vectors() {
        // Published FNV-1a 64 test vectors.
        assert_eq!(fingerprint(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fingerprint("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fingerprint("score"), fingerprint("score"));
        assert_ne!(fingerprint("score"), fingerprint("health"));
    }

    #[test]
    fn test_add_then_duplicate_add_fails() {
        let (broker, mut bb) = recording();

        assert!(bb.add("score", 10));
        assert!(!bb.add("score", 99));

        // Original value is retrievable unchanged.
        assert_eq!(bb.value_or::<i64>("score", -1), 10);
        assert_eq!(bb.len(), 1);
        // Only the successful add notified.
        assert_eq!(broker.events().len(), 1);
    }

    #[test]
    fn test_duplicate_add_reports_error() {
        let mut bb = Blackboard::detached();
        bb.add("score", 10);

        assert_eq!(
            bb.try_add("score", 99),
            Err(BlackboardError::DuplicateKey {
                key: "score".into()
            })
        );
    }

    #[test]
    fn test_update_missing_key_fails() {
        let (broker, mut bb) = recording();

        assert!(!bb.update("score", 10));
        assert!(bb.is_empty());
        assert!(broker.events().is_empty());
    }

    #[test]
    fn test_update_same_kind_replaces() {
        let mut bb = Blackboard::detached();
        bb.add("score", 10);

        assert!(bb.update("score", 25));
        assert_eq!(bb.value_or::<i64>("score", -1), 25);
    }

    #[test]
    fn test_update_cannot_change_kind() {
        let mut bb = Blackboard::detached();
        bb.add("score", 10);

        assert_eq!(
            bb.try_update("score", true),
            Err(BlackboardError::KindMismatch {
                key: "score".into(),
                requested: ValueKind::Bool,
                stored: ValueKind::Int,
            })
        );
        // Entry untouched.
        assert_eq!(bb.value_or::<i64>("score", -1), 10);
    }

    #[test]
    fn test_value_or_kind_mismatch_returns_default() {
        let mut bb = Blackboard::detached();
        bb.add("alive", true);

        assert_eq!(bb.value_or::<i64>("alive", -1), -1);
        // The entry itself is untouched.
        assert!(bb.value_or("alive", false));
    }

    #[test]
    fn test_value_or_absent_returns_default() {
        let bb = Blackboard::detached();
        assert_eq!(bb.value_or::<i64>("missing", 7), 7);
        assert_eq!(bb.value_or("missing", String::from("n/a")), "n/a");
    }

    #[test]
    fn test_get_value_defaults() {
        let bb = Blackboard::detached();
        assert_eq!(bb.get_value::<i64>("missing"), 0);
        assert_eq!(bb.get_value::<String>("missing"), "");
        assert_eq!(bb.get_value::<Vec2>("missing"), Vec2::default());
    }

    #[test]
    fn test_remove_present_and_absent() {
        let (broker, mut bb) = recording();
        bb.add("score", 10);

        assert!(bb.remove("score"));
        assert_eq!(bb.value_or::<i64>("score", -1), -1);

        assert!(!bb.remove("score"));
        // Exactly one delete notification: none for the absent key.
        let deletes = broker
            .events()
            .iter()
            .filter(|e| matches!(e, BlackboardEvent::EntryDeleted(_)))
            .count();
        assert_eq!(deletes, 1);
    }

    #[test]
    fn test_add_any_unsupported_kind_rejected() {
        let mut bb = Blackboard::detached();

        assert!(!bb.add_any("grid", vec![1u8, 2, 3]));
        assert!(bb.is_empty());

        assert_eq!(
            bb.try_add_any("grid", vec![1u8, 2, 3]),
            Err(BlackboardError::UnsupportedKind {
                type_name: std::any::type_name::<Vec<u8>>(),
            })
        );
    }

    #[test]
    fn test_add_any_permitted_kinds() {
        let mut bb = Blackboard::detached();

        assert!(bb.add_any("score", 10i64));
        assert!(bb.add_any("ratio", 0.5f32));
        assert!(bb.add_any("name", "turret"));
        assert!(bb.add_any("target", ObjectRef::new(42u8)));

        assert_eq!(bb.value_or::<i64>("score", -1), 10);
        assert_eq!(bb.value_or::<f64>("ratio", 0.0), 0.5);
        assert_eq!(bb.value_or("name", String::new()), "turret");
        assert_eq!(bb.len(), 4);
    }

    #[test]
    fn test_object_entries() {
        #[derive(Debug)]
        struct Waypoint {
            id: u32,
        }

        let mut bb = Blackboard::detached();
        let target = ObjectRef::new(Waypoint { id: 7 });
        bb.add("target", target.clone());

        let stored = bb.get::<ObjectRef>("target").unwrap();
        assert!(stored.ptr_eq(&target));
        assert_eq!(stored.downcast_ref::<Waypoint>().unwrap().id, 7);
    }

    #[test]
    fn test_indexed_accessors() {
        let mut bb = Blackboard::detached();
        bb.add("alive", true);
        bb.add("spawn", Vec2::new(4.0, 2.0));
        bb.add("target", ObjectRef::new("boss"));

        assert!(bb[&KeySelector::<bool>::new("alive")]);
        assert_eq!(bb[&KeySelector::<Vec2>::new("spawn")], Vec2::new(4.0, 2.0));
        assert!(bb[&KeySelector::<ObjectRef>::new("target")].is::<&'static str>());
    }

    #[test]
    #[should_panic(expected = "no bool entry")]
    fn test_indexed_accessor_panics_on_absent_key() {
        let bb = Blackboard::detached();
        let _ = bb[&KeySelector::<bool>::new("missing")];
    }

    #[test]
    #[should_panic(expected = "no vec2 entry")]
    fn test_indexed_accessor_panics_on_kind_mismatch() {
        let mut bb = Blackboard::detached();
        bb.add("spawn", 10);
        let _ = bb[&KeySelector::<Vec2>::new("spawn")];
    }

    #[test]
    fn test_event_payloads() {
        let (broker, mut bb) = recording();

        bb.add("score", 10);
        bb.update("score", 25);
        bb.remove("score");

        let events = broker.events();
        assert_eq!(events.len(), 3);

        match &events[0] {
            BlackboardEvent::EntryAdded(e) => {
                assert_eq!(e.key, "score");
                assert_eq!(e.value, Value::Int(10));
            }
            other => panic!("expected add event, got {other:?}"),
        }
        match &events[1] {
            BlackboardEvent::EntryUpdated(e) => {
                assert_eq!(e.key, "score");
                assert_eq!(e.previous, Value::Int(10));
                assert_eq!(e.value, Value::Int(25));
            }
            other => panic!("expected update event, got {other:?}"),
        }
        match &events[2] {
            BlackboardEvent::EntryDeleted(e) => assert_eq!(e.key, "score"),
            other => panic!("expected delete event, got {other:?}"),
        }
    }

    #[test]
    fn test_end_to_end_score_scenario() {
        let mut bb = Blackboard::detached();

        assert!(bb.add("score", 10));
        assert_eq!(bb.get_value::<i64>("score"), 10);
        assert!(bb.update("score", 25));
        assert_eq!(bb.get_value::<i64>("score"), 25);
        assert!(bb.remove("score"));
        assert_eq!(bb.value_or::<i64>("score", -1), -1);
    }

    #[test]
    fn test_dump_contains_fingerprint_and_value() {
        let mut bb = Blackboard::detached();
        bb.add("score", 10);

        let dump = bb.dump();
        assert!(dump.starts_with("{\n"));
        assert!(dump.ends_with('}'));
        assert!(dump.contains(&format!("{}: 10", fingerprint("score"))));
    }
}
