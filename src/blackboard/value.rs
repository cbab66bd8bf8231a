//! Blackboard values — the closed set of kinds an entry can hold.
//!
//! A blackboard entry carries exactly one of seven permitted kinds:
//! integer, float, boolean, text, 2D vector, 3D vector, or a reference to
//! an externally managed object. [`Value`] is the tagged union over that
//! set; the tag ([`ValueKind`]) is derived from the variant, so it can
//! never disagree with the payload.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Geometry value types
// ---------------------------------------------------------------------------

/// A 2D vector value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 3D vector value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// ObjectRef
// ---------------------------------------------------------------------------

/// Shared handle to an externally managed object.
///
/// The store treats these opaquely: any `Send + Sync + 'static` value can
/// be wrapped, and consumers recover the concrete type with
/// [`downcast_ref`](ObjectRef::downcast_ref). The store never manages the
/// referenced object's lifecycle; the handle is reference-counted and
/// cheap to clone.
#[derive(Clone)]
pub struct ObjectRef {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ObjectRef {
    /// Wrap an object into a shared handle.
    pub fn new<T: Any + Send + Sync>(object: T) -> Self {
        Self {
            inner: Arc::new(object),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Check whether the referenced object is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Try to view the referenced object as type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Concrete type name of the referenced object, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether two handles reference the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Equality is handle identity, not structural comparison.
impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name)
    }
}

// ---------------------------------------------------------------------------
// ValueKind
// ---------------------------------------------------------------------------

/// Runtime tag identifying which permitted kind a [`Value`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    Text,
    Vec2,
    Vec3,
    Object,
}

impl ValueKind {
    /// Human-readable kind name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Text => "text",
            ValueKind::Vec2 => "vec2",
            ValueKind::Vec3 => "vec3",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A blackboard value — tagged union over the closed set of permitted kinds.
///
/// Values are immutable once constructed; updating an entry replaces the
/// whole value rather than mutating it in place. Narrowing back to a
/// concrete kind goes through [`get`](Value::get), which returns `None` on
/// a kind mismatch instead of casting.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Vec2(Vec2),
    Vec3(Vec3),
    Object(ObjectRef),
}

impl Value {
    /// The kind tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Kind-erased view of the payload, for uniform inspection.
    pub fn as_any(&self) -> &dyn Any {
        match self {
            Value::Int(v) => v,
            Value::Float(v) => v,
            Value::Bool(v) => v,
            Value::Text(v) => v,
            Value::Vec2(v) => v,
            Value::Vec3(v) => v,
            Value::Object(v) => v,
        }
    }

    /// Narrow to a concrete kind.
    pub fn get<T: BlackboardType>(&self) -> Option<&T> {
        T::from_value(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v:?}"),
            Value::Vec2(v) => write!(f, "{v}"),
            Value::Vec3(v) => write!(f, "{v}"),
            Value::Object(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// BlackboardType — the closed kind set as a trait
// ---------------------------------------------------------------------------

/// Implemented for exactly the permitted kinds; the set is closed and not
/// user-extensible.
///
/// This is what gives the store its typed getters: `value_or::<i64>(..)`
/// resolves through `i64`'s implementation, and a stored entry of a
/// different kind simply fails to narrow.
pub trait BlackboardType: Sized {
    /// The kind tag for this type.
    const KIND: ValueKind;

    /// Narrow a value to this type, if the kinds agree.
    fn from_value(value: &Value) -> Option<&Self>;

    /// Wrap into a value.
    fn into_value(self) -> Value;
}

macro_rules! impl_blackboard_type {
    ($ty:ty, $kind:ident) => {
        impl BlackboardType for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_value(value: &Value) -> Option<&Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }
        }
    };
}

impl_blackboard_type!(i64, Int);
impl_blackboard_type!(f64, Float);
impl_blackboard_type!(bool, Bool);
impl_blackboard_type!(String, Text);
impl_blackboard_type!(Vec2, Vec2);
impl_blackboard_type!(Vec3, Vec3);
impl_blackboard_type!(ObjectRef, Object);

// ---------------------------------------------------------------------------
// Conversions for the construct-then-add convenience forms
// ---------------------------------------------------------------------------

macro_rules! impl_value_from {
    ($ty:ty, $kind:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$kind(v)
            }
        }
    };
}

impl_value_from!(i64, Int);
impl_value_from!(f64, Float);
impl_value_from!(bool, Bool);
impl_value_from!(String, Text);
impl_value_from!(Vec2, Vec2);
impl_value_from!(Vec3, Vec3);
impl_value_from!(ObjectRef, Object);

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
