//! Value kinds of the shape model.
//!
//! A `Value` describes the *shape* of a script runtime value, not its data.
//! Primitive kinds carry no payload: every number is the same `Number`
//! sentinel, every string the same `String` sentinel, and so on. Objects and
//! functions are handles into the owning engine's arena.
//!
//! # Narrowing
//!
//! Each kind has a narrowing query (`as_number`, `as_object`, ...). At most
//! one succeeds for a given value. [`value_cast`] lifts the queries over an
//! absent input so lookup results can be narrowed without branching.
//!
//! # Visitation
//!
//! [`Value::accept`] calls exactly one [`ValueVisitor`] method, chosen by
//! the value's kind. Cross-kind algorithms (coercions, `typeof`) are written
//! as visitors instead of matching at every call site.

use std::fmt;

use crate::id::{FunctionId, ObjectId};

/// Marker returned by [`Value::as_null`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NullValue;

/// Marker returned by [`Value::as_undefined`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UndefinedValue;

/// Marker returned by [`Value::as_number`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NumberValue;

/// Marker returned by [`Value::as_boolean`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BooleanValue;

/// Marker returned by [`Value::as_string`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StringValue;

/// The closed set of value kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Undefined,
    Number,
    Boolean,
    String,
    Object,
    Function,
}

impl ValueKind {
    /// Lower-case name of the kind, for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Function => "function",
        }
    }
}

/// A value in the shape model.
///
/// Primitives are payload-free singletons and heap values are non-owning
/// arena handles, so a `Value` is always `Copy`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Null,
    Undefined,
    Number,
    Boolean,
    String,
    Object(ObjectId),
    Function(FunctionId),
}

impl Value {
    /// The kind tag of this value.
    #[inline]
    pub const fn kind(self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Undefined => ValueKind::Undefined,
            Value::Number => ValueKind::Number,
            Value::Boolean => ValueKind::Boolean,
            Value::String => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Function(_) => ValueKind::Function,
        }
    }

    #[inline]
    pub fn as_null(self) -> Option<NullValue> {
        matches!(self, Value::Null).then_some(NullValue)
    }

    #[inline]
    pub fn as_undefined(self) -> Option<UndefinedValue> {
        matches!(self, Value::Undefined).then_some(UndefinedValue)
    }

    #[inline]
    pub fn as_number(self) -> Option<NumberValue> {
        matches!(self, Value::Number).then_some(NumberValue)
    }

    #[inline]
    pub fn as_boolean(self) -> Option<BooleanValue> {
        matches!(self, Value::Boolean).then_some(BooleanValue)
    }

    #[inline]
    pub fn as_string(self) -> Option<StringValue> {
        matches!(self, Value::String).then_some(StringValue)
    }

    /// Narrow to a plain object. Functions do not match; use
    /// [`Value::object_id`] to accept both.
    #[inline]
    pub fn as_object(self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(self) -> Option<FunctionId> {
        match self {
            Value::Function(id) => Some(id),
            _ => None,
        }
    }

    /// Arena handle for any heap value, plain object or function.
    #[inline]
    pub fn object_id(self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(id),
            Value::Function(id) => Some(id.object_id()),
            _ => None,
        }
    }

    /// Returns `true` for the five payload-free kinds.
    #[inline]
    pub fn is_primitive(self) -> bool {
        self.object_id().is_none()
    }

    /// Dispatch to the visitor method matching this value's kind.
    pub fn accept<V: ValueVisitor + ?Sized>(self, visitor: &mut V) {
        match self {
            Value::Null => visitor.visit_null(),
            Value::Undefined => visitor.visit_undefined(),
            Value::Number => visitor.visit_number(),
            Value::Boolean => visitor.visit_boolean(),
            Value::String => visitor.visit_string(),
            Value::Object(id) => visitor.visit_object(id),
            Value::Function(id) => visitor.visit_function(id),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(id) => write!(f, "{id}"),
            Value::Function(id) => write!(f, "{id}"),
            primitive => f.write_str(primitive.kind().name()),
        }
    }
}

impl From<NullValue> for Value {
    fn from(_: NullValue) -> Self {
        Value::Null
    }
}

impl From<UndefinedValue> for Value {
    fn from(_: UndefinedValue) -> Self {
        Value::Undefined
    }
}

impl From<NumberValue> for Value {
    fn from(_: NumberValue) -> Self {
        Value::Number
    }
}

impl From<BooleanValue> for Value {
    fn from(_: BooleanValue) -> Self {
        Value::Boolean
    }
}

impl From<StringValue> for Value {
    fn from(_: StringValue) -> Self {
        Value::String
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Object(id)
    }
}

impl From<FunctionId> for Value {
    fn from(id: FunctionId) -> Self {
        Value::Function(id)
    }
}

/// Double-dispatch target for [`Value::accept`].
///
/// Every method defaults to doing nothing, so a visitor only spells out the
/// kinds it cares about.
pub trait ValueVisitor {
    fn visit_null(&mut self) {}
    fn visit_undefined(&mut self) {}
    fn visit_number(&mut self) {}
    fn visit_boolean(&mut self) {}
    fn visit_string(&mut self) {}
    fn visit_object(&mut self, _object: ObjectId) {}
    fn visit_function(&mut self, _function: FunctionId) {}
}

/// Types a [`Value`] can be narrowed to.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($( $ty:ty => $query:ident ),+ $(,)?) => {
        $(
            impl FromValue for $ty {
                #[inline]
                fn from_value(value: Value) -> Option<Self> {
                    value.$query()
                }
            }
        )+
    };
}

impl_from_value! {
    NullValue => as_null,
    UndefinedValue => as_undefined,
    NumberValue => as_number,
    BooleanValue => as_boolean,
    StringValue => as_string,
    ObjectId => as_object,
    FunctionId => as_function,
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

/// Narrow an optional value. Absent input stays absent.
///
/// ```
/// use jsshape::{value_cast, NumberValue, Value};
///
/// assert_eq!(value_cast::<NumberValue>(Some(Value::Number)), Some(NumberValue));
/// assert_eq!(value_cast::<NumberValue>(Some(Value::String)), None);
/// assert_eq!(value_cast::<NumberValue>(None), None);
/// ```
#[inline]
pub fn value_cast<T: FromValue>(value: Option<Value>) -> Option<T> {
    value.and_then(T::from_value)
}
