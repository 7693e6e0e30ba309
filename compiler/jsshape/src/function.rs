//! Functions and the built-in constructors.
//!
//! A function is an object record carrying a [`FunctionData`] payload:
//! argument hints, an optional return hint, and the [`FunctionKind`] that
//! decides what a call produces. Hints describe parameter and result shapes
//! for inference; they are never used for arity checks.

use smallvec::SmallVec;

use crate::engine::Engine;
use crate::id::{FunctionId, ObjectId};
use crate::object::ObjectRef;
use crate::value::Value;

/// One of the eight standard constructors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Object,
    Function,
    Number,
    Boolean,
    String,
    Array,
    Date,
    RegExp,
}

impl Builtin {
    /// All constructors, in bootstrap order of their prototypes.
    pub const ALL: [Builtin; 8] = [
        Builtin::Object,
        Builtin::Function,
        Builtin::Number,
        Builtin::Boolean,
        Builtin::String,
        Builtin::Array,
        Builtin::Date,
        Builtin::RegExp,
    ];

    /// Class name given to the objects this constructor produces, which is
    /// also its global binding name.
    pub const fn class_name(self) -> &'static str {
        match self {
            Builtin::Object => "Object",
            Builtin::Function => "Function",
            Builtin::Number => "Number",
            Builtin::Boolean => "Boolean",
            Builtin::String => "String",
            Builtin::Array => "Array",
            Builtin::Date => "Date",
            Builtin::RegExp => "RegExp",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Called without `new`, `Array(...)` and `String(...)` retag the
    /// receiver instead of allocating.
    const fn reuses_receiver(self) -> bool {
        matches!(self, Builtin::Array | Builtin::String)
    }
}

/// What a call to a function produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    /// Stub or caller-built function: the call yields the return hint.
    Plain,
    /// A standard constructor: the call synthesizes an instance.
    Constructor(Builtin),
}

/// Function payload of an object record.
#[derive(Clone, Debug)]
pub(crate) struct FunctionData {
    pub(crate) arguments: SmallVec<[Value; 4]>,
    pub(crate) return_value: Option<Value>,
    pub(crate) kind: FunctionKind,
}

impl FunctionData {
    pub(crate) fn new(kind: FunctionKind) -> Self {
        Self {
            arguments: SmallVec::new(),
            return_value: None,
            kind,
        }
    }
}

/// Read-only view of a function.
#[derive(Copy, Clone, Debug)]
pub struct FunctionRef<'e> {
    object: ObjectRef<'e>,
    data: &'e FunctionData,
}

impl<'e> FunctionRef<'e> {
    pub(crate) fn new(object: ObjectRef<'e>, data: &'e FunctionData) -> Self {
        Self { object, data }
    }

    pub fn id(&self) -> FunctionId {
        FunctionId::new(self.object.id())
    }

    /// The function viewed as an object.
    pub fn object(&self) -> ObjectRef<'e> {
        self.object
    }

    pub fn kind(&self) -> FunctionKind {
        self.data.kind
    }

    pub fn argument_count(&self) -> usize {
        self.data.arguments.len()
    }

    /// Declared hint for argument `index`, or undefined past the end.
    pub fn argument(&self, index: usize) -> Value {
        self.data
            .arguments
            .get(index)
            .copied()
            .unwrap_or(Value::Undefined)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Value> + 'e {
        self.data.arguments.iter().copied()
    }

    /// Declared return hint, or undefined when none was set.
    pub fn return_value(&self) -> Value {
        self.data.return_value.unwrap_or(Value::Undefined)
    }
}

/// Mutable view of a function's payload.
pub struct FunctionMut<'e> {
    id: FunctionId,
    data: &'e mut FunctionData,
}

impl<'e> FunctionMut<'e> {
    pub(crate) fn new(id: FunctionId, data: &'e mut FunctionData) -> Self {
        Self { id, data }
    }

    pub fn id(&self) -> FunctionId {
        self.id
    }

    pub fn add_argument(&mut self, hint: impl Into<Value>) -> &mut Self {
        self.data.arguments.push(hint.into());
        self
    }

    pub fn set_return_value(&mut self, hint: Option<Value>) -> &mut Self {
        self.data.return_value = hint;
        self
    }
}

/// Call a plain function.
///
/// Yields the return hint, falling back to undefined. With
/// `legacy_call_returns_this` the receiver comes back instead.
pub(crate) fn call_plain(engine: &Engine, function: FunctionId, this: Value) -> Value {
    if engine.config().legacy_call_returns_this {
        return this;
    }
    engine
        .function(function)
        .map_or(Value::Undefined, |f| f.return_value())
}

/// Run a standard constructor.
///
/// Array and String reuse an object receiver other than the global object;
/// everything else allocates. The Function constructor allocates a real
/// function so the instance narrows as one.
pub(crate) fn construct(engine: &mut Engine, builtin: Builtin, this: Value) -> Value {
    let receiver = if builtin.reuses_receiver() {
        this.object_id()
            .filter(|&id| id != engine.global_object())
    } else {
        None
    };

    let instance: ObjectId = match (receiver, builtin) {
        (Some(id), _) => id,
        (None, Builtin::Function) => engine.new_function().object_id(),
        (None, _) => engine.new_object(),
    };

    let prototype = engine.prototype_of(builtin);
    let mut object = engine.object_mut(instance);
    object
        .set_class_name(builtin.class_name())
        .set_prototype(Some(prototype));

    match builtin {
        Builtin::Object | Builtin::Function | Builtin::Array | Builtin::String => {
            object.set_property("length", Value::Number);
        }
        Builtin::RegExp => {
            object
                .set_property("source", Value::String)
                .set_property("global", Value::Boolean)
                .set_property("ignoreCase", Value::Boolean)
                .set_property("multiline", Value::Boolean)
                .set_property("lastIndex", Value::Number);
        }
        Builtin::Number | Builtin::Boolean | Builtin::Date => {}
    }

    engine.value_of(instance)
}
