//! The engine: sole allocator and owner of every heap object.
//!
//! An `Engine` is built once, bootstraps the standard prototype and
//! constructor graph synchronously in its constructor, and frees its whole
//! arena when dropped. Engines never share objects; handles from one engine
//! are meaningless in another.
//!
//! # Thread Safety
//! Single-threaded by construction: every mutation needs `&mut Engine`.
//! Run one engine per analysis worker.

mod bootstrap;

use tracing::trace;

use crate::arena::ObjectArena;
use crate::coerce::{ConvertToBoolean, ConvertToNumber, ConvertToObject, ConvertToString, TypeId};
use crate::config::EngineConfig;
use crate::function::{self, Builtin, FunctionData, FunctionKind, FunctionMut, FunctionRef};
use crate::id::{FunctionId, ObjectId};
use crate::object::{ObjectMut, ObjectRef, ObjectValue};
use crate::value::Value;

/// Arena slots reserved up front; the bootstrapped library needs about 240.
const INITIAL_CAPACITY: usize = 256;

/// Owner of one object graph plus the standard library built on it.
pub struct Engine {
    arena: ObjectArena,
    config: EngineConfig,
    /// Standard prototypes, indexed by `Builtin::index`.
    prototypes: [ObjectId; 8],
    /// Standard constructors, indexed by `Builtin::index`.
    constructors: [FunctionId; 8],
    global_object: ObjectId,
    math_object: ObjectId,
}

impl Engine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine and bootstrap its standard library.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn with_config(config: EngineConfig) -> Self {
        let mut arena = ObjectArena::with_capacity(INITIAL_CAPACITY);

        let object_prototype = arena.alloc(ObjectValue::with_prototype(None));
        let mut prototypes = [object_prototype; 8];
        for builtin in &Builtin::ALL[1..] {
            prototypes[builtin.index()] =
                arena.alloc(ObjectValue::with_prototype(Some(object_prototype)));
        }

        let global_object = arena.alloc(ObjectValue {
            class_name: "Global".to_owned(),
            ..ObjectValue::with_prototype(Some(object_prototype))
        });

        let function_prototype = prototypes[Builtin::Function.index()];
        let constructors = Builtin::ALL.map(|builtin| {
            let record = ObjectValue {
                class_name: "Function".to_owned(),
                function: Some(FunctionData::new(FunctionKind::Constructor(builtin))),
                ..ObjectValue::with_prototype(Some(function_prototype))
            };
            FunctionId::new(arena.alloc(record))
        });

        let math_object = arena.alloc(ObjectValue::with_prototype(Some(object_prototype)));

        let mut engine = Engine {
            arena,
            config,
            prototypes,
            constructors,
            global_object,
            math_object,
        };
        engine.install_standard_library();
        tracing::debug!(objects = engine.object_count(), "engine bootstrapped");
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub(crate) fn arena(&self) -> &ObjectArena {
        &self.arena
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut ObjectArena {
        &mut self.arena
    }

    /// Number of objects (functions included) the engine owns.
    pub fn object_count(&self) -> usize {
        self.arena.len()
    }

    // === Primitive singletons ===

    #[inline]
    pub const fn null_value(&self) -> Value {
        Value::Null
    }

    #[inline]
    pub const fn undefined_value(&self) -> Value {
        Value::Undefined
    }

    #[inline]
    pub const fn number_value(&self) -> Value {
        Value::Number
    }

    #[inline]
    pub const fn boolean_value(&self) -> Value {
        Value::Boolean
    }

    #[inline]
    pub const fn string_value(&self) -> Value {
        Value::String
    }

    // === Standard objects ===

    pub fn global_object(&self) -> ObjectId {
        self.global_object
    }

    pub fn math_object(&self) -> ObjectId {
        self.math_object
    }

    /// Standard prototype for instances of `builtin`.
    pub fn prototype_of(&self, builtin: Builtin) -> ObjectId {
        self.prototypes[builtin.index()]
    }

    /// Standard constructor `builtin`.
    pub fn constructor_of(&self, builtin: Builtin) -> FunctionId {
        self.constructors[builtin.index()]
    }

    pub fn object_prototype(&self) -> ObjectId {
        self.prototype_of(Builtin::Object)
    }

    pub fn function_prototype(&self) -> ObjectId {
        self.prototype_of(Builtin::Function)
    }

    pub fn number_prototype(&self) -> ObjectId {
        self.prototype_of(Builtin::Number)
    }

    pub fn boolean_prototype(&self) -> ObjectId {
        self.prototype_of(Builtin::Boolean)
    }

    pub fn string_prototype(&self) -> ObjectId {
        self.prototype_of(Builtin::String)
    }

    pub fn array_prototype(&self) -> ObjectId {
        self.prototype_of(Builtin::Array)
    }

    pub fn date_prototype(&self) -> ObjectId {
        self.prototype_of(Builtin::Date)
    }

    pub fn regexp_prototype(&self) -> ObjectId {
        self.prototype_of(Builtin::RegExp)
    }

    pub fn object_ctor(&self) -> FunctionId {
        self.constructor_of(Builtin::Object)
    }

    pub fn function_ctor(&self) -> FunctionId {
        self.constructor_of(Builtin::Function)
    }

    pub fn number_ctor(&self) -> FunctionId {
        self.constructor_of(Builtin::Number)
    }

    pub fn boolean_ctor(&self) -> FunctionId {
        self.constructor_of(Builtin::Boolean)
    }

    pub fn string_ctor(&self) -> FunctionId {
        self.constructor_of(Builtin::String)
    }

    pub fn array_ctor(&self) -> FunctionId {
        self.constructor_of(Builtin::Array)
    }

    pub fn date_ctor(&self) -> FunctionId {
        self.constructor_of(Builtin::Date)
    }

    pub fn regexp_ctor(&self) -> FunctionId {
        self.constructor_of(Builtin::RegExp)
    }

    // === Factories ===

    /// Allocate an empty object inheriting from the Object prototype.
    pub fn new_object(&mut self) -> ObjectId {
        self.new_object_with_prototype(Some(self.object_prototype()))
    }

    /// Allocate an empty object with an explicit prototype (or none).
    ///
    /// A fresh object cannot be on anyone's prototype chain, so the link is
    /// always accepted.
    pub fn new_object_with_prototype(&mut self, prototype: Option<ObjectId>) -> ObjectId {
        self.arena.alloc(ObjectValue::with_prototype(prototype))
    }

    /// Allocate a plain function inheriting from the Function prototype.
    pub fn new_function(&mut self) -> FunctionId {
        let record = ObjectValue {
            class_name: "Function".to_owned(),
            function: Some(FunctionData::new(FunctionKind::Plain)),
            ..ObjectValue::with_prototype(Some(self.function_prototype()))
        };
        FunctionId::new(self.arena.alloc(record))
    }

    /// A fresh Array instance, as `Array()` would produce.
    pub fn new_array_value(&mut self) -> Value {
        self.call(self.array_ctor(), &[])
    }

    // === Views ===

    /// Read view of an object or function.
    ///
    /// # Panics
    /// Panics if `id` belongs to a different engine.
    pub fn object(&self, id: impl Into<ObjectId>) -> ObjectRef<'_> {
        ObjectRef::new(self, id.into())
    }

    /// Write view of an object or function.
    ///
    /// # Panics
    /// Panics if `id` belongs to a different engine.
    pub fn object_mut(&mut self, id: impl Into<ObjectId>) -> ObjectMut<'_> {
        ObjectMut::new(self, id.into())
    }

    /// Read view of a function's payload.
    pub fn function(&self, id: FunctionId) -> Option<FunctionRef<'_>> {
        let object = self.object(id);
        let data = self.arena.get(id.object_id()).function.as_ref()?;
        Some(FunctionRef::new(object, data))
    }

    /// Write view of a function's payload.
    pub fn function_mut(&mut self, id: FunctionId) -> Option<FunctionMut<'_>> {
        let data = self.arena.get_mut(id.object_id()).function.as_mut()?;
        Some(FunctionMut::new(id, data))
    }

    /// The object as a `Value`, tagged `Function` when it is one.
    pub fn value_of(&self, id: ObjectId) -> Value {
        if self.arena.get(id).function.is_some() {
            Value::Function(FunctionId::new(id))
        } else {
            Value::Object(id)
        }
    }

    // === Calls ===

    /// Call `function` with the global object as `this`.
    pub fn call(&mut self, function: FunctionId, actuals: &[Value]) -> Value {
        let this = self.value_of(self.global_object);
        self.call_with_this(function, this, actuals)
    }

    /// Call `function` with an explicit receiver.
    ///
    /// Argument values are accepted for interface parity; no built-in
    /// inspects them.
    pub fn call_with_this(&mut self, function: FunctionId, this: Value, actuals: &[Value]) -> Value {
        let kind = self
            .function(function)
            .map_or(FunctionKind::Plain, |f| f.kind());
        trace!(%function, %this, argc = actuals.len(), ?kind, "call");
        match kind {
            FunctionKind::Plain => function::call_plain(self, function, this),
            FunctionKind::Constructor(builtin) => function::construct(self, builtin, this),
        }
    }

    // === Stub registration ===

    /// Register a stub method with no return hint and `argument_count`
    /// undefined argument hints.
    pub fn add_function(
        &mut self,
        object: impl Into<ObjectId>,
        name: &str,
        argument_count: usize,
    ) -> FunctionId {
        let function = self.new_stub(argument_count);
        self.object_mut(object).set_property(name, function);
        function
    }

    /// Register a stub method whose calls yield `result`.
    pub fn add_function_with_result(
        &mut self,
        object: impl Into<ObjectId>,
        name: &str,
        result: Value,
        argument_count: usize,
    ) -> FunctionId {
        let function = self.new_stub(argument_count);
        if let Some(mut stub) = self.function_mut(function) {
            stub.set_return_value(Some(result));
        }
        self.object_mut(object).set_property(name, function);
        function
    }

    fn new_stub(&mut self, argument_count: usize) -> FunctionId {
        let function = self.new_function();
        if let Some(mut stub) = self.function_mut(function) {
            for _ in 0..argument_count {
                stub.add_argument(Value::Undefined);
            }
        }
        function
    }

    // === Coercions ===

    /// `ToNumber`. Absent when an object has no usable `valueOf`.
    pub fn convert_to_number(&mut self, value: Option<Value>) -> Option<Value> {
        ConvertToNumber::new(self).convert(value)
    }

    /// `ToString`. Absent when an object has no usable `toString`.
    pub fn convert_to_string(&mut self, value: Option<Value>) -> Option<Value> {
        ConvertToString::new(self).convert(value)
    }

    /// `ToObject`. Boxes primitives through their constructors.
    pub fn convert_to_object(&mut self, value: Option<Value>) -> Option<Value> {
        ConvertToObject::new(self).convert(value)
    }

    /// `ToBoolean`. Every present value becomes the boolean singleton.
    pub fn convert_to_boolean(&self, value: Option<Value>) -> Option<Value> {
        ConvertToBoolean::new().convert(value)
    }

    /// `typeof`-like name of a value; `"unknown"` when absent.
    pub fn type_id(&self, value: Option<Value>) -> &str {
        TypeId::new(self).resolve(value)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("objects", &self.arena.len())
            .field("global_object", &self.global_object)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
