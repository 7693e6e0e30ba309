//! Coercion visitors and `typeof`.
//!
//! Each converter is a single-use visitor over one engine. `convert` swaps
//! the result slot out on entry and back in on exit, so a converter may be
//! re-entered while a conversion is in flight (a `valueOf` stub that itself
//! converts, for instance) without clobbering the outer result.
//!
//! Rules follow the ECMAScript abstract operations at the level of shapes:
//!
//! | input            | ToNumber        | ToString         | ToObject             |
//! |------------------|-----------------|------------------|----------------------|
//! | null             | number          | string           | null                 |
//! | undefined        | number          | string           | undefined            |
//! | number           | itself          | string           | `Number()` instance  |
//! | boolean          | number          | string           | `Boolean()` instance |
//! | string           | number          | itself           | `String()` instance  |
//! | object/function  | via `valueOf`   | via `toString`   | itself               |

use tracing::trace;

use crate::engine::Engine;
use crate::environment::Environment;
use crate::id::{FunctionId, ObjectId};
use crate::value::{value_cast, FromValue, NumberValue, StringValue, Value, ValueVisitor};

/// Generate the entry point and result-slot swap shared by converters.
macro_rules! impl_conversion_entry {
    ($($converter:ident),+ $(,)?) => {
        $(
            impl $converter<'_> {
                /// Convert `value`; absent input gives absent output.
                pub fn convert(&mut self, value: Option<Value>) -> Option<Value> {
                    let previous = self.switch_result(None);
                    if let Some(value) = value {
                        value.accept(self);
                    }
                    let result = self.switch_result(previous);
                    trace!(
                        converter = stringify!($converter),
                        input = ?value,
                        output = ?result,
                        "coerced"
                    );
                    result
                }

                fn switch_result(&mut self, value: Option<Value>) -> Option<Value> {
                    std::mem::replace(&mut self.result, value)
                }
            }
        )+
    };
}

/// Look up `method` on `receiver`, call it with `receiver` as `this`, and
/// narrow the result to `T`.
fn call_conversion_method<T>(engine: &mut Engine, receiver: Value, method: &str) -> Option<Value>
where
    T: FromValue + Into<Value>,
{
    let object = receiver.object_id()?;
    let function = value_cast::<FunctionId>(engine.object(object).lookup(method))?;
    let result = engine.call_with_this(function, receiver, &[]);
    value_cast::<T>(Some(result)).map(Into::into)
}

/// `ToNumber` over value shapes.
pub struct ConvertToNumber<'e> {
    engine: &'e mut Engine,
    result: Option<Value>,
}

impl<'e> ConvertToNumber<'e> {
    pub fn new(engine: &'e mut Engine) -> Self {
        Self {
            engine,
            result: None,
        }
    }
}

impl ValueVisitor for ConvertToNumber<'_> {
    fn visit_null(&mut self) {
        self.result = Some(Value::Number);
    }

    fn visit_undefined(&mut self) {
        self.result = Some(Value::Number);
    }

    fn visit_number(&mut self) {
        self.result = Some(Value::Number);
    }

    fn visit_boolean(&mut self) {
        self.result = Some(Value::Number);
    }

    fn visit_string(&mut self) {
        self.result = Some(Value::Number);
    }

    fn visit_object(&mut self, object: ObjectId) {
        self.result =
            call_conversion_method::<NumberValue>(self.engine, Value::Object(object), "valueOf");
    }

    fn visit_function(&mut self, function: FunctionId) {
        self.result =
            call_conversion_method::<NumberValue>(self.engine, Value::Function(function), "valueOf");
    }
}

/// `ToString` over value shapes.
pub struct ConvertToString<'e> {
    engine: &'e mut Engine,
    result: Option<Value>,
}

impl<'e> ConvertToString<'e> {
    pub fn new(engine: &'e mut Engine) -> Self {
        Self {
            engine,
            result: None,
        }
    }
}

impl ValueVisitor for ConvertToString<'_> {
    fn visit_null(&mut self) {
        self.result = Some(Value::String);
    }

    fn visit_undefined(&mut self) {
        self.result = Some(Value::String);
    }

    fn visit_number(&mut self) {
        self.result = Some(Value::String);
    }

    fn visit_boolean(&mut self) {
        self.result = Some(Value::String);
    }

    fn visit_string(&mut self) {
        self.result = Some(Value::String);
    }

    fn visit_object(&mut self, object: ObjectId) {
        self.result =
            call_conversion_method::<StringValue>(self.engine, Value::Object(object), "toString");
    }

    fn visit_function(&mut self, function: FunctionId) {
        self.result = call_conversion_method::<StringValue>(
            self.engine,
            Value::Function(function),
            "toString",
        );
    }
}

/// `ToObject` over value shapes.
///
/// `null` maps to itself. `undefined` maps to itself, or to `null` under
/// `legacy_undefined_to_null`.
pub struct ConvertToObject<'e> {
    engine: &'e mut Engine,
    result: Option<Value>,
}

impl<'e> ConvertToObject<'e> {
    pub fn new(engine: &'e mut Engine) -> Self {
        Self {
            engine,
            result: None,
        }
    }

    fn box_with(&mut self, ctor: FunctionId) {
        self.result = Some(self.engine.call(ctor, &[]));
    }
}

impl ValueVisitor for ConvertToObject<'_> {
    fn visit_null(&mut self) {
        self.result = Some(Value::Null);
    }

    fn visit_undefined(&mut self) {
        self.result = if self.engine.config().legacy_undefined_to_null {
            Some(Value::Null)
        } else {
            Some(Value::Undefined)
        };
    }

    fn visit_number(&mut self) {
        let ctor = self.engine.number_ctor();
        self.box_with(ctor);
    }

    fn visit_boolean(&mut self) {
        let ctor = self.engine.boolean_ctor();
        self.box_with(ctor);
    }

    fn visit_string(&mut self) {
        let ctor = self.engine.string_ctor();
        self.box_with(ctor);
    }

    fn visit_object(&mut self, object: ObjectId) {
        self.result = Some(Value::Object(object));
    }

    fn visit_function(&mut self, function: FunctionId) {
        self.result = Some(Value::Function(function));
    }
}

/// `ToBoolean` over value shapes. Never calls user methods, so it needs no
/// engine.
#[derive(Debug, Default)]
pub struct ConvertToBoolean {
    result: Option<Value>,
}

impl ConvertToBoolean {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `value`; absent input gives absent output.
    pub fn convert(&mut self, value: Option<Value>) -> Option<Value> {
        let previous = std::mem::take(&mut self.result);
        if let Some(value) = value {
            value.accept(self);
        }
        std::mem::replace(&mut self.result, previous)
    }

    fn truthiness(&mut self) {
        self.result = Some(Value::Boolean);
    }
}

impl ValueVisitor for ConvertToBoolean {
    fn visit_null(&mut self) {
        self.truthiness();
    }

    fn visit_undefined(&mut self) {
        self.truthiness();
    }

    fn visit_number(&mut self) {
        self.truthiness();
    }

    fn visit_boolean(&mut self) {
        self.truthiness();
    }

    fn visit_string(&mut self) {
        self.truthiness();
    }

    fn visit_object(&mut self, _object: ObjectId) {
        self.truthiness();
    }

    fn visit_function(&mut self, _function: FunctionId) {
        self.truthiness();
    }
}

impl_conversion_entry!(ConvertToNumber, ConvertToString, ConvertToObject);

/// `typeof`-like classification.
///
/// Primitives give their kind name. Objects give their class name, or
/// `"object"` when anonymous; functions give their class name, or
/// `"Function"` when anonymous. Absent input gives `"unknown"`.
pub struct TypeId<'e> {
    engine: &'e Engine,
    result: &'e str,
}

impl<'e> TypeId<'e> {
    pub fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            result: "unknown",
        }
    }

    pub fn resolve(&mut self, value: Option<Value>) -> &'e str {
        self.result = "unknown";
        if let Some(value) = value {
            value.accept(self);
        }
        self.result
    }

    fn class_or(&mut self, object: ObjectId, fallback: &'static str) {
        let engine = self.engine;
        let class_name = engine.object(object).class_name();
        self.result = if class_name.is_empty() {
            fallback
        } else {
            class_name
        };
    }
}

impl ValueVisitor for TypeId<'_> {
    fn visit_null(&mut self) {
        self.result = "null";
    }

    fn visit_undefined(&mut self) {
        self.result = "undefined";
    }

    fn visit_number(&mut self) {
        self.result = "number";
    }

    fn visit_boolean(&mut self) {
        self.result = "boolean";
    }

    fn visit_string(&mut self) {
        self.result = "string";
    }

    fn visit_object(&mut self, object: ObjectId) {
        self.class_or(object, "object");
    }

    fn visit_function(&mut self, function: FunctionId) {
        self.class_or(function.object_id(), "Function");
    }
}
