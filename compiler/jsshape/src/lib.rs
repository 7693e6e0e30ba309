//! jsshape - prototype-based object and type model for static analysis.
//!
//! Models the runtime values of a dynamically typed scripting language at
//! the level of *shapes*, so an analyser can answer questions such as "what
//! does `typeof x` resolve to" or "what does this expression become after
//! an implicit `ToString`" without executing anything.
//!
//! # Architecture
//!
//! - [`Value`]: closed set of seven kinds; primitives are payload-free
//!   singletons, objects and functions are arena handles
//! - [`Environment`]: name lookup with parent delegation
//! - [`ObjectRef`] / [`ObjectMut`]: views over arena objects (members,
//!   prototype link, scope link)
//! - [`FunctionRef`] / [`FunctionMut`]: argument and return hints
//! - [`Engine`]: owns the arena, bootstraps the standard library, dispatches
//!   calls and coercions
//! - [`ConvertToNumber`], [`ConvertToString`], [`ConvertToObject`],
//!   [`ConvertToBoolean`], [`TypeId`]: visitor-based coercions
//!
//! # Example
//!
//! ```
//! use jsshape::{Engine, Environment, Value};
//!
//! let mut engine = Engine::new();
//! let array = engine.new_array_value();
//!
//! assert_eq!(engine.type_id(Some(array)), "Array");
//! assert_eq!(engine.convert_to_string(Some(array)), Some(Value::String));
//!
//! let global = engine.object(engine.global_object());
//! assert_eq!(global.lookup("Math"), Some(Value::Object(engine.math_object())));
//! ```

mod arena;
mod coerce;
mod config;
mod engine;
mod environment;
mod error;
mod function;
mod id;
mod object;
mod value;

pub use coerce::{ConvertToBoolean, ConvertToNumber, ConvertToObject, ConvertToString, TypeId};
pub use config::EngineConfig;
pub use engine::Engine;
pub use environment::{Environment, LexicalScope};
pub use error::PrototypeError;
pub use function::{Builtin, FunctionKind, FunctionMut, FunctionRef};
pub use id::{FunctionId, ObjectId};
pub use object::{ObjectMut, ObjectRef, PROTO_PROPERTY};
pub use value::{
    value_cast, BooleanValue, FromValue, NullValue, NumberValue, StringValue, UndefinedValue,
    Value, ValueKind, ValueVisitor,
};
