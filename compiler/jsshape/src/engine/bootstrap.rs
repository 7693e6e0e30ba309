//! Standard library surface installed by every engine.
//!
//! Members are stubs: names, arities and return hints, no bodies. Argument
//! hints are all undefined. Tables are installed in a fixed order so that
//! two engines always end up with identical graphs.

use super::Engine;
use crate::function::Builtin;
use crate::id::ObjectId;
use crate::value::Value;

/// Return hint of a stub method.
#[derive(Copy, Clone, Debug)]
enum Returns {
    /// No hint; calls yield undefined.
    Nothing,
    Number,
    Boolean,
    String,
    /// A fresh Array instance per stub.
    Array,
}

type Stub = (&'static str, Returns, usize);

const OBJECT_STATICS: &[Stub] = &[
    ("getPrototypeOf", Returns::Nothing, 1),
    ("getOwnPropertyDescriptor", Returns::Nothing, 2),
    ("getOwnPropertyNames", Returns::Array, 1),
    ("create", Returns::Nothing, 1),
    ("defineProperty", Returns::Nothing, 3),
    ("defineProperties", Returns::Nothing, 2),
    ("seal", Returns::Nothing, 1),
    ("freeze", Returns::Nothing, 1),
    ("preventExtensions", Returns::Nothing, 1),
    ("isSealed", Returns::Boolean, 1),
    ("isFrozen", Returns::Boolean, 1),
    ("isExtensible", Returns::Boolean, 1),
    ("keys", Returns::Array, 1),
];

const OBJECT_METHODS: &[Stub] = &[
    ("toString", Returns::String, 0),
    ("toLocaleString", Returns::String, 0),
    ("valueOf", Returns::Nothing, 0),
    ("hasOwnProperty", Returns::Boolean, 1),
    ("isPrototypeOf", Returns::Boolean, 1),
    ("propertyIsEnumerable", Returns::Boolean, 1),
];

const FUNCTION_METHODS: &[Stub] = &[
    ("toString", Returns::String, 0),
    ("apply", Returns::Nothing, 2),
    ("call", Returns::Nothing, 1),
    ("bind", Returns::Nothing, 1),
];

const ARRAY_STATICS: &[Stub] = &[("isArray", Returns::Boolean, 1)];

const ARRAY_METHODS: &[Stub] = &[
    ("toString", Returns::String, 0),
    ("toLocaleString", Returns::String, 0),
    ("concat", Returns::Nothing, 0),
    ("join", Returns::Nothing, 1),
    ("pop", Returns::Nothing, 0),
    ("push", Returns::Nothing, 0),
    ("reverse", Returns::Nothing, 0),
    ("shift", Returns::Nothing, 0),
    ("slice", Returns::Nothing, 2),
    ("sort", Returns::Nothing, 1),
    ("splice", Returns::Nothing, 2),
    ("unshift", Returns::Nothing, 0),
    ("indexOf", Returns::Number, 1),
    ("lastIndexOf", Returns::Number, 1),
    ("every", Returns::Nothing, 1),
    ("some", Returns::Nothing, 1),
    ("forEach", Returns::Nothing, 1),
    ("map", Returns::Nothing, 1),
    ("filter", Returns::Nothing, 1),
    ("reduce", Returns::Nothing, 1),
    ("reduceRight", Returns::Nothing, 1),
];

const STRING_STATICS: &[Stub] = &[("fromCharCode", Returns::String, 0)];

const STRING_METHODS: &[Stub] = &[
    ("toString", Returns::String, 0),
    ("valueOf", Returns::String, 0),
    ("charAt", Returns::String, 1),
    ("charCodeAt", Returns::String, 1),
    ("concat", Returns::String, 0),
    ("indexOf", Returns::Number, 2),
    ("lastIndexOf", Returns::Number, 2),
    ("localeCompare", Returns::Boolean, 1),
    ("match", Returns::Array, 1),
    ("replace", Returns::String, 2),
    ("search", Returns::Number, 1),
    ("slice", Returns::String, 2),
    ("split", Returns::Array, 2),
    ("substring", Returns::String, 2),
    ("toLowerCase", Returns::String, 0),
    ("toLocaleLowerCase", Returns::String, 0),
    ("toUpperCase", Returns::String, 0),
    ("toLocaleUpperCase", Returns::String, 0),
    ("trim", Returns::String, 0),
];

const BOOLEAN_STATICS: &[Stub] = &[("fromCharCode", Returns::Nothing, 0)];

const BOOLEAN_METHODS: &[Stub] = &[
    ("toString", Returns::String, 0),
    ("valueOf", Returns::Boolean, 0),
];

const NUMBER_CONSTANTS: &[&str] = &[
    "MAX_VALUE",
    "MIN_VALUE",
    "NaN",
    "NEGATIVE_INFINITY",
    "POSITIVE_INFINITY",
];

const NUMBER_STATICS: &[Stub] = &[("fromCharCode", Returns::Nothing, 0)];

const NUMBER_METHODS: &[Stub] = &[
    ("toString", Returns::String, 0),
    ("toLocaleString", Returns::String, 0),
    ("valueOf", Returns::Number, 0),
    ("toFixed", Returns::Number, 1),
    ("toExponential", Returns::Number, 1),
    ("toPrecision", Returns::Number, 1),
];

const MATH_CONSTANTS: &[&str] = &[
    "E", "LN10", "LN2", "LOG2E", "LOG10E", "PI", "SQRT1_2", "SQRT2",
];

const MATH_METHODS: &[Stub] = &[
    ("abs", Returns::Number, 1),
    ("acos", Returns::Number, 1),
    ("asin", Returns::Number, 1),
    ("atan", Returns::Number, 1),
    ("atan2", Returns::Number, 2),
    ("ceil", Returns::Number, 1),
    ("cos", Returns::Number, 1),
    ("exp", Returns::Number, 1),
    ("floor", Returns::Number, 1),
    ("log", Returns::Number, 1),
    ("max", Returns::Number, 1),
    ("min", Returns::Number, 1),
    ("pow", Returns::Number, 2),
    ("random", Returns::Number, 1),
    ("round", Returns::Number, 1),
    ("sin", Returns::Number, 1),
    ("sqrt", Returns::Number, 1),
    ("tan", Returns::Number, 1),
];

const DATE_STATICS: &[Stub] = &[
    ("parse", Returns::Number, 1),
    ("now", Returns::Number, 0),
];

const DATE_METHODS: &[Stub] = &[
    ("toString", Returns::String, 0),
    ("toDateString", Returns::String, 0),
    ("toTimeString", Returns::String, 0),
    ("toLocaleString", Returns::String, 0),
    ("toLocaleDateString", Returns::String, 0),
    ("toLocaleTimeString", Returns::String, 0),
    ("valueOf", Returns::Number, 0),
    ("getTime", Returns::Number, 0),
    ("getFullYear", Returns::Number, 0),
    ("getUTCFullYear", Returns::Number, 0),
    ("getMonth", Returns::Number, 0),
    ("getUTCMonth", Returns::Number, 0),
    ("getDate", Returns::Number, 0),
    ("getUTCDate", Returns::Number, 0),
    ("getHours", Returns::Number, 0),
    ("getUTCHours", Returns::Number, 0),
    ("getMinutes", Returns::Number, 0),
    ("getUTCMinutes", Returns::Number, 0),
    ("getSeconds", Returns::Number, 0),
    ("getUTCSeconds", Returns::Number, 0),
    ("getMilliseconds", Returns::Number, 0),
    ("getUTCMilliseconds", Returns::Number, 0),
    ("getTimezoneOffset", Returns::Number, 0),
    ("setTime", Returns::Nothing, 1),
    ("setMilliseconds", Returns::Nothing, 1),
    ("setUTCMilliseconds", Returns::Nothing, 1),
    ("setSeconds", Returns::Nothing, 1),
    ("setUTCSeconds", Returns::Nothing, 1),
    ("setMinutes", Returns::Nothing, 1),
    ("setUTCMinutes", Returns::Nothing, 1),
    ("setHours", Returns::Nothing, 1),
    ("setUTCHours", Returns::Nothing, 1),
    ("setDate", Returns::Nothing, 1),
    ("setUTCDate", Returns::Nothing, 1),
    ("setMonth", Returns::Nothing, 1),
    ("setUTCMonth", Returns::Nothing, 1),
    ("setFullYear", Returns::Nothing, 1),
    ("setUTCFullYear", Returns::Nothing, 1),
    ("toUTCString", Returns::String, 0),
    ("toISOString", Returns::String, 0),
    ("toJSON", Returns::String, 1),
];

const REGEXP_METHODS: &[Stub] = &[
    ("exec", Returns::Array, 1),
    ("test", Returns::Boolean, 1),
    ("toString", Returns::String, 0),
];

impl Engine {
    /// Populate prototypes, constructors, Math and the global object.
    ///
    /// Runs exactly once, from the constructor, after every prototype and
    /// constructor slot has been allocated.
    pub(super) fn install_standard_library(&mut self) {
        self.link_constructors();

        self.install(self.object_ctor(), OBJECT_STATICS);
        self.install(self.object_prototype(), OBJECT_METHODS);

        self.install(self.function_prototype(), FUNCTION_METHODS);

        self.install(self.array_ctor(), ARRAY_STATICS);
        self.install(self.array_prototype(), ARRAY_METHODS);

        self.install(self.string_ctor(), STRING_STATICS);
        self.install(self.string_prototype(), STRING_METHODS);

        self.install(self.boolean_ctor(), BOOLEAN_STATICS);
        self.install(self.boolean_prototype(), BOOLEAN_METHODS);

        self.install_constants(self.number_ctor(), NUMBER_CONSTANTS);
        self.install(self.number_ctor(), NUMBER_STATICS);
        self.install(self.number_prototype(), NUMBER_METHODS);

        self.install_constants(self.math_object(), MATH_CONSTANTS);
        self.install(self.math_object(), MATH_METHODS);

        self.install(self.date_ctor(), DATE_STATICS);
        self.install(self.date_prototype(), DATE_METHODS);

        self.install(self.regexp_prototype(), REGEXP_METHODS);

        self.fill_global_object();
        tracing::debug!("standard library installed");
    }

    /// Cross-link each constructor with its prototype.
    fn link_constructors(&mut self) {
        for builtin in Builtin::ALL {
            let ctor = self.constructor_of(builtin);
            let prototype = self.prototype_of(builtin);
            self.object_mut(ctor).set_property("prototype", prototype);
            self.object_mut(prototype).set_property("constructor", ctor);
        }
    }

    fn install(&mut self, target: impl Into<ObjectId>, stubs: &[Stub]) {
        let target = target.into();
        for &(name, returns, argument_count) in stubs {
            let result = match returns {
                Returns::Nothing => None,
                Returns::Number => Some(Value::Number),
                Returns::Boolean => Some(Value::Boolean),
                Returns::String => Some(Value::String),
                Returns::Array => Some(self.new_array_value()),
            };
            match result {
                Some(result) => {
                    self.add_function_with_result(target, name, result, argument_count);
                }
                None => {
                    self.add_function(target, name, argument_count);
                }
            }
        }
    }

    fn install_constants(&mut self, target: impl Into<ObjectId>, names: &[&str]) {
        let mut target = self.object_mut(target);
        for name in names {
            target.set_property(name, Value::Number);
        }
    }

    fn fill_global_object(&mut self) {
        let math = self.math_object();
        let constructors = Builtin::ALL.map(|builtin| (builtin, self.constructor_of(builtin)));

        let mut global = self.object_mut(self.global_object());
        global.set_property("Math", math);
        for (builtin, ctor) in constructors {
            global.set_property(builtin.class_name(), ctor);
        }
    }
}
