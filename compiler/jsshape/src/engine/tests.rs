use super::*;
use crate::environment::Environment;
use crate::object::PROTO_PROPERTY;
use crate::value::{value_cast, NumberValue};
use pretty_assertions::assert_eq;

// -- Bootstrap graph --

#[test]
fn prototypes_inherit_from_object_prototype() {
    let engine = Engine::new();
    let object_prototype = engine.object_prototype();

    assert_eq!(engine.object(object_prototype).prototype(), None);
    for builtin in &Builtin::ALL[1..] {
        let proto = engine.prototype_of(*builtin);
        assert_eq!(
            engine.object(proto).prototype(),
            Some(object_prototype),
            "{builtin:?} prototype"
        );
    }
}

#[test]
fn constructors_and_prototypes_are_cross_linked() {
    let engine = Engine::new();
    for builtin in Builtin::ALL {
        let ctor = engine.constructor_of(builtin);
        let proto = engine.prototype_of(builtin);

        assert_eq!(
            engine.object(ctor).member("prototype"),
            Some(Value::Object(proto)),
            "{builtin:?}.prototype"
        );
        assert_eq!(
            engine.object(proto).member("constructor"),
            Some(Value::Function(ctor)),
            "{builtin:?}.prototype.constructor"
        );
        assert_eq!(
            engine.object(ctor).prototype(),
            Some(engine.function_prototype())
        );
    }
}

#[test]
fn global_object_binds_constructors_and_math() {
    let engine = Engine::new();
    let global = engine.object(engine.global_object());

    assert_eq!(global.class_name(), "Global");
    assert_eq!(global.lookup("Array"), Some(Value::Function(engine.array_ctor())));
    assert_eq!(global.lookup("RegExp"), Some(Value::Function(engine.regexp_ctor())));
    assert_eq!(global.lookup("Math"), Some(Value::Object(engine.math_object())));
    assert_eq!(global.member_count(), 9);
}

#[test]
fn array_prototype_constructor_is_array_ctor() {
    let engine = Engine::new();
    assert_eq!(
        engine.object(engine.array_prototype()).property("constructor"),
        Some(Value::Function(engine.array_ctor()))
    );
}

#[test]
fn number_constants_narrow_to_number() {
    let engine = Engine::new();
    let number = engine.object(engine.number_ctor());

    for name in ["MAX_VALUE", "MIN_VALUE", "NaN", "NEGATIVE_INFINITY", "POSITIVE_INFINITY"] {
        assert!(
            value_cast::<NumberValue>(number.lookup(name)).is_some(),
            "Number.{name}"
        );
    }
}

#[test]
fn math_methods_return_numbers() {
    let mut engine = Engine::new();
    let Some(floor) = value_cast::<FunctionId>(engine.object(engine.math_object()).lookup("floor"))
    else {
        panic!("Math.floor must be a function");
    };

    assert_eq!(engine.function(floor).map(|f| f.argument_count()), Some(1));
    assert_eq!(engine.call(floor, &[Value::Number]), Value::Number);
    assert_eq!(
        engine.object(engine.math_object()).lookup("PI"),
        Some(Value::Number)
    );
}

#[test]
fn instances_find_prototype_methods() {
    let mut engine = Engine::new();
    let array = engine.new_array_value();
    let Some(array) = array.object_id() else {
        panic!("Array() must return an object");
    };

    let view = engine.object(array);
    assert!(value_cast::<FunctionId>(view.property("push")).is_some());
    assert!(value_cast::<FunctionId>(view.property("hasOwnProperty")).is_some());
    assert_eq!(view.property("toLocalString"), None);
    assert_eq!(
        view.property(PROTO_PROPERTY),
        Some(Value::Object(engine.array_prototype()))
    );
}

#[test]
fn array_returning_stubs_hint_array_instances() {
    let mut engine = Engine::new();
    let Some(keys) = value_cast::<FunctionId>(engine.object(engine.object_ctor()).lookup("keys"))
    else {
        panic!("Object.keys must be a function");
    };

    let result = engine.call(keys, &[]);
    assert_eq!(engine.type_id(Some(result)), "Array");
}

#[test]
fn two_engines_build_identical_graphs() {
    let first = Engine::new();
    let second = Engine::new();
    assert_eq!(first.object_count(), second.object_count());
    assert_eq!(first.global_object(), second.global_object());
}

// -- Factories --

#[test]
fn new_object_inherits_from_object_prototype() {
    let mut engine = Engine::new();
    let before = engine.object_count();
    let object = engine.new_object();

    assert_eq!(engine.object_count(), before + 1);
    let view = engine.object(object);
    assert_eq!(view.prototype(), Some(engine.object_prototype()));
    assert_eq!(view.class_name(), "");
    assert_eq!(view.member_count(), 0);
}

#[test]
fn new_function_narrows_as_function() {
    let mut engine = Engine::new();
    let function = engine.new_function();

    assert_eq!(engine.value_of(function.object_id()), Value::Function(function));
    assert_eq!(engine.type_id(Some(Value::Function(function))), "Function");
}

#[test]
fn object_and_function_ids_are_distinct() {
    let mut engine = Engine::new();
    let a = engine.new_object();
    let b = engine.new_object();
    let f = engine.new_function();

    assert_ne!(a, b);
    assert_ne!(f.object_id(), a);
    assert_ne!(f.object_id(), b);
}

// -- Constructor calls --

#[test]
fn array_ctor_reuses_plain_receiver() {
    let mut engine = Engine::new();
    let receiver = engine.new_object();

    let result = engine.call_with_this(engine.array_ctor(), Value::Object(receiver), &[]);
    assert_eq!(result, Value::Object(receiver));
    assert_eq!(engine.type_id(Some(result)), "Array");
}

#[test]
fn array_ctor_called_plainly_allocates() {
    let mut engine = Engine::new();
    let first = engine.new_array_value();
    let second = engine.new_array_value();

    assert_ne!(first, second);
    assert_ne!(first, Value::Object(engine.global_object()));
}

#[test]
fn boolean_ctor_always_allocates() {
    let mut engine = Engine::new();
    let receiver = engine.new_object();
    let ctor = engine.boolean_ctor();

    let result = engine.call_with_this(ctor, Value::Object(receiver), &[]);
    assert_ne!(result, Value::Object(receiver));
    assert_eq!(engine.type_id(Some(result)), "Boolean");
}

#[test]
fn function_ctor_returns_a_function() {
    let mut engine = Engine::new();
    let result = engine.call(engine.function_ctor(), &[]);
    assert!(result.as_function().is_some());
}

#[test]
fn date_instance_finds_date_methods() {
    let mut engine = Engine::new();
    let result = engine.call(engine.date_ctor(), &[]);
    let Some(date) = result.object_id() else {
        panic!("Date() must return an object");
    };

    assert!(value_cast::<FunctionId>(engine.object(date).property("getTime")).is_some());
}

// -- Stub registration --

#[test]
fn add_function_registers_undefined_hints() {
    let mut engine = Engine::new();
    let object = engine.new_object();
    let function = engine.add_function(object, "frob", 3);

    assert_eq!(engine.object(object).member("frob"), Some(Value::Function(function)));
    let Some(view) = engine.function(function) else {
        panic!("add_function must register a function");
    };
    assert_eq!(view.argument_count(), 3);
    assert!(view.arguments().all(|hint| hint == Value::Undefined));
    assert_eq!(view.return_value(), Value::Undefined);
}

#[test]
fn add_function_with_result_sets_return_hint() {
    let mut engine = Engine::new();
    let object = engine.new_object();
    let function = engine.add_function_with_result(object, "size", Value::Number, 0);

    assert_eq!(engine.call(function, &[]), Value::Number);
    assert_eq!(engine.function(function).map(|f| f.argument_count()), Some(0));
}

#[test]
fn add_function_overwrites_existing_member() {
    let mut engine = Engine::new();
    let object = engine.new_object();
    let first = engine.add_function(object, "run", 0);
    let second = engine.add_function(object, "run", 1);

    assert_ne!(first, second);
    assert_eq!(engine.object(object).member("run"), Some(Value::Function(second)));
    assert_eq!(engine.object(object).member_count(), 1);
}

#[test]
fn primitive_accessors_are_singletons() {
    let engine = Engine::default();
    assert_eq!(engine.null_value(), Value::Null);
    assert_eq!(engine.undefined_value(), Value::Undefined);
    assert_eq!(engine.number_value(), Value::Number);
    assert_eq!(engine.boolean_value(), Value::Boolean);
    assert_eq!(engine.string_value(), Value::String);
}

#[test]
fn debug_output_summarises_engine() {
    let engine = Engine::new();
    let rendered = format!("{engine:?}");
    assert!(rendered.starts_with("Engine {"));
    assert!(rendered.contains("objects"));
}

#[test]
fn config_defaults_and_builders() {
    let config = EngineConfig::default();
    assert_eq!(config, EngineConfig::new());
    assert!(!config.legacy_call_returns_this);
    assert!(!config.legacy_undefined_to_null);

    let legacy = EngineConfig::legacy();
    assert!(legacy.legacy_call_returns_this);
    assert!(legacy.legacy_undefined_to_null);
    assert_eq!(
        EngineConfig::new().legacy_call_returns_this(true),
        EngineConfig {
            legacy_call_returns_this: true,
            legacy_undefined_to_null: false,
        }
    );

    let engine = Engine::with_config(legacy.clone());
    assert_eq!(engine.config(), &legacy);
}
