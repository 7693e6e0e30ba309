#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end scenarios over the public API.
//!
//! These drive an engine the way an analyser would: bootstrap, bind names
//! in a lexical scope, call stubs, and ask what values become under
//! coercion.

use jsshape::{
    value_cast, Builtin, Engine, EngineConfig, Environment, FunctionId, LexicalScope,
    NumberValue, StringValue, Value, PROTO_PROPERTY,
};
use pretty_assertions::assert_eq;

fn global_function(engine: &Engine, name: &str) -> FunctionId {
    value_cast::<FunctionId>(engine.object(engine.global_object()).lookup(name)).unwrap()
}

fn method(engine: &Engine, receiver: Value, name: &str) -> FunctionId {
    let object = receiver.object_id().unwrap();
    value_cast::<FunctionId>(engine.object(object).property(name)).unwrap()
}

#[test]
fn fresh_engine_wiring() {
    let engine = Engine::new();
    let global = engine.object(engine.global_object());

    assert_eq!(global.property("Array"), Some(Value::Function(engine.array_ctor())));
    assert_eq!(
        engine.object(engine.array_prototype()).property("constructor"),
        Some(Value::Function(engine.array_ctor()))
    );
    assert!(
        value_cast::<NumberValue>(engine.object(engine.number_ctor()).property("MAX_VALUE"))
            .is_some()
    );
}

#[test]
fn array_called_on_plain_receiver_retags_it() {
    let mut engine = Engine::new();
    let receiver = engine.new_object();
    let before = engine.object_count();

    let result = engine.call_with_this(engine.array_ctor(), Value::Object(receiver), &[]);

    assert_eq!(result, Value::Object(receiver));
    assert_eq!(engine.object_count(), before);
    let view = engine.object(receiver);
    assert_eq!(view.class_name(), "Array");
    assert_eq!(view.prototype(), Some(engine.array_prototype()));
}

#[test]
fn boolean_never_reuses_receiver() {
    let mut engine = Engine::new();
    let receiver = Value::Object(engine.new_object());
    let global = Value::Object(engine.global_object());

    let mut seen = Vec::new();
    for this in [receiver, global, Value::Undefined, receiver] {
        let result = engine.call_with_this(engine.boolean_ctor(), this, &[]);
        assert_ne!(result, this);
        assert!(!seen.contains(&result));
        seen.push(result);
    }
}

#[test]
fn new_object_round_trip() {
    let mut engine = Engine::new();
    let proto = engine.new_object();
    let child = engine.new_object_with_prototype(Some(proto));
    let orphan = engine.new_object_with_prototype(None);

    assert_eq!(engine.object(child).prototype(), Some(proto));
    assert_eq!(engine.object(orphan).prototype(), None);
}

#[test]
fn proto_property_wins_over_member() {
    let mut engine = Engine::new();
    let object = engine.new_object();
    let decoy = engine.new_object();
    engine.object_mut(object).set_property(PROTO_PROPERTY, decoy);

    assert_eq!(
        engine.object(object).property(PROTO_PROPERTY),
        Some(Value::Object(engine.object_prototype()))
    );
}

#[test]
fn shadowed_member_resolves_locally() {
    let mut engine = Engine::new();
    let proto = engine.new_object();
    engine.object_mut(proto).set_property("x", Value::Number);
    let object = engine.new_object_with_prototype(Some(proto));
    engine.object_mut(object).set_property("x", Value::String);

    assert_eq!(engine.object(object).property("x"), Some(Value::String));
}

#[test]
fn string_methods_through_boxing() {
    let mut engine = Engine::new();

    // "abc".split(",") boxes the primitive, then calls String.prototype.split.
    let boxed = engine.convert_to_object(Some(Value::String)).unwrap();
    let split = method(&engine, boxed, "split");
    let pieces = engine.call_with_this(split, boxed, &[Value::String]);

    assert_eq!(engine.type_id(Some(pieces)), "Array");
    let join = method(&engine, pieces, "join");
    assert_eq!(engine.call_with_this(join, pieces, &[]), Value::Undefined);
    assert_eq!(engine.convert_to_string(Some(pieces)), Some(Value::String));
}

#[test]
fn lexical_scope_over_global_object() {
    let mut engine = Engine::new();
    let date = engine.call(global_function(&engine, "Date"), &[]);

    let mut scope = LexicalScope::with_parent(engine.object(engine.global_object()));
    scope.define("now", date);
    scope.define("label", Value::String);

    assert_eq!(engine.type_id(scope.lookup("now")), "Date");
    assert_eq!(engine.type_id(scope.lookup("label")), "string");
    assert_eq!(engine.type_id(scope.lookup("Math")), "object");
    assert_eq!(engine.type_id(scope.lookup("Date")), "Function");
    assert_eq!(engine.type_id(scope.lookup("undeclared")), "unknown");
}

#[test]
fn date_converts_to_number_and_string() {
    let mut engine = Engine::new();
    let date = engine.call(engine.date_ctor(), &[]);

    assert!(value_cast::<NumberValue>(engine.convert_to_number(Some(date))).is_some());
    assert!(value_cast::<StringValue>(engine.convert_to_string(Some(date))).is_some());
    assert_eq!(engine.convert_to_boolean(Some(date)), Some(Value::Boolean));
}

#[test]
fn user_defined_class_hierarchy() {
    let mut engine = Engine::new();

    let animal = engine.new_object();
    engine.object_mut(animal).set_class_name("Animal");
    engine.add_function_with_result(animal, "name", Value::String, 0);

    let dog = engine.new_object_with_prototype(Some(animal));
    engine.object_mut(dog).set_class_name("Dog");
    engine.add_function_with_result(dog, "toString", Value::String, 0);

    let rex = engine.new_object_with_prototype(Some(dog));
    assert!(engine.object(rex).inherits_from(animal));
    assert!(engine.object(rex).inherits_from(engine.object_prototype()));
    assert_eq!(engine.type_id(Some(Value::Object(rex))), "object");

    let name = method(&engine, Value::Object(rex), "name");
    assert_eq!(engine.call_with_this(name, Value::Object(rex), &[]), Value::String);
    assert_eq!(
        engine.convert_to_string(Some(Value::Object(rex))),
        Some(Value::String)
    );

    // Closing the loop is refused and leaves the hierarchy intact.
    assert!(engine.object_mut(animal).try_set_prototype(Some(rex)).is_err());
    assert_eq!(
        engine.object(animal).prototype(),
        Some(engine.object_prototype())
    );
}

#[test]
fn legacy_configuration_reproduces_old_results() {
    let mut engine = Engine::with_config(EngineConfig::legacy());

    assert_eq!(
        engine.convert_to_object(Some(Value::Undefined)),
        Some(Value::Null)
    );
    let object = Value::Object(engine.new_object());
    let to_string = method(&engine, object, "toString");
    assert_eq!(engine.call_with_this(to_string, object, &[]), object);
}

#[test]
fn every_builtin_instance_reports_its_class() {
    let mut engine = Engine::new();
    for builtin in Builtin::ALL {
        let instance = engine.call(engine.constructor_of(builtin), &[]);
        assert_eq!(
            engine.type_id(Some(instance)),
            builtin.class_name(),
            "{builtin:?}"
        );
        assert_eq!(
            engine.object(instance.object_id().unwrap()).prototype(),
            Some(engine.prototype_of(builtin))
        );
    }
}
