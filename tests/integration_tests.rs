//! Whole-pipeline scenarios: a compiler-setup-shaped environment feeding
//! parser-shaped types through every resolver, the way the surrounding
//! binding generator does per interface member.

use widlc::prelude::*;

/// An environment shaped like a real compilation setup pass: core and module
/// interfaces, a dictionary, an enumeration, callbacks and an
/// `[ImplementedAs]` override, registered once up front.
fn setup_environment() -> TypeEnvironment {
    let mut env = TypeEnvironment::new();
    env.register_component_dirs([
        ("Node".to_string(), "core".to_string()),
        ("Event".to_string(), "core".to_string()),
        ("EventInit".to_string(), "core".to_string()),
        ("Gamepad".to_string(), "modules".to_string()),
    ]);
    env.register_garbage_collected(["Node".to_string(), "Event".to_string()]);
    env.register_interfaces([
        ("Node".to_string(), InterfaceInfo::new("core/dom/Node.h")),
        ("Gamepad".to_string(), InterfaceInfo::new("modules/gamepad/Gamepad.h")),
    ]);
    env.register_dictionaries(["EventInit".to_string()]);
    env.register_enumerations(["ScrollBehavior".to_string()]);
    env.register_callback_functions([
        ("VoidCallback".to_string(), CallbackFunctionInfo::new("core")),
    ]);
    env.register_implemented_as([("HTMLFoo".to_string(), "HTMLFooElement".to_string())]);
    env
}

#[test]
fn boolean_attribute_end_to_end() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let ty = IdlType::plain("boolean");

    assert_eq!(cpp_type(&ty, &env, &attrs, TypeUsage::empty()), "bool");
    assert_eq!(cpp_type_initializer(&ty, &env), " = false");
    assert_eq!(
        v8_set_return_value(&ty, &env, "impl->checked()", &attrs, None, false, false).unwrap(),
        "v8SetReturnValueBool(info, impl->checked())"
    );
}

#[test]
fn enforce_range_long_argument() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::from_pairs([("EnforceRange", None)]);
    let ty = IdlType::plain("long");

    assert_eq!(cpp_type(&ty, &env, &attrs, TypeUsage::RVALUE), "int32_t");
    let plan = v8_value_to_local_cpp_value(
        &ty,
        &env,
        &attrs,
        "info[0]",
        "offset",
        &LocalConversionOptions {
            index: Some(0),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(
        plan.assign_expression.as_deref(),
        Some(
            "NativeValueTraits<IDLLong>::nativeValue(info.GetIsolate(), info[0], \
             exceptionState, EnforceRange)"
        )
    );
    assert_eq!(plan.check_expression.as_deref(), Some("exceptionState.hadException()"));
}

#[test]
fn nullable_string_attribute_round_trips_as_string_or_null() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let ty = IdlType::nullable(IdlType::plain("DOMString"));

    // Implicit null: storage is the (nullable) String itself.
    assert!(ty.is_implicit_nullable(&env));
    assert_eq!(
        cpp_type(&ty, &env, &attrs, TypeUsage::RAW),
        "V8StringResource<TreatNullAndUndefinedAsNullString>"
    );
    assert_eq!(
        v8_set_return_value(&ty, &env, "impl->id()", &attrs, None, false, false).unwrap(),
        "v8SetReturnValueStringOrNull(info, impl->id(), info.GetIsolate())"
    );
}

#[test]
fn string_and_double_union_scenario() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let union = IdlType::union(vec![IdlType::plain("DOMString"), IdlType::plain("double")]);

    assert_eq!(union.name(), "DOMStringOrDouble");
    assert_eq!(cpp_type(&union, &env, &attrs, TypeUsage::RVALUE), "const DOMStringOrDouble&");

    let plan = v8_value_to_local_cpp_value(
        &union,
        &env,
        &attrs,
        "v8Value",
        "value",
        &LocalConversionOptions::default(),
    )
    .unwrap();
    // Unions populate their local by output parameter.
    assert!(plan.assign_expression.is_none());
    assert_eq!(
        plan.set_expression.as_deref(),
        Some(
            "V8DOMStringOrDouble::toImpl(info.GetIsolate(), v8Value, value, \
             UnionTypeConversionMode::NotNullable, exceptionState)"
        )
    );

    assert_eq!(
        literal_cpp_value(&union, &env, &IdlLiteral::string("\"auto\"")).unwrap(),
        "DOMStringOrDouble::fromDOMString(\"auto\")"
    );
}

#[test]
fn enum_argument_canonicalizes_to_string() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let ty = IdlType::plain("ScrollBehavior");

    assert_eq!(cpp_type(&ty, &env, &attrs, TypeUsage::empty()), "String");
    let includes = includes_for_type(&ty, &env, &attrs);
    assert!(includes.contains("bindings/core/v8/IDLTypes.h"));
    assert_eq!(
        v8_set_return_value(&ty, &env, "result", &attrs, None, false, false).unwrap(),
        "v8SetReturnValueString(info, result, info.GetIsolate())"
    );
}

#[test]
fn gc_interface_sequence_argument() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let seq = IdlType::sequence(IdlType::plain("Node"));

    assert_eq!(cpp_type(&seq, &env, &attrs, TypeUsage::empty()), "HeapVector<Member<Node>>");
    assert_eq!(
        v8_value_to_cpp_value(&seq, &env, &attrs, "info[1]", "nodes", Some(1), "info.GetIsolate()")
            .unwrap(),
        "toMemberNativeArray<Node>(info[1], 2, info.GetIsolate(), exceptionState)"
    );
    let includes = includes_for_type(&seq, &env, &attrs);
    assert!(includes.contains("bindings/core/v8/V8Node.h"));
    let impl_includes = impl_includes_for_type(&seq, &env);
    assert!(impl_includes.contains("core/dom/Node.h"));
    assert!(impl_includes.contains("wtf/Vector.h"));
}

#[test]
fn sequence_of_sequence_recursion() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let nested = IdlType::sequence(IdlType::sequence(IdlType::plain("double")));
    assert_eq!(cpp_type(&nested, &env, &attrs, TypeUsage::empty()), "Vector<Vector<double>>");
    assert_eq!(
        literal_cpp_value(&nested, &env, &IdlLiteral::empty_sequence()).unwrap(),
        "Vector<Vector<double>>()"
    );
}

#[test]
fn implemented_as_override_flows_through_every_resolver() {
    let mut env = setup_environment();
    env.register_component_dirs([("HTMLFoo".to_string(), "core".to_string())]);
    let attrs = ExtendedAttributes::default();
    let ty = IdlType::plain("HTMLFoo");

    assert_eq!(cpp_type(&ty, &env, &attrs, TypeUsage::empty()), "HTMLFooElement*");
    assert_eq!(
        impl_forward_declaration_name(&ty, &env).as_deref(),
        Some("HTMLFooElement")
    );
    // The binding header still uses the IDL interface name.
    assert!(includes_for_type(&ty, &env, &attrs).contains("bindings/core/v8/V8HTMLFoo.h"));
}

#[test]
fn dictionary_return_value_uses_the_output_parameter() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let ty = IdlType::plain("EventInit");

    assert!(use_output_parameter_for_result(&ty, &env));
    assert_eq!(
        v8_set_return_value(&ty, &env, "value", &attrs, None, false, false).unwrap(),
        "v8SetReturnValue(info, result)"
    );
    assert_eq!(
        v8_set_return_value(&ty, &env, "value", &attrs, None, false, true).unwrap(),
        "v8SetReturnValue(info, result, info.GetIsolate()->GetCurrentContext()->Global())"
    );
}

#[test]
fn main_world_wrapper_return_fast_paths() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let ty = IdlType::plain("Node");

    assert_eq!(
        v8_set_return_value(&ty, &env, "impl->parentNode()", &attrs, Some("impl"), true, false)
            .unwrap(),
        "v8SetReturnValueForMainWorld(info, impl->parentNode())"
    );
    assert_eq!(
        v8_set_return_value(&ty, &env, "impl->parentNode()", &attrs, Some("impl"), false, false)
            .unwrap(),
        "v8SetReturnValueFast(info, impl->parentNode(), impl)"
    );
}

#[test]
fn callback_function_argument_end_to_end() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let ty = IdlType::plain("VoidCallback");

    assert_eq!(cpp_type(&ty, &env, &attrs, TypeUsage::empty()), "VoidCallback*");
    let plan = v8_value_to_local_cpp_value(
        &ty,
        &env,
        &attrs,
        "info[0]",
        "callback",
        &LocalConversionOptions {
            index: Some(0),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(
        plan.assign_expression.as_deref(),
        Some("VoidCallback::create(ScriptState::current(info.GetIsolate()), info[0])")
    );
    assert!(plan.check_expression.is_none());
    assert!(
        includes_for_type(&ty, &env, &attrs).contains("bindings/core/v8/VoidCallback.h")
    );
}

#[test]
fn resolution_is_deterministic_across_repeated_calls() {
    let env = setup_environment();
    let attrs = ExtendedAttributes::default();
    let ty = IdlType::union(vec![
        IdlType::sequence(IdlType::plain("Gamepad")),
        IdlType::nullable(IdlType::plain("Node")),
    ]);

    let first = (
        cpp_type(&ty, &env, &attrs, TypeUsage::empty()),
        includes_for_type(&ty, &env, &attrs),
        impl_includes_for_type(&ty, &env),
    );
    let second = (
        cpp_type(&ty, &env, &attrs, TypeUsage::empty()),
        includes_for_type(&ty, &env, &attrs),
        impl_includes_for_type(&ty, &env),
    );
    assert_eq!(first, second);
}
