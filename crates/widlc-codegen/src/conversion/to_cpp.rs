//! V8 -> C++ conversion planning.
//!
//! Builds the C++ expression that converts one incoming V8 value, and the
//! surrounding plan for storing it in a local: which expression assigns or
//! populates the target, which expression detects failure, and what to
//! return when the check fires. Types that are neither trivially
//! convertible nor callback functions have no conversion; that is the one
//! soft failure of the generator and surfaces as
//! [`MappingError::UnsupportedConversion`].

use widlc_idl::{IdlType, TypeEnvironment};

use crate::attributes::ExtendedAttributes;
use crate::cpp_type::{TypeUsage, cpp_type};
use crate::error::MappingError;

use super::{
    use_output_parameter_for_result, v8_conversion_is_trivial,
    v8_conversion_needs_exception_state,
};

/// The default expression for the current isolate inside a binding.
const DEFAULT_ISOLATE: &str = "info.GetIsolate()";

/// Build the expression converting `v8_value` to a C++ value of type `ty`.
///
/// `variable_name` is the conversion target for output-parameter types and
/// flexible views; `index` is the 0-based argument position, or `None` in a
/// setter. The produced expression references `exceptionState` whenever the
/// conversion can fail.
pub fn v8_value_to_cpp_value(
    ty: &IdlType,
    env: &TypeEnvironment,
    attrs: &ExtendedAttributes,
    v8_value: &str,
    variable_name: &str,
    index: Option<usize>,
    isolate: &str,
) -> Result<String, MappingError> {
    if ty.base_type() == Some("void") {
        return Ok(String::new());
    }

    if let Some(element) = ty.sequence_element_type() {
        return Ok(array_or_sequence_expression(
            element, env, v8_value, index, isolate,
        ));
    }

    let ty = ty.preprocessed(env);
    let mut base = match ty.as_union() {
        Some(union) => union.container_name(),
        None => ty.base_type().unwrap_or_default().to_string(),
    };

    if attrs.flexible_array_buffer_view {
        if !(ty.base_type() == Some("ArrayBufferView") || ty.is_typed_array()) {
            return Err(MappingError::ConfigurationInconsistency {
                attribute: "FlexibleArrayBufferView".to_string(),
                type_name: ty.name(),
            });
        }
        base = "FlexibleArrayBufferView".to_string();
    }

    let arguments = if ty.is_integer_type() {
        format!(
            "{v8_value}, exceptionState, {}",
            attrs.integer_conversion_mode().as_str()
        )
    } else if v8_conversion_needs_exception_state(&ty, env) {
        format!("{v8_value}, exceptionState")
    } else {
        v8_value.to_string()
    };

    let expression = match base.as_str() {
        "DOMString" => v8_value.to_string(),
        "FlexibleArrayBufferView" => format!(
            "toFlexibleArrayBufferView({isolate}, {v8_value}, {variable_name}, \
             allocateFlexibleArrayBufferViewStorage({v8_value}))"
        ),
        "NodeFilter" => {
            format!("toNodeFilter({v8_value}, info.Holder(), ScriptState::current({isolate}))")
        }
        "Promise" => format!("ScriptPromise::cast(ScriptState::current({isolate}), {v8_value})"),
        "ScriptValue" => format!("ScriptValue(ScriptState::current({isolate}), {v8_value})"),
        "Window" => format!("toDOMWindow({isolate}, {v8_value})"),
        "XPathNSResolver" => {
            format!("toXPathNSResolver(ScriptState::current({isolate}), {v8_value})")
        }
        _ if ty.is_array_buffer_or_view() => format!(
            "{v8_value}->Is{base}() ? V8{base}::toImpl(v8::Local<v8::{base}>::Cast({v8_value})) : 0"
        ),
        _ if ty.is_union_type() => {
            let mode = if ty.includes_nullable_type() {
                "UnionTypeConversionMode::Nullable"
            } else {
                "UnionTypeConversionMode::NotNullable"
            };
            format!(
                "V8{base}::toImpl({isolate}, {v8_value}, {variable_name}, {mode}, exceptionState)"
            )
        }
        _ if use_output_parameter_for_result(&ty, env) => format!(
            "V8{base}::toImpl({isolate}, {v8_value}, {variable_name}, exceptionState)"
        ),
        _ if ty.is_callback_function(env) => {
            format!("{base}::create(ScriptState::current({isolate}), {v8_value})")
        }
        _ if v8_conversion_needs_exception_state(&ty, env) => {
            // Everything fallible that is not a union, sequence or
            // dictionary goes through the conversion traits.
            let inner = ty.inner_type().unwrap_or(&ty);
            let name = inner.name();
            let trait_name = if inner.is_primitive_type()
                || matches!(name.as_str(), "ByteString" | "Date" | "Promise" | "USVString")
            {
                format!("IDL{name}")
            } else {
                name
            };
            format!("NativeValueTraits<{trait_name}>::nativeValue({isolate}, {arguments})")
        }
        _ => format!("V8{base}::toImplWithTypeCheck({isolate}, {v8_value})"),
    };
    Ok(expression)
}

/// Conversion expression for a sequence/array value.
///
/// A `None` index marks a setter and encodes as 0; argument indices encode
/// 1-based so the thrown TypeError can name a human-readable position.
fn array_or_sequence_expression(
    element: &IdlType,
    env: &TypeEnvironment,
    v8_value: &str,
    index: Option<usize>,
    isolate: &str,
) -> String {
    let index = match index {
        None => 0,
        Some(i) => i + 1,
    };
    if element.is_interface_type(env) && element.name() != "Dictionary" {
        return format!(
            "toMemberNativeArray<{}>({v8_value}, {index}, {isolate}, exceptionState)",
            element.name()
        );
    }
    let vector = if element.is_dictionary(env) || element.is_union_type() {
        "HeapVector"
    } else {
        "Vector"
    };
    let element_type = cpp_type(element, env, &ExtendedAttributes::default(), TypeUsage::empty());
    format!("toImplArray<{vector}<{element_type}>>({v8_value}, {index}, {isolate}, exceptionState)")
}

/// How a converted value lands in its local variable.
///
/// Exactly one of `assign_expression` and `set_expression` is populated for
/// convertible types; `check_expression` fires after the conversion when
/// failure is possible, and `return_expression` is what the binding then
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConversionPlan {
    /// Expression whose value is assigned to the local, if any.
    pub assign_expression: Option<String>,
    /// Statement expression executed for its effect (output-parameter
    /// conversions populate the local by reference), if any.
    pub set_expression: Option<String>,
    /// Expression that is true when the conversion failed, if failure is
    /// possible.
    pub check_expression: Option<String>,
    /// Caller-supplied bailout value returned when the check fires.
    pub return_expression: Option<String>,
    /// The raw C++ storage type of the local.
    pub cpp_type: String,
    /// The local's name.
    pub cpp_name: String,
    /// Whether the binding should declare the local.
    pub declare_variable: bool,
}

/// Options for [`v8_value_to_local_cpp_value`].
#[derive(Debug, Clone)]
pub struct LocalConversionOptions<'a> {
    /// 0-based argument index, or `None` in a setter.
    pub index: Option<usize>,
    /// Whether the binding should declare the local.
    pub declare_variable: bool,
    /// Expression for the current isolate.
    pub isolate: &'a str,
    /// Value returned when the failure check fires.
    pub bailout_return_value: Option<String>,
    /// Pass the exception state into a string resource's `prepare()`.
    pub use_exception_state: bool,
}

impl Default for LocalConversionOptions<'_> {
    fn default() -> Self {
        Self {
            index: None,
            declare_variable: true,
            isolate: DEFAULT_ISOLATE,
            bailout_return_value: None,
            use_exception_state: false,
        }
    }
}

/// Plan the conversion of `v8_value` into the local `variable_name`.
pub fn v8_value_to_local_cpp_value(
    ty: &IdlType,
    env: &TypeEnvironment,
    attrs: &ExtendedAttributes,
    v8_value: &str,
    variable_name: &str,
    opts: &LocalConversionOptions<'_>,
) -> Result<LocalConversionPlan, MappingError> {
    let this_cpp_type = cpp_type(ty, env, attrs, TypeUsage::RAW);
    let ty = ty.preprocessed(env);

    let cpp_value = v8_value_to_cpp_value(
        &ty,
        env,
        attrs,
        v8_value,
        variable_name,
        opts.index,
        opts.isolate,
    )?;

    let mut assign_expression = None;
    let mut set_expression = None;
    let mut check_expression = None;

    if ty.is_string_type() || v8_conversion_needs_exception_state(&ty, env) {
        // Conversions that can fail and need error handling.
        check_expression = Some("exceptionState.hadException()".to_string());
        if ty.is_dictionary(env) || ty.is_union_type() {
            set_expression = Some(cpp_value);
        } else {
            assign_expression = Some(cpp_value);
            // A string type that does not report through the exception state
            // signals failure from its resource's prepare() step instead.
            // ByteString and USVString are both string types and exception
            // users, so the exception check above stays for them.
            if !v8_conversion_needs_exception_state(&ty, env) {
                check_expression = Some(if opts.use_exception_state {
                    format!("!{variable_name}.prepare(exceptionState)")
                } else {
                    format!("!{variable_name}.prepare()")
                });
            }
        }
    } else if !v8_conversion_is_trivial(&ty, env) && !ty.is_callback_function(env) {
        return Err(MappingError::UnsupportedConversion {
            type_name: ty.name(),
        });
    } else if attrs.flexible_array_buffer_view {
        set_expression = Some(cpp_value);
    } else {
        assign_expression = Some(cpp_value);
    }

    Ok(LocalConversionPlan {
        assign_expression,
        set_expression,
        check_expression,
        return_expression: opts.bailout_return_value.clone(),
        cpp_type: this_cpp_type,
        cpp_name: variable_name.to_string(),
        declare_variable: opts.declare_variable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use widlc_idl::CallbackFunctionInfo;

    fn env() -> TypeEnvironment {
        let mut env = TypeEnvironment::new();
        env.register_dictionaries(["EventInit".to_string()]);
        env.register_enumerations(["Fit".to_string()]);
        env.register_callback_functions([(
            "VoidCallback".to_string(),
            CallbackFunctionInfo::new("core"),
        )]);
        env
    }

    fn convert(ty: &IdlType, attrs: &ExtendedAttributes) -> String {
        v8_value_to_cpp_value(ty, &env(), attrs, "v8Value", "value", Some(0), DEFAULT_ISOLATE)
            .unwrap()
    }

    fn convert_plain(ty: &IdlType) -> String {
        convert(ty, &ExtendedAttributes::default())
    }

    #[test]
    fn void_converts_to_nothing() {
        assert_eq!(convert_plain(&IdlType::plain("void")), "");
    }

    #[test]
    fn integers_carry_the_overflow_policy() {
        assert_eq!(
            convert_plain(&IdlType::plain("long")),
            "NativeValueTraits<IDLLong>::nativeValue(info.GetIsolate(), v8Value, \
             exceptionState, NormalConversion)"
        );
        let enforce = ExtendedAttributes {
            enforce_range: true,
            ..Default::default()
        };
        assert_eq!(
            convert(&IdlType::plain("long"), &enforce),
            "NativeValueTraits<IDLLong>::nativeValue(info.GetIsolate(), v8Value, \
             exceptionState, EnforceRange)"
        );
        let clamp = ExtendedAttributes {
            clamp: true,
            ..Default::default()
        };
        assert_eq!(
            convert(&IdlType::plain("octet"), &clamp),
            "NativeValueTraits<IDLOctet>::nativeValue(info.GetIsolate(), v8Value, \
             exceptionState, Clamp)"
        );
    }

    #[test]
    fn traits_unwrap_one_nullable_level() {
        assert_eq!(
            convert_plain(&IdlType::nullable(IdlType::plain("long"))),
            "NativeValueTraits<IDLLong>::nativeValue(info.GetIsolate(), v8Value, \
             exceptionState, NormalConversion)"
        );
    }

    #[test]
    fn named_trait_types_take_the_idl_prefix() {
        assert_eq!(
            convert_plain(&IdlType::plain("ByteString")),
            "NativeValueTraits<IDLByteString>::nativeValue(info.GetIsolate(), v8Value, \
             exceptionState)"
        );
        assert_eq!(
            convert_plain(&IdlType::plain("Date")),
            "NativeValueTraits<IDLDate>::nativeValue(info.GetIsolate(), v8Value, \
             exceptionState)"
        );
        // Non-primitive named types use their own name.
        assert_eq!(
            convert_plain(&IdlType::plain("SerializedScriptValue")),
            "NativeValueTraits<SerializedScriptValue>::nativeValue(info.GetIsolate(), v8Value, \
             exceptionState)"
        );
    }

    #[test]
    fn fixed_expression_table() {
        assert_eq!(convert_plain(&IdlType::plain("DOMString")), "v8Value");
        assert_eq!(
            convert_plain(&IdlType::plain("Promise")),
            "ScriptPromise::cast(ScriptState::current(info.GetIsolate()), v8Value)"
        );
        assert_eq!(
            convert_plain(&IdlType::plain("any")),
            "ScriptValue(ScriptState::current(info.GetIsolate()), v8Value)"
        );
        assert_eq!(
            convert_plain(&IdlType::plain("Window")),
            "toDOMWindow(info.GetIsolate(), v8Value)"
        );
        assert_eq!(
            convert_plain(&IdlType::plain("NodeFilter")),
            "toNodeFilter(v8Value, info.Holder(), ScriptState::current(info.GetIsolate()))"
        );
        assert_eq!(
            convert_plain(&IdlType::plain("XPathNSResolver")),
            "toXPathNSResolver(ScriptState::current(info.GetIsolate()), v8Value)"
        );
    }

    #[test]
    fn buffer_views_type_check_before_unwrapping() {
        assert_eq!(
            convert_plain(&IdlType::plain("ArrayBuffer")),
            "v8Value->IsArrayBuffer() ? \
             V8ArrayBuffer::toImpl(v8::Local<v8::ArrayBuffer>::Cast(v8Value)) : 0"
        );
        assert_eq!(
            convert_plain(&IdlType::plain("Uint8Array")),
            "v8Value->IsUint8Array() ? \
             V8Uint8Array::toImpl(v8::Local<v8::Uint8Array>::Cast(v8Value)) : 0"
        );
    }

    #[test]
    fn unions_select_the_nullable_mode() {
        let not_nullable = IdlType::union(vec![
            IdlType::plain("DOMString"),
            IdlType::plain("double"),
        ]);
        assert_eq!(
            convert_plain(&not_nullable),
            "V8DOMStringOrDouble::toImpl(info.GetIsolate(), v8Value, value, \
             UnionTypeConversionMode::NotNullable, exceptionState)"
        );
        let nullable_member = IdlType::union(vec![
            IdlType::nullable(IdlType::plain("Node")),
            IdlType::plain("double"),
        ]);
        assert_eq!(
            convert_plain(&nullable_member),
            "V8NodeOrDouble::toImpl(info.GetIsolate(), v8Value, value, \
             UnionTypeConversionMode::Nullable, exceptionState)"
        );
        let nullable_union = IdlType::nullable(IdlType::union(vec![
            IdlType::plain("Node"),
            IdlType::plain("double"),
        ]));
        assert_eq!(
            convert_plain(&nullable_union),
            "V8NodeOrDouble::toImpl(info.GetIsolate(), v8Value, value, \
             UnionTypeConversionMode::Nullable, exceptionState)"
        );
    }

    #[test]
    fn dictionaries_populate_by_output_parameter() {
        assert_eq!(
            convert_plain(&IdlType::plain("EventInit")),
            "V8EventInit::toImpl(info.GetIsolate(), v8Value, value, exceptionState)"
        );
    }

    #[test]
    fn callback_functions_construct_from_script_state() {
        assert_eq!(
            convert_plain(&IdlType::plain("VoidCallback")),
            "VoidCallback::create(ScriptState::current(info.GetIsolate()), v8Value)"
        );
    }

    #[test]
    fn wrappers_fall_back_to_checked_downcast() {
        assert_eq!(
            convert_plain(&IdlType::plain("Node")),
            "V8Node::toImplWithTypeCheck(info.GetIsolate(), v8Value)"
        );
    }

    #[test]
    fn flexible_views_validate_the_base_type() {
        let attrs = ExtendedAttributes {
            flexible_array_buffer_view: true,
            ..Default::default()
        };
        assert_eq!(
            convert(&IdlType::plain("Uint8Array"), &attrs),
            "toFlexibleArrayBufferView(info.GetIsolate(), v8Value, value, \
             allocateFlexibleArrayBufferViewStorage(v8Value))"
        );
        let err = v8_value_to_cpp_value(
            &IdlType::plain("long"),
            &env(),
            &attrs,
            "v8Value",
            "value",
            None,
            DEFAULT_ISOLATE,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MappingError::ConfigurationInconsistency {
                attribute: "FlexibleArrayBufferView".to_string(),
                type_name: "Long".to_string(),
            }
        );
        // ArrayBuffer is a buffer, but not a *view*.
        assert!(matches!(
            v8_value_to_cpp_value(
                &IdlType::plain("ArrayBuffer"),
                &env(),
                &attrs,
                "v8Value",
                "value",
                None,
                DEFAULT_ISOLATE,
            ),
            Err(MappingError::ConfigurationInconsistency { .. })
        ));
    }

    #[test]
    fn sequences_encode_a_readable_position() {
        let seq = IdlType::sequence(IdlType::plain("long"));
        // Argument 0 reads as position 1.
        assert_eq!(
            convert_plain(&seq),
            "toImplArray<Vector<int32_t>>(v8Value, 1, info.GetIsolate(), exceptionState)"
        );
        // A setter has no argument index and encodes 0.
        assert_eq!(
            v8_value_to_cpp_value(&seq, &env(), &ExtendedAttributes::default(), "v8Value", "value", None, DEFAULT_ISOLATE)
                .unwrap(),
            "toImplArray<Vector<int32_t>>(v8Value, 0, info.GetIsolate(), exceptionState)"
        );
    }

    #[test]
    fn interface_sequences_use_member_arrays() {
        let seq = IdlType::sequence(IdlType::plain("Node"));
        assert_eq!(
            convert_plain(&seq),
            "toMemberNativeArray<Node>(v8Value, 1, info.GetIsolate(), exceptionState)"
        );
    }

    #[test]
    fn dictionary_sequences_use_heap_vectors() {
        let seq = IdlType::sequence(IdlType::plain("EventInit"));
        assert_eq!(
            convert_plain(&seq),
            "toImplArray<HeapVector<EventInit>>(v8Value, 1, info.GetIsolate(), exceptionState)"
        );
    }

    #[test]
    fn local_plan_for_integers_checks_the_exception_state() {
        let plan = v8_value_to_local_cpp_value(
            &IdlType::plain("long"),
            &env(),
            &ExtendedAttributes::default(),
            "v8Value",
            "value",
            &LocalConversionOptions::default(),
        )
        .unwrap();
        assert!(plan.assign_expression.is_some());
        assert!(plan.set_expression.is_none());
        assert_eq!(
            plan.check_expression.as_deref(),
            Some("exceptionState.hadException()")
        );
        assert_eq!(plan.cpp_type, "int32_t");
        assert_eq!(plan.cpp_name, "value");
        assert!(plan.declare_variable);
    }

    #[test]
    fn local_plan_for_plain_strings_checks_prepare() {
        let plan = v8_value_to_local_cpp_value(
            &IdlType::plain("DOMString"),
            &env(),
            &ExtendedAttributes::default(),
            "v8Value",
            "value",
            &LocalConversionOptions::default(),
        )
        .unwrap();
        assert_eq!(plan.assign_expression.as_deref(), Some("v8Value"));
        assert_eq!(plan.check_expression.as_deref(), Some("!value.prepare()"));
        assert_eq!(plan.cpp_type, "V8StringResource<>");

        let with_exception_state = v8_value_to_local_cpp_value(
            &IdlType::plain("DOMString"),
            &env(),
            &ExtendedAttributes::default(),
            "v8Value",
            "value",
            &LocalConversionOptions {
                use_exception_state: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            with_exception_state.check_expression.as_deref(),
            Some("!value.prepare(exceptionState)")
        );
    }

    #[test]
    fn local_plan_for_byte_string_keeps_the_exception_check() {
        let plan = v8_value_to_local_cpp_value(
            &IdlType::plain("ByteString"),
            &env(),
            &ExtendedAttributes::default(),
            "v8Value",
            "value",
            &LocalConversionOptions::default(),
        )
        .unwrap();
        assert_eq!(
            plan.check_expression.as_deref(),
            Some("exceptionState.hadException()")
        );
    }

    #[test]
    fn local_plan_for_unions_routes_through_set_expression() {
        let union = IdlType::union(vec![
            IdlType::plain("DOMString"),
            IdlType::plain("double"),
        ]);
        let plan = v8_value_to_local_cpp_value(
            &union,
            &env(),
            &ExtendedAttributes::default(),
            "v8Value",
            "value",
            &LocalConversionOptions::default(),
        )
        .unwrap();
        assert!(plan.assign_expression.is_none());
        assert!(plan.set_expression.is_some());
    }

    #[test]
    fn local_plan_for_trivial_types_just_assigns() {
        let plan = v8_value_to_local_cpp_value(
            &IdlType::plain("Node"),
            &env(),
            &ExtendedAttributes::default(),
            "v8Value",
            "value",
            &LocalConversionOptions::default(),
        )
        .unwrap();
        assert!(plan.assign_expression.is_some());
        assert!(plan.check_expression.is_none());
    }

    #[test]
    fn local_plan_carries_the_bailout_value() {
        let plan = v8_value_to_local_cpp_value(
            &IdlType::plain("long"),
            &env(),
            &ExtendedAttributes::default(),
            "v8Value",
            "value",
            &LocalConversionOptions {
                bailout_return_value: Some("false".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(plan.return_expression.as_deref(), Some("false"));
    }

    #[test]
    fn unconvertible_types_are_a_soft_failure() {
        let err = v8_value_to_local_cpp_value(
            &IdlType::plain("EventListener"),
            &env(),
            &ExtendedAttributes::default(),
            "v8Value",
            "value",
            &LocalConversionOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MappingError::UnsupportedConversion {
                type_name: "EventListener".to_string(),
            }
        );
    }
}
