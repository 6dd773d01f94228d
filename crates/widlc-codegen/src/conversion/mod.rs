//! Value conversion planning between V8 and C++.
//!
//! Two planners share this module: [`to_cpp`] computes the expression and
//! checking plan that converts an incoming V8 value into a C++ local, and
//! [`to_v8`] computes the statement that converts a C++ value back into a
//! V8 return value or property value. Both are pure string planners; the
//! emitted expressions execute later, inside the generated binding.

pub mod to_cpp;
pub mod to_v8;

use widlc_idl::{IdlType, TypeEnvironment};

pub use to_cpp::{
    LocalConversionOptions, LocalConversionPlan, v8_value_to_cpp_value,
    v8_value_to_local_cpp_value,
};
pub use to_v8::{
    V8ConversionType, cpp_value_to_v8_value, preprocess_type_and_value, v8_conversion_type,
    v8_set_return_value,
};

/// True when the V8 -> C++ conversion for `ty` can raise and reports through
/// an `ExceptionState`.
pub fn v8_conversion_needs_exception_state(ty: &IdlType, env: &TypeEnvironment) -> bool {
    match ty {
        IdlType::Sequence(_) | IdlType::Union(_) => true,
        IdlType::Nullable(n) => v8_conversion_needs_exception_state(n.inner(), env),
        IdlType::Plain(_) => {
            ty.is_numeric_type()
                || ty.is_enum(env)
                || ty.is_dictionary(env)
                || matches!(
                    ty.name().as_str(),
                    "Boolean" | "ByteString" | "Date" | "Dictionary" | "USVString"
                        | "SerializedScriptValue"
                )
        }
    }
}

/// True when the V8 -> C++ conversion is a single non-failing expression.
pub fn v8_conversion_is_trivial(ty: &IdlType, env: &TypeEnvironment) -> bool {
    match ty {
        IdlType::Sequence(_) | IdlType::Union(_) => false,
        IdlType::Nullable(n) => v8_conversion_is_trivial(n.inner(), env),
        IdlType::Plain(_) => {
            matches!(
                ty.base_type().unwrap_or_default(),
                "any" | "boolean" | "Date" | "Dictionary" | "NodeFilter" | "XPathNSResolver"
                    | "Promise"
            ) || ty.is_wrapper_type(env)
        }
    }
}

/// True when operations returning `ty` write the result into a
/// caller-supplied output argument instead of returning it.
pub fn use_output_parameter_for_result(ty: &IdlType, env: &TypeEnvironment) -> bool {
    ty.is_dictionary(env) || ty.is_union_type()
}
