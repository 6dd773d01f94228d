//! C++ storage type resolution.
//!
//! Maps an [`IdlType`] plus its usage context to the C++ type the generated
//! binding stores it in. The same IDL type can resolve differently as a raw
//! conversion buffer, an argument/return value, a variadic element or a
//! container element, so the context travels as a [`TypeUsage`] flag set.
//!
//! # Example
//!
//! ```
//! use widlc_codegen::{cpp_type, ExtendedAttributes, TypeUsage};
//! use widlc_idl::{IdlType, TypeEnvironment};
//!
//! let env = TypeEnvironment::new();
//! let attrs = ExtendedAttributes::default();
//! assert_eq!(cpp_type(&IdlType::plain("long"), &env, &attrs, TypeUsage::empty()), "int32_t");
//! assert_eq!(cpp_type(&IdlType::plain("boolean"), &env, &attrs, TypeUsage::empty()), "bool");
//! ```

use widlc_idl::{IdlType, TypeEnvironment, is_non_wrapper_base, is_typed_array_base};

use crate::attributes::{ExtendedAttributes, TreatNullAs};

bitflags::bitflags! {
    /// Context flags for C++ type resolution. Each flag has an independent
    /// effect; they combine freely.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeUsage: u8 {
        /// Resolve to the raw conversion-buffer type instead of the owning
        /// storage type (string resources instead of `String`, raw pointers
        /// instead of members).
        const RAW = 1 << 0;
        /// The type is an argument or return value rather than a stored
        /// field.
        const RVALUE = 1 << 1;
        /// The type is the element type of a variadic argument list.
        const VARIADIC = 1 << 2;
        /// The type is an element inside an owning container.
        const SEQUENCE_ELEMENT = 1 << 3;
    }
}

/// Fixed-width C++ integer for a WebIDL integer keyword.
pub(crate) fn integer_conversion_rule(base: &str) -> Option<&'static str> {
    Some(match base {
        "byte" => "int8_t",
        "octet" => "uint8_t",
        "short" => "int16_t",
        "unsigned short" => "uint16_t",
        "long" => "int32_t",
        "unsigned long" => "uint32_t",
        "long long" => "int64_t",
        "unsigned long long" => "uint64_t",
        _ => return None,
    })
}

/// Fixed special-case representations that ignore every usage flag.
pub(crate) fn special_conversion_rule(base: &str) -> Option<&'static str> {
    Some(match base {
        "Date" => "double",
        "Dictionary" => "Dictionary",
        // EventHandler attributes and EventListener arguments share one
        // listener representation.
        "EventHandler" | "EventListener" => "EventListener*",
        "NodeFilter" => "NodeFilter*",
        "Promise" => "ScriptPromise",
        "ScriptValue" => "ScriptValue",
        // Kept as a raw pointer while its custom bindings survive.
        "XPathNSResolver" => "XPathNSResolver*",
        "boolean" => "bool",
        "unrestricted double" => "double",
        "unrestricted float" => "float",
        _ => return None,
    })
}

/// `template<inner>`.
pub fn cpp_template_type(template: &str, inner_type: &str) -> String {
    format!("{template}<{inner_type}>")
}

/// The generated V8 binding class for an interface name.
pub fn v8_class_name(interface_name: &str) -> String {
    format!("V8{interface_name}")
}

/// Resolve the C++ type for `ty` in the given usage context.
pub fn cpp_type(
    ty: &IdlType,
    env: &TypeEnvironment,
    attrs: &ExtendedAttributes,
    usage: TypeUsage,
) -> String {
    let ty = ty.preprocessed(env);

    // A variadic argument list collects the type itself into a vector;
    // otherwise only sequence types resolve through an element type.
    let element = if usage.contains(TypeUsage::VARIADIC) {
        Some(&ty)
    } else {
        ty.sequence_element_type()
    };
    if let Some(element) = element {
        let vector = if element.is_gc_type(env) {
            "HeapVector"
        } else {
            "Vector"
        };
        let element_type = cpp_type(
            element,
            env,
            &ExtendedAttributes::default(),
            TypeUsage::SEQUENCE_ELEMENT,
        );
        let vector_type = cpp_template_type(vector, &element_type);
        if usage.contains(TypeUsage::RVALUE) {
            return format!("const {vector_type}&");
        }
        return vector_type;
    }

    let base = ty.base_type().unwrap_or_default();

    if matches!(base, "double" | "float") {
        return base.to_string();
    }
    if let Some(integer) = integer_conversion_rule(base) {
        return integer.to_string();
    }
    if let Some(special) = special_conversion_rule(base) {
        return special.to_string();
    }
    if base == "SerializedScriptValue" {
        return if usage.contains(TypeUsage::RVALUE) {
            "PassRefPtr<SerializedScriptValue>".to_string()
        } else {
            "RefPtr<SerializedScriptValue>".to_string()
        };
    }
    if ty.is_string_type() {
        if !usage.contains(TypeUsage::RAW) {
            return "String".to_string();
        }
        return format!("V8StringResource<{}>", string_resource_mode(&ty, attrs));
    }
    if attrs.flexible_array_buffer_view {
        if base == "ArrayBufferView" {
            return "FlexibleArrayBufferView".to_string();
        }
        if is_typed_array_base(base) {
            return format!("Flexible{base}View");
        }
    }
    if ty.is_interface_type(env) {
        let class = env.implemented_as(base);
        if usage.contains(TypeUsage::RAW)
            || (usage.contains(TypeUsage::RVALUE) && ty.is_garbage_collected(env))
            || !usage.contains(TypeUsage::SEQUENCE_ELEMENT)
        {
            return format!("{class}*");
        }
        return cpp_template_type("Member", class);
    }
    if ty.is_dictionary(env) {
        if usage.contains(TypeUsage::RVALUE) {
            return format!("const {base}&");
        }
        return base.to_string();
    }
    if let Some(union) = ty.as_union() {
        let name = union.container_name();
        if usage.contains(TypeUsage::RVALUE) {
            return format!("const {name}&");
        }
        return name;
    }
    if ty.is_callback_function(env) {
        return format!("{base}*");
    }
    if base == "void" {
        return base.to_string();
    }
    // Anything left is pointer-shaped.
    format!("{base}*")
}

/// Null/undefined handling mode for a raw string conversion buffer.
fn string_resource_mode(ty: &IdlType, attrs: &ExtendedAttributes) -> &'static str {
    if ty.is_nullable() {
        return "TreatNullAndUndefinedAsNullString";
    }
    match attrs.treat_null_as {
        Some(TreatNullAs::EmptyString) => "TreatNullAsEmptyString",
        Some(TreatNullAs::NullString) => "TreatNullAsNullString",
        None => "",
    }
}

/// The initializer for a default-constructed local of this type, including
/// the leading ` = ` when one is needed.
pub fn cpp_type_initializer(ty: &IdlType, env: &TypeEnvironment) -> String {
    if ty.is_sequence_type() || ty.is_union_type() {
        return String::new();
    }
    if ty.is_numeric_type() {
        return " = 0".to_string();
    }
    let base = ty.base_type().unwrap_or_default();
    if base == "boolean" {
        return " = false".to_string();
    }
    if is_non_wrapper_base(base)
        || special_conversion_rule(base).is_some()
        || base == "any"
        || ty.is_string_type()
        || ty.is_enum(env)
    {
        return String::new();
    }
    " = nullptr".to_string()
}
