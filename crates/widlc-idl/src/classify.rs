//! Type classification.
//!
//! Closed predicate tables over base-type names plus the env-dependent
//! classification of interface-shaped types. Classification is a pure
//! function of the base-type name and registry membership; the flags are
//! never stored on the type and can never contradict each other.
//!
//! Unknown base names classify as "none of the above", which makes them
//! interface-shaped: a plain pointer to a wrapper class.

use crate::environment::TypeEnvironment;
use crate::idl_type::{IdlType, UnionType};

/// WebIDL integer types, in both signednesses and all widths.
pub fn is_integer_base(base: &str) -> bool {
    matches!(
        base,
        "byte"
            | "octet"
            | "short"
            | "unsigned short"
            | "long"
            | "unsigned long"
            | "long long"
            | "unsigned long long"
    )
}

/// Integer or floating-point types.
pub fn is_numeric_base(base: &str) -> bool {
    is_integer_base(base)
        || matches!(
            base,
            "float" | "unrestricted float" | "double" | "unrestricted double"
        )
}

/// Numeric types plus `boolean`.
pub fn is_primitive_base(base: &str) -> bool {
    is_numeric_base(base) || base == "boolean"
}

/// Primitive types plus strings, `Date` and `void`.
pub fn is_basic_base(base: &str) -> bool {
    is_primitive_base(base)
        || matches!(base, "DOMString" | "ByteString" | "USVString" | "Date" | "void")
}

/// The three WebIDL string types.
pub fn is_string_base(base: &str) -> bool {
    matches!(base, "DOMString" | "ByteString" | "USVString")
}

/// The typed-array view types.
pub fn is_typed_array_base(base: &str) -> bool {
    matches!(
        base,
        "Float32Array"
            | "Float64Array"
            | "Int8Array"
            | "Int16Array"
            | "Int32Array"
            | "Uint8Array"
            | "Uint8ClampedArray"
            | "Uint16Array"
            | "Uint32Array"
    )
}

/// Typed arrays plus the buffer types themselves.
pub fn is_array_buffer_or_view_base(base: &str) -> bool {
    is_typed_array_base(base)
        || matches!(
            base,
            "ArrayBuffer" | "ArrayBufferView" | "DataView" | "SharedArrayBuffer"
        )
}

/// Interface-shaped types whose C++ side is not a DOM wrapper object.
pub fn is_non_wrapper_base(base: &str) -> bool {
    matches!(
        base,
        "Dictionary" | "EventHandler" | "EventListener" | "NodeFilter" | "SerializedScriptValue"
    )
}

impl IdlType {
    /// True for `DOMString`, `ByteString` and `USVString`.
    pub fn is_string_type(&self) -> bool {
        self.base_type().is_some_and(is_string_base)
    }

    /// True for integer and floating-point types.
    pub fn is_numeric_type(&self) -> bool {
        self.base_type().is_some_and(is_numeric_base)
    }

    /// True for the fixed-width integer types.
    pub fn is_integer_type(&self) -> bool {
        self.base_type().is_some_and(is_integer_base)
    }

    /// True for numeric types and `boolean`.
    pub fn is_primitive_type(&self) -> bool {
        self.base_type().is_some_and(is_primitive_base)
    }

    /// True for primitives, strings, `Date` and `void`.
    pub fn is_basic_type(&self) -> bool {
        self.base_type().is_some_and(is_basic_base)
    }

    /// True for the typed-array view types.
    pub fn is_typed_array(&self) -> bool {
        self.base_type().is_some_and(is_typed_array_base)
    }

    /// True for typed arrays, `ArrayBuffer`, `ArrayBufferView`, `DataView`
    /// and `SharedArrayBuffer`.
    pub fn is_array_buffer_or_view(&self) -> bool {
        self.base_type().is_some_and(is_array_buffer_or_view_base)
    }

    /// True for registered enumeration types.
    pub fn is_enum(&self, env: &TypeEnvironment) -> bool {
        self.base_type().is_some_and(|base| env.is_enumeration(base))
    }

    /// True for registered dictionary types.
    pub fn is_dictionary(&self, env: &TypeEnvironment) -> bool {
        self.base_type().is_some_and(|base| env.is_dictionary(base))
    }

    /// True for registered callback function types (custom ones included).
    pub fn is_callback_function(&self, env: &TypeEnvironment) -> bool {
        self.base_type()
            .is_some_and(|base| env.is_callback_function(base))
    }

    /// True for callback function types with fully custom bindings.
    pub fn is_custom_callback_function(&self, env: &TypeEnvironment) -> bool {
        self.base_type()
            .is_some_and(|base| env.is_custom_callback_function(base))
    }

    /// True for registered callback interface types.
    pub fn is_callback_interface(&self, env: &TypeEnvironment) -> bool {
        self.base_type()
            .is_some_and(|base| env.is_callback_interface(base))
    }

    /// True for interface-shaped types: the default bucket for any base name
    /// that is not basic, not a registered enum/dictionary/callback function,
    /// and not `any`, `object` or `Promise`.
    pub fn is_interface_type(&self, env: &TypeEnvironment) -> bool {
        match self.base_type() {
            None => false,
            Some(base) => {
                !is_basic_base(base)
                    && !env.is_enumeration(base)
                    && !env.is_dictionary(base)
                    && !env.is_callback_function(base)
                    && !matches!(base, "any" | "object" | "Promise")
            }
        }
    }

    /// True for interface types represented by a DOM wrapper object:
    /// interface-shaped, not a callback interface, and not in the fixed
    /// non-wrapper exclusion set.
    pub fn is_wrapper_type(&self, env: &TypeEnvironment) -> bool {
        self.is_interface_type(env)
            && !self.is_callback_interface(env)
            && !self.base_type().is_some_and(is_non_wrapper_base)
    }

    /// True when the base type is registered as garbage collected.
    pub fn is_garbage_collected(&self, env: &TypeEnvironment) -> bool {
        self.base_type()
            .is_some_and(|base| env.is_garbage_collected(base))
    }

    /// True when the C++ representation lives on the managed heap: garbage
    /// collected, a dictionary, or a union.
    pub fn is_gc_type(&self, env: &TypeEnvironment) -> bool {
        self.is_garbage_collected(env) || self.is_dictionary(env) || self.is_union_type()
    }

    /// True when the C++ representation must be traced by the GC.
    ///
    /// Unions are always traceable; sequences trace iff their element does.
    pub fn is_traceable(&self, env: &TypeEnvironment) -> bool {
        match self {
            IdlType::Union(_) => true,
            IdlType::Sequence(s) => s.element().is_traceable(env),
            IdlType::Nullable(n) => n.inner().is_traceable(env),
            IdlType::Plain(_) => self.is_garbage_collected(env) || self.is_dictionary(env),
        }
    }

    /// Canonicalize a type before resolution.
    ///
    /// Nullable types are unwrapped, preprocessed and rewrapped; enumerations
    /// rewrite to `DOMString` (they are strings on the wire); `any`, `object`
    /// and fully custom callback functions rewrite to the opaque
    /// `ScriptValue`; callback functions and everything else pass through.
    /// The pass is idempotent, and every resolver operates on its output.
    pub fn preprocessed(&self, env: &TypeEnvironment) -> IdlType {
        match self {
            IdlType::Nullable(n) => IdlType::nullable(n.inner().preprocessed(env)),
            IdlType::Plain(_) => {
                let base = self.base_type().unwrap_or_default();
                if env.is_enumeration(base) {
                    IdlType::plain("DOMString")
                } else if matches!(base, "any" | "object")
                    || env.is_custom_callback_function(base)
                {
                    IdlType::plain("ScriptValue")
                } else {
                    self.clone()
                }
            }
            IdlType::Union(_) | IdlType::Sequence(_) => self.clone(),
        }
    }
}

impl UnionType {
    /// The first string-typed member, if any.
    pub fn string_member_type(&self) -> Option<&IdlType> {
        self.members().iter().find(|m| m.is_string_type())
    }

    /// The first numeric member, if any.
    pub fn numeric_member_type(&self) -> Option<&IdlType> {
        self.members().iter().find(|m| m.is_numeric_type())
    }

    /// The first boolean member, if any.
    pub fn boolean_member_type(&self) -> Option<&IdlType> {
        self.members()
            .iter()
            .find(|m| m.base_type() == Some("boolean"))
    }
}
