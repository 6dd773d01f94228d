//! Nullability analysis.
//!
//! Whether "null" fits inside a type's C++ storage decides how a nullable
//! type is represented: implicitly (a null String, a null pointer, a union
//! container) or explicitly through a `Nullable<T>` wrapper. Unions also
//! need their nullable members counted to pick a conversion mode.

use crate::environment::TypeEnvironment;
use crate::idl_type::{IdlType, UnionType};

impl IdlType {
    /// True when the C++ storage for this type can itself encode null.
    ///
    /// String types represent null as the null string, enumerations are
    /// strings, interface-shaped and callback types are pointers, union
    /// containers carry an explicit null state, and `any`/`object` map to
    /// the opaque `ScriptValue` which has an empty state.
    pub fn cpp_type_has_null_value(&self, env: &TypeEnvironment) -> bool {
        match self {
            IdlType::Nullable(n) => n.inner().cpp_type_has_null_value(env),
            IdlType::Union(_) => true,
            IdlType::Sequence(_) => false,
            IdlType::Plain(_) => {
                self.is_string_type()
                    || self.is_enum(env)
                    || self.is_interface_type(env)
                    || self.is_callback_interface(env)
                    || self.is_callback_function(env)
                    || self.is_custom_callback_function(env)
                    || matches!(self.base_type(), Some("object") | Some("any"))
            }
        }
    }

    /// Nullable, and the C++ storage already supports a null value.
    pub fn is_implicit_nullable(&self, env: &TypeEnvironment) -> bool {
        self.is_nullable() && self.cpp_type_has_null_value(env)
    }

    /// Nullable, but the C++ storage cannot encode null itself; such types
    /// are carried in an explicit `Nullable<T>` wrapper.
    pub fn is_explicit_nullable(&self, env: &TypeEnvironment) -> bool {
        self.is_nullable() && !self.cpp_type_has_null_value(env)
    }

    /// True when the type "includes a nullable type" in the WebIDL sense:
    /// it is nullable itself, or it is a union with exactly one nullable
    /// member. A union with two or more nullable members does not qualify.
    pub fn includes_nullable_type(&self) -> bool {
        match self {
            IdlType::Nullable(_) => true,
            IdlType::Union(u) => u.number_of_nullable_member_types() == 1,
            IdlType::Plain(_) | IdlType::Sequence(_) => false,
        }
    }
}

impl UnionType {
    /// Count the nullable members of this union, recursing into nested
    /// unions (nullable or not).
    pub fn number_of_nullable_member_types(&self) -> usize {
        let mut count = 0;
        for member in self.members() {
            let member = match member {
                IdlType::Nullable(n) => {
                    count += 1;
                    n.inner()
                }
                other => other,
            };
            if let IdlType::Union(nested) = member {
                count += nested.number_of_nullable_member_types();
            }
        }
        count
    }
}
