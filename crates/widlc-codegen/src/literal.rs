//! C++ rendering of IDL default and constant literals.
//!
//! Most literals pass through textually; the exceptions are the unsigned
//! suffix on small unsigned integer types, the opaque-value constructor for
//! a null `any`/`object`, union construction from a member literal, and the
//! empty sequence. Anything else has no defined rendering and is a hard
//! failure of the generation pass, since the IDL input itself is malformed.

use widlc_idl::{IdlLiteral, IdlType, LiteralKind, TypeEnvironment, UnionType};

use crate::attributes::ExtendedAttributes;
use crate::cpp_type::{TypeUsage, cpp_type};
use crate::error::MappingError;

/// Render `literal` as a C++ expression valid for `ty`.
pub fn literal_cpp_value(
    ty: &IdlType,
    env: &TypeEnvironment,
    literal: &IdlLiteral,
) -> Result<String, MappingError> {
    if ty.is_sequence_type() {
        return sequence_literal(ty, env, literal);
    }
    if let Some(union) = ty.as_union() {
        return union_literal(ty, union, env, literal);
    }
    if matches!(ty.base_type(), Some("any" | "object")) && literal.is_null() {
        return Ok("ScriptValue()".to_string());
    }
    let value = literal.value().to_string();
    if matches!(ty.base_type(), Some("octet" | "unsigned short" | "unsigned long")) {
        return Ok(format!("{value}u"));
    }
    Ok(value)
}

/// A union literal constructs the container from its matching member type.
fn union_literal(
    ty: &IdlType,
    union: &UnionType,
    env: &TypeEnvironment,
    literal: &IdlLiteral,
) -> Result<String, MappingError> {
    let container = union.container_name();
    if literal.is_null() {
        return Ok(format!("{container}()"));
    }
    let member = match literal.kind() {
        LiteralKind::String => union.string_member_type(),
        LiteralKind::Integer | LiteralKind::Float => union.numeric_member_type(),
        LiteralKind::Boolean => union.boolean_member_type(),
        LiteralKind::Sequence | LiteralKind::Null => None,
    };
    let Some(member) = member else {
        return Err(MappingError::UnsupportedLiteral {
            type_name: ty.name(),
            literal: literal.value().to_string(),
        });
    };
    let member_value = literal_cpp_value(member, env, literal)?;
    Ok(format!("{container}::from{}({member_value})", member.name()))
}

/// Only the empty sequence literal has a C++ form.
fn sequence_literal(
    ty: &IdlType,
    env: &TypeEnvironment,
    literal: &IdlLiteral,
) -> Result<String, MappingError> {
    if literal.value() == "[]" {
        let container = cpp_type(ty, env, &ExtendedAttributes::default(), TypeUsage::empty());
        return Ok(format!("{container}()"));
    }
    Err(MappingError::UnsupportedLiteral {
        type_name: ty.name(),
        literal: literal.value().to_string(),
    })
}
