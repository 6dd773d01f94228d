//! IDL default/constant literal descriptors.
//!
//! The parser hands default values and constants to the code generator as a
//! category tag plus the literal's textual form. The null literal renders as
//! `nullptr`, which is the correct C++ spelling everywhere a bare null
//! default survives to code generation.

use std::fmt::{self, Display, Formatter};

/// The category of an IDL literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// A string literal (rendered with its quotes by the parser).
    String,
    /// An integer literal.
    Integer,
    /// A floating-point literal.
    Float,
    /// `true` / `false`.
    Boolean,
    /// A sequence literal; only `[]` is meaningful downstream.
    Sequence,
    /// The `null` literal.
    Null,
}

/// A parsed IDL literal: category tag plus textual value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdlLiteral {
    kind: LiteralKind,
    value: String,
}

impl IdlLiteral {
    /// A string literal with the given source text.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            kind: LiteralKind::String,
            value: value.into(),
        }
    }

    /// An integer literal with the given source text.
    pub fn integer(value: impl Into<String>) -> Self {
        Self {
            kind: LiteralKind::Integer,
            value: value.into(),
        }
    }

    /// A floating-point literal with the given source text.
    pub fn float(value: impl Into<String>) -> Self {
        Self {
            kind: LiteralKind::Float,
            value: value.into(),
        }
    }

    /// A boolean literal.
    pub fn boolean(value: bool) -> Self {
        Self {
            kind: LiteralKind::Boolean,
            value: if value { "true" } else { "false" }.to_string(),
        }
    }

    /// The empty sequence literal `[]`.
    pub fn empty_sequence() -> Self {
        Self {
            kind: LiteralKind::Sequence,
            value: "[]".to_string(),
        }
    }

    /// The `null` literal.
    pub fn null() -> Self {
        Self {
            kind: LiteralKind::Null,
            value: "nullptr".to_string(),
        }
    }

    /// The literal's category.
    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    /// The literal's textual form.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True for the `null` literal.
    pub fn is_null(&self) -> bool {
        self.kind == LiteralKind::Null
    }
}

impl Display for IdlLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
