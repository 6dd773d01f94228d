//! Code-generation errors.
//!
//! All three kinds are compile-time failures of the generation pass, never
//! runtime conditions, and none is retryable: each one indicates either a
//! malformed IDL input or a mapping this generator does not define.
//!
//! [`MappingError::UnsupportedConversion`] is the one "soft" failure: the
//! caller is expected to attach a source location and report it as a
//! diagnostic. The other two terminate the pass.

use thiserror::Error;

/// Errors produced while mapping IDL types to C++/V8 code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The type has no defined V8 -> C++ conversion: it is neither trivially
    /// convertible nor a callback function.
    #[error("no V8 -> C++ conversion for IDL type: {type_name}")]
    UnsupportedConversion {
        /// Name of the offending type.
        type_name: String,
    },

    /// The literal's category has no defined C++ rendering for this type,
    /// e.g. a non-empty sequence literal.
    #[error("unsupported literal {literal} for IDL type {type_name}")]
    UnsupportedLiteral {
        /// Name of the type the literal was declared for.
        type_name: String,
        /// The literal's textual form.
        literal: String,
    },

    /// An extended attribute names a base type it cannot apply to, e.g.
    /// `[FlexibleArrayBufferView]` on a non-buffer type.
    #[error("extended attribute '{attribute}' cannot apply to IDL type {type_name}")]
    ConfigurationInconsistency {
        /// The offending extended attribute.
        attribute: String,
        /// Name of the incompatible type.
        type_name: String,
    },
}
