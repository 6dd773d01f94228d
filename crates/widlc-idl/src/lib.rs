//! WebIDL type algebra and classification for the widlc binding compiler.
//!
//! This crate owns the parsed-type data model and every pure judgment about
//! it: which semantic bucket a base-type name falls into, how nullability is
//! represented, and the canonicalization pass the code generators run before
//! resolving a type.
//!
//! ## Modules
//!
//! - [`idl_type`]: the [`IdlType`] algebra (plain / nullable / union /
//!   sequence) and type naming
//! - [`classify`]: classification predicates and the canonicalization pass
//! - [`environment`]: [`TypeEnvironment`], the compilation-wide registry of
//!   cross-file type metadata
//! - [`nullability`]: implicit vs explicit null representation, union
//!   nullable-member counting
//! - [`literal`]: default/constant literal descriptors

pub mod classify;
pub mod environment;
pub mod idl_type;
pub mod literal;
pub mod nullability;

pub use classify::{
    is_array_buffer_or_view_base, is_basic_base, is_integer_base, is_non_wrapper_base,
    is_numeric_base, is_primitive_base, is_string_base, is_typed_array_base,
};
pub use environment::{CallbackFunctionInfo, InterfaceInfo, TypeEnvironment};
pub use idl_type::{IdlType, NullableType, PlainType, SequenceKind, SequenceType, UnionType};
pub use literal::{IdlLiteral, LiteralKind};
