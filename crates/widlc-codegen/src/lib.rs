//! C++/V8 code generation planning for the widlc binding compiler.
//!
//! Every resolver here is a pure function of an [`IdlType`](widlc_idl::IdlType),
//! the shared [`TypeEnvironment`](widlc_idl::TypeEnvironment) and a per-site
//! [`ExtendedAttributes`] record. The outputs are plain strings and string
//! sets the template emitter splices into generated bindings; nothing in this
//! crate performs I/O or holds state.
//!
//! ## Modules
//!
//! - [`attributes`]: the extended-attribute record recognized at conversion
//!   sites
//! - [`cpp_type`]: C++ storage type resolution and initializers
//! - [`includes`]: header dependency resolution, bindings side and
//!   implementation side
//! - [`conversion`]: the V8 -> C++ and C++ -> V8 conversion planners
//! - [`literal`]: C++ rendering of IDL default/constant literals
//! - [`error`]: the compile-time failure taxonomy

pub mod attributes;
pub mod conversion;
pub mod cpp_type;
pub mod error;
pub mod includes;
pub mod literal;

pub use attributes::{CheckSecurity, ExtendedAttributes, IntegerConversionMode, TreatNullAs};
pub use conversion::{
    LocalConversionOptions, LocalConversionPlan, V8ConversionType, cpp_value_to_v8_value,
    use_output_parameter_for_result, v8_conversion_is_trivial,
    v8_conversion_needs_exception_state, v8_conversion_type, v8_set_return_value,
    v8_value_to_cpp_value, v8_value_to_local_cpp_value,
};
pub use cpp_type::{TypeUsage, cpp_template_type, cpp_type, cpp_type_initializer, v8_class_name};
pub use error::MappingError;
pub use includes::{
    impl_forward_declaration_name, impl_includes_for_type, includes_for_interface,
    includes_for_type,
};
pub use literal::literal_cpp_value;
