//! widlc - the type-mapping core of a WebIDL -> V8 binding compiler.
//!
//! Given parsed WebIDL type descriptors, widlc decides how each type is
//! represented in C++ and plans the conversions a generated binding performs
//! when values cross between V8 and the implementation. The surrounding
//! compiler parses IDL files, builds a [`TypeEnvironment`](idl::TypeEnvironment)
//! from the interfaces it finds, and then queries these resolvers once per
//! attribute, argument and return value while rendering templates.
//!
//! The work splits across two crates, re-exported here:
//!
//! - [`idl`]: the type algebra, classification predicates, nullability
//!   analysis and the environment of cross-file type metadata
//! - [`codegen`]: C++ type resolution, header dependency resolution, the
//!   two conversion planners and the literal evaluator
//!
//! # Example
//!
//! ```
//! use widlc::prelude::*;
//!
//! let env = TypeEnvironment::new();
//! let attrs = ExtendedAttributes::default();
//!
//! let ty = IdlType::plain("long");
//! assert_eq!(cpp_type(&ty, &env, &attrs, TypeUsage::empty()), "int32_t");
//!
//! let plan = v8_value_to_local_cpp_value(
//!     &ty, &env, &attrs, "v8Value", "value",
//!     &LocalConversionOptions::default(),
//! ).unwrap();
//! assert_eq!(plan.check_expression.as_deref(), Some("exceptionState.hadException()"));
//! ```

pub use widlc_codegen as codegen;
pub use widlc_idl as idl;

pub mod prelude {
    pub use widlc_codegen::{
        CheckSecurity, ExtendedAttributes, IntegerConversionMode, LocalConversionOptions,
        LocalConversionPlan, MappingError, TreatNullAs, TypeUsage, V8ConversionType,
        cpp_template_type, cpp_type, cpp_type_initializer, cpp_value_to_v8_value,
        impl_forward_declaration_name, impl_includes_for_type, includes_for_interface,
        includes_for_type, literal_cpp_value, use_output_parameter_for_result,
        v8_class_name, v8_conversion_is_trivial, v8_conversion_needs_exception_state,
        v8_conversion_type, v8_set_return_value, v8_value_to_cpp_value,
        v8_value_to_local_cpp_value,
    };
    pub use widlc_idl::{
        CallbackFunctionInfo, IdlLiteral, IdlType, InterfaceInfo, LiteralKind, SequenceKind,
        TypeEnvironment,
    };
}
