//! C++ -> V8 conversion planning.
//!
//! Computes the statement that hands a C++ value back to script, either as a
//! return value (`v8SetReturnValue*`) or as a bare V8 value expression for
//! property and array positions. Dispatch runs through [`V8ConversionType`],
//! a closed tag enum: every tag resolves to exactly one statement template,
//! so an added or removed tag is a compile error rather than a silent lookup
//! miss.

use widlc_idl::{IdlType, TypeEnvironment};

use crate::attributes::ExtendedAttributes;
use crate::error::MappingError;

const DEFAULT_ISOLATE: &str = "info.GetIsolate()";
const DEFAULT_CREATION_CONTEXT: &str = "info.Holder()";

/// The conversion tag selecting a C++ -> V8 statement template.
///
/// Tags mirror the shape of the preprocessed type; the `DomWrapper*` and
/// `*Static` variants are refinements applied by [`v8_set_return_value`]
/// from the call-site configuration, never produced by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum V8ConversionType {
    /// A nullable dictionary return value; reads through `result.get()`.
    NullableDictionary,
    /// A non-nullable dictionary or a union; returned via the output
    /// parameter `result`.
    DictionaryOrUnion,
    /// `sequence<T>`.
    Array,
    /// `FrozenArray<T>`; the created object is frozen after conversion.
    FrozenArray,
    Int8,
    Int16,
    Int32,
    Uint8,
    Uint16,
    Uint32,
    /// `DOMString`.
    String,
    ByteString,
    USVString,
    /// A nullable string; null converts to `v8::Null`, not `"null"`.
    StringOrNull,
    Boolean,
    Float,
    UnrestrictedFloat,
    Double,
    UnrestrictedDouble,
    Date,
    Void,
    ScriptValue,
    EventHandler,
    SerializedScriptValue,
    /// The opaque `Dictionary` bag.
    GenericDictionary,
    /// A DOM wrapper object before call-site refinement.
    DomWrapper,
    /// Main-world-specialized wrapper fast path.
    DomWrapperForMainWorld,
    /// Fast path keyed on a script-wrappable hint.
    DomWrapperFast,
    /// Plain wrapper return with no hint.
    DomWrapperDefault,
    /// `[CheckSecurity=ReturnValue]`: wrap in the returned object's own
    /// realm rather than the receiver's.
    DomWrapperAcrossContext,
    /// Static members have no receiver; wrap in the current context's
    /// global.
    DomWrapperStatic,
    GenericDictionaryStatic,
    NullableDictionaryStatic,
    DictionaryOrUnionStatic,
}

/// Apply the preliminary type and value rewrites shared by both C++ -> V8
/// entry points.
///
/// Promise collapses to `ScriptValue`; the 64-bit integer types are not
/// representable in ECMAScript numbers and downcast to `double` (keeping
/// nullability); a `[Reflect]`ed `unsigned long`/`unsigned short` attribute
/// swaps its accessor to the signed variant and clamps negative values to 0,
/// since out-of-range reflected unsigned values must default rather than
/// wrap.
pub fn preprocess_type_and_value(
    ty: &IdlType,
    env: &TypeEnvironment,
    cpp_value: &str,
    attrs: &ExtendedAttributes,
) -> (IdlType, String) {
    let mut ty = ty.preprocessed(env);
    let mut cpp_value = cpp_value.to_string();
    if ty.name() == "Promise" {
        ty = IdlType::plain("ScriptValue");
    }
    if matches!(ty.base_type(), Some("long long" | "unsigned long long")) {
        let nullable = ty.is_nullable();
        ty = IdlType::plain("double");
        if nullable {
            ty = IdlType::nullable(ty);
        }
        cpp_value = format!("static_cast<double>({cpp_value})");
    }
    if attrs.reflect && matches!(ty.base_type(), Some("unsigned long" | "unsigned short")) {
        cpp_value = cpp_value.replace("getUnsignedIntegralAttribute", "getIntegralAttribute");
        cpp_value = format!("std::max(0, static_cast<int>({cpp_value}))");
    }
    (ty, cpp_value)
}

/// Classify a preprocessed type into its conversion tag.
pub fn v8_conversion_type(ty: &IdlType, env: &TypeEnvironment) -> V8ConversionType {
    use V8ConversionType::*;

    // Nullable dictionaries read their result differently from both plain
    // dictionaries and unions.
    if ty.is_dictionary(env) && ty.is_nullable() {
        return NullableDictionary;
    }
    if ty.is_dictionary(env) || ty.is_union_type() {
        return DictionaryOrUnion;
    }
    if ty.is_sequence_type() {
        return if ty.is_frozen_array() { FrozenArray } else { Array };
    }

    let base = ty.base_type().unwrap_or_default();
    match base {
        "byte" => return Int8,
        "octet" => return Uint8,
        "short" => return Int16,
        "unsigned short" => return Uint16,
        "long" => return Int32,
        "unsigned long" => return Uint32,
        // Preprocessing has already downcast the 64-bit types to double.
        "long long" | "unsigned long long" => return Double,
        _ => {}
    }
    if ty.is_string_type() {
        if ty.is_nullable() {
            return StringOrNull;
        }
        return match base {
            "ByteString" => ByteString,
            "USVString" => USVString,
            _ => String,
        };
    }
    if ty.is_basic_type() || base == "ScriptValue" {
        return match base {
            "boolean" => Boolean,
            "float" => Float,
            "unrestricted float" => UnrestrictedFloat,
            "double" => Double,
            "unrestricted double" => UnrestrictedDouble,
            "Date" => Date,
            "ScriptValue" => ScriptValue,
            _ => Void,
        };
    }
    if base == "Dictionary" {
        return GenericDictionary;
    }
    if matches!(base, "EventHandler" | "SerializedScriptValue") {
        return if base == "EventHandler" {
            EventHandler
        } else {
            SerializedScriptValue
        };
    }
    DomWrapper
}

/// Build the statement that sets a C++ value as the binding's return value.
///
/// `script_wrappable` enables the fast wrapper path; `for_main_world` picks
/// the main-world specialization of that path; `is_static` anchors object
/// creation to the calling context's global, since a static member has no
/// receiver to derive a realm from.
pub fn v8_set_return_value(
    ty: &IdlType,
    env: &TypeEnvironment,
    cpp_value: &str,
    attrs: &ExtendedAttributes,
    script_wrappable: Option<&str>,
    for_main_world: bool,
    is_static: bool,
) -> Result<String, MappingError> {
    use V8ConversionType::*;

    let (ty, mut cpp_value) = preprocess_type_and_value(ty, env, cpp_value, attrs);
    let mut tag = v8_conversion_type(&ty, env);

    // These tags have no dedicated v8SetReturnValue* function: convert the
    // value to V8 first, then set it with the general form.
    if matches!(
        tag,
        Date | EventHandler | ScriptValue | SerializedScriptValue | Array | FrozenArray
    ) {
        cpp_value = cpp_value_to_v8_value(
            &ty,
            env,
            &cpp_value,
            DEFAULT_ISOLATE,
            DEFAULT_CREATION_CONTEXT,
            attrs,
        )?;
    }
    if tag == DomWrapper {
        tag = if attrs.check_security_targets_return_value() {
            DomWrapperAcrossContext
        } else if is_static {
            DomWrapperStatic
        } else {
            match script_wrappable {
                None | Some("") => DomWrapperDefault,
                Some(_) if for_main_world => DomWrapperForMainWorld,
                Some(_) => DomWrapperFast,
            }
        };
    }
    if is_static {
        tag = match tag {
            GenericDictionary => GenericDictionaryStatic,
            NullableDictionary => NullableDictionaryStatic,
            DictionaryOrUnion => DictionaryOrUnionStatic,
            other => other,
        };
    }

    let statement = match tag {
        Boolean => format!("v8SetReturnValueBool(info, {cpp_value})"),
        String | ByteString | USVString => {
            format!("v8SetReturnValueString(info, {cpp_value}, info.GetIsolate())")
        }
        StringOrNull => {
            format!("v8SetReturnValueStringOrNull(info, {cpp_value}, info.GetIsolate())")
        }
        Void => std::string::String::new(),
        Int8 | Int16 | Int32 => format!("v8SetReturnValueInt(info, {cpp_value})"),
        Uint8 | Uint16 | Uint32 => format!("v8SetReturnValueUnsigned(info, {cpp_value})"),
        Float | UnrestrictedFloat | Double | UnrestrictedDouble | Array | FrozenArray | Date
        | EventHandler | ScriptValue | SerializedScriptValue | GenericDictionary | DomWrapper
        | DomWrapperDefault => format!("v8SetReturnValue(info, {cpp_value})"),
        DomWrapperForMainWorld => format!("v8SetReturnValueForMainWorld(info, {cpp_value})"),
        DomWrapperFast => format!(
            "v8SetReturnValueFast(info, {cpp_value}, {})",
            script_wrappable.unwrap_or_default()
        ),
        DomWrapperAcrossContext => format!(
            "v8SetReturnValue(info, ToV8({cpp_value}, \
             ToV8(impl->contentWindow(), v8::Local<v8::Object>(), \
             info.GetIsolate()).As<v8::Object>(), info.GetIsolate()))"
        ),
        DomWrapperStatic => format!(
            "v8SetReturnValue(info, {cpp_value}, \
             info.GetIsolate()->GetCurrentContext()->Global())"
        ),
        GenericDictionaryStatic => "#error not implemented yet".to_string(),
        NullableDictionary => "v8SetReturnValue(info, result.get())".to_string(),
        NullableDictionaryStatic => {
            "v8SetReturnValue(info, result.get(), \
             info.GetIsolate()->GetCurrentContext()->Global())"
                .to_string()
        }
        DictionaryOrUnion => "v8SetReturnValue(info, result)".to_string(),
        DictionaryOrUnionStatic => {
            "v8SetReturnValue(info, result, \
             info.GetIsolate()->GetCurrentContext()->Global())"
                .to_string()
        }
    };
    Ok(statement)
}

/// Build the expression that converts a C++ value to a bare V8 value.
///
/// Used for property values, array elements and the return-value tags whose
/// setter has no dedicated function. Tags without an expression form (a
/// nullable dictionary in argument position, the refined wrapper tags) have
/// no conversion and error out.
pub fn cpp_value_to_v8_value(
    ty: &IdlType,
    env: &TypeEnvironment,
    cpp_value: &str,
    isolate: &str,
    creation_context: &str,
    attrs: &ExtendedAttributes,
) -> Result<String, MappingError> {
    use V8ConversionType::*;

    let (ty, cpp_value) = preprocess_type_and_value(ty, env, cpp_value, attrs);
    let expression = match v8_conversion_type(&ty, env) {
        Date => format!("v8DateOrNaN({isolate}, {cpp_value})"),
        String | ByteString | USVString => format!("v8String({isolate}, {cpp_value})"),
        Boolean => format!("v8Boolean({cpp_value}, {isolate})"),
        Int8 | Int16 | Int32 => format!("v8::Integer::New({isolate}, {cpp_value})"),
        Uint8 | Uint16 | Uint32 => {
            format!("v8::Integer::NewFromUnsigned({isolate}, {cpp_value})")
        }
        Float | UnrestrictedFloat | Double | UnrestrictedDouble => {
            format!("v8::Number::New({isolate}, {cpp_value})")
        }
        Void => "v8Undefined()".to_string(),
        StringOrNull => format!(
            "{cpp_value}.isNull() ? v8::Local<v8::Value>(v8::Null({isolate})) : \
             v8String({isolate}, {cpp_value})"
        ),
        GenericDictionary | ScriptValue => format!("{cpp_value}.v8Value()"),
        EventHandler => format!(
            "{cpp_value} ? V8AbstractEventListener::cast({cpp_value})->getListenerOrNull(\
             {isolate}, impl->getExecutionContext()) : v8::Null({isolate}).As<v8::Value>()"
        ),
        SerializedScriptValue => format!("v8Deserialize({isolate}, {cpp_value})"),
        Array | DictionaryOrUnion | DomWrapper => {
            format!("ToV8({cpp_value}, {creation_context}, {isolate})")
        }
        FrozenArray => {
            format!("freezeV8Object(ToV8({cpp_value}, {creation_context}, {isolate}), {isolate})")
        }
        NullableDictionary
        | DomWrapperForMainWorld
        | DomWrapperFast
        | DomWrapperDefault
        | DomWrapperAcrossContext
        | DomWrapperStatic
        | GenericDictionaryStatic
        | NullableDictionaryStatic
        | DictionaryOrUnionStatic => {
            return Err(MappingError::UnsupportedConversion {
                type_name: ty.name(),
            });
        }
    };
    Ok(expression)
}
