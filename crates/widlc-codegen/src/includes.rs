//! Include/dependency resolution.
//!
//! Computes the set of headers a generated binding needs for a given IDL
//! type, on two sides: the bindings layer (V8 wrapper classes, conversion
//! helpers) and the implementation layer (the C++ classes behind them).
//! Results are plain duplicate-free sets; callers merge them per generated
//! file. Identical inputs always yield identical sets.

use rustc_hash::FxHashSet;
use widlc_idl::{IdlType, TypeEnvironment, is_typed_array_base};

use crate::attributes::ExtendedAttributes;

/// Fixed bindings-side header sets for well-known special types.
fn fixed_includes(base: &str) -> Option<&'static [&'static str]> {
    Some(match base {
        "object" => &[],
        "ArrayBufferView" => &[
            "bindings/core/v8/V8ArrayBufferView.h",
            "core/dom/FlexibleArrayBufferView.h",
        ],
        "Dictionary" => &["bindings/core/v8/Dictionary.h"],
        "EventHandler" => &[
            "bindings/core/v8/V8AbstractEventListener.h",
            "bindings/core/v8/V8EventListenerHelper.h",
        ],
        "EventListener" => &[
            "bindings/core/v8/BindingSecurity.h",
            "bindings/core/v8/V8EventListenerHelper.h",
            "core/frame/LocalDOMWindow.h",
        ],
        "HTMLCollection" => &[
            "bindings/core/v8/V8HTMLCollection.h",
            "core/dom/ClassCollection.h",
            "core/dom/TagCollection.h",
            "core/html/HTMLCollection.h",
            "core/html/HTMLDataListOptionsCollection.h",
            "core/html/HTMLFormControlsCollection.h",
            "core/html/HTMLTableRowsCollection.h",
        ],
        "NodeList" => &[
            "bindings/core/v8/V8NodeList.h",
            "core/dom/NameNodeList.h",
            "core/dom/NodeList.h",
            "core/dom/StaticNodeList.h",
            "core/html/LabelsNodeList.h",
        ],
        "Promise" => &["bindings/core/v8/ScriptPromise.h"],
        "SerializedScriptValue" => &[
            "bindings/core/v8/SerializedScriptValue.h",
            "bindings/core/v8/SerializedScriptValueFactory.h",
        ],
        "ScriptValue" => &["bindings/core/v8/ScriptValue.h"],
        _ => return None,
    })
}

fn set_of(paths: &[&str]) -> FxHashSet<String> {
    paths.iter().map(|s| (*s).to_string()).collect()
}

/// Bindings-side headers required to convert `ty`.
///
/// Unions take the union of their members' sets; sequences delegate to
/// their element type.
pub fn includes_for_type(
    ty: &IdlType,
    env: &TypeEnvironment,
    attrs: &ExtendedAttributes,
) -> FxHashSet<String> {
    if let Some(union) = ty.as_union() {
        let mut set = FxHashSet::default();
        for member in union.members() {
            set.extend(includes_for_type(member, env, attrs));
        }
        return set;
    }
    if let Some(element) = ty.sequence_element_type() {
        return includes_for_type(element, env, attrs);
    }

    let ty = ty.preprocessed(env);
    let mut base = ty.base_type().unwrap_or_default().to_string();

    if let Some(fixed) = fixed_includes(&base) {
        return set_of(fixed);
    }
    if is_typed_array_base(&base) {
        let mut set = set_of(fixed_includes("ArrayBufferView").unwrap_or_default());
        let component = env.component_dir(&base).unwrap_or("core");
        set.insert(format!("bindings/{component}/v8/V8{base}.h"));
        return set;
    }
    if ty.is_basic_type() {
        return set_of(&[
            "bindings/core/v8/IDLTypes.h",
            "bindings/core/v8/NativeValueTraitsImpl.h",
        ]);
    }
    if base.ends_with("ConstructorConstructor") {
        // Named constructors are emitted inside the interface's own binding
        // and have no header of their own.
        return FxHashSet::default();
    }
    if let Some(stripped) = base.strip_suffix("Constructor") {
        // Constructor attributes resolve to the interface they construct.
        base = stripped.to_string();
    }
    if let Some(info) = env.callback_function(&base) {
        return std::iter::once(format!(
            "bindings/{}/v8/{}.h",
            info.component_dir(),
            base
        ))
        .collect();
    }
    let Some(component) = env.component_dir(&base) else {
        return FxHashSet::default();
    };
    std::iter::once(format!("bindings/{component}/v8/V8{base}.h")).collect()
}

/// Bindings-side headers for a bare interface name.
pub fn includes_for_interface(interface_name: &str, env: &TypeEnvironment) -> FxHashSet<String> {
    includes_for_type(
        &IdlType::plain(interface_name),
        env,
        &ExtendedAttributes::default(),
    )
}

/// Implementation-side headers required to hold and pass values of `ty`.
pub fn impl_includes_for_type(ty: &IdlType, env: &TypeEnvironment) -> FxHashSet<String> {
    if let Some(union) = ty.as_union() {
        let mut set = FxHashSet::default();
        for member in union.members() {
            set.extend(impl_includes_for_type(member, env));
        }
        return set;
    }

    let ty = ty.preprocessed(env);
    let mut set = FxHashSet::default();

    if let Some(element) = ty.sequence_element_type() {
        set.extend(impl_includes_for_type(element, env));
        set.insert("wtf/Vector.h".to_string());
    }
    if ty.is_string_type() {
        set.insert("wtf/text/WTFString.h".to_string());
    }
    if let Some(base) = ty.base_type() {
        if let Some(info) = env.interface_info(base) {
            set.insert(info.include_path().to_string());
        }
        if let Some(fixed) = fixed_includes(base) {
            set.extend(fixed.iter().map(|s| (*s).to_string()));
        }
    }
    if ty.is_typed_array() {
        // Every typed array is implemented by the one DOMTypedArray template
        // header; it replaces anything accumulated above.
        return std::iter::once("core/dom/DOMTypedArray.h".to_string()).collect();
    }
    set
}

/// The implementation class to forward-declare for `ty`, if any.
///
/// Sequences forward-declare their element; wrapper types that are not
/// typed arrays forward-declare their implementation class.
pub fn impl_forward_declaration_name(ty: &IdlType, env: &TypeEnvironment) -> Option<String> {
    if let Some(element) = ty.sequence_element_type() {
        return impl_forward_declaration_name(element, env);
    }
    if ty.is_wrapper_type(env) && !ty.is_typed_array() {
        return Some(env.implemented_as(ty.base_type()?).to_string());
    }
    None
}
