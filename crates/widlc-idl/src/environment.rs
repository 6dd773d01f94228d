//! TypeEnvironment - the compilation-wide type metadata registry.
//!
//! The binding compiler learns facts about types that are external to any
//! single IDL file: which interface names carry an `[ImplementedAs]`
//! override, which are garbage collected, which component owns each
//! generated binding, and which names denote dictionaries, enumerations,
//! callback interfaces and callback functions. All of it is collected here.
//!
//! # Lifecycle
//!
//! A [`TypeEnvironment`] starts empty, is populated by bulk registration
//! calls while the surrounding compiler scans interface metadata, and is
//! then passed by shared reference into every resolver. Registration is
//! append/overwrite only; there is no removal, matching a single-pass
//! build. After setup the environment is read-only, so independent type
//! resolutions may safely run in parallel.
//!
//! # Example
//!
//! ```
//! use widlc_idl::{IdlType, TypeEnvironment};
//!
//! let mut env = TypeEnvironment::new();
//! env.register_implemented_as([("Bar".to_string(), "Zork".to_string())]);
//! assert_eq!(env.implemented_as("Bar"), "Zork");
//! // Names without an override fall back to themselves.
//! assert_eq!(env.implemented_as("Foo"), "Foo");
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

/// Metadata for a user-defined callback function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackFunctionInfo {
    component_dir: String,
    custom: bool,
}

impl CallbackFunctionInfo {
    /// Callback function owned by the given component.
    pub fn new(component_dir: impl Into<String>) -> Self {
        Self {
            component_dir: component_dir.into(),
            custom: false,
        }
    }

    /// Mark the callback function as having fully custom bindings.
    pub fn custom(mut self) -> Self {
        self.custom = true;
        self
    }

    /// The component that owns the generated binding.
    pub fn component_dir(&self) -> &str {
        &self.component_dir
    }

    /// Whether the bindings are fully custom (no generated conversion).
    pub fn is_custom(&self) -> bool {
        self.custom
    }
}

/// Per-interface metadata used by implementation-side include resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    include_path: String,
}

impl InterfaceInfo {
    /// Interface implemented by the header at `include_path`.
    pub fn new(include_path: impl Into<String>) -> Self {
        Self {
            include_path: include_path.into(),
        }
    }

    /// The implementation header path.
    pub fn include_path(&self) -> &str {
        &self.include_path
    }
}

/// Read-mostly registry of cross-file type metadata.
#[derive(Debug, Clone, Default)]
pub struct TypeEnvironment {
    implemented_as: FxHashMap<String, String>,
    garbage_collected: FxHashSet<String>,
    component_dirs: FxHashMap<String, String>,
    callback_functions: FxHashMap<String, CallbackFunctionInfo>,
    dictionaries: FxHashSet<String>,
    enumerations: FxHashSet<String>,
    callback_interfaces: FxHashSet<String>,
    interfaces: FxHashMap<String, InterfaceInfo>,
}

impl TypeEnvironment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration (bulk merge; append/overwrite only)
    // ==========================================================================

    /// Merge `[ImplementedAs]` overrides: base name -> C++ class name.
    pub fn register_implemented_as<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.implemented_as.extend(entries);
    }

    /// Merge base names whose C++ representation is garbage collected.
    pub fn register_garbage_collected<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.garbage_collected.extend(names);
    }

    /// Merge component ownership: base name -> component directory.
    pub fn register_component_dirs<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.component_dirs.extend(entries);
    }

    /// Merge callback function metadata.
    pub fn register_callback_functions<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, CallbackFunctionInfo)>,
    {
        self.callback_functions.extend(entries);
    }

    /// Merge dictionary type names.
    pub fn register_dictionaries<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.dictionaries.extend(names);
    }

    /// Merge enumeration type names.
    pub fn register_enumerations<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.enumerations.extend(names);
    }

    /// Merge callback interface type names.
    pub fn register_callback_interfaces<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.callback_interfaces.extend(names);
    }

    /// Merge per-interface implementation metadata.
    pub fn register_interfaces<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, InterfaceInfo)>,
    {
        self.interfaces.extend(entries);
    }

    // ==========================================================================
    // Queries
    // ==========================================================================

    /// The C++ class implementing `base`: the `[ImplementedAs]` override if
    /// one was registered, otherwise the base name itself.
    pub fn implemented_as<'a>(&'a self, base: &'a str) -> &'a str {
        self.implemented_as
            .get(base)
            .map(String::as_str)
            .unwrap_or(base)
    }

    /// Whether `base` was registered as garbage collected.
    pub fn is_garbage_collected(&self, base: &str) -> bool {
        self.garbage_collected.contains(base)
    }

    /// The component directory owning `base`'s generated binding.
    pub fn component_dir(&self, base: &str) -> Option<&str> {
        self.component_dirs.get(base).map(String::as_str)
    }

    /// Callback function metadata for `base`.
    pub fn callback_function(&self, base: &str) -> Option<&CallbackFunctionInfo> {
        self.callback_functions.get(base)
    }

    /// Whether `base` names a callback function (custom ones included).
    pub fn is_callback_function(&self, base: &str) -> bool {
        self.callback_functions.contains_key(base)
    }

    /// Whether `base` names a callback function with fully custom bindings.
    pub fn is_custom_callback_function(&self, base: &str) -> bool {
        self.callback_functions
            .get(base)
            .is_some_and(CallbackFunctionInfo::is_custom)
    }

    /// Whether `base` names a dictionary.
    pub fn is_dictionary(&self, base: &str) -> bool {
        self.dictionaries.contains(base)
    }

    /// Whether `base` names an enumeration.
    pub fn is_enumeration(&self, base: &str) -> bool {
        self.enumerations.contains(base)
    }

    /// Whether `base` names a callback interface.
    pub fn is_callback_interface(&self, base: &str) -> bool {
        self.callback_interfaces.contains(base)
    }

    /// Implementation metadata for the interface named `base`.
    pub fn interface_info(&self, base: &str) -> Option<&InterfaceInfo> {
        self.interfaces.get(base)
    }
}
