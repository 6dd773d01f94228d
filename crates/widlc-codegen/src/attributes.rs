//! Extended attributes recognized by the type mapper.
//!
//! The parser delivers extended attributes as an opaque string-keyed map.
//! [`ExtendedAttributes`] parses that map once, up front, into a record with
//! named optional fields; every key this module does not recognize is
//! ignored, as is an unrecognized value for a recognized key (a lookup that
//! matches nothing).

/// How a null script value converts when passed for a string type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreatNullAs {
    /// `[TreatNullAs=EmptyString]`
    EmptyString,
    /// `[TreatNullAs=NullString]`
    NullString,
}

/// Which access the `[CheckSecurity]` attribute guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckSecurity {
    /// `[CheckSecurity=Receiver]`
    Receiver,
    /// `[CheckSecurity=ReturnValue]` - the returned object must be wrapped
    /// in its own realm.
    ReturnValue,
}

/// Integer overflow policy for script -> C++ integer conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerConversionMode {
    /// Standard WebIDL modulo-wrapping conversion.
    #[default]
    NormalConversion,
    /// `[EnforceRange]` - out-of-range values throw.
    EnforceRange,
    /// `[Clamp]` - out-of-range values saturate.
    Clamp,
}

impl IntegerConversionMode {
    /// The configuration token spliced into the conversion's argument list.
    pub fn as_str(self) -> &'static str {
        match self {
            IntegerConversionMode::NormalConversion => "NormalConversion",
            IntegerConversionMode::EnforceRange => "EnforceRange",
            IntegerConversionMode::Clamp => "Clamp",
        }
    }
}

/// The extended attributes affecting type mapping at one conversion site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedAttributes {
    /// `[Clamp]` on an integer-typed member.
    pub clamp: bool,
    /// `[EnforceRange]` on an integer-typed member. Takes precedence over
    /// `[Clamp]` when both are present.
    pub enforce_range: bool,
    /// `[FlexibleArrayBufferView]` - stack-allocate the view.
    pub flexible_array_buffer_view: bool,
    /// `[Reflect]` - the attribute reflects a content attribute.
    pub reflect: bool,
    /// `[TreatNullAs=...]` on a string-typed member.
    pub treat_null_as: Option<TreatNullAs>,
    /// `[CheckSecurity=...]` on the interface member.
    pub check_security: Option<CheckSecurity>,
}

impl ExtendedAttributes {
    /// An empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an attribute map as delivered by the parser: `(key, value)`
    /// pairs where valueless attributes carry `None`.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut attrs = Self::default();
        for (key, value) in pairs {
            match key {
                "Clamp" => attrs.clamp = true,
                "EnforceRange" => attrs.enforce_range = true,
                "FlexibleArrayBufferView" => attrs.flexible_array_buffer_view = true,
                "Reflect" => attrs.reflect = true,
                "TreatNullAs" => {
                    attrs.treat_null_as = match value {
                        Some("EmptyString") => Some(TreatNullAs::EmptyString),
                        Some("NullString") => Some(TreatNullAs::NullString),
                        _ => None,
                    }
                }
                "CheckSecurity" => {
                    attrs.check_security = match value {
                        Some("Receiver") => Some(CheckSecurity::Receiver),
                        Some("ReturnValue") => Some(CheckSecurity::ReturnValue),
                        _ => None,
                    }
                }
                _ => {}
            }
        }
        attrs
    }

    /// The integer overflow policy selected by this attribute set.
    pub fn integer_conversion_mode(&self) -> IntegerConversionMode {
        if self.enforce_range {
            IntegerConversionMode::EnforceRange
        } else if self.clamp {
            IntegerConversionMode::Clamp
        } else {
            IntegerConversionMode::NormalConversion
        }
    }

    /// True when `[CheckSecurity=ReturnValue]` is present.
    pub fn check_security_targets_return_value(&self) -> bool {
        self.check_security == Some(CheckSecurity::ReturnValue)
    }
}
