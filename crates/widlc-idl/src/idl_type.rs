//! IdlType - the WebIDL type algebra.
//!
//! This module provides the [`IdlType`] variant type which represents a parsed
//! WebIDL type: a plain named type, a nullable wrapper (`T?`), a union
//! (`(A or B)`), or a sequence/frozen-array (`sequence<T>`, `FrozenArray<T>`).
//! Every resolver in the workspace operates over this algebra.
//!
//! # Example
//!
//! ```
//! use widlc_idl::IdlType;
//!
//! // long?
//! let nullable_long = IdlType::nullable(IdlType::plain("long"));
//! assert!(nullable_long.is_nullable());
//! assert_eq!(nullable_long.base_type(), Some("long"));
//! assert_eq!(nullable_long.name(), "LongOrNull");
//!
//! // sequence<sequence<double>>
//! let nested = IdlType::sequence(IdlType::sequence(IdlType::plain("double")));
//! assert!(nested.sequence_element_type().unwrap().is_sequence_type());
//! ```

use std::fmt::{self, Display, Formatter};

/// A parsed WebIDL type.
///
/// The algebra is closed: every type is exactly one of a plain named type, a
/// nullable wrapper, a union, or a sequence/frozen array. Accessors that make
/// sense "through" nullability (`base_type`, `as_union`,
/// `sequence_element_type`, and the classification predicates) delegate to the
/// inner type of a `Nullable`, so callers rarely need to unwrap by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdlType {
    /// A plain named type: `long`, `DOMString`, `Node`, ...
    Plain(PlainType),
    /// `T?` - the inner type is never itself nullable.
    Nullable(NullableType),
    /// `(A or B or ...)` with at least two members.
    Union(UnionType),
    /// `sequence<T>` or `FrozenArray<T>`.
    Sequence(SequenceType),
}

/// A plain named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlainType {
    base: String,
}

/// A nullable wrapper around exactly one inner type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NullableType {
    inner: Box<IdlType>,
}

/// An ordered union of at least two member types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionType {
    members: Vec<IdlType>,
}

/// Distinguishes an unbounded `sequence<T>` from a `FrozenArray<T>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// `sequence<T>` - unbounded.
    Sequence,
    /// `FrozenArray<T>` - fixed after creation.
    FrozenArray,
}

/// A sequence or frozen-array type with one element type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceType {
    element: Box<IdlType>,
    kind: SequenceKind,
}

impl IdlType {
    /// Create a plain named type.
    pub fn plain(base: impl Into<String>) -> Self {
        IdlType::Plain(PlainType { base: base.into() })
    }

    /// Create a nullable type.
    ///
    /// Nullable-of-nullable is flattened: wrapping an already-nullable type
    /// returns it unchanged, so the inner type of a `Nullable` is never
    /// itself nullable.
    pub fn nullable(inner: IdlType) -> Self {
        if inner.is_nullable() {
            return inner;
        }
        IdlType::Nullable(NullableType {
            inner: Box::new(inner),
        })
    }

    /// Create a union type from its ordered members.
    ///
    /// The upstream parser guarantees at least two members whose tags remain
    /// pairwise distinct after nullability normalization.
    pub fn union(members: Vec<IdlType>) -> Self {
        debug_assert!(members.len() >= 2, "a union needs at least two members");
        IdlType::Union(UnionType { members })
    }

    /// Create a `sequence<element>` type.
    pub fn sequence(element: IdlType) -> Self {
        IdlType::Sequence(SequenceType {
            element: Box::new(element),
            kind: SequenceKind::Sequence,
        })
    }

    /// Create a `FrozenArray<element>` type.
    pub fn frozen_array(element: IdlType) -> Self {
        IdlType::Sequence(SequenceType {
            element: Box::new(element),
            kind: SequenceKind::FrozenArray,
        })
    }

    /// The base-type name, looking through a nullable wrapper.
    ///
    /// Unions and sequences have no base name.
    pub fn base_type(&self) -> Option<&str> {
        match self {
            IdlType::Plain(p) => Some(&p.base),
            IdlType::Nullable(n) => n.inner.base_type(),
            IdlType::Union(_) | IdlType::Sequence(_) => None,
        }
    }

    /// True for `T?`.
    pub fn is_nullable(&self) -> bool {
        matches!(self, IdlType::Nullable(_))
    }

    /// The inner type of a nullable wrapper.
    pub fn inner_type(&self) -> Option<&IdlType> {
        match self {
            IdlType::Nullable(n) => Some(&n.inner),
            _ => None,
        }
    }

    /// The union shape, looking through a nullable wrapper.
    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            IdlType::Union(u) => Some(u),
            IdlType::Nullable(n) => n.inner.as_union(),
            _ => None,
        }
    }

    /// True if this is a union, looking through a nullable wrapper.
    pub fn is_union_type(&self) -> bool {
        self.as_union().is_some()
    }

    /// The element type of a sequence/frozen array, looking through a
    /// nullable wrapper.
    pub fn sequence_element_type(&self) -> Option<&IdlType> {
        match self {
            IdlType::Sequence(s) => Some(&s.element),
            IdlType::Nullable(n) => n.inner.sequence_element_type(),
            _ => None,
        }
    }

    /// True if this is a sequence or frozen array, looking through a
    /// nullable wrapper.
    pub fn is_sequence_type(&self) -> bool {
        self.sequence_element_type().is_some()
    }

    /// True if this is specifically a `FrozenArray<T>`.
    pub fn is_frozen_array(&self) -> bool {
        match self {
            IdlType::Sequence(s) => s.kind == SequenceKind::FrozenArray,
            IdlType::Nullable(n) => n.inner.is_frozen_array(),
            _ => false,
        }
    }

    /// The type's name, used as the member tag for union dispatch and for
    /// `NativeValueTraits` trait naming.
    ///
    /// Primitive keywords map to camel-case words (`long` -> `Long`,
    /// `unsigned long long` -> `UnsignedLongLong`); identifier-shaped names
    /// pass through verbatim. Nullable appends `OrNull`, unions join member
    /// names with `Or`, and sequences append `Sequence` or `FrozenArray`.
    pub fn name(&self) -> String {
        match self {
            IdlType::Plain(p) => base_type_name(&p.base).to_string(),
            IdlType::Nullable(n) => format!("{}OrNull", n.inner.name()),
            IdlType::Union(u) => u
                .members
                .iter()
                .map(IdlType::name)
                .collect::<Vec<_>>()
                .join("Or"),
            IdlType::Sequence(s) => match s.kind {
                SequenceKind::Sequence => format!("{}Sequence", s.element.name()),
                SequenceKind::FrozenArray => format!("{}FrozenArray", s.element.name()),
            },
        }
    }
}

impl NullableType {
    /// The wrapped, never-itself-nullable inner type.
    pub fn inner(&self) -> &IdlType {
        &self.inner
    }
}

impl UnionType {
    /// The ordered member types.
    pub fn members(&self) -> &[IdlType] {
        &self.members
    }

    /// The name of the generated container class for this union.
    ///
    /// Member names are joined with `Or`, and a nullable member contributes
    /// the name of its inner type. `(A? or B)`, `(A or B?)` and `(A or B)?`
    /// therefore all resolve to the single `AOrB` container; nullability is
    /// carried by the conversion mode, never by the container name, keeping
    /// member tags pairwise distinct.
    pub fn container_name(&self) -> String {
        self.members
            .iter()
            .map(|member| match member {
                IdlType::Nullable(n) => n.inner().name(),
                other => other.name(),
            })
            .collect::<Vec<_>>()
            .join("Or")
    }
}

impl SequenceType {
    /// The element type.
    pub fn element(&self) -> &IdlType {
        &self.element
    }

    /// Sequence vs frozen array.
    pub fn kind(&self) -> SequenceKind {
        self.kind
    }
}

/// Maps a primitive keyword to its camel-case tag name.
///
/// Identifier-shaped base names (`DOMString`, `ByteString`, interface names)
/// are already valid tags and pass through unchanged.
pub(crate) fn base_type_name(base: &str) -> &str {
    match base {
        "any" => "Any",
        "boolean" => "Boolean",
        "byte" => "Byte",
        "octet" => "Octet",
        "short" => "Short",
        "unsigned short" => "UnsignedShort",
        "long" => "Long",
        "unsigned long" => "UnsignedLong",
        "long long" => "LongLong",
        "unsigned long long" => "UnsignedLongLong",
        "float" => "Float",
        "unrestricted float" => "UnrestrictedFloat",
        "double" => "Double",
        "unrestricted double" => "UnrestrictedDouble",
        "object" => "Object",
        "void" => "Void",
        other => other,
    }
}

impl Display for IdlType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
