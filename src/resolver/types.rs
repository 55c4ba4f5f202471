//! Shapes exchanged between the resolver and the binary-container capability.
//!
//! Raw container parsing is out of scope for this crate; an
//! [`AssemblyReader`](crate::resolver::AssemblyReader) yields one
//! [`ReferencedTypeDefinition`] per call, carrying exactly the facts classification needs:
//! the name path, the visibility category, the structural flags, the base-type identity,
//! the fields, and the attribute type names. Everything else in the dependency's metadata
//! stays unread.

use crate::metadata::{
    constants::ConstantValue,
    model::TypeTraits,
    typeref::{MetadataTypeReference, PrimitiveCode},
};

/// Fully qualified name path of a type definition: namespace, top-level name, and the
/// ordered chain of nested names below it.
///
/// Names keep their backtick arity markers — the resolver matches raw metadata names and
/// never interprets arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameSpec {
    /// Namespace of the top-level type; `None` for the global namespace
    pub namespace: Option<String>,
    /// Name of the top-level type
    pub top_level_name: String,
    /// Nested names from outermost to innermost; empty for a top-level type
    pub nested_names: Vec<String>,
}

impl NameSpec {
    /// Create a spec for a top-level type.
    #[must_use]
    pub fn top_level(namespace: Option<&str>, name: &str) -> Self {
        NameSpec {
            namespace: namespace.map(str::to_string),
            top_level_name: name.to_string(),
            nested_names: Vec::new(),
        }
    }

    /// Decompose a named type reference into its name path.
    ///
    /// Generic instantiations resolve through their definition, ignoring arguments.
    /// Returns `None` for shapes that have no name path (primitives, pointers, by-refs,
    /// arrays, generic parameters) or for a nested reference whose declaring chain does
    /// not bottom out in a top-level reference.
    #[must_use]
    pub fn of(reference: &MetadataTypeReference) -> Option<Self> {
        match reference {
            MetadataTypeReference::TopLevel {
                namespace, name, ..
            } => Some(NameSpec {
                namespace: namespace.clone(),
                top_level_name: name.clone(),
                nested_names: Vec::new(),
            }),
            MetadataTypeReference::Nested {
                declaring_type,
                name,
            } => {
                let mut spec = NameSpec::of(declaring_type)?;
                spec.nested_names.push(name.clone());
                Some(spec)
            }
            MetadataTypeReference::GenericInstantiation { definition, .. } => {
                NameSpec::of(definition)
            }
            _ => None,
        }
    }

    /// The assembly identity carried by the reference's top-level node, if any.
    #[must_use]
    pub fn assembly_of(
        reference: &MetadataTypeReference,
    ) -> Option<&crate::metadata::identity::AssemblyIdentity> {
        match reference {
            MetadataTypeReference::TopLevel { assembly, .. } => assembly.as_ref(),
            MetadataTypeReference::Nested { declaring_type, .. } => {
                NameSpec::assembly_of(declaring_type)
            }
            MetadataTypeReference::GenericInstantiation { definition, .. } => {
                NameSpec::assembly_of(definition)
            }
            _ => None,
        }
    }
}

/// A (namespace, name) pair identifying a type by name alone.
///
/// Used for base-type identity checks (`System.ValueType`, `System.Enum`,
/// `System.MulticastDelegate`) and marker-attribute matching (`System.FlagsAttribute`),
/// which compare against fixed constants and never resolve the named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    /// Namespace; `None` for the global namespace
    pub namespace: Option<String>,
    /// Type name
    pub name: String,
}

impl TypeName {
    /// Create a type name.
    #[must_use]
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        TypeName {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Check against a fixed (namespace, name) constant.
    #[must_use]
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.name == name
    }
}

/// Access category of a referenced type definition, per the container's nested-visibility
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencedVisibility {
    /// Top-level, externally visible
    Public,
    /// Top-level, assembly only
    NotPublic,
    /// Nested, externally visible
    NestedPublic,
    /// Nested, derived types only
    NestedFamily,
    /// Nested, derived types or assembly
    NestedFamilyOrAssembly,
    /// Nested, derived types within the assembly only
    NestedFamilyAndAssembly,
    /// Nested, assembly only
    NestedAssembly,
    /// Nested, declaring type only
    NestedPrivate,
}

impl ReferencedVisibility {
    /// The assembly-and-derived-only category that makes a sought nested definition
    /// definitively undeterminable rather than "not found yet".
    #[must_use]
    pub fn is_hidden_nested(&self) -> bool {
        matches!(self, ReferencedVisibility::NestedFamilyAndAssembly)
    }
}

/// Access category of a field inside a referenced type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencedFieldVisibility {
    /// Accessible everywhere
    Public,
    /// Derived types only
    Family,
    /// Derived types or assembly
    FamilyOrAssembly,
    /// Derived types within the assembly only
    FamilyAndAssembly,
    /// Assembly only
    Assembly,
    /// Declaring type only
    Private,
    /// Not referenceable from normal code
    CompilerControlled,
}

impl ReferencedFieldVisibility {
    /// Fields in these categories are excluded from an enum's literal field set.
    #[must_use]
    pub fn is_excluded_from_enum_shape(&self) -> bool {
        matches!(
            self,
            ReferencedFieldVisibility::Private | ReferencedFieldVisibility::CompilerControlled
        )
    }
}

/// A field of a referenced type definition, as surfaced by the container capability.
#[derive(Debug, Clone)]
pub struct ReferencedField {
    /// Field name
    pub name: String,
    /// Field is static
    pub is_static: bool,
    /// Field is a compile-time literal
    pub is_literal: bool,
    /// Access category
    pub visibility: ReferencedFieldVisibility,
    /// Primitive code of the field's type, when it is primitive
    pub primitive: Option<PrimitiveCode>,
    /// Decoded constant for literal fields
    pub constant: Option<ConstantValue>,
}

/// One type definition surfaced during an incremental scan of a referenced assembly.
#[derive(Debug, Clone)]
pub struct ReferencedTypeDefinition {
    /// Name path of the definition
    pub name: NameSpec,
    /// Access category
    pub visibility: ReferencedVisibility,
    /// Structural flags
    pub traits: TypeTraits,
    /// Identity of the base type, by name
    pub base_type: Option<TypeName>,
    /// Fields, in definition order
    pub fields: Vec<ReferencedField>,
    /// Type names of the definition's custom attributes
    pub attributes: Vec<TypeName>,
}
