//! Read-only object model produced by the external metadata source.
//!
//! The metadata source (the out-of-scope binary-container capability) constructs this graph
//! once per module: namespaces, each with their externally visible top-level types, each
//! exposing generic parameters, base type and interfaces, fields, properties, events,
//! methods with attributes and signatures built from the
//! [`typeref`](crate::metadata::typeref) model, and nested types recursively. The core
//! holds the graph for the duration of one generation pass and never mutates it.
//!
//! Only externally visible members appear here — public, protected, and
//! protected-internal. Internal and private members are invisible to this crate by the
//! source's contract, not by filtering here.
//!
//! Type kind (class, struct, interface, enum, delegate) is never stored: the formatter
//! derives it from [`TypeTraits`] and the base-type identity, the same way the binary
//! format encodes it.

use bitflags::bitflags;

use crate::metadata::{
    constants::ConstantValue, identity::AssemblyIdentity, typeref::MetadataTypeReference,
};

/// A module and its externally visible API surface.
#[derive(Debug, Clone)]
pub struct ModuleMetadata {
    /// Module file name (e.g., "MyLibrary.dll")
    pub name: String,
    /// Identity of the assembly this module belongs to
    pub identity: AssemblyIdentity,
    /// All namespaces with at least one externally visible type
    pub namespaces: Vec<NamespaceMetadata>,
}

/// A namespace and its top-level types.
#[derive(Debug, Clone)]
pub struct NamespaceMetadata {
    /// Full dotted namespace name; empty for the global namespace
    pub name: String,
    /// Externally visible top-level types
    pub types: Vec<TypeMetadata>,
}

/// Externally visible access categories, ordered most-permissive first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    /// Accessible everywhere
    Public,
    /// Accessible to derived types and the defining assembly
    ProtectedInternal,
    /// Accessible to derived types
    Protected,
}

impl Visibility {
    /// The declaration keyword for this access category.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::ProtectedInternal => "protected internal",
            Visibility::Protected => "protected",
        }
    }

    /// The more permissive of two categories.
    #[must_use]
    pub fn most_permissive(self, other: Visibility) -> Visibility {
        self.min(other)
    }
}

bitflags! {
    /// Structural flags of a type definition
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeTraits: u8 {
        /// Type is an interface
        const INTERFACE = 0x01;
        /// Type is abstract
        const ABSTRACT = 0x02;
        /// Type is sealed
        const SEALED = 0x04;
    }
}

bitflags! {
    /// Structural flags of a field definition
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldTraits: u8 {
        /// Field is static
        const STATIC = 0x01;
        /// Field is init-only (readonly)
        const INIT_ONLY = 0x02;
        /// Field is a compile-time literal (const)
        const LITERAL = 0x04;
    }
}

bitflags! {
    /// Structural flags of a method or accessor definition
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MethodTraits: u8 {
        /// Method is static
        const STATIC = 0x01;
        /// Method is abstract
        const ABSTRACT = 0x02;
        /// Method is virtual and introduces a new slot
        const VIRTUAL = 0x04;
        /// Method overrides an inherited virtual slot
        const OVERRIDE = 0x08;
        /// Method seals its virtual slot
        const SEALED = 0x10;
    }
}

bitflags! {
    /// Special constraints on a generic parameter
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GenericConstraintTraits: u8 {
        /// `class` constraint - argument must be a reference type
        const REFERENCE_TYPE = 0x01;
        /// `struct` constraint - argument must be a non-nullable value type
        const VALUE_TYPE = 0x02;
        /// `new()` constraint - argument must have a parameterless constructor
        const DEFAULT_CONSTRUCTOR = 0x04;
    }
}

/// Declared variance of a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variance {
    /// No variance
    #[default]
    Invariant,
    /// `out` - covariant
    Covariant,
    /// `in` - contravariant
    Contravariant,
}

/// A generic parameter a type or method directly introduces.
#[derive(Debug, Clone)]
pub struct GenericParameterMetadata {
    /// Parameter name (e.g., "T", "TKey")
    pub name: String,
    /// Declared variance; only meaningful on interfaces and delegates
    pub variance: Variance,
    /// Special constraints (`class`, `struct`, `new()`)
    pub constraint_traits: GenericConstraintTraits,
    /// Type constraints rendered in the `where` clause
    pub constraints: Vec<MetadataTypeReference>,
}

impl GenericParameterMetadata {
    /// Create an unconstrained, invariant parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        GenericParameterMetadata {
            name: name.into(),
            variance: Variance::Invariant,
            constraint_traits: GenericConstraintTraits::empty(),
            constraints: Vec::new(),
        }
    }

    /// Check if the parameter carries any renderable constraint.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        !self.constraint_traits.is_empty() || !self.constraints.is_empty()
    }
}

/// A type definition and its externally visible members.
#[derive(Debug, Clone)]
pub struct TypeMetadata {
    /// Metadata name, arity-encoded for generic types
    pub name: String,
    /// Access category; always `Public` for top-level types
    pub visibility: Visibility,
    /// Structural flags
    pub traits: TypeTraits,
    /// Full declared generic parameter list, including parameters repeated from the
    /// declaring type for nested types
    pub generic_parameters: Vec<GenericParameterMetadata>,
    /// Base type; `None` only for `System.Object` itself and interfaces
    pub base_type: Option<MetadataTypeReference>,
    /// Implemented interfaces, in declaration order
    pub interfaces: Vec<MetadataTypeReference>,
    /// Custom attributes
    pub attributes: Vec<AttributeMetadata>,
    /// Externally visible fields
    pub fields: Vec<FieldMetadata>,
    /// Externally visible properties
    pub properties: Vec<PropertyMetadata>,
    /// Externally visible events
    pub events: Vec<EventMetadata>,
    /// Externally visible methods, including constructors (named `.ctor`)
    pub methods: Vec<MethodMetadata>,
    /// Externally visible nested types
    pub nested_types: Vec<TypeMetadata>,
}

/// A field definition.
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    /// Field name
    pub name: String,
    /// Access category
    pub visibility: Visibility,
    /// Structural flags
    pub traits: FieldTraits,
    /// Declared field type
    pub field_type: MetadataTypeReference,
    /// Decoded constant for literal fields
    pub default_value: Option<ConstantValue>,
    /// Custom attributes
    pub attributes: Vec<AttributeMetadata>,
}

/// Passing mode of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterMode {
    /// By value
    #[default]
    Value,
    /// `ref` - by reference, in/out
    Ref,
    /// `out` - by reference, out only
    Out,
    /// `in` - by readonly reference
    In,
}

/// A parameter of a method, delegate, or indexer.
#[derive(Debug, Clone)]
pub struct ParameterMetadata {
    /// Parameter name
    pub name: String,
    /// Declared parameter type, without the by-ref wrapper ([`mode`](Self::mode) carries it)
    pub parameter_type: MetadataTypeReference,
    /// Passing mode
    pub mode: ParameterMode,
    /// Parameter is optional at call sites
    pub is_optional: bool,
    /// Decoded default constant; may be absent on an optional parameter whose default is
    /// only expressible through a compiler attribute (decimal, date-time)
    pub default_value: Option<ConstantValue>,
    /// Custom attributes
    pub attributes: Vec<AttributeMetadata>,
}

impl ParameterMetadata {
    /// Create a by-value, non-optional parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_type: MetadataTypeReference) -> Self {
        ParameterMetadata {
            name: name.into(),
            parameter_type,
            mode: ParameterMode::Value,
            is_optional: false,
            default_value: None,
            attributes: Vec::new(),
        }
    }
}

/// A method definition.
#[derive(Debug, Clone)]
pub struct MethodMetadata {
    /// Metadata name; constructors are named `.ctor`, operators `op_*`
    pub name: String,
    /// Access category
    pub visibility: Visibility,
    /// Structural flags
    pub traits: MethodTraits,
    /// Generic parameters the method introduces
    pub generic_parameters: Vec<GenericParameterMetadata>,
    /// Return type
    pub return_type: MetadataTypeReference,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterMetadata>,
    /// Custom attributes
    pub attributes: Vec<AttributeMetadata>,
}

/// The name reserved for instance constructors.
pub const CONSTRUCTOR_NAME: &str = ".ctor";

impl MethodMetadata {
    /// Check if this method is an instance constructor.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

/// A property accessor (or event accessor) definition.
#[derive(Debug, Clone)]
pub struct AccessorMetadata {
    /// Access category
    pub visibility: Visibility,
    /// Structural flags
    pub traits: MethodTraits,
    /// Custom attributes
    pub attributes: Vec<AttributeMetadata>,
}

impl AccessorMetadata {
    /// Create a plain accessor with the given visibility.
    #[must_use]
    pub fn new(visibility: Visibility) -> Self {
        AccessorMetadata {
            visibility,
            traits: MethodTraits::empty(),
            attributes: Vec::new(),
        }
    }
}

/// A property definition.
#[derive(Debug, Clone)]
pub struct PropertyMetadata {
    /// Property name; indexers conventionally use the type's default-member name
    pub name: String,
    /// Declared property type
    pub property_type: MetadataTypeReference,
    /// Index parameters; empty for non-indexer properties
    pub parameters: Vec<ParameterMetadata>,
    /// The `get` accessor, if externally visible
    pub getter: Option<AccessorMetadata>,
    /// The `set` accessor, if externally visible
    pub setter: Option<AccessorMetadata>,
    /// Custom attributes
    pub attributes: Vec<AttributeMetadata>,
}

/// An event definition.
#[derive(Debug, Clone)]
pub struct EventMetadata {
    /// Event name
    pub name: String,
    /// The delegate type of the event
    pub event_type: MetadataTypeReference,
    /// The `add` accessor, if externally visible
    pub adder: Option<AccessorMetadata>,
    /// The `remove` accessor, if externally visible
    pub remover: Option<AccessorMetadata>,
    /// Custom attributes
    pub attributes: Vec<AttributeMetadata>,
}

/// A decoded custom attribute instance.
#[derive(Debug, Clone)]
pub struct AttributeMetadata {
    /// The attribute's type; a named reference
    pub attribute_type: MetadataTypeReference,
    /// Positional constructor arguments, in order
    pub fixed_arguments: Vec<AttributeArgument>,
    /// Named field/property arguments, in blob order
    pub named_arguments: Vec<NamedAttributeArgument>,
}

impl AttributeMetadata {
    /// Create an attribute instance with no arguments.
    #[must_use]
    pub fn marker(attribute_type: MetadataTypeReference) -> Self {
        AttributeMetadata {
            attribute_type,
            fixed_arguments: Vec::new(),
            named_arguments: Vec::new(),
        }
    }

    /// The (namespace, name) identity of the attribute's type, when it is top-level.
    ///
    /// Suppression and extraction match on this identity alone — the attribute type is
    /// never resolved.
    #[must_use]
    pub fn type_name(&self) -> Option<(Option<&str>, &str)> {
        match &self.attribute_type {
            MetadataTypeReference::TopLevel {
                namespace, name, ..
            } => Some((namespace.as_deref(), name.as_str())),
            _ => None,
        }
    }
}

/// A named argument inside an attribute instance.
#[derive(Debug, Clone)]
pub struct NamedAttributeArgument {
    /// Field or property name
    pub name: String,
    /// Argument value
    pub value: AttributeArgument,
}

/// A decoded attribute argument value.
#[derive(Debug, Clone)]
pub enum AttributeArgument {
    /// A constant literal
    Constant(ConstantValue),
    /// A `typeof(T)` reference; `None` encodes a null type argument
    Type(Option<MetadataTypeReference>),
    /// An enum-typed value: the enum type and its underlying constant
    Enum {
        /// The enum type
        enum_type: MetadataTypeReference,
        /// The underlying constant value
        value: ConstantValue,
    },
    /// An array of arguments; `None` encodes a null array
    Array(Option<Vec<AttributeArgument>>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_order_is_most_permissive_first() {
        assert!(Visibility::Public < Visibility::ProtectedInternal);
        assert!(Visibility::ProtectedInternal < Visibility::Protected);
        assert_eq!(
            Visibility::Protected.most_permissive(Visibility::Public),
            Visibility::Public
        );
        assert_eq!(
            Visibility::Protected.most_permissive(Visibility::ProtectedInternal),
            Visibility::ProtectedInternal
        );
    }

    #[test]
    fn test_visibility_keywords() {
        assert_eq!(Visibility::Public.keyword(), "public");
        assert_eq!(Visibility::ProtectedInternal.keyword(), "protected internal");
        assert_eq!(Visibility::Protected.keyword(), "protected");
    }

    #[test]
    fn test_constructor_detection() {
        let ctor = MethodMetadata {
            name: CONSTRUCTOR_NAME.to_string(),
            visibility: Visibility::Public,
            traits: MethodTraits::empty(),
            generic_parameters: Vec::new(),
            return_type: MetadataTypeReference::primitive(
                crate::metadata::typeref::PrimitiveCode::Void,
            ),
            parameters: Vec::new(),
            attributes: Vec::new(),
        };
        assert!(ctor.is_constructor());
    }

    #[test]
    fn test_attribute_type_name() {
        let attribute = AttributeMetadata::marker(MetadataTypeReference::top_level(
            Some("System"),
            "FlagsAttribute",
        ));
        assert_eq!(attribute.type_name(), Some((Some("System"), "FlagsAttribute")));

        let nested = AttributeMetadata::marker(MetadataTypeReference::nested(
            MetadataTypeReference::top_level(Some("Outer"), "Holder"),
            "InnerAttribute",
        ));
        assert_eq!(nested.type_name(), None);
    }

    #[test]
    fn test_generic_parameter_constraint_detection() {
        let mut parameter = GenericParameterMetadata::new("T");
        assert!(!parameter.is_constrained());

        parameter.constraint_traits = GenericConstraintTraits::REFERENCE_TYPE;
        assert!(parameter.is_constrained());
    }
}
