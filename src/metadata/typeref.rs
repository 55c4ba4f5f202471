//! Algebraic type reference model.
//!
//! A type reference describes how a type is *used* at some point in a signature — a field's
//! type, a parameter's type, a generic argument — as opposed to its defining declaration.
//! The set of reference shapes is closed by the binary format, so the model is a single sum
//! type with exhaustive matching rather than an open hierarchy: primitives, pointers,
//! by-refs, arrays, generic parameters, top-level and nested named types, and generic
//! instantiations.
//!
//! References are immutable, structurally comparable, and built once per signature by the
//! external metadata source. Generic arity is carried the way the binary format carries it:
//! encoded in the trailing `` `N `` marker of [`TopLevel`](MetadataTypeReference::TopLevel)
//! and [`Nested`](MetadataTypeReference::Nested) names, with a
//! [`GenericInstantiation`](MetadataTypeReference::GenericInstantiation) holding the
//! argument list flattened across all nesting levels.
//!
//! # Invariants
//!
//! - The arity encoded in a `TopLevel`/`Nested` name equals the number of generic
//!   parameters that nesting level directly introduces.
//! - A `GenericInstantiation`'s argument count equals the sum of arities along its
//!   definition's declaring-type chain.
//! - A `GenericInstantiation`'s definition is a `TopLevel` or `Nested` reference, and a
//!   `Nested` reference's declaring type is itself `TopLevel` or `Nested`.
//!
//! Violations are internal-consistency errors detected during rendering and are fatal for
//! the generation pass (§ error module).

use strum::{EnumCount, EnumIter};

use crate::metadata::identity::AssemblyIdentity;

/// Fixed enumeration of the runtime's primitive type codes, named per CIL element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter)]
pub enum PrimitiveCode {
    /// System.Void - represents no value
    Void,
    /// System.Boolean - true/false value
    Boolean,
    /// System.Char - Unicode 16-bit character
    Char,
    /// System.SByte - signed 8-bit integer
    I1,
    /// System.Byte - unsigned 8-bit integer
    U1,
    /// System.Int16 - signed 16-bit integer
    I2,
    /// System.UInt16 - unsigned 16-bit integer
    U2,
    /// System.Int32 - signed 32-bit integer
    I4,
    /// System.UInt32 - unsigned 32-bit integer
    U4,
    /// System.Int64 - signed 64-bit integer
    I8,
    /// System.UInt64 - unsigned 64-bit integer
    U8,
    /// System.Single - 32-bit floating point
    R4,
    /// System.Double - 64-bit floating point
    R8,
    /// System.IntPtr - native sized signed integer
    I,
    /// System.UIntPtr - native sized unsigned integer
    U,
    /// System.Object - base class for all reference types
    Object,
    /// System.String - immutable string of Unicode characters
    String,
    /// System.TypedReference - type-safe pointer used by the runtime
    TypedReference,
}

impl PrimitiveCode {
    /// The C#-shaped keyword (or fully qualified fallback) this code renders as.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveCode::Void => "void",
            PrimitiveCode::Boolean => "bool",
            PrimitiveCode::Char => "char",
            PrimitiveCode::I1 => "sbyte",
            PrimitiveCode::U1 => "byte",
            PrimitiveCode::I2 => "short",
            PrimitiveCode::U2 => "ushort",
            PrimitiveCode::I4 => "int",
            PrimitiveCode::U4 => "uint",
            PrimitiveCode::I8 => "long",
            PrimitiveCode::U8 => "ulong",
            PrimitiveCode::R4 => "float",
            PrimitiveCode::R8 => "double",
            PrimitiveCode::I => "System.IntPtr",
            PrimitiveCode::U => "System.UIntPtr",
            PrimitiveCode::Object => "object",
            PrimitiveCode::String => "string",
            PrimitiveCode::TypedReference => "System.TypedReference",
        }
    }

    /// Check if this code is one of the integer widths (signed or unsigned, 8-64 bit).
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveCode::I1
                | PrimitiveCode::U1
                | PrimitiveCode::I2
                | PrimitiveCode::U2
                | PrimitiveCode::I4
                | PrimitiveCode::U4
                | PrimitiveCode::I8
                | PrimitiveCode::U8
        )
    }

    /// Check if this integer code is signed.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            PrimitiveCode::I1 | PrimitiveCode::I2 | PrimitiveCode::I4 | PrimitiveCode::I8
        )
    }
}

/// A description of how a type is used at some point in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetadataTypeReference {
    /// One of the fixed runtime primitive types
    Primitive(PrimitiveCode),
    /// Unmanaged pointer to an element type
    Pointer(Box<MetadataTypeReference>),
    /// Managed reference to an element type; only legal at parameter/return positions
    ByRef(Box<MetadataTypeReference>),
    /// Array of an element type with the given rank (number of dimensions)
    Array {
        /// The element type
        element: Box<MetadataTypeReference>,
        /// The rank; `1` for a single-dimensional array
        rank: u32,
    },
    /// A top-level named type, optionally defined in another assembly
    TopLevel {
        /// Defining assembly; `None` when the reference is within the same module
        assembly: Option<AssemblyIdentity>,
        /// Namespace of the type; `None` for the global namespace
        namespace: Option<String>,
        /// Metadata name, possibly carrying a trailing `` `N `` arity marker
        name: String,
    },
    /// A type nested inside another named type
    Nested {
        /// The declaring type; must be `TopLevel` or `Nested`
        declaring_type: Box<MetadataTypeReference>,
        /// Metadata name of the nested type, possibly arity-encoded
        name: String,
    },
    /// A generic type or method parameter, referenced by name
    GenericParameter(String),
    /// A closed generic instantiation
    GenericInstantiation {
        /// The open definition; must be `TopLevel` or `Nested`
        definition: Box<MetadataTypeReference>,
        /// Type arguments, flattened across all nesting levels
        arguments: Vec<MetadataTypeReference>,
    },
}

impl MetadataTypeReference {
    /// Convenience constructor for a primitive reference.
    #[must_use]
    pub fn primitive(code: PrimitiveCode) -> Self {
        MetadataTypeReference::Primitive(code)
    }

    /// Convenience constructor for a same-module top-level reference.
    #[must_use]
    pub fn top_level(namespace: Option<&str>, name: &str) -> Self {
        MetadataTypeReference::TopLevel {
            assembly: None,
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Convenience constructor for a top-level reference into another assembly.
    #[must_use]
    pub fn external(assembly: AssemblyIdentity, namespace: Option<&str>, name: &str) -> Self {
        MetadataTypeReference::TopLevel {
            assembly: Some(assembly),
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Convenience constructor for a nested reference.
    #[must_use]
    pub fn nested(declaring_type: MetadataTypeReference, name: &str) -> Self {
        MetadataTypeReference::Nested {
            declaring_type: Box::new(declaring_type),
            name: name.to_string(),
        }
    }

    /// Convenience constructor for a single-dimensional array reference.
    #[must_use]
    pub fn array(element: MetadataTypeReference) -> Self {
        MetadataTypeReference::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// Convenience constructor for a closed generic instantiation.
    #[must_use]
    pub fn instantiation(
        definition: MetadataTypeReference,
        arguments: Vec<MetadataTypeReference>,
    ) -> Self {
        MetadataTypeReference::GenericInstantiation {
            definition: Box::new(definition),
            arguments,
        }
    }

    /// Check if this reference is a named type (top-level, nested, or an instantiation).
    ///
    /// Named references are the only ones the cross-assembly resolver can classify.
    #[must_use]
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            MetadataTypeReference::TopLevel { .. }
                | MetadataTypeReference::Nested { .. }
                | MetadataTypeReference::GenericInstantiation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_primitive_keywords_are_total() {
        // Every code has a non-empty rendering; the keyword table can never panic.
        for code in PrimitiveCode::iter() {
            assert!(!code.keyword().is_empty());
        }
    }

    #[test]
    fn test_integer_predicates() {
        assert!(PrimitiveCode::I1.is_integer());
        assert!(PrimitiveCode::U8.is_integer());
        assert!(!PrimitiveCode::R4.is_integer());
        assert!(!PrimitiveCode::Boolean.is_integer());
        assert!(!PrimitiveCode::Char.is_integer());

        assert!(PrimitiveCode::I4.is_signed());
        assert!(!PrimitiveCode::U4.is_signed());
    }

    #[test]
    fn test_structural_equality() {
        let a = MetadataTypeReference::top_level(Some("System"), "String");
        let b = MetadataTypeReference::top_level(Some("System"), "String");
        assert_eq!(a, b);

        let nested_a = MetadataTypeReference::nested(a.clone(), "Inner");
        let nested_b = MetadataTypeReference::nested(b, "Inner");
        assert_eq!(nested_a, nested_b);

        assert_ne!(a, MetadataTypeReference::top_level(None, "String"));
    }

    #[test]
    fn test_is_named() {
        let top = MetadataTypeReference::top_level(Some("System"), "List`1");
        assert!(top.is_named());
        assert!(MetadataTypeReference::nested(top.clone(), "Enumerator").is_named());
        assert!(MetadataTypeReference::instantiation(
            top,
            vec![MetadataTypeReference::primitive(PrimitiveCode::I4)]
        )
        .is_named());

        assert!(!MetadataTypeReference::primitive(PrimitiveCode::I4).is_named());
        assert!(!MetadataTypeReference::GenericParameter("T".to_string()).is_named());
    }
}
