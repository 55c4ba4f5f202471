//! Convenient re-exports of the most commonly used types and traits.
//!
//! This module provides a curated selection of the most frequently used types from across
//! the library, allowing for convenient glob imports.
//!
//! # Example
//!
//! ```rust
//! use dotsurface::prelude::*;
//!
//! let module = ModuleMetadata {
//!     name: "Lib.dll".to_string(),
//!     identity: AssemblyIdentity::simple("Lib", AssemblyVersion::new(1, 0, 0, 0)),
//!     namespaces: Vec::new(),
//! };
//! let mut contract = String::new();
//! ContractGenerator::with_defaults().generate(&module, &NullAssemblyLocator, &mut contract)?;
//! # Ok::<(), dotsurface::Error>(())
//! ```

pub use crate::format::{format_type_reference, IndentedWriter};
pub use crate::metadata::constants::ConstantValue;
pub use crate::metadata::identity::{AssemblyIdentity, AssemblyVersion};
pub use crate::metadata::model::{
    AccessorMetadata, AttributeArgument, AttributeMetadata, EventMetadata, FieldMetadata,
    FieldTraits, GenericConstraintTraits, GenericParameterMetadata, MethodMetadata, MethodTraits,
    ModuleMetadata, NamedAttributeArgument, NamespaceMetadata, ParameterMetadata, ParameterMode,
    PropertyMetadata, TypeMetadata, TypeTraits, Variance, Visibility, CONSTRUCTOR_NAME,
};
pub use crate::metadata::naming;
pub use crate::metadata::typeref::{MetadataTypeReference, PrimitiveCode};
pub use crate::resolver::{
    AssemblyLocator, AssemblyReader, EnumField, EnumShape, NameSpec, NullAssemblyLocator,
    ReferenceClassification, ReferenceResolver, ReferencedField, ReferencedFieldVisibility,
    ReferencedTypeDefinition, ReferencedVisibility, TypeName,
};
pub use crate::{ContractGenerator, Error, GeneratorOptions, Result};
