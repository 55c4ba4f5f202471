//! Metadata model consumed by the contract generator.
//!
//! This module holds the read-only representation of a module's API surface as produced by
//! the external metadata source, together with the leaf utilities the rest of the crate is
//! built on.
//!
//! # Key Components
//!
//! - [`typeref::MetadataTypeReference`]: Algebraic model of every type usage shape
//! - [`model::ModuleMetadata`]: Root of the object graph (namespaces, types, members)
//! - [`identity::AssemblyIdentity`]: Cross-assembly identity used as resolver cache key
//! - [`constants::ConstantValue`]: Decoded compile-time constants
//! - [`naming`]: Backtick arity parsing and the (name, arity) sibling order

pub mod constants;
pub mod identity;
pub mod model;
pub mod naming;
pub mod typeref;
