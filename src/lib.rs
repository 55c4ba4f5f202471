#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # dotsurface
//!
//! Deterministic, diff-friendly public API surface contracts for .NET assemblies.
//!
//! `dotsurface` takes the metadata object model of a compiled .NET module — types,
//! members, signatures, generic shapes, constant values, attributes — and renders its
//! externally visible surface as one canonical textual contract, independent of build
//! order or machine. Consumers diff contracts between builds to detect breaking or
//! unintended API changes.
//!
//! ## Features
//!
//! - **Algebraic type reference model** - A closed sum type covering every signature
//!   shape: primitives, pointers, by-refs, arrays, generic parameters, named types, and
//!   generic instantiations with flattened cross-level argument lists
//! - **Lazy cross-assembly resolution** - Enum shapes, value-type-ness, and delegate-ness
//!   of *referenced* types are fetched on demand from the defining binaries, with
//!   per-assembly caching and graceful degradation when a dependency is unavailable
//! - **Canonical ordering** - Deterministic multi-level sorting of namespaces, types, and
//!   members; re-running on unchanged input yields byte-identical output
//! - **C#-shaped rendering** - Sugar substitution (nullable, tuples), accessor modifier
//!   combination, digit-grouped literals, and a fixed escape table
//!
//! ## Quick Start
//!
//! ```rust
//! use dotsurface::{ContractGenerator, GeneratorOptions, NullAssemblyLocator};
//! use dotsurface::metadata::identity::{AssemblyIdentity, AssemblyVersion};
//! use dotsurface::metadata::model::ModuleMetadata;
//!
//! let module = ModuleMetadata {
//!     name: "MyLibrary.dll".to_string(),
//!     identity: AssemblyIdentity::simple("MyLibrary", AssemblyVersion::new(1, 0, 0, 0)),
//!     namespaces: Vec::new(),
//! };
//!
//! let generator = ContractGenerator::new(GeneratorOptions::default());
//! let mut contract = String::new();
//! generator.generate(&module, &NullAssemblyLocator, &mut contract)?;
//! # Ok::<(), dotsurface::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - The read-only object model the external metadata source constructs
//! - [`resolver`] - Lazy cross-assembly classification of referenced types
//! - [`attributes`] - Attribute extraction into structural flags, suppression of
//!   compiler/tooling markers
//! - [`format`] - Canonicalization rules and the indentation output sink
//! - [`ContractGenerator`] - The generation pass: filter, resolve, render, flush
//!
//! ## Boundary Collaborators
//!
//! Three capabilities are consumed, never implemented, by this crate:
//!
//! - A **metadata source** builds [`metadata::model::ModuleMetadata`] from a binary,
//!   exposing only externally visible members
//! - An **assembly locator** ([`resolver::AssemblyLocator`]) maps an assembly identity to
//!   a readable stream of its type definitions; "not found" is non-fatal and degrades to
//!   best-effort rendering
//! - An **output sink** is any [`std::fmt::Write`]
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Dependency absence is
//! absorbed by the resolver and never surfaces as an error; malformed signature shapes
//! and invariant violations abort the generation pass, and no partial contract is ever
//! flushed to the caller's sink.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

pub mod attributes;
pub mod format;
pub mod metadata;
pub mod prelude;
pub mod resolver;

mod generator;

/// `dotsurface` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`], used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `dotsurface` Error type
///
/// The main error type for all operations in this crate. See the variants for the fatal
/// error taxonomy; recoverable conditions (unlocatable dependencies) never surface here.
pub use error::Error;

pub use generator::{ContractGenerator, GeneratorOptions};

/// The no-op assembly locator, re-exported for callers that generate without dependency
/// lookup.
pub use resolver::NullAssemblyLocator;
