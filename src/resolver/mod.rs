//! Cross-assembly reference resolution.
//!
//! A module's metadata describes *its own* types completely, but a signature routinely
//! references types defined elsewhere — and rendering a faithful contract sometimes needs
//! facts only the defining assembly knows: is the referenced type an enum, what is its
//! underlying integer width, which literal fields does it declare, is it a value type or a
//! delegate. This module fetches those facts lazily, on demand, from other binaries.
//!
//! # Key Components
//!
//! - [`ReferenceResolver`]: The per-generation-pass owner of all lazy state
//! - [`AssemblyLoader`]: Incremental scanner + cache for one assembly
//! - [`AssemblyLocator`] / [`AssemblyReader`]: The external search/read collaborators
//! - [`ReferenceClassification`] / [`EnumShape`]: The answers
//!
//! # Resolution Flow
//!
//! `classify` decomposes a reference into `(assembly identity, name path)`, falling back
//! to the current module's identity and then to the registered standard-library identity
//! when the reference carries none. The identity maps to a lazy loader (created on first
//! use via the locator; an unlocatable identity maps permanently to "no loader"), and the
//! loader scans the assembly's type definitions incrementally, caching every definition it
//! visits, until the sought name is found or the scan is exhausted.
//!
//! # Failure Semantics
//!
//! A missing or unreadable assembly never aborts generation: it degrades to
//! [`ReferenceClassification::Unknown`] and the formatter renders a best-effort default.
//! All loaders, and every reader handle they still hold, are torn down with the resolver
//! at the end of the generation pass.
//!
//! # Thread Safety
//!
//! Not thread-safe by design: one generation pass is single-threaded and synchronous, and
//! `classify` takes `&mut self`.

mod classification;
mod loader;
mod locator;
mod types;

use std::collections::HashMap;

pub use classification::{EnumField, EnumShape, ReferenceClassification};
pub use loader::AssemblyLoader;
pub use locator::{AssemblyLocator, AssemblyReader, NullAssemblyLocator};
pub use types::{
    NameSpec, ReferencedField, ReferencedFieldVisibility, ReferencedTypeDefinition,
    ReferencedVisibility, TypeName,
};

use crate::metadata::{identity::AssemblyIdentity, typeref::MetadataTypeReference};

/// Resolves referenced-type classifications across assembly boundaries.
///
/// Constructed fresh for each generation pass and dropped at its end; owns one optional
/// [`AssemblyLoader`] per assembly identity ever queried (`None` records a permanent
/// locator miss so it is never retried).
pub struct ReferenceResolver<'a> {
    locator: &'a dyn AssemblyLocator,
    current_module: Option<AssemblyIdentity>,
    standard_library: AssemblyIdentity,
    loaders: HashMap<AssemblyIdentity, Option<AssemblyLoader>>,
}

impl<'a> ReferenceResolver<'a> {
    /// Create a resolver for one generation pass.
    ///
    /// ## Arguments
    /// * 'locator' - The external assembly search collaborator
    /// * 'current_module' - Identity same-module references resolve against
    /// * 'standard_library' - Fallback identity for unresolved well-known runtime types
    #[must_use]
    pub fn new(
        locator: &'a dyn AssemblyLocator,
        current_module: Option<AssemblyIdentity>,
        standard_library: AssemblyIdentity,
    ) -> Self {
        ReferenceResolver {
            locator,
            current_module,
            standard_library,
            loaders: HashMap::new(),
        }
    }

    /// Classify a referenced type.
    ///
    /// Pure from the caller's perspective: the same reference always yields the same
    /// classification within one pass. Internally stateful — caching and lazy I/O.
    /// Shapes that have no name path (primitives, pointers, by-refs, arrays, generic
    /// parameters) answer [`ReferenceClassification::Unknown`] directly.
    pub fn classify(&mut self, reference: &MetadataTypeReference) -> ReferenceClassification {
        let Some(spec) = NameSpec::of(reference) else {
            return ReferenceClassification::Unknown;
        };

        let identity = match NameSpec::assembly_of(reference) {
            Some(identity) => identity.clone(),
            None => match &self.current_module {
                Some(identity) => identity.clone(),
                None => self.standard_library.clone(),
            },
        };

        let locator = self.locator;
        let loader = self
            .loaders
            .entry(identity)
            .or_insert_with_key(|identity| locator.try_locate(identity).map(AssemblyLoader::new));

        match loader {
            Some(loader) => loader.classify(&spec),
            None => ReferenceClassification::Unknown,
        }
    }
}
