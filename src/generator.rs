//! Contract generation entry point.
//!
//! One generation pass is single-threaded, synchronous, and depth-first: the namespace
//! filter runs first, a fresh [`ReferenceResolver`] is constructed for the pass (and torn
//! down with it, releasing every dependency handle it opened), and the whole contract is
//! rendered into an internal buffer that only reaches the caller's sink on success — a
//! failed generation never emits a truncated, half-canonical contract.

use std::fmt;

use crate::format::ContractFormatter;
use crate::metadata::{
    identity::{AssemblyIdentity, AssemblyVersion},
    model::{ModuleMetadata, NamespaceMetadata},
};
use crate::resolver::{AssemblyLocator, ReferenceResolver};
use crate::Result;

/// Options controlling one generator instance.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Namespace name prefixes removed, with their contents, before formatting.
    ///
    /// Matching is case-insensitive and dot-boundary aware: the prefix `Internal`
    /// removes `Internal` and `Internal.Impl`, never `InternalTools`.
    pub ignored_namespaces: Vec<String>,
    /// Identity the resolver falls back to for unresolved well-known runtime types.
    pub standard_library: AssemblyIdentity,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            ignored_namespaces: Vec::new(),
            standard_library: AssemblyIdentity::simple(
                "mscorlib",
                AssemblyVersion::new(4, 0, 0, 0),
            ),
        }
    }
}

impl GeneratorOptions {
    /// Check if a namespace name matches one of the ignored prefixes.
    #[must_use]
    pub fn is_ignored(&self, namespace: &str) -> bool {
        self.ignored_namespaces
            .iter()
            .any(|prefix| prefix_matches(prefix, namespace))
    }
}

/// Case-insensitive prefix match, terminating only at a dot boundary.
fn prefix_matches(prefix: &str, namespace: &str) -> bool {
    if namespace.len() < prefix.len() || !namespace.is_char_boundary(prefix.len()) {
        return false;
    }
    if !namespace[..prefix.len()].eq_ignore_ascii_case(prefix) {
        return false;
    }
    namespace.len() == prefix.len() || namespace.as_bytes()[prefix.len()] == b'.'
}

/// Renders the canonical API surface contract of a module.
///
/// The generator itself is reusable across modules; all per-pass state (the resolver, its
/// lazy loaders, the output buffer) is created inside [`generate`](Self::generate) and
/// dropped before it returns. Not safe for concurrent use of one pass by design — the
/// underlying resolver state is single-threaded.
pub struct ContractGenerator {
    options: GeneratorOptions,
}

impl ContractGenerator {
    /// Create a generator with the given options.
    #[must_use]
    pub fn new(options: GeneratorOptions) -> Self {
        ContractGenerator { options }
    }

    /// Create a generator with default options (no ignored namespaces).
    #[must_use]
    pub fn with_defaults() -> Self {
        ContractGenerator::new(GeneratorOptions::default())
    }

    /// Render the canonical contract of `module` into `output`.
    ///
    /// ## Arguments
    /// * 'module' - The metadata graph produced by the external source
    /// * 'locator' - Assembly search collaborator for cross-assembly facts
    /// * 'output' - Destination sink; written only when the whole pass succeeds
    ///
    /// # Errors
    /// Propagates the fatal conditions of the error taxonomy (malformed shapes,
    /// invariant violations, sink failures). Unresolvable dependencies are not errors —
    /// they degrade to best-effort rendering.
    pub fn generate<W: fmt::Write>(
        &self,
        module: &ModuleMetadata,
        locator: &dyn AssemblyLocator,
        output: &mut W,
    ) -> Result<()> {
        let namespaces: Vec<&NamespaceMetadata> = module
            .namespaces
            .iter()
            .filter(|namespace| !self.options.is_ignored(&namespace.name))
            .collect();

        let mut resolver = ReferenceResolver::new(
            locator,
            Some(module.identity.clone()),
            self.options.standard_library.clone(),
        );

        let mut formatter = ContractFormatter::new(String::new(), &mut resolver);
        formatter.write_namespaces(&namespaces)?;
        let buffer = formatter.into_sink();

        output.write_str(&buffer)?;
        Ok(())
    }
}
