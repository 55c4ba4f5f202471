//! Locator and reader collaborator contracts.
//!
//! The core never touches the file system or a process-wide assembly search itself. An
//! [`AssemblyLocator`] maps an identity to an [`AssemblyReader`] — the access contract of
//! the out-of-scope binary-container capability — and "not found" is a first-class,
//! non-fatal outcome that the resolver degrades to an `Unknown` classification.

use crate::metadata::identity::AssemblyIdentity;
use crate::resolver::types::ReferencedTypeDefinition;

/// Incremental access to a located assembly's type definitions.
///
/// Definitions are surfaced one at a time, in a stable order, so a lazy loader can stop as
/// soon as it finds the definition it is searching for. The reader owns whatever underlying
/// handle the capability opened; dropping the reader releases it.
pub trait AssemblyReader {
    /// Surface the next type definition, or `None` when the assembly is exhausted.
    ///
    /// # Errors
    /// An I/O or decoding failure ends the scan; the resolver treats it exactly like
    /// exhaustion and answers later lookups from cache or as `Unknown`.
    fn next_type_definition(
        &mut self,
    ) -> Result<Option<ReferencedTypeDefinition>, std::io::Error>;
}

/// Maps an assembly identity to a readable view of its type definitions.
///
/// Implementations are search strategies (an output directory, a cache, a global store)
/// and compose by chaining: a slice of locators is itself a locator whose first hit wins.
pub trait AssemblyLocator {
    /// Locate the assembly with the given identity, or `None` when it cannot be found.
    fn try_locate(&self, identity: &AssemblyIdentity) -> Option<Box<dyn AssemblyReader>>;
}

impl AssemblyLocator for [Box<dyn AssemblyLocator>] {
    fn try_locate(&self, identity: &AssemblyIdentity) -> Option<Box<dyn AssemblyReader>> {
        self.iter().find_map(|locator| locator.try_locate(identity))
    }
}

impl AssemblyLocator for Vec<Box<dyn AssemblyLocator>> {
    fn try_locate(&self, identity: &AssemblyIdentity) -> Option<Box<dyn AssemblyReader>> {
        self.as_slice().try_locate(identity)
    }
}

/// A locator that never finds anything.
///
/// The degenerate end of a locator chain, and the natural choice for generating a contract
/// without any dependency lookup: every cross-assembly fact degrades to `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAssemblyLocator;

impl AssemblyLocator for NullAssemblyLocator {
    fn try_locate(&self, _identity: &AssemblyIdentity) -> Option<Box<dyn AssemblyReader>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::metadata::identity::AssemblyVersion;
    use crate::test::fixtures::VecAssemblyReader;

    use super::*;

    struct SingleAssemblyLocator {
        name: &'static str,
    }

    impl AssemblyLocator for SingleAssemblyLocator {
        fn try_locate(&self, identity: &AssemblyIdentity) -> Option<Box<dyn AssemblyReader>> {
            if identity.name == self.name {
                Some(Box::new(VecAssemblyReader::new(Vec::new())))
            } else {
                None
            }
        }
    }

    fn identity(name: &str) -> AssemblyIdentity {
        AssemblyIdentity::simple(name, AssemblyVersion::new(1, 0, 0, 0))
    }

    #[test]
    fn test_null_locator_finds_nothing() {
        assert!(NullAssemblyLocator
            .try_locate(&identity("mscorlib"))
            .is_none());
    }

    #[test]
    fn test_chain_first_hit_wins() {
        let chain: Vec<Box<dyn AssemblyLocator>> = vec![
            Box::new(NullAssemblyLocator),
            Box::new(SingleAssemblyLocator { name: "A" }),
            Box::new(SingleAssemblyLocator { name: "B" }),
        ];

        assert!(chain.try_locate(&identity("A")).is_some());
        assert!(chain.try_locate(&identity("B")).is_some());
        assert!(chain.try_locate(&identity("C")).is_none());
    }
}
