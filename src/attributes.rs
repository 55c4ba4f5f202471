//! Attribute classification: extraction into structural flags and suppression of
//! compiler/tooling markers.
//!
//! Some attributes are not part of the rendered contract. Compiler-synthesized markers
//! (generated-code, debugger-visibility, coverage-exclusion, state-machine attributes) are
//! suppressed unconditionally; a second group is *consumed* — converted into structural
//! facts the formatter renders differently (`this` extension receivers, `params` arrays,
//! indexer names) and removed from the attribute list.
//!
//! Matching is always by the (namespace, name) identity of the attribute's type, never by
//! resolving it. Extraction is a pure function over the attribute list returning the
//! captures and the surviving attributes in their original order — no in-place mutation.

use crate::metadata::{
    constants::ConstantValue,
    model::{AttributeArgument, AttributeMetadata},
};

/// What a query captures from a matching attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeCapture {
    /// Match on identity alone
    Presence,
    /// Match only when the first fixed argument is a string, and capture it
    StringArgument,
}

/// One attribute search: a (namespace, name) identity plus an optional value predicate.
#[derive(Debug, Clone, Copy)]
pub struct AttributeQuery {
    /// Namespace of the attribute type
    pub namespace: &'static str,
    /// Name of the attribute type
    pub name: &'static str,
    /// Value predicate and capture mode
    pub capture: AttributeCapture,
}

impl AttributeQuery {
    /// Create a presence query.
    #[must_use]
    pub fn presence(namespace: &'static str, name: &'static str) -> Self {
        AttributeQuery {
            namespace,
            name,
            capture: AttributeCapture::Presence,
        }
    }

    /// Create a string-argument query.
    #[must_use]
    pub fn string_argument(namespace: &'static str, name: &'static str) -> Self {
        AttributeQuery {
            namespace,
            name,
            capture: AttributeCapture::StringArgument,
        }
    }

    fn matches(&self, attribute: &AttributeMetadata) -> Option<CapturedValue> {
        let (namespace, name) = attribute.type_name()?;
        if namespace != Some(self.namespace) || name != self.name {
            return None;
        }
        match self.capture {
            AttributeCapture::Presence => Some(CapturedValue::Present),
            AttributeCapture::StringArgument => match attribute.fixed_arguments.first() {
                Some(AttributeArgument::Constant(ConstantValue::String(text))) => {
                    Some(CapturedValue::Text(text.clone()))
                }
                _ => None,
            },
        }
    }
}

/// The captured result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CapturedValue {
    /// No attribute matched the query
    #[default]
    Missing,
    /// A matching attribute was consumed
    Present,
    /// A matching attribute was consumed and its string argument captured
    Text(String),
}

impl CapturedValue {
    /// Check if the query matched anything.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, CapturedValue::Missing)
    }

    /// The captured string, if the query captured one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            CapturedValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Run the queries over an attribute list.
///
/// Attributes are visited first-to-last; each attribute is offered to the queries in
/// order and the first still-unsatisfied query that matches consumes it. Each query
/// consumes at most one attribute, each attribute feeds at most one query. Returns one
/// captured value per query (index-aligned) and the unconsumed attributes in their
/// original order.
#[must_use]
pub fn extract<'a>(
    attributes: &'a [AttributeMetadata],
    queries: &[AttributeQuery],
) -> (Vec<CapturedValue>, Vec<&'a AttributeMetadata>) {
    let mut captures = vec![CapturedValue::Missing; queries.len()];
    let mut remaining = Vec::with_capacity(attributes.len());

    for attribute in attributes {
        let consumed = queries.iter().enumerate().find_map(|(index, query)| {
            if captures[index].is_present() {
                return None;
            }
            query.matches(attribute).map(|value| (index, value))
        });

        match consumed {
            Some((index, value)) => captures[index] = value,
            None => remaining.push(attribute),
        }
    }

    (captures, remaining)
}

/// Check for an attribute by identity without consuming it.
#[must_use]
pub fn has_attribute(attributes: &[AttributeMetadata], namespace: &str, name: &str) -> bool {
    attributes
        .iter()
        .any(|attribute| attribute.type_name() == Some((Some(namespace), name)))
}

/// The member kinds an attribute can be suppressed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTarget {
    /// A type declaration
    Type,
    /// A method declaration
    Method,
    /// A property or event declaration
    Property,
    /// A property or event accessor
    Accessor,
    /// A field declaration
    Field,
    /// A parameter
    Parameter,
}

/// Suppression table: (namespace, name, legal targets).
///
/// Target scoping matters — a marker is only stripped from the member kinds it can
/// legally appear on, so a hand-written attribute of the same name elsewhere survives.
const SUPPRESSED: &[(&str, &str, &[AttributeTarget])] = &[
    (
        "System.Runtime.CompilerServices",
        "CompilerGeneratedAttribute",
        &[
            AttributeTarget::Type,
            AttributeTarget::Method,
            AttributeTarget::Property,
            AttributeTarget::Accessor,
            AttributeTarget::Field,
            AttributeTarget::Parameter,
        ],
    ),
    (
        "System.Diagnostics",
        "DebuggerNonUserCodeAttribute",
        &[
            AttributeTarget::Type,
            AttributeTarget::Method,
            AttributeTarget::Property,
            AttributeTarget::Accessor,
        ],
    ),
    (
        "System.Diagnostics",
        "DebuggerStepThroughAttribute",
        &[
            AttributeTarget::Type,
            AttributeTarget::Method,
            AttributeTarget::Accessor,
        ],
    ),
    (
        "System.Diagnostics.CodeAnalysis",
        "ExcludeFromCodeCoverageAttribute",
        &[
            AttributeTarget::Type,
            AttributeTarget::Method,
            AttributeTarget::Property,
            AttributeTarget::Accessor,
        ],
    ),
    (
        "System.Runtime.CompilerServices",
        "IteratorStateMachineAttribute",
        &[AttributeTarget::Method, AttributeTarget::Accessor],
    ),
    (
        "System.Runtime.CompilerServices",
        "AsyncStateMachineAttribute",
        &[AttributeTarget::Method, AttributeTarget::Accessor],
    ),
];

/// Check if an attribute is unconditionally suppressed on the given target.
#[must_use]
pub fn is_suppressed(attribute: &AttributeMetadata, target: AttributeTarget) -> bool {
    let Some((Some(namespace), name)) = attribute.type_name() else {
        return false;
    };
    SUPPRESSED.iter().any(|(entry_namespace, entry_name, targets)| {
        *entry_namespace == namespace && *entry_name == name && targets.contains(&target)
    })
}
