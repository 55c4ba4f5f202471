//! Lazy, incremental scanning of one referenced assembly.
//!
//! A loader wraps the [`AssemblyReader`](crate::resolver::AssemblyReader) for a single
//! assembly identity and enumerates its type definitions strictly on demand: each lookup
//! continues the scan from wherever the previous lookup stopped, classifying and caching
//! **every** definition visited along the way — not only the sought one — because one scan
//! pass is expected to serve many unrelated lookups within the same assembly.
//!
//! When enumeration completes (or the reader fails), the loader marks itself exhausted and
//! drops the reader, releasing the underlying handle; all later lookups answer purely from
//! cache or as `Unknown`.

use std::collections::HashMap;

use crate::metadata::typeref::PrimitiveCode;
use crate::resolver::{
    classification::{EnumField, EnumShape, ReferenceClassification},
    locator::AssemblyReader,
    types::{NameSpec, ReferencedTypeDefinition},
};

/// Per-assembly lazy scanner with a name→classification cache.
pub struct AssemblyLoader {
    /// Open reader; `None` once the scan is exhausted or has failed
    reader: Option<Box<dyn AssemblyReader>>,
    /// Classification of every definition visited so far
    cache: HashMap<NameSpec, ReferenceClassification>,
}

impl AssemblyLoader {
    /// Wrap a freshly located reader.
    #[must_use]
    pub fn new(reader: Box<dyn AssemblyReader>) -> Self {
        AssemblyLoader {
            reader: Some(reader),
            cache: HashMap::new(),
        }
    }

    /// Check if the scan has completed and the reader has been released.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.reader.is_none()
    }

    /// Classify the definition with the given name path.
    ///
    /// Answers from cache when possible; otherwise resumes the incremental scan until the
    /// sought name is found or the assembly is exhausted. A sought definition that turns
    /// out to be a hidden nested type (assembly-and-derived-only) answers `Unknown`
    /// definitively — the scan stops at it rather than running to exhaustion.
    pub fn classify(&mut self, sought: &NameSpec) -> ReferenceClassification {
        if let Some(classification) = self.cache.get(sought) {
            return classification.clone();
        }

        while let Some(reader) = self.reader.as_mut() {
            match reader.next_type_definition() {
                Ok(Some(definition)) => {
                    let classification = classify_definition(&definition);
                    let name = definition.name;
                    let found = name == *sought;
                    self.cache.insert(name, classification.clone());
                    if found {
                        return classification;
                    }
                }
                Ok(None) | Err(_) => {
                    // Exhausted (or unreadable, which degrades the same way); release the
                    // handle now rather than at end of pass.
                    self.reader = None;
                }
            }
        }

        ReferenceClassification::Unknown
    }
}

/// Classify one visited definition by structural shape and base-type identity.
fn classify_definition(definition: &ReferencedTypeDefinition) -> ReferenceClassification {
    use crate::metadata::model::TypeTraits;

    // A hidden nested definition is definitively undeterminable, whatever its shape.
    if definition.visibility.is_hidden_nested() {
        return ReferenceClassification::Unknown;
    }

    let Some(base) = &definition.base_type else {
        return ReferenceClassification::Unknown;
    };

    let traits = definition.traits;
    let value_type_shape = traits.contains(TypeTraits::SEALED)
        && !traits.contains(TypeTraits::ABSTRACT)
        && !traits.contains(TypeTraits::INTERFACE);

    if base.is("System", "Enum") && value_type_shape {
        match decode_enum_shape(definition) {
            Some(shape) => ReferenceClassification::Enum(shape),
            None => ReferenceClassification::Unknown,
        }
    } else if base.is("System", "ValueType") && value_type_shape {
        ReferenceClassification::ValueType
    } else if base.is("System", "MulticastDelegate") && traits.contains(TypeTraits::SEALED) {
        ReferenceClassification::Delegate
    } else {
        ReferenceClassification::Unknown
    }
}

/// Decode an enum definition's underlying width and sorted literal field set.
///
/// Returns `None` when the definition has no decodable instance field — a shape this
/// model treats as undeterminable rather than guessing a width.
fn decode_enum_shape(definition: &ReferencedTypeDefinition) -> Option<EnumShape> {
    let underlying = definition
        .fields
        .iter()
        .find(|field| !field.is_static)
        .and_then(|field| field.primitive)
        .filter(PrimitiveCode::is_integer)?;

    let mut fields: Vec<EnumField> = definition
        .fields
        .iter()
        .filter(|field| {
            field.is_static && field.is_literal && !field.visibility.is_excluded_from_enum_shape()
        })
        .filter_map(|field| {
            let value = field.constant.as_ref()?.as_i128()?;
            Some(EnumField {
                name: field.name.clone(),
                value,
            })
        })
        .collect();

    fields.sort_by(|a, b| a.value.cmp(&b.value).then_with(|| a.name.cmp(&b.name)));

    let is_flags = definition
        .attributes
        .iter()
        .any(|attribute| attribute.is("System", "FlagsAttribute"));

    Some(EnumShape {
        is_flags,
        underlying,
        fields,
    })
}
