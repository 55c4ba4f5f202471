//! Classification results produced by the cross-assembly resolver.

use crate::metadata::{constants::ConstantValue, typeref::PrimitiveCode};

/// What the resolver determined about a referenced type.
///
/// `Unknown` means "not determined" — a cache miss, an unlocatable assembly, or a scan that
/// completed without a match. It must never be read as "definitely not an enum": callers
/// fall back to a 32-bit-signed display default only when rendering an otherwise
/// undeterminable default value, never to assert absence.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReferenceClassification {
    /// Not determined
    #[default]
    Unknown,
    /// A non-enum value type
    ValueType,
    /// A delegate type
    Delegate,
    /// An enum, with its decoded shape
    Enum(EnumShape),
}

/// The decoded shape of a referenced enum type.
///
/// Built once per distinct enum and cached for the lifetime of a generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumShape {
    /// The type carries the `System.FlagsAttribute` marker
    pub is_flags: bool,
    /// Integer code of the single non-static instance field
    pub underlying: PrimitiveCode,
    /// Literal fields sorted by value ascending, then name ordinally
    pub fields: Vec<EnumField>,
}

/// One literal field of an enum shape.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumField {
    /// Field name
    pub name: String,
    /// Field value widened to a common signed key
    pub value: i128,
}

impl EnumShape {
    /// Find the field whose value matches `value` exactly.
    #[must_use]
    pub fn field_with_value(&self, value: i128) -> Option<&EnumField> {
        self.fields.iter().find(|field| field.value == value)
    }

    /// Decompose a flags value into the fields whose union reproduces it exactly.
    ///
    /// Fields are tried in shape order (value ascending); zero-valued fields never
    /// participate. Returns `None` when leftover bits remain or the shape is not a flags
    /// enum.
    #[must_use]
    pub fn flags_decomposition(&self, value: i128) -> Option<Vec<&EnumField>> {
        if !self.is_flags || value == 0 {
            return None;
        }

        let mut remaining = value;
        let mut parts = Vec::new();
        for field in &self.fields {
            if field.value != 0 && remaining & field.value == field.value {
                remaining &= !field.value;
                parts.push(field);
            }
        }

        if remaining == 0 && !parts.is_empty() {
            Some(parts)
        } else {
            None
        }
    }

    /// Narrow a raw constant to this shape's comparison key.
    #[must_use]
    pub fn value_key(constant: &ConstantValue) -> Option<i128> {
        constant.as_i128()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(is_flags: bool, fields: &[(&str, i128)]) -> EnumShape {
        EnumShape {
            is_flags,
            underlying: PrimitiveCode::I4,
            fields: fields
                .iter()
                .map(|(name, value)| EnumField {
                    name: (*name).to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_field_with_value() {
        let shape = shape(false, &[("None", 0), ("Some", 1)]);
        assert_eq!(shape.field_with_value(1).unwrap().name, "Some");
        assert!(shape.field_with_value(2).is_none());
    }

    #[test]
    fn test_flags_decomposition() {
        let shape = shape(true, &[("None", 0), ("Read", 1), ("Write", 2), ("Execute", 4)]);

        let parts = shape.flags_decomposition(3).unwrap();
        let names: Vec<&str> = parts.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Read", "Write"]);

        // Leftover bits mean no decomposition.
        assert!(shape.flags_decomposition(8).is_none());
        assert!(shape.flags_decomposition(9).is_none());
        // Zero never decomposes; callers handle the zero field directly.
        assert!(shape.flags_decomposition(0).is_none());
    }

    #[test]
    fn test_flags_decomposition_requires_flags_marker() {
        let shape = shape(false, &[("Read", 1), ("Write", 2)]);
        assert!(shape.flags_decomposition(3).is_none());
    }

    #[test]
    fn test_unknown_is_default() {
        assert_eq!(
            ReferenceClassification::default(),
            ReferenceClassification::Unknown
        );
    }
}
