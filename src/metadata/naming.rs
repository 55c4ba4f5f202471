//! Name and arity utilities for backtick-encoded metadata type names.
//!
//! ECMA-335 encodes the generic arity a type introduces as a trailing `` `N `` marker on the
//! metadata name (`List`1`, `Dictionary`2`). This module parses and composes those markers
//! and defines the sibling order used everywhere types are sorted: ordinal on the base name,
//! tie-broken by arity ascending. Sorting on the raw metadata name would interleave
//! `` Foo`10 `` between `` Foo`1 `` and `` Foo`2 `` — the arity must be compared as a number,
//! never as lexical noise from the suffix.

use std::cmp::Ordering;

/// Separator between a metadata base name and its encoded generic arity.
pub const ARITY_MARKER: char = '`';

/// Split a metadata type name into its base name and encoded generic arity.
///
/// A name without a marker, or with a marker that is not followed by one or more ASCII
/// digits, parses as arity `0` with the full name as the base. Only the last marker in the
/// name is considered, so compiler-mangled names containing embedded backticks keep their
/// prefix intact.
///
/// ## Arguments
/// * 'name' - The metadata name, possibly carrying a trailing `` `N `` marker
///
/// # Examples
///
/// ```
/// use dotsurface::metadata::naming::parse_arity;
///
/// assert_eq!(parse_arity("Dictionary`2"), ("Dictionary", 2));
/// assert_eq!(parse_arity("String"), ("String", 0));
/// assert_eq!(parse_arity("Odd`name"), ("Odd`name", 0));
/// ```
#[must_use]
pub fn parse_arity(name: &str) -> (&str, u32) {
    if let Some(index) = name.rfind(ARITY_MARKER) {
        let suffix = &name[index + 1..];
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(arity) = suffix.parse::<u32>() {
                return (&name[..index], arity);
            }
        }
    }
    (name, 0)
}

/// Compose a metadata name from a base name and a generic arity.
///
/// The inverse of [`parse_arity`]: an arity of `0` yields the base name unchanged, any other
/// arity appends the `` `N `` marker.
#[must_use]
pub fn build_arity_suffix(name: &str, arity: u32) -> String {
    if arity == 0 {
        name.to_string()
    } else {
        format!("{name}{ARITY_MARKER}{arity}")
    }
}

/// Total order on metadata type names: ordinal on the base name, then arity ascending.
///
/// This is the sibling order for top-level types within a namespace, nested types within a
/// type, and generic overloads sharing a base name.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    let (base_a, arity_a) = parse_arity(a);
    let (base_b, arity_b) = parse_arity(b);
    base_a.cmp(base_b).then(arity_a.cmp(&arity_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arity() {
        assert_eq!(parse_arity("List`1"), ("List", 1));
        assert_eq!(parse_arity("Dictionary`2"), ("Dictionary", 2));
        assert_eq!(parse_arity("Wide`10"), ("Wide", 10));
        assert_eq!(parse_arity("String"), ("String", 0));
    }

    #[test]
    fn test_parse_arity_malformed_suffix() {
        // A marker with no digits, or with non-digit noise, is part of the base name.
        assert_eq!(parse_arity("Trailing`"), ("Trailing`", 0));
        assert_eq!(parse_arity("Odd`x"), ("Odd`x", 0));
        assert_eq!(parse_arity("Odd`1x"), ("Odd`1x", 0));
        assert_eq!(parse_arity(""), ("", 0));
    }

    #[test]
    fn test_parse_arity_embedded_marker() {
        // Only the last marker carries the arity.
        assert_eq!(parse_arity("Outer`1`2"), ("Outer`1", 2));
    }

    #[test]
    fn test_build_arity_suffix() {
        assert_eq!(build_arity_suffix("List", 1), "List`1");
        assert_eq!(build_arity_suffix("String", 0), "String");
    }

    #[test]
    fn test_round_trip() {
        for (name, arity) in [("List", 1), ("Dictionary", 2), ("Plain", 0), ("Wide", 12)] {
            let composed = build_arity_suffix(name, arity);
            assert_eq!(parse_arity(&composed), (name, arity));
        }
    }

    #[test]
    fn test_compare_interleaves_by_arity() {
        let mut names = vec!["Foo`10", "Foo", "Foo`2", "Bar`1", "Foo`1"];
        names.sort_by(|a, b| compare(a, b));
        assert_eq!(names, vec!["Bar`1", "Foo", "Foo`1", "Foo`2", "Foo`10"]);
    }

    #[test]
    fn test_compare_is_ordinal_and_case_sensitive() {
        // Ordinal order places all uppercase letters before lowercase ones.
        assert_eq!(compare("Zebra", "apple"), Ordering::Less);
        assert_eq!(compare("same`1", "same`1"), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut names = vec!["B`2", "A", "B", "A`3", "B`1"];
        names.sort_by(|a, b| compare(a, b));
        let once = names.clone();
        names.sort_by(|a, b| compare(a, b));
        assert_eq!(names, once);
    }
}
