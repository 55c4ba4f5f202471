//! Type reference syntax rendering.
//!
//! Turns a [`MetadataTypeReference`] into C#-shaped text: primitive keywords, array and
//! pointer suffixes, sugar substitution (nullable, tuples), and generic instantiation
//! syntax. The arity arithmetic lives here: a flattened argument list is distributed
//! across the nesting levels of the definition chain by consuming arity-groups from the
//! end backward, innermost level first, and the groups emit outermost-to-innermost.
//!
//! Sugar checks run against the raw backtick-encoded names; arity markers are stripped in
//! exactly one place ([`level_text`]) after the sugar checks, so the stripping order is
//! uniform across every rendering path.

use crate::metadata::{
    naming,
    typeref::MetadataTypeReference,
};
use crate::Result;

/// Namespace of the runtime's sugar-form generic types.
const SYSTEM_NAMESPACE: &str = "System";
/// Name of the single-argument nullable wrapper.
const NULLABLE_NAME: &str = "Nullable`1";
/// Base name of the tuple family.
const TUPLE_BASE_NAME: &str = "ValueTuple";
/// The arity at which a tuple chains a nested "rest" tuple in its last slot.
const TUPLE_REST_ARITY: usize = 8;

/// Render a type reference as C#-shaped text.
///
/// # Errors
/// Returns [`NotSupported`](crate::Error::NotSupported) for a by-ref shape, which is only
/// legal at parameter and return positions (the caller renders its `ref`/`out` keyword),
/// and [`Malformed`](crate::Error::Malformed) when a generic instantiation's argument
/// count contradicts the accumulated arity of its definition chain or a declaring chain
/// does not bottom out in a top-level reference.
pub fn format_type_reference(reference: &MetadataTypeReference) -> Result<String> {
    match reference {
        MetadataTypeReference::Primitive(code) => Ok(code.keyword().to_string()),
        MetadataTypeReference::Pointer(element) => {
            Ok(format!("{}*", format_type_reference(element)?))
        }
        MetadataTypeReference::ByRef(_) => Err(crate::Error::NotSupported(
            "by-ref type outside a parameter or return position".to_string(),
        )),
        MetadataTypeReference::Array { element, rank } => {
            let commas = ",".repeat((*rank).saturating_sub(1) as usize);
            Ok(format!("{}[{}]", format_type_reference(element)?, commas))
        }
        MetadataTypeReference::GenericParameter(name) => Ok(name.clone()),
        MetadataTypeReference::TopLevel { .. } | MetadataTypeReference::Nested { .. } => {
            format_named(reference, None)
        }
        MetadataTypeReference::GenericInstantiation {
            definition,
            arguments,
        } => {
            if let Some(sugar) = try_nullable_sugar(definition, arguments)? {
                return Ok(sugar);
            }
            if let Some(sugar) = try_tuple_sugar(definition, arguments)? {
                return Ok(sugar);
            }
            format_named(definition, Some(arguments))
        }
    }
}

/// `System.Nullable`1<T>` renders as `T?`.
fn try_nullable_sugar(
    definition: &MetadataTypeReference,
    arguments: &[MetadataTypeReference],
) -> Result<Option<String>> {
    let MetadataTypeReference::TopLevel {
        namespace, name, ..
    } = definition
    else {
        return Ok(None);
    };
    if namespace.as_deref() != Some(SYSTEM_NAMESPACE)
        || name != NULLABLE_NAME
        || arguments.len() != 1
    {
        return Ok(None);
    }
    Ok(Some(format!("{}?", format_type_reference(&arguments[0])?)))
}

/// Check if an instantiation is a sugarable tuple: `System.ValueTuple` of arity 2-8,
/// where an arity-8 form requires its 8th argument to itself be such a tuple.
fn is_sugarable_tuple(reference: &MetadataTypeReference) -> bool {
    let MetadataTypeReference::GenericInstantiation {
        definition,
        arguments,
    } = reference
    else {
        return false;
    };
    is_sugarable_tuple_parts(definition, arguments)
}

/// [`is_sugarable_tuple`] over an already-destructured (definition, arguments) pair.
fn is_sugarable_tuple_parts(
    definition: &MetadataTypeReference,
    arguments: &[MetadataTypeReference],
) -> bool {
    let MetadataTypeReference::TopLevel {
        namespace, name, ..
    } = definition
    else {
        return false;
    };
    if namespace.as_deref() != Some(SYSTEM_NAMESPACE) {
        return false;
    }
    let (base, arity) = naming::parse_arity(name);
    if base != TUPLE_BASE_NAME || arity as usize != arguments.len() {
        return false;
    }
    match arguments.len() {
        2..=7 => true,
        TUPLE_REST_ARITY => is_sugarable_tuple(&arguments[TUPLE_REST_ARITY - 1]),
        _ => false,
    }
}

/// Collect the logical elements of a tuple chain, flattening the 8th-slot nesting.
fn flatten_tuple_elements<'a>(
    arguments: &'a [MetadataTypeReference],
    elements: &mut Vec<&'a MetadataTypeReference>,
) {
    if arguments.len() == TUPLE_REST_ARITY {
        elements.extend(&arguments[..TUPLE_REST_ARITY - 1]);
        if let MetadataTypeReference::GenericInstantiation {
            arguments: rest, ..
        } = &arguments[TUPLE_REST_ARITY - 1]
        {
            flatten_tuple_elements(rest, elements);
        }
    } else {
        elements.extend(arguments);
    }
}

/// The tuple family renders as `(T1, T2, …)` with the rest chain flattened.
fn try_tuple_sugar(
    definition: &MetadataTypeReference,
    arguments: &[MetadataTypeReference],
) -> Result<Option<String>> {
    if !is_sugarable_tuple_parts(definition, arguments) {
        return Ok(None);
    }

    let mut elements = Vec::new();
    flatten_tuple_elements(arguments, &mut elements);

    let rendered: Result<Vec<String>> = elements.iter().map(|e| format_type_reference(e)).collect();
    Ok(Some(format!("({})", rendered?.join(", "))))
}

/// One level of a definition chain: its raw name and the arity it introduces.
struct ChainLevel<'a> {
    name: &'a str,
    arity: usize,
}

/// Walk a `TopLevel`/`Nested` chain into (namespace, levels outermost-first).
fn definition_chain(
    reference: &MetadataTypeReference,
) -> Result<(Option<&str>, Vec<ChainLevel<'_>>)> {
    match reference {
        MetadataTypeReference::TopLevel {
            namespace, name, ..
        } => {
            let (_, arity) = naming::parse_arity(name);
            Ok((
                namespace.as_deref(),
                vec![ChainLevel {
                    name,
                    arity: arity as usize,
                }],
            ))
        }
        MetadataTypeReference::Nested {
            declaring_type,
            name,
        } => {
            let (namespace, mut levels) = definition_chain(declaring_type)?;
            let (_, arity) = naming::parse_arity(name);
            levels.push(ChainLevel {
                name,
                arity: arity as usize,
            });
            Ok((namespace, levels))
        }
        other => Err(malformed_error!(
            "declaring chain resolves to neither a top-level nor a nested reference: {:?}",
            other
        )),
    }
}

/// Render one chain level, stripping the arity marker and attaching its argument group.
fn level_text(level: &ChainLevel<'_>, group: Option<&[MetadataTypeReference]>) -> Result<String> {
    let (base, _) = naming::parse_arity(level.name);
    match group {
        Some(group) if !group.is_empty() => {
            let rendered: Result<Vec<String>> =
                group.iter().map(format_type_reference).collect();
            Ok(format!("{}<{}>", base, rendered?.join(", ")))
        }
        // An open definition keeps its bracket shape without parameter names.
        None if level.arity > 0 => Ok(format!("{}<{}>", base, ",".repeat(level.arity - 1))),
        _ => Ok(base.to_string()),
    }
}

/// Render a named reference, closed over `arguments` when present.
///
/// Arguments are flattened across nesting levels in the metadata; bracket groups are
/// per-level in the rendered syntax. Groups are consumed from the end of the argument
/// list backward, one per level innermost-to-outermost, then emitted
/// outermost-to-innermost.
fn format_named(
    definition: &MetadataTypeReference,
    arguments: Option<&[MetadataTypeReference]>,
) -> Result<String> {
    let (namespace, levels) = definition_chain(definition)?;

    let groups: Vec<Option<&[MetadataTypeReference]>> = match arguments {
        Some(arguments) => {
            let total: usize = levels.iter().map(|level| level.arity).sum();
            if total != arguments.len() {
                return Err(malformed_error!(
                    "generic argument count mismatch: definition chain introduces {} parameters, instantiation supplies {}",
                    total,
                    arguments.len()
                ));
            }
            let mut end = arguments.len();
            let mut groups: Vec<Option<&[MetadataTypeReference]>> = Vec::with_capacity(levels.len());
            for level in levels.iter().rev() {
                groups.push(Some(&arguments[end - level.arity..end]));
                end -= level.arity;
            }
            groups.reverse();
            groups
        }
        None => vec![None; levels.len()],
    };

    let mut parts = Vec::with_capacity(levels.len());
    for (level, group) in levels.iter().zip(groups) {
        parts.push(level_text(level, group)?);
    }

    let path = parts.join(".");
    Ok(match namespace {
        Some(namespace) => format!("{namespace}.{path}"),
        None => path,
    })
}

#[cfg(test)]
mod tests {
    use crate::metadata::typeref::PrimitiveCode;
    use crate::Error;

    use super::*;

    fn int() -> MetadataTypeReference {
        MetadataTypeReference::primitive(PrimitiveCode::I4)
    }

    fn string_type() -> MetadataTypeReference {
        MetadataTypeReference::primitive(PrimitiveCode::String)
    }

    fn bool_type() -> MetadataTypeReference {
        MetadataTypeReference::primitive(PrimitiveCode::Boolean)
    }

    fn tuple(arguments: Vec<MetadataTypeReference>) -> MetadataTypeReference {
        let name = naming::build_arity_suffix(TUPLE_BASE_NAME, arguments.len() as u32);
        MetadataTypeReference::instantiation(
            MetadataTypeReference::top_level(Some("System"), &name),
            arguments,
        )
    }

    #[test]
    fn test_primitives_and_suffix_shapes() {
        assert_eq!(format_type_reference(&int()).unwrap(), "int");
        assert_eq!(
            format_type_reference(&MetadataTypeReference::Pointer(Box::new(int()))).unwrap(),
            "int*"
        );
        assert_eq!(
            format_type_reference(&MetadataTypeReference::array(string_type())).unwrap(),
            "string[]"
        );
        assert_eq!(
            format_type_reference(&MetadataTypeReference::Array {
                element: Box::new(int()),
                rank: 3
            })
            .unwrap(),
            "int[,,]"
        );
    }

    #[test]
    fn test_by_ref_is_rejected_outside_signatures() {
        let reference = MetadataTypeReference::ByRef(Box::new(int()));
        assert!(matches!(
            format_type_reference(&reference),
            Err(Error::NotSupported(_))
        ));
    }

    #[test]
    fn test_named_types() {
        assert_eq!(
            format_type_reference(&MetadataTypeReference::top_level(Some("System"), "Uri"))
                .unwrap(),
            "System.Uri"
        );
        assert_eq!(
            format_type_reference(&MetadataTypeReference::top_level(None, "Global")).unwrap(),
            "Global"
        );
        assert_eq!(
            format_type_reference(&MetadataTypeReference::nested(
                MetadataTypeReference::top_level(Some("Lib"), "Outer"),
                "Inner"
            ))
            .unwrap(),
            "Lib.Outer.Inner"
        );
    }

    #[test]
    fn test_open_generic_definition_keeps_bracket_shape() {
        assert_eq!(
            format_type_reference(&MetadataTypeReference::top_level(
                Some("System.Collections.Generic"),
                "Dictionary`2"
            ))
            .unwrap(),
            "System.Collections.Generic.Dictionary<,>"
        );
    }

    #[test]
    fn test_simple_instantiation() {
        let reference = MetadataTypeReference::instantiation(
            MetadataTypeReference::top_level(Some("System.Collections.Generic"), "List`1"),
            vec![int()],
        );
        assert_eq!(
            format_type_reference(&reference).unwrap(),
            "System.Collections.Generic.List<int>"
        );
    }

    #[test]
    fn test_nested_argument_distribution() {
        // Outer<int, string>.Inner<bool> from the flattened list [int, string, bool].
        let definition = MetadataTypeReference::nested(
            MetadataTypeReference::top_level(Some("Lib"), "Outer`2"),
            "Inner`1",
        );
        let reference = MetadataTypeReference::instantiation(
            definition,
            vec![int(), string_type(), bool_type()],
        );
        assert_eq!(
            format_type_reference(&reference).unwrap(),
            "Lib.Outer<int, string>.Inner<bool>"
        );
    }

    #[test]
    fn test_non_generic_levels_between_generic_ones() {
        // Outer<int>.Middle.Inner<string> — the middle level consumes no arguments.
        let definition = MetadataTypeReference::nested(
            MetadataTypeReference::nested(
                MetadataTypeReference::top_level(Some("Lib"), "Outer`1"),
                "Middle",
            ),
            "Inner`1",
        );
        let reference =
            MetadataTypeReference::instantiation(definition, vec![int(), string_type()]);
        assert_eq!(
            format_type_reference(&reference).unwrap(),
            "Lib.Outer<int>.Middle.Inner<string>"
        );
    }

    #[test]
    fn test_argument_count_mismatch_is_fatal() {
        let definition = MetadataTypeReference::top_level(Some("Lib"), "Pair`2");
        let reference = MetadataTypeReference::instantiation(definition, vec![int()]);
        assert!(matches!(
            format_type_reference(&reference),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_nullable_sugar() {
        let reference = MetadataTypeReference::instantiation(
            MetadataTypeReference::top_level(Some("System"), "Nullable`1"),
            vec![int()],
        );
        assert_eq!(format_type_reference(&reference).unwrap(), "int?");

        // Nullable of a named struct, inside an array.
        let reference = MetadataTypeReference::array(MetadataTypeReference::instantiation(
            MetadataTypeReference::top_level(Some("System"), "Nullable`1"),
            vec![MetadataTypeReference::top_level(Some("Lib"), "Point")],
        ));
        assert_eq!(format_type_reference(&reference).unwrap(), "Lib.Point?[]");
    }

    #[test]
    fn test_nullable_requires_exact_identity() {
        // A Nullable`1 outside the System namespace is an ordinary generic.
        let reference = MetadataTypeReference::instantiation(
            MetadataTypeReference::top_level(Some("Lib"), "Nullable`1"),
            vec![int()],
        );
        assert_eq!(format_type_reference(&reference).unwrap(), "Lib.Nullable<int>");
    }

    #[test]
    fn test_tuple_sugar() {
        let reference = tuple(vec![int(), string_type()]);
        assert_eq!(format_type_reference(&reference).unwrap(), "(int, string)");
    }

    #[test]
    fn test_tuple_rest_chain_flattens() {
        // Logical arity 9: ValueTuple`8 whose 8th argument is a ValueTuple`2.
        let rest = tuple(vec![int(), bool_type()]);
        let mut arguments: Vec<MetadataTypeReference> = (0..7).map(|_| string_type()).collect();
        arguments.push(rest);
        let reference = tuple(arguments);

        assert_eq!(
            format_type_reference(&reference).unwrap(),
            "(string, string, string, string, string, string, string, int, bool)"
        );
    }

    #[test]
    fn test_arity_eight_without_tuple_rest_is_not_sugar() {
        let mut arguments: Vec<MetadataTypeReference> = (0..7).map(|_| string_type()).collect();
        arguments.push(int());
        let reference = tuple(arguments);

        let rendered = format_type_reference(&reference).unwrap();
        assert!(rendered.starts_with("System.ValueTuple<"));
    }

    #[test]
    fn test_round_trip_of_emitted_arity() {
        // Rendering an open definition and re-parsing its bracket shape recovers the arity.
        let name = naming::build_arity_suffix("Dictionary", 2);
        let rendered =
            format_type_reference(&MetadataTypeReference::top_level(Some("S"), &name)).unwrap();
        let commas = rendered.matches(',').count();
        assert_eq!(commas + 1, 2);
    }
}
