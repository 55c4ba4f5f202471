//! Builders for metadata object models used across the integration suites.
//!
//! Real consumers get this graph from a binary-container metadata source; the tests build
//! the same shapes in memory through the public API, which keeps every scenario hermetic
//! and lets a test state its input structurally.

// Each integration binary compiles this module separately and uses a different subset.
#![allow(dead_code)]

use dotsurface::prelude::*;

pub fn module(name: &str, namespaces: Vec<NamespaceMetadata>) -> ModuleMetadata {
    ModuleMetadata {
        name: format!("{name}.dll"),
        identity: AssemblyIdentity::simple(name, AssemblyVersion::new(1, 0, 0, 0)),
        namespaces,
    }
}

pub fn namespace(name: &str, types: Vec<TypeMetadata>) -> NamespaceMetadata {
    NamespaceMetadata {
        name: name.to_string(),
        types,
    }
}

pub fn empty_type(name: &str) -> TypeMetadata {
    TypeMetadata {
        name: name.to_string(),
        visibility: Visibility::Public,
        traits: TypeTraits::empty(),
        generic_parameters: Vec::new(),
        base_type: Some(MetadataTypeReference::top_level(Some("System"), "Object")),
        interfaces: Vec::new(),
        attributes: Vec::new(),
        fields: Vec::new(),
        properties: Vec::new(),
        events: Vec::new(),
        methods: Vec::new(),
        nested_types: Vec::new(),
    }
}

pub fn class(name: &str) -> TypeMetadata {
    empty_type(name)
}

pub fn struct_type(name: &str) -> TypeMetadata {
    let mut definition = empty_type(name);
    definition.traits = TypeTraits::SEALED;
    definition.base_type = Some(MetadataTypeReference::top_level(Some("System"), "ValueType"));
    definition
}

pub fn interface(name: &str) -> TypeMetadata {
    let mut definition = empty_type(name);
    definition.traits = TypeTraits::INTERFACE | TypeTraits::ABSTRACT;
    definition.base_type = None;
    definition
}

pub fn enum_type(name: &str, underlying: PrimitiveCode, literals: &[(&str, i32)]) -> TypeMetadata {
    let mut definition = empty_type(name);
    definition.traits = TypeTraits::SEALED;
    definition.base_type = Some(MetadataTypeReference::top_level(Some("System"), "Enum"));
    definition.fields.push(FieldMetadata {
        name: "value__".to_string(),
        visibility: Visibility::Public,
        traits: FieldTraits::empty(),
        field_type: MetadataTypeReference::primitive(underlying),
        default_value: None,
        attributes: Vec::new(),
    });
    for (literal_name, value) in literals {
        definition.fields.push(FieldMetadata {
            name: (*literal_name).to_string(),
            visibility: Visibility::Public,
            traits: FieldTraits::LITERAL | FieldTraits::STATIC,
            field_type: MetadataTypeReference::top_level(None, name),
            default_value: Some(ConstantValue::I4(*value)),
            attributes: Vec::new(),
        });
    }
    definition
}

pub fn delegate_type(
    name: &str,
    return_type: MetadataTypeReference,
    parameters: Vec<ParameterMetadata>,
) -> TypeMetadata {
    let mut definition = empty_type(name);
    definition.traits = TypeTraits::SEALED;
    definition.base_type = Some(MetadataTypeReference::top_level(
        Some("System"),
        "MulticastDelegate",
    ));
    definition.methods.push(MethodMetadata {
        name: "Invoke".to_string(),
        visibility: Visibility::Public,
        traits: MethodTraits::VIRTUAL,
        generic_parameters: Vec::new(),
        return_type,
        parameters,
        attributes: Vec::new(),
    });
    definition
}

pub fn field(name: &str, field_type: MetadataTypeReference) -> FieldMetadata {
    FieldMetadata {
        name: name.to_string(),
        visibility: Visibility::Public,
        traits: FieldTraits::empty(),
        field_type,
        default_value: None,
        attributes: Vec::new(),
    }
}

pub fn const_field(
    name: &str,
    field_type: MetadataTypeReference,
    value: ConstantValue,
) -> FieldMetadata {
    let mut result = field(name, field_type);
    result.traits = FieldTraits::LITERAL | FieldTraits::STATIC;
    result.default_value = Some(value);
    result
}

pub fn method(
    name: &str,
    return_type: MetadataTypeReference,
    parameters: Vec<ParameterMetadata>,
) -> MethodMetadata {
    MethodMetadata {
        name: name.to_string(),
        visibility: Visibility::Public,
        traits: MethodTraits::empty(),
        generic_parameters: Vec::new(),
        return_type,
        parameters,
        attributes: Vec::new(),
    }
}

pub fn static_method(
    name: &str,
    return_type: MetadataTypeReference,
    parameters: Vec<ParameterMetadata>,
) -> MethodMetadata {
    let mut result = method(name, return_type, parameters);
    result.traits = MethodTraits::STATIC;
    result
}

pub fn constructor(parameters: Vec<ParameterMetadata>) -> MethodMetadata {
    method(CONSTRUCTOR_NAME, void(), parameters)
}

pub fn parameter(name: &str, parameter_type: MetadataTypeReference) -> ParameterMetadata {
    ParameterMetadata::new(name, parameter_type)
}

pub fn property(
    name: &str,
    property_type: MetadataTypeReference,
    getter: Option<AccessorMetadata>,
    setter: Option<AccessorMetadata>,
) -> PropertyMetadata {
    PropertyMetadata {
        name: name.to_string(),
        property_type,
        parameters: Vec::new(),
        getter,
        setter,
        attributes: Vec::new(),
    }
}

pub fn accessor(visibility: Visibility) -> AccessorMetadata {
    AccessorMetadata::new(visibility)
}

pub fn marker_attribute(namespace: &str, name: &str) -> AttributeMetadata {
    AttributeMetadata::marker(MetadataTypeReference::top_level(Some(namespace), name))
}

pub fn void() -> MetadataTypeReference {
    MetadataTypeReference::primitive(PrimitiveCode::Void)
}

pub fn int() -> MetadataTypeReference {
    MetadataTypeReference::primitive(PrimitiveCode::I4)
}

pub fn string_type() -> MetadataTypeReference {
    MetadataTypeReference::primitive(PrimitiveCode::String)
}

pub fn bool_type() -> MetadataTypeReference {
    MetadataTypeReference::primitive(PrimitiveCode::Boolean)
}

pub fn object_type() -> MetadataTypeReference {
    MetadataTypeReference::primitive(PrimitiveCode::Object)
}

pub fn double_type() -> MetadataTypeReference {
    MetadataTypeReference::primitive(PrimitiveCode::R8)
}

pub fn generate(module: &ModuleMetadata) -> String {
    generate_with(module, &NullAssemblyLocator, GeneratorOptions::default())
}

pub fn generate_with(
    module: &ModuleMetadata,
    locator: &dyn AssemblyLocator,
    options: GeneratorOptions,
) -> String {
    let mut contract = String::new();
    ContractGenerator::new(options)
        .generate(module, locator, &mut contract)
        .expect("generation should succeed");
    contract
}
