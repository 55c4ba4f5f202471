//! Benchmarks for contract generation.
//!
//! Measures rendering throughput over a synthetic module:
//! - Type reference formatting (sugar, nested generic distribution)
//! - Full generation of a module with many types and members

extern crate dotsurface;

use criterion::{criterion_group, criterion_main, Criterion};
use dotsurface::metadata::identity::{AssemblyIdentity, AssemblyVersion};
use dotsurface::metadata::model::{
    FieldMetadata, FieldTraits, MethodMetadata, MethodTraits, ModuleMetadata, NamespaceMetadata,
    ParameterMetadata, TypeMetadata, TypeTraits, Visibility,
};
use dotsurface::metadata::typeref::{MetadataTypeReference, PrimitiveCode};
use dotsurface::{format::format_type_reference, ContractGenerator, NullAssemblyLocator};
use std::hint::black_box;

fn synthetic_type(namespace: &str, index: usize) -> TypeMetadata {
    let int = MetadataTypeReference::primitive(PrimitiveCode::I4);
    let mut definition = TypeMetadata {
        name: format!("Type{index}"),
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
    };
    for field_index in 0..8 {
        definition.fields.push(FieldMetadata {
            name: format!("Field{field_index}"),
            visibility: Visibility::Public,
            traits: FieldTraits::empty(),
            field_type: int.clone(),
            default_value: None,
            attributes: Vec::new(),
        });
    }
    for method_index in 0..8 {
        definition.methods.push(MethodMetadata {
            name: format!("Method{method_index}"),
            visibility: Visibility::Public,
            traits: MethodTraits::empty(),
            generic_parameters: Vec::new(),
            return_type: MetadataTypeReference::top_level(Some(namespace), "Type0"),
            parameters: vec![ParameterMetadata::new("value", int.clone())],
            attributes: Vec::new(),
        });
    }
    definition
}

fn synthetic_module() -> ModuleMetadata {
    let namespaces = (0..8)
        .map(|namespace_index| {
            let name = format!("Bench.Ns{namespace_index}");
            NamespaceMetadata {
                types: (0..16).map(|index| synthetic_type(&name, index)).collect(),
                name,
            }
        })
        .collect();
    ModuleMetadata {
        name: "Bench.dll".to_string(),
        identity: AssemblyIdentity::simple("Bench", AssemblyVersion::new(1, 0, 0, 0)),
        namespaces,
    }
}

/// Benchmark rendering a deeply sugared type reference.
fn bench_type_reference_formatting(c: &mut Criterion) {
    let int = MetadataTypeReference::primitive(PrimitiveCode::I4);
    let string = MetadataTypeReference::primitive(PrimitiveCode::String);
    let nullable = MetadataTypeReference::instantiation(
        MetadataTypeReference::top_level(Some("System"), "Nullable`1"),
        vec![int.clone()],
    );
    let nested = MetadataTypeReference::instantiation(
        MetadataTypeReference::nested(
            MetadataTypeReference::top_level(Some("Bench"), "Outer`2"),
            "Inner`1",
        ),
        vec![int, string, nullable],
    );

    c.bench_function("format_nested_generic", |b| {
        b.iter(|| {
            let text = format_type_reference(black_box(&nested)).unwrap();
            black_box(text)
        });
    });
}

/// Benchmark one full generation pass over the synthetic module.
fn bench_full_generation(c: &mut Criterion) {
    let module = synthetic_module();
    let generator = ContractGenerator::with_defaults();

    c.bench_function("generate_synthetic_module", |b| {
        b.iter(|| {
            let mut contract = String::new();
            generator
                .generate(black_box(&module), &NullAssemblyLocator, &mut contract)
                .unwrap();
            black_box(contract)
        });
    });
}

criterion_group!(
    benches,
    bench_type_reference_formatting,
    bench_full_generation
);
criterion_main!(benches);
