//! Canonicalization and text rendering of the metadata graph.
//!
//! The formatter walks the filtered object model depth-first and emits one canonical,
//! C#-declaration-shaped rendering: namespaces, types, and members in fixed sort orders,
//! modifiers derived from accessor combinations, literals escaped and digit-grouped,
//! generic signatures with per-level bracket groups, and sugar substitution for nullable
//! and tuple shapes. Whenever rendering needs a fact about a *referenced* type — an enum
//! literal for a default value, an enum-typed attribute argument — it consults the
//! cross-assembly resolver, strictly on demand.
//!
//! # Ordering Rules
//!
//! All ordinal, case-sensitive:
//! - Namespaces ascending by full dotted name; the global namespace first, headerless.
//! - Types and nested types by (base name, arity).
//! - Fields: literal, then static, then init-only, then name — except enum fields, which
//!   render by (value, name).
//! - Properties and events: static before instance, then name.
//! - Methods: operators as a trailing group sorted by name; everything else static
//!   before instance, constructors before other methods, then name, arity, and the
//!   rendered parameter list as the final total-order tiebreak.

pub mod literals;
pub mod types;
pub mod writer;

use std::fmt;

use crate::attributes::{extract, is_suppressed, AttributeQuery, AttributeTarget};
use crate::metadata::{
    constants::ConstantValue,
    model::{
        AccessorMetadata, AttributeArgument, AttributeMetadata, EventMetadata, FieldMetadata,
        FieldTraits, GenericParameterMetadata, MethodMetadata, MethodTraits, NamespaceMetadata,
        ParameterMetadata, ParameterMode, PropertyMetadata, TypeMetadata, TypeTraits, Variance,
        Visibility,
    },
    naming,
    typeref::{MetadataTypeReference, PrimitiveCode},
};
use crate::resolver::{EnumShape, ReferenceClassification, ReferenceResolver};
use crate::Result;

pub use types::format_type_reference;
pub use writer::IndentedWriter;

/// The indexer name assumed when a type carries no default-member attribute.
const DEFAULT_INDEXER_NAME: &str = "Item";

/// Fixed table mapping operator method names to their rendered symbols.
const OPERATOR_SYMBOLS: &[(&str, &str)] = &[
    ("op_Addition", "+"),
    ("op_BitwiseAnd", "&"),
    ("op_BitwiseOr", "|"),
    ("op_Decrement", "--"),
    ("op_Division", "/"),
    ("op_Equality", "=="),
    ("op_ExclusiveOr", "^"),
    ("op_False", "false"),
    ("op_GreaterThan", ">"),
    ("op_GreaterThanOrEqual", ">="),
    ("op_Increment", "++"),
    ("op_Inequality", "!="),
    ("op_LeftShift", "<<"),
    ("op_LessThan", "<"),
    ("op_LessThanOrEqual", "<="),
    ("op_LogicalNot", "!"),
    ("op_Modulus", "%"),
    ("op_Multiply", "*"),
    ("op_OnesComplement", "~"),
    ("op_RightShift", ">>"),
    ("op_Subtraction", "-"),
    ("op_True", "true"),
    ("op_UnaryNegation", "-"),
    ("op_UnaryPlus", "+"),
];

/// Conversion operators render through a different syntax than the symbol table.
const CONVERSION_OPERATORS: &[(&str, &str)] =
    &[("op_Explicit", "explicit"), ("op_Implicit", "implicit")];

/// The derived declaration kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

/// Walks the metadata graph and renders the canonical contract.
pub(crate) struct ContractFormatter<'r, 'l, W: fmt::Write> {
    writer: IndentedWriter<W>,
    resolver: &'r mut ReferenceResolver<'l>,
}

impl<'r, 'l, W: fmt::Write> ContractFormatter<'r, 'l, W> {
    pub(crate) fn new(sink: W, resolver: &'r mut ReferenceResolver<'l>) -> Self {
        ContractFormatter {
            writer: IndentedWriter::new(sink),
            resolver,
        }
    }

    pub(crate) fn into_sink(self) -> W {
        self.writer.into_inner()
    }

    /// Render the given namespaces (already filtered) in canonical order.
    pub(crate) fn write_namespaces(&mut self, namespaces: &[&NamespaceMetadata]) -> Result<()> {
        let mut ordered: Vec<&NamespaceMetadata> = namespaces.to_vec();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));

        let mut first = true;
        for namespace in ordered {
            if namespace.types.is_empty() {
                continue;
            }
            if !first {
                self.writer.finish_line()?;
            }
            first = false;

            if namespace.name.is_empty() {
                self.write_types(&namespace.types, "")?;
            } else {
                self.writer.write_line(&format!("namespace {}", namespace.name))?;
                self.writer.write_line("{")?;
                self.writer.indent();
                self.write_types(&namespace.types, &namespace.name)?;
                self.writer.unindent();
                self.writer.write_line("}")?;
            }
        }
        Ok(())
    }

    fn write_types(&mut self, types: &[TypeMetadata], namespace_path: &str) -> Result<()> {
        let mut ordered: Vec<&TypeMetadata> = types.iter().collect();
        ordered.sort_by(|a, b| naming::compare(&a.name, &b.name));

        let mut first = true;
        for definition in ordered {
            if !first {
                self.writer.finish_line()?;
            }
            first = false;
            self.write_type(definition, 0, namespace_path)?;
        }
        Ok(())
    }

    fn write_type(
        &mut self,
        definition: &TypeMetadata,
        declaring_param_count: usize,
        container_path: &str,
    ) -> Result<()> {
        let (base_name, _) = naming::parse_arity(&definition.name);
        let path = if container_path.is_empty() {
            base_name.to_string()
        } else {
            format!("{container_path}.{base_name}")
        };

        match type_kind(definition) {
            TypeKind::Enum => self.write_enum(definition, &path),
            TypeKind::Delegate => self.write_delegate(definition, declaring_param_count, &path),
            kind => self.write_composite(definition, kind, declaring_param_count, &path),
        }
        .map_err(|error| match error {
            member @ crate::Error::Member { .. } => member,
            other => other.in_member(path.clone()),
        })
    }

    fn write_composite(
        &mut self,
        definition: &TypeMetadata,
        kind: TypeKind,
        declaring_param_count: usize,
        path: &str,
    ) -> Result<()> {
        // The default-member and extension markers convert into structure; the rest render.
        let queries = [
            AttributeQuery::string_argument("System.Reflection", "DefaultMemberAttribute"),
            AttributeQuery::presence("System.Runtime.CompilerServices", "ExtensionAttribute"),
        ];
        let (captures, remaining) = extract(&definition.attributes, &queries);
        let indexer_name = captures[0]
            .text()
            .unwrap_or(DEFAULT_INDEXER_NAME)
            .to_string();
        self.write_attributes(&remaining, AttributeTarget::Type)?;

        let own_parameters = own_generic_parameters(definition, declaring_param_count);
        let in_interface = kind == TypeKind::Interface;

        let mut header = String::new();
        header.push_str(definition.visibility.keyword());
        header.push(' ');
        match kind {
            TypeKind::Class => {
                let traits = definition.traits;
                if traits.contains(TypeTraits::ABSTRACT) && traits.contains(TypeTraits::SEALED) {
                    header.push_str("static ");
                } else if traits.contains(TypeTraits::ABSTRACT) {
                    header.push_str("abstract ");
                } else if traits.contains(TypeTraits::SEALED) {
                    header.push_str("sealed ");
                }
                header.push_str("class ");
            }
            TypeKind::Struct => header.push_str("struct "),
            TypeKind::Interface => header.push_str("interface "),
            TypeKind::Enum | TypeKind::Delegate => unreachable!("handled by dedicated writers"),
        }
        let (base_name, _) = naming::parse_arity(&definition.name);
        header.push_str(base_name);
        header.push_str(&format_generic_parameter_list(own_parameters));

        let bases = self.base_list(definition, kind)?;
        if !bases.is_empty() {
            header.push_str(" : ");
            header.push_str(&bases.join(", "));
        }
        header.push_str(&format_constraint_clauses(own_parameters)?);

        self.writer.write_line(&header)?;
        self.writer.write_line("{")?;
        self.writer.indent();

        self.write_fields(definition, in_interface, path)?;
        self.write_properties(definition, &indexer_name, in_interface, path)?;
        self.write_events(definition, in_interface, path)?;
        self.write_methods(definition, in_interface, path)?;

        let mut nested: Vec<&TypeMetadata> = definition.nested_types.iter().collect();
        nested.sort_by(|a, b| naming::compare(&a.name, &b.name));
        for inner in nested {
            self.writer.finish_line()?;
            self.write_type(inner, definition.generic_parameters.len(), path)?;
        }

        self.writer.unindent();
        self.writer.write_line("}")?;
        Ok(())
    }

    fn base_list(&mut self, definition: &TypeMetadata, kind: TypeKind) -> Result<Vec<String>> {
        let mut bases = Vec::new();
        if kind == TypeKind::Class {
            if let Some(base) = &definition.base_type {
                if !is_system_type(base, "Object") {
                    bases.push(format_type_reference(base)?);
                }
            }
        }
        for interface in &definition.interfaces {
            bases.push(format_type_reference(interface)?);
        }
        Ok(bases)
    }

    fn write_fields(
        &mut self,
        definition: &TypeMetadata,
        in_interface: bool,
        path: &str,
    ) -> Result<()> {
        let mut ordered: Vec<&FieldMetadata> = definition.fields.iter().collect();
        ordered.sort_by(|a, b| {
            let key = |f: &FieldMetadata| {
                (
                    !f.traits.contains(FieldTraits::LITERAL),
                    !f.traits.contains(FieldTraits::STATIC),
                    !f.traits.contains(FieldTraits::INIT_ONLY),
                )
            };
            key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
        });

        for field in ordered {
            self.write_field(field, in_interface)
                .map_err(|e| e.in_member(format!("{path}.{}", field.name)))?;
        }
        Ok(())
    }

    fn write_field(&mut self, field: &FieldMetadata, in_interface: bool) -> Result<()> {
        self.write_attributes(&field.attributes.iter().collect::<Vec<_>>(), AttributeTarget::Field)?;

        let mut line = String::new();
        if !in_interface {
            line.push_str(field.visibility.keyword());
            line.push(' ');
        }
        if field.traits.contains(FieldTraits::LITERAL) {
            line.push_str("const ");
        } else {
            if field.traits.contains(FieldTraits::STATIC) {
                line.push_str("static ");
            }
            if field.traits.contains(FieldTraits::INIT_ONLY) {
                line.push_str("readonly ");
            }
        }
        line.push_str(&format_type_reference(&field.field_type)?);
        line.push(' ');
        line.push_str(&field.name);

        if field.traits.contains(FieldTraits::LITERAL) {
            if let Some(text) =
                self.format_default_value(&field.field_type, field.default_value.as_ref(), false)?
            {
                line.push_str(" = ");
                line.push_str(&text);
            }
        }
        line.push(';');
        self.writer.write_line(&line)
    }

    fn write_properties(
        &mut self,
        definition: &TypeMetadata,
        indexer_name: &str,
        in_interface: bool,
        path: &str,
    ) -> Result<()> {
        let mut ordered: Vec<&PropertyMetadata> = definition.properties.iter().collect();
        ordered.sort_by(|a, b| {
            let key = |p: &PropertyMetadata| (!property_is_static(p), p.name.clone());
            key(a).cmp(&key(b))
        });

        for property in ordered {
            self.write_property(property, indexer_name, in_interface)
                .map_err(|e| e.in_member(format!("{path}.{}", property.name)))?;
        }
        Ok(())
    }

    fn write_property(
        &mut self,
        property: &PropertyMetadata,
        indexer_name: &str,
        in_interface: bool,
    ) -> Result<()> {
        self.write_attributes(
            &property.attributes.iter().collect::<Vec<_>>(),
            AttributeTarget::Property,
        )?;

        let accessors: Vec<&AccessorMetadata> = property
            .getter
            .iter()
            .chain(property.setter.iter())
            .collect();
        let combined = combine_accessors(&accessors);

        let mut line = String::new();
        if !in_interface {
            line.push_str(combined.visibility.keyword());
            line.push(' ');
            line.push_str(&format_method_traits(combined.traits, false));
        }
        line.push_str(&format_type_reference(&property.property_type)?);
        line.push(' ');

        if property.parameters.is_empty() {
            line.push_str(&property.name);
        } else {
            let rendered = self.format_parameters(&property.parameters)?;
            if property.name == indexer_name {
                line.push_str(&format!("this[{rendered}]"));
            } else {
                line.push_str(&format!("{}[{rendered}]", property.name));
            }
        }

        line.push_str(" { ");
        if let Some(getter) = &property.getter {
            line.push_str(&self.format_accessor(getter, combined.visibility, "get", in_interface)?);
            line.push(' ');
        }
        if let Some(setter) = &property.setter {
            line.push_str(&self.format_accessor(setter, combined.visibility, "set", in_interface)?);
            line.push(' ');
        }
        line.push('}');
        self.writer.write_line(&line)
    }

    fn format_accessor(
        &mut self,
        accessor: &AccessorMetadata,
        combined_visibility: Visibility,
        keyword: &str,
        in_interface: bool,
    ) -> Result<String> {
        let mut text = String::new();
        for attribute in &accessor.attributes {
            if !is_suppressed(attribute, AttributeTarget::Accessor) {
                text.push_str(&self.format_attribute(attribute)?);
                text.push(' ');
            }
        }
        if !in_interface && accessor.visibility != combined_visibility {
            text.push_str(accessor.visibility.keyword());
            text.push(' ');
        }
        text.push_str(keyword);
        text.push(';');
        Ok(text)
    }

    fn write_events(
        &mut self,
        definition: &TypeMetadata,
        in_interface: bool,
        path: &str,
    ) -> Result<()> {
        let mut ordered: Vec<&EventMetadata> = definition.events.iter().collect();
        ordered.sort_by(|a, b| {
            let key = |e: &EventMetadata| (!event_is_static(e), e.name.clone());
            key(a).cmp(&key(b))
        });

        for event in ordered {
            self.write_event(event, in_interface)
                .map_err(|e| e.in_member(format!("{path}.{}", event.name)))?;
        }
        Ok(())
    }

    fn write_event(&mut self, event: &EventMetadata, in_interface: bool) -> Result<()> {
        self.write_attributes(
            &event.attributes.iter().collect::<Vec<_>>(),
            AttributeTarget::Property,
        )?;

        let accessors: Vec<&AccessorMetadata> =
            event.adder.iter().chain(event.remover.iter()).collect();
        let combined = combine_accessors(&accessors);

        let mut line = String::new();
        if !in_interface {
            line.push_str(combined.visibility.keyword());
            line.push(' ');
            line.push_str(&format_method_traits(combined.traits, false));
        }
        line.push_str("event ");
        line.push_str(&format_type_reference(&event.event_type)?);
        line.push(' ');
        line.push_str(&event.name);
        line.push(';');
        self.writer.write_line(&line)
    }

    fn write_methods(
        &mut self,
        definition: &TypeMetadata,
        in_interface: bool,
        path: &str,
    ) -> Result<()> {
        let mut plain = Vec::new();
        let mut operators = Vec::new();
        for method in &definition.methods {
            if operator_symbol(&method.name).is_some() || conversion_keyword(&method.name).is_some()
            {
                operators.push(method);
            } else {
                plain.push(method);
            }
        }

        // The rendered parameter list is the last tiebreak, making overload order total.
        let mut keyed: Vec<(MethodSortKey, &MethodMetadata)> = Vec::with_capacity(plain.len());
        for method in plain {
            keyed.push((self.method_sort_key(method)?, method));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, method) in keyed {
            self.write_method(method, definition, in_interface)
                .map_err(|e| e.in_member(format!("{path}.{}", method.name)))?;
        }

        let mut keyed: Vec<(OperatorSortKey, &MethodMetadata)> = Vec::with_capacity(operators.len());
        for method in operators {
            keyed.push((self.operator_sort_key(method)?, method));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, method) in keyed {
            self.write_operator(method)
                .map_err(|e| e.in_member(format!("{path}.{}", method.name)))?;
        }
        Ok(())
    }

    fn method_sort_key(&mut self, method: &MethodMetadata) -> Result<MethodSortKey> {
        Ok((
            !method.traits.contains(MethodTraits::STATIC),
            !method.is_constructor(),
            method.name.clone(),
            method.generic_parameters.len(),
            method.parameters.len(),
            self.parameter_type_key(&method.parameters)?,
        ))
    }

    fn operator_sort_key(&mut self, method: &MethodMetadata) -> Result<OperatorSortKey> {
        Ok((
            method.name.clone(),
            format_return_type(&method.return_type)?,
            self.parameter_type_key(&method.parameters)?,
        ))
    }

    fn parameter_type_key(&mut self, parameters: &[ParameterMetadata]) -> Result<String> {
        let rendered: Result<Vec<String>> = parameters
            .iter()
            .map(|p| format_type_reference(&p.parameter_type))
            .collect();
        Ok(rendered?.join(", "))
    }

    fn write_method(
        &mut self,
        method: &MethodMetadata,
        declaring: &TypeMetadata,
        in_interface: bool,
    ) -> Result<()> {
        let queries = [AttributeQuery::presence(
            "System.Runtime.CompilerServices",
            "ExtensionAttribute",
        )];
        let (captures, remaining) = extract(&method.attributes, &queries);
        let is_extension = captures[0].is_present();
        self.write_attributes(&remaining, AttributeTarget::Method)?;

        let mut line = String::new();
        if !in_interface {
            line.push_str(method.visibility.keyword());
            line.push(' ');
            line.push_str(&format_method_traits(method.traits, in_interface));
        }

        if method.is_constructor() {
            let (base_name, _) = naming::parse_arity(&declaring.name);
            line.push_str(base_name);
        } else {
            line.push_str(&format_return_type(&method.return_type)?);
            line.push(' ');
            line.push_str(&method.name);
            line.push_str(&format_generic_parameter_list(&method.generic_parameters));
        }

        line.push('(');
        if is_extension && !method.parameters.is_empty() {
            line.push_str("this ");
        }
        line.push_str(&self.format_parameters(&method.parameters)?);
        line.push(')');
        line.push_str(&format_constraint_clauses(&method.generic_parameters)?);
        line.push(';');
        self.writer.write_line(&line)
    }

    fn write_operator(&mut self, method: &MethodMetadata) -> Result<()> {
        self.write_attributes(
            &method.attributes.iter().collect::<Vec<_>>(),
            AttributeTarget::Method,
        )?;

        let mut line = String::new();
        line.push_str(method.visibility.keyword());
        line.push_str(" static ");

        if let Some(keyword) = conversion_keyword(&method.name) {
            line.push_str(keyword);
            line.push_str(" operator ");
            line.push_str(&format_return_type(&method.return_type)?);
        } else {
            let symbol = operator_symbol(&method.name).expect("partitioned as an operator");
            line.push_str(&format_return_type(&method.return_type)?);
            line.push_str(" operator ");
            line.push_str(symbol);
        }

        line.push('(');
        line.push_str(&self.format_parameters(&method.parameters)?);
        line.push_str(");");
        self.writer.write_line(&line)
    }

    fn format_parameters(&mut self, parameters: &[ParameterMetadata]) -> Result<String> {
        let mut rendered = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            rendered.push(self.format_parameter(parameter)?);
        }
        Ok(rendered.join(", "))
    }

    fn format_parameter(&mut self, parameter: &ParameterMetadata) -> Result<String> {
        let queries = [AttributeQuery::presence("System", "ParamArrayAttribute")];
        let (captures, remaining) = extract(&parameter.attributes, &queries);
        let is_params = captures[0].is_present();

        let mut text = String::new();
        for attribute in remaining {
            if !is_suppressed(attribute, AttributeTarget::Parameter) {
                text.push_str(&self.format_attribute(attribute)?);
                text.push(' ');
            }
        }

        if is_params {
            text.push_str("params ");
        }
        match parameter.mode {
            ParameterMode::Value => {}
            ParameterMode::Ref => text.push_str("ref "),
            ParameterMode::Out => text.push_str("out "),
            ParameterMode::In => text.push_str("in "),
        }
        text.push_str(&format_type_reference(&parameter.parameter_type)?);
        text.push(' ');
        text.push_str(&parameter.name);

        if let Some(default) = self.format_default_value(
            &parameter.parameter_type,
            parameter.default_value.as_ref(),
            parameter.is_optional,
        )? {
            text.push_str(" = ");
            text.push_str(&default);
        }
        Ok(text)
    }

    fn write_enum(&mut self, definition: &TypeMetadata, path: &str) -> Result<()> {
        self.write_attributes(
            &definition.attributes.iter().collect::<Vec<_>>(),
            AttributeTarget::Type,
        )?;

        let (base_name, _) = naming::parse_arity(&definition.name);
        let mut header = String::new();
        header.push_str(definition.visibility.keyword());
        header.push_str(" enum ");
        header.push_str(base_name);

        let underlying = enum_underlying(definition);
        if underlying != PrimitiveCode::I4 {
            header.push_str(" : ");
            header.push_str(underlying.keyword());
        }

        self.writer.write_line(&header)?;
        self.writer.write_line("{")?;
        self.writer.indent();

        let mut literal_fields: Vec<&FieldMetadata> = definition
            .fields
            .iter()
            .filter(|field| field.traits.contains(FieldTraits::LITERAL))
            .collect();
        literal_fields.sort_by(|a, b| {
            let key = |f: &FieldMetadata| {
                f.default_value
                    .as_ref()
                    .and_then(ConstantValue::as_i128)
                    .unwrap_or(0)
            };
            key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
        });

        for field in literal_fields {
            let value = field
                .default_value
                .as_ref()
                .ok_or_else(|| {
                    malformed_error!("enum literal without a constant value")
                        .in_member(format!("{path}.{}", field.name))
                })?;
            self.writer
                .write_line(&format!("{} = {},", field.name, literals::format_constant(value)))?;
        }

        self.writer.unindent();
        self.writer.write_line("}")?;
        Ok(())
    }

    fn write_delegate(
        &mut self,
        definition: &TypeMetadata,
        declaring_param_count: usize,
        path: &str,
    ) -> Result<()> {
        self.write_attributes(
            &definition.attributes.iter().collect::<Vec<_>>(),
            AttributeTarget::Type,
        )?;

        let invoke = definition
            .methods
            .iter()
            .find(|method| method.name == "Invoke")
            .ok_or_else(|| {
                malformed_error!("delegate type without an Invoke method").in_member(path.to_string())
            })?;

        let own_parameters = own_generic_parameters(definition, declaring_param_count);
        let (base_name, _) = naming::parse_arity(&definition.name);

        let mut line = String::new();
        line.push_str(definition.visibility.keyword());
        line.push_str(" delegate ");
        line.push_str(&format_return_type(&invoke.return_type)?);
        line.push(' ');
        line.push_str(base_name);
        line.push_str(&format_generic_parameter_list(own_parameters));
        line.push('(');
        line.push_str(&self.format_parameters(&invoke.parameters)?);
        line.push(')');
        line.push_str(&format_constraint_clauses(own_parameters)?);
        line.push(';');
        self.writer.write_line(&line)
    }

    fn write_attributes(
        &mut self,
        attributes: &[&AttributeMetadata],
        target: AttributeTarget,
    ) -> Result<()> {
        for attribute in attributes {
            if !is_suppressed(attribute, target) {
                let text = self.format_attribute(attribute)?;
                self.writer.write_line(&text)?;
            }
        }
        Ok(())
    }

    fn format_attribute(&mut self, attribute: &AttributeMetadata) -> Result<String> {
        let mut text = String::new();
        text.push('[');
        text.push_str(&format_type_reference(&attribute.attribute_type)?);

        if !attribute.fixed_arguments.is_empty() || !attribute.named_arguments.is_empty() {
            let mut arguments = Vec::new();
            for argument in &attribute.fixed_arguments {
                arguments.push(self.format_attribute_argument(argument)?);
            }
            for named in &attribute.named_arguments {
                arguments.push(format!(
                    "{} = {}",
                    named.name,
                    self.format_attribute_argument(&named.value)?
                ));
            }
            text.push('(');
            text.push_str(&arguments.join(", "));
            text.push(')');
        }
        text.push(']');
        Ok(text)
    }

    fn format_attribute_argument(&mut self, argument: &AttributeArgument) -> Result<String> {
        match argument {
            AttributeArgument::Constant(value) => Ok(literals::format_constant(value)),
            AttributeArgument::Type(Some(reference)) => {
                Ok(format!("typeof({})", format_type_reference(reference)?))
            }
            AttributeArgument::Type(None) => Ok("null".to_string()),
            AttributeArgument::Enum { enum_type, value } => {
                self.format_enum_value(enum_type, value)
            }
            AttributeArgument::Array(None) => Ok("null".to_string()),
            AttributeArgument::Array(Some(items)) => {
                let mut rendered = Vec::with_capacity(items.len());
                for item in items {
                    rendered.push(self.format_attribute_argument(item)?);
                }
                if rendered.is_empty() {
                    Ok("new[] { }".to_string())
                } else {
                    Ok(format!("new[] {{ {} }}", rendered.join(", ")))
                }
            }
        }
    }

    /// Render a default value for the given declared type.
    ///
    /// A present constant renders as a literal, going through the resolver when the
    /// declared type may be an enum. An optional parameter with no decodable constant
    /// renders the zero-value token `default` — the compiler attribute carrying the real
    /// constant stays in the attribute list, keeping the value observable.
    fn format_default_value(
        &mut self,
        declared_type: &MetadataTypeReference,
        value: Option<&ConstantValue>,
        is_optional: bool,
    ) -> Result<Option<String>> {
        let effective = unwrap_nullable(declared_type);

        match value {
            Some(constant) => {
                if constant.as_i128().is_some() && effective.is_named() {
                    Ok(Some(self.format_enum_value(effective, constant)?))
                } else {
                    Ok(Some(literals::format_constant(constant)))
                }
            }
            None if is_optional => Ok(Some("default".to_string())),
            None => Ok(None),
        }
    }

    /// Render an integer constant whose declared type is (or may be) an enum.
    fn format_enum_value(
        &mut self,
        enum_type: &MetadataTypeReference,
        value: &ConstantValue,
    ) -> Result<String> {
        let Some(key) = value.as_i128() else {
            return Ok(literals::format_constant(value));
        };
        let type_text = format_type_reference(enum_type)?;

        match self.resolver.classify(enum_type) {
            ReferenceClassification::Enum(shape) => {
                Ok(render_enum_literal(&shape, &type_text, key))
            }
            _ => {
                // Shape unavailable: zero renders as the type's zero-value token, anything
                // else as a cast over the raw constant.
                if key == 0 {
                    Ok("default".to_string())
                } else {
                    Ok(format!("({type_text}){}", literals::format_constant(value)))
                }
            }
        }
    }
}

type MethodSortKey = (bool, bool, String, usize, usize, String);
type OperatorSortKey = (String, String, String);

/// Classification and default-value rules look through the nullable wrapper: a
/// `System.Nullable`1<T>` default constant belongs to `T`.
fn unwrap_nullable(reference: &MetadataTypeReference) -> &MetadataTypeReference {
    if let MetadataTypeReference::GenericInstantiation {
        definition,
        arguments,
    } = reference
    {
        if arguments.len() == 1 && is_system_type(definition, "Nullable`1") {
            return &arguments[0];
        }
    }
    reference
}

/// Render an enum constant against a decoded shape.
fn render_enum_literal(shape: &EnumShape, type_text: &str, key: i128) -> String {
    if let Some(field) = shape.field_with_value(key) {
        return format!("{type_text}.{}", field.name);
    }
    if let Some(parts) = shape.flags_decomposition(key) {
        let rendered: Vec<String> = parts
            .iter()
            .map(|field| format!("{type_text}.{}", field.name))
            .collect();
        return rendered.join(" | ");
    }
    if key == 0 {
        return "default".to_string();
    }
    let literal = if shape.underlying.is_signed() {
        literals::format_signed(key)
    } else {
        literals::format_unsigned(key as u128)
    };
    format!("({type_text}){literal}")
}

/// Derive the declaration kind from structural traits and the base-type identity.
fn type_kind(definition: &TypeMetadata) -> TypeKind {
    if definition.traits.contains(TypeTraits::INTERFACE) {
        return TypeKind::Interface;
    }
    match &definition.base_type {
        Some(base) if is_system_type(base, "Enum") => TypeKind::Enum,
        Some(base) if is_system_type(base, "ValueType") => TypeKind::Struct,
        Some(base) if is_system_type(base, "MulticastDelegate") => TypeKind::Delegate,
        _ => TypeKind::Class,
    }
}

fn is_system_type(reference: &MetadataTypeReference, name: &str) -> bool {
    matches!(
        reference,
        MetadataTypeReference::TopLevel {
            namespace: Some(namespace),
            name: reference_name,
            ..
        } if namespace == "System" && reference_name == name
    )
}

/// The generic parameters a type introduces beyond its declaring type's count.
fn own_generic_parameters(
    definition: &TypeMetadata,
    declaring_param_count: usize,
) -> &[GenericParameterMetadata] {
    definition
        .generic_parameters
        .get(declaring_param_count..)
        .unwrap_or(&[])
}

fn format_generic_parameter_list(parameters: &[GenericParameterMetadata]) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = parameters
        .iter()
        .map(|parameter| {
            let variance = match parameter.variance {
                Variance::Invariant => "",
                Variance::Covariant => "out ",
                Variance::Contravariant => "in ",
            };
            format!("{variance}{}", parameter.name)
        })
        .collect();
    format!("<{}>", rendered.join(", "))
}

fn format_constraint_clauses(parameters: &[GenericParameterMetadata]) -> Result<String> {
    use crate::metadata::model::GenericConstraintTraits;

    let mut text = String::new();
    for parameter in parameters {
        if !parameter.is_constrained() {
            continue;
        }
        let mut parts = Vec::new();
        let traits = parameter.constraint_traits;
        if traits.contains(GenericConstraintTraits::REFERENCE_TYPE) {
            parts.push("class".to_string());
        }
        if traits.contains(GenericConstraintTraits::VALUE_TYPE) {
            parts.push("struct".to_string());
        }
        for constraint in &parameter.constraints {
            parts.push(format_type_reference(constraint)?);
        }
        // The struct constraint already implies a parameterless constructor.
        if traits.contains(GenericConstraintTraits::DEFAULT_CONSTRUCTOR)
            && !traits.contains(GenericConstraintTraits::VALUE_TYPE)
        {
            parts.push("new()".to_string());
        }
        text.push_str(&format!(" where {} : {}", parameter.name, parts.join(", ")));
    }
    Ok(text)
}

fn format_method_traits(traits: MethodTraits, in_interface: bool) -> String {
    if in_interface {
        return String::new();
    }
    let mut text = String::new();
    if traits.contains(MethodTraits::STATIC) {
        text.push_str("static ");
    }
    if traits.contains(MethodTraits::ABSTRACT) {
        text.push_str("abstract ");
    } else if traits.contains(MethodTraits::OVERRIDE) {
        if traits.contains(MethodTraits::SEALED) {
            text.push_str("sealed ");
        }
        text.push_str("override ");
    } else if traits.contains(MethodTraits::VIRTUAL) {
        text.push_str("virtual ");
    }
    text
}

/// A return position renders the by-ref wrapper as `ref`.
fn format_return_type(reference: &MetadataTypeReference) -> Result<String> {
    match reference {
        MetadataTypeReference::ByRef(element) => {
            Ok(format!("ref {}", format_type_reference(element)?))
        }
        other => format_type_reference(other),
    }
}

/// Combined accessor modifiers per the fixed derivation rule.
struct CombinedAccessor {
    visibility: Visibility,
    traits: MethodTraits,
}

/// Visibility takes the most permissive accessor; each flag requires all accessors to
/// agree, otherwise it is false.
fn combine_accessors(accessors: &[&AccessorMetadata]) -> CombinedAccessor {
    let visibility = accessors
        .iter()
        .map(|accessor| accessor.visibility)
        .fold(Visibility::Protected, Visibility::most_permissive);
    let traits = accessors
        .iter()
        .map(|accessor| accessor.traits)
        .reduce(|a, b| a & b)
        .unwrap_or_default();
    CombinedAccessor { visibility, traits }
}

fn property_is_static(property: &PropertyMetadata) -> bool {
    let accessors: Vec<&AccessorMetadata> = property
        .getter
        .iter()
        .chain(property.setter.iter())
        .collect();
    combine_accessors(&accessors)
        .traits
        .contains(MethodTraits::STATIC)
}

fn event_is_static(event: &EventMetadata) -> bool {
    let accessors: Vec<&AccessorMetadata> =
        event.adder.iter().chain(event.remover.iter()).collect();
    combine_accessors(&accessors)
        .traits
        .contains(MethodTraits::STATIC)
}

fn operator_symbol(name: &str) -> Option<&'static str> {
    OPERATOR_SYMBOLS
        .iter()
        .find(|(operator, _)| *operator == name)
        .map(|(_, symbol)| *symbol)
}

fn conversion_keyword(name: &str) -> Option<&'static str> {
    CONVERSION_OPERATORS
        .iter()
        .find(|(operator, _)| *operator == name)
        .map(|(_, keyword)| *keyword)
}

fn enum_underlying(definition: &TypeMetadata) -> PrimitiveCode {
    definition
        .fields
        .iter()
        .find(|field| !field.traits.contains(FieldTraits::STATIC))
        .and_then(|field| match &field.field_type {
            MetadataTypeReference::Primitive(code) if code.is_integer() => Some(*code),
            _ => None,
        })
        .unwrap_or(PrimitiveCode::I4)
}
