//! schema.ts generator: one object type per model plus a `Schema` map.

use strata_codegen::{
    AccessorShape, Cardinality, ClientShape, FieldShape, ModelShape,
    builder::{CodeBuilder, CodeFragment},
    language::TypeMapper,
};
use strata_ir::Operation;

use super::GENERATED_HEADER;
use crate::{
    TypeScriptTypeMapper,
    ast::{Field, ObjectType, Union},
};

/// The schema.ts file containing the client types of every model.
pub struct SchemaTs<'a> {
    shape: &'a ClientShape,
}

impl<'a> SchemaTs<'a> {
    pub fn new(shape: &'a ClientShape) -> Self {
        Self { shape }
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.push_line(GENERATED_HEADER).push_blank();
        builder.emit(&operation_union()).push_blank();

        for model in &self.shape.models {
            builder.emit(&model_type(model)).push_blank();
        }

        builder.apply_fragment(schema_map(&self.shape.models));
        builder.build()
    }
}

fn operation_union() -> Union {
    Operation::ALL.iter().fold(
        Union::new("Operation").doc("An operation a principal may be granted on a model."),
        |union, op| union.variant(format!("{:?}", op.as_str())),
    )
}

fn model_type(model: &ModelShape) -> ObjectType {
    let ty = model
        .fields
        .iter()
        .fold(ObjectType::new(&model.name), |ty, field| {
            ty.field(field_property(field))
        });
    model
        .accessors
        .iter()
        .fold(ty, |ty, accessor| ty.field(accessor_property(accessor)))
}

fn field_property(field: &FieldShape) -> Field {
    let mapper = TypeScriptTypeMapper;
    let property = if !field.optional {
        Field::new(&field.name, mapper.map_kind(&field.kind))
    } else if field.present() {
        // may be omitted on write; never null once stored
        Field::new(&field.name, mapper.map_kind(&field.kind)).optional()
    } else {
        Field::new(&field.name, mapper.map_optional(&field.kind)).optional()
    };
    match &field.default {
        Some(default) => property.doc(format!("Defaults to {}.", default)),
        None => property,
    }
}

fn accessor_property(accessor: &AccessorShape) -> Field {
    match accessor.cardinality {
        Cardinality::Many => Field::new(&accessor.name, format!("{}[]", accessor.target)),
        Cardinality::OptionalOne => {
            Field::new(&accessor.name, format!("{} | null", accessor.target)).optional()
        }
    }
}

fn tuple<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted: Vec<_> = items
        .into_iter()
        .map(|s| format!("{:?}", s.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn schema_map(models: &[ModelShape]) -> CodeFragment {
    if models.is_empty() {
        return CodeFragment::line("export type Schema = {};");
    }

    let entries = models
        .iter()
        .map(|model| {
            CodeFragment::block(
                format!("{}: {{", model.name),
                vec![
                    CodeFragment::line(format!("type: {};", model.name)),
                    CodeFragment::line(format!("identifier: {};", tuple(&model.identifier))),
                    CodeFragment::line(format!(
                        "operations: {};",
                        tuple(model.operations.iter().map(Operation::as_str))
                    )),
                ],
                Some("};".to_string()),
            )
        })
        .collect();

    CodeFragment::Sequence(vec![
        CodeFragment::Doc("Identifier and permitted operations of every model.".to_string()),
        CodeFragment::block("export type Schema = {", entries, Some("};".to_string())),
    ])
}
