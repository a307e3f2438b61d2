//! Type projection: the client-facing shape of a validated schema.

use serde::Serialize;
use strata_ir::{DefaultValue, FieldKind, Model, Operation, RelationKind, Schema};

/// Statically-typed shape of every model, for application code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientShape {
    pub models: Vec<ModelShape>,
}

impl ClientShape {
    pub fn model(&self, name: &str) -> Option<&ModelShape> {
        self.models.iter().find(|m| m.name == name)
    }
}

/// Record shape of one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelShape {
    pub name: String,
    pub identifier: Vec<String>,
    /// Stored fields, in declaration order.
    pub fields: Vec<FieldShape>,
    /// One accessor per relationship declared on the model.
    pub accessors: Vec<AccessorShape>,
    /// Operations at least one principal mode may perform.
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldShape {
    pub name: String,
    pub kind: FieldKind,
    /// Mirrors the field declaration: true unless marked required.
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl FieldShape {
    /// Whether a stored record always carries a value.
    ///
    /// Defaulted fields may be omitted on input but are filled on write.
    pub fn present(&self) -> bool {
        !self.optional || self.default.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessorShape {
    pub name: String,
    /// Name of the related model.
    pub target: String,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    /// `hasMany`: an array of related records.
    Many,
    /// `belongsTo`: at most one related record.
    OptionalOne,
}

impl From<RelationKind> for Cardinality {
    fn from(kind: RelationKind) -> Self {
        match kind {
            RelationKind::HasMany => Cardinality::Many,
            RelationKind::BelongsTo => Cardinality::OptionalOne,
        }
    }
}

/// Project a validated schema into its client shape.
///
/// Reads only what validation already established, so it cannot fail.
pub fn project(schema: &Schema) -> ClientShape {
    ClientShape {
        models: schema
            .models()
            .iter()
            .map(|model| project_model(schema, model))
            .collect(),
    }
}

fn project_model(schema: &Schema, model: &Model) -> ModelShape {
    ModelShape {
        name: model.name.clone(),
        identifier: model.identifier.clone(),
        fields: model
            .fields
            .iter()
            .map(|field| FieldShape {
                name: field.name.clone(),
                kind: field.kind.clone(),
                optional: field.is_optional(),
                default: field.default.clone(),
            })
            .collect(),
        accessors: schema
            .relationships_from(model.id)
            .map(|r| AccessorShape {
                name: r.accessor.clone(),
                target: schema.model_by_id(r.target).name.clone(),
                cardinality: r.kind.into(),
            })
            .collect(),
        operations: model.access.permitted_operations(),
    }
}

#[cfg(test)]
mod tests {
    use strata_manifest::{a, model, schema};

    use super::*;
    use crate::validate;

    fn sample() -> Schema {
        validate(
            schema()
                .model(
                    model("EventReport")
                        .field("eventID", a::string().required())
                        .field("totalPlayers", a::integer())
                        .field("firstTimeNames", a::string().array())
                        .field("attendaceLog", a::has_many("AttendaceLog", "itemID"))
                        .identifier(["eventID"])
                        .authorization(|allow| vec![allow.authenticated()]),
                )
                .unwrap()
                .model(
                    model("AttendaceLog")
                        .field("itemID", a::string().required())
                        .field("joined", a::boolean().default(false))
                        .field("event", a::belongs_to("EventReport", "eventID"))
                        .field("eventID", a::string())
                        .identifier(["itemID"]),
                )
                .unwrap()
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn test_accessor_cardinality() {
        let shape = project(&sample());

        let report = shape.model("EventReport").unwrap();
        assert_eq!(
            report.accessors,
            vec![AccessorShape {
                name: "attendaceLog".into(),
                target: "AttendaceLog".into(),
                cardinality: Cardinality::Many,
            }]
        );

        let log = shape.model("AttendaceLog").unwrap();
        assert_eq!(log.accessors[0].cardinality, Cardinality::OptionalOne);
    }

    #[test]
    fn test_fields_round_trip() {
        let schema = sample();
        let shape = project(&schema);

        for model in schema.models() {
            let projected = shape.model(&model.name).unwrap();
            let rederived: Vec<_> = projected
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.kind.clone(), !f.optional))
                .collect();
            let declared: Vec<_> = model
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.kind.clone(), f.required))
                .collect();
            assert_eq!(rederived, declared);
        }
    }

    #[test]
    fn test_default_marks_present() {
        let shape = project(&sample());
        let joined = &shape.model("AttendaceLog").unwrap().fields[1];
        assert!(joined.optional);
        assert!(joined.present());
    }

    #[test]
    fn test_operations_follow_access() {
        let shape = project(&sample());
        assert_eq!(shape.model("EventReport").unwrap().operations, Operation::ALL.to_vec());
        assert!(shape.model("AttendaceLog").unwrap().operations.is_empty());
    }
}
