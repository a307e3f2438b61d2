//! The validated schema and its graph.

use serde::Serialize;

use crate::{AccessTable, AuthRule, AuthorizationModes, Field};

/// Index of a model within its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ModelId(pub usize);

/// Index of a relationship within its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RelationshipId(pub usize);

/// A named entity type.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub id: ModelId,
    pub name: String,
    /// Stored fields in declaration order.
    pub fields: Vec<Field>,
    /// Ordered primary-key field names.
    pub identifier: Vec<String>,
    /// Declared rules, in declaration order.
    pub rules: Vec<AuthRule>,
    /// Rules compiled into a per-operation table.
    pub access: AccessTable,
}

impl Model {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields forming the identifier, in identifier order.
    pub fn identifier_fields(&self) -> impl Iterator<Item = &Field> {
        self.identifier.iter().filter_map(|name| self.field(name))
    }
}

/// Direction of a relationship declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    /// The target holds the foreign key; the source sees many targets.
    HasMany,
    /// The source holds the foreign key; the source sees at most one target.
    BelongsTo,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::HasMany => "hasMany",
            RelationKind::BelongsTo => "belongsTo",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved directed edge between two models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub id: RelationshipId,
    /// Model declaring the relationship.
    pub source: ModelId,
    pub kind: RelationKind,
    pub target: ModelId,
    /// Accessor name on the source model.
    pub accessor: String,
    /// Foreign-key field name on the referencing model.
    pub foreign_key: String,
    /// Model holding the foreign key: the target for `hasMany`, the source
    /// for `belongsTo`.
    pub referencing: ModelId,
    /// The opposite declaration, when both sides declared the relation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired_with: Option<RelationshipId>,
}

/// The validated, immutable collection of models and relationships.
///
/// A `Schema` is only produced by validation. It has no mutation methods;
/// share it behind an `Arc` and replace the whole value to reload.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    models: Vec<Model>,
    relationships: Vec<Relationship>,
    cycles: Vec<Vec<ModelId>>,
    authorization: AuthorizationModes,
}

impl Schema {
    /// Assemble a schema from validated parts.
    ///
    /// Reserved for the validator (`strata_codegen::validate`), which
    /// guarantees that model and relationship ids equal their positions and
    /// that every edge points at an existing model. Lookups such as
    /// [`Schema::model_by_id`] rely on that.
    #[doc(hidden)]
    pub fn from_parts(
        models: Vec<Model>,
        relationships: Vec<Relationship>,
        cycles: Vec<Vec<ModelId>>,
        authorization: AuthorizationModes,
    ) -> Self {
        debug_assert!(models.iter().enumerate().all(|(i, m)| m.id.0 == i));
        debug_assert!(relationships.iter().enumerate().all(|(i, r)| {
            r.id.0 == i
                && [r.source, r.target, r.referencing]
                    .iter()
                    .all(|id| id.0 < models.len())
        }));
        Self {
            models,
            relationships,
            cycles,
            authorization,
        }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Look up a model by name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Resolve a model id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this schema.
    pub fn model_by_id(&self, id: ModelId) -> &Model {
        &self.models[id.0]
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn relationship(&self, id: RelationshipId) -> &Relationship {
        &self.relationships[id.0]
    }

    /// Relationships declared on `model`, in declaration order.
    pub fn relationships_from(&self, model: ModelId) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(move |r| r.source == model)
    }

    /// Reference cycles found during validation, as model id groups.
    pub fn cycles(&self) -> &[Vec<ModelId>] {
        &self.cycles
    }

    pub fn authorization(&self) -> &AuthorizationModes {
        &self.authorization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldKind, Operation, PrincipalMode};

    fn model(id: usize, name: &str, fields: &[&str]) -> Model {
        Model {
            id: ModelId(id),
            name: name.into(),
            fields: fields
                .iter()
                .map(|f| Field {
                    name: (*f).into(),
                    kind: FieldKind::String,
                    required: true,
                    default: None,
                    implicit: false,
                })
                .collect(),
            identifier: vec![fields[0].into()],
            rules: vec![AuthRule::new(PrincipalMode::Authenticated)],
            access: AccessTable::deny_all(),
        }
    }

    fn sample() -> Schema {
        let report = model(0, "EventReport", &["eventID", "worldID"]);
        let log = model(1, "AttendaceLog", &["itemID", "name"]);
        let rel = Relationship {
            id: RelationshipId(0),
            source: ModelId(0),
            kind: RelationKind::HasMany,
            target: ModelId(1),
            accessor: "attendaceLog".into(),
            foreign_key: "itemID".into(),
            referencing: ModelId(1),
            paired_with: None,
        };
        Schema::from_parts(
            vec![report, log],
            vec![rel],
            Vec::new(),
            AuthorizationModes::default(),
        )
    }

    #[test]
    fn test_lookup() {
        let schema = sample();
        assert_eq!(schema.model("AttendaceLog").map(|m| m.id), Some(ModelId(1)));
        assert!(schema.model("Ghost").is_none());
        assert_eq!(schema.model_by_id(ModelId(0)).name, "EventReport");
    }

    #[test]
    fn test_relationships_from() {
        let schema = sample();
        assert_eq!(schema.relationships_from(ModelId(0)).count(), 1);
        assert_eq!(schema.relationships_from(ModelId(1)).count(), 0);
    }

    #[test]
    fn test_identifier_fields() {
        let schema = sample();
        let names: Vec<_> = schema
            .model_by_id(ModelId(1))
            .identifier_fields()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["itemID"]);
    }

    #[test]
    fn test_serializes_for_handoff() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["models"][0]["name"], "EventReport");
        assert_eq!(value["relationships"][0]["kind"], "hasMany");
        assert_eq!(value["relationships"][0]["target"], 1);
        assert!(value["models"][0]["access"][Operation::Read.as_str()].is_array());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_edge_to_missing_model_rejected() {
        let mut rel = sample().relationships()[0].clone();
        rel.target = ModelId(7);
        Schema::from_parts(
            vec![model(0, "EventReport", &["eventID"])],
            vec![rel],
            Vec::new(),
            AuthorizationModes::default(),
        );
    }
}
