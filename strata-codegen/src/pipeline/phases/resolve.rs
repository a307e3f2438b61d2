//! Resolve phase - relationship declarations become typed edges.
//!
//! A `hasMany` keeps its foreign key on the target model and a `belongsTo`
//! keeps it on the declaring model. Resolution checks that the target model
//! exists and that the referencing side has a scalar field with the key's
//! name, then emits one [`Relationship`] per declaration. Declarations that
//! mirror each other are linked as pairs; pairing is never required.

use std::collections::HashSet;

use eyre::Result;
use strata_ir::{Field, Model, ModelId, RelationKind, Relationship, RelationshipId};
use strata_manifest::{ModelDecl, RelationDecl};
use tracing::debug;

use crate::{
    StructuralError,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

const PHASE: &str = "resolve";

/// Phase that resolves every relationship declaration, schema-wide.
///
/// Relations on a duplicate model declaration are still checked, so their
/// errors are reported alongside the duplicate, but only the first
/// declaration of a name contributes edges.
pub struct ResolvePhase;

impl ResolvePhase {
    pub fn apply(&self, ctx: &mut CompilationContext) {
        let mut relationships = Vec::new();
        let mut errors = Vec::new();
        let mut diagnostics = Vec::new();
        let mut lowered = HashSet::new();

        for decl in &ctx.declarations.models {
            let Some(source) = ctx.model_id(&decl.name) else {
                continue;
            };
            let first = lowered.insert(decl.name.as_str());

            for relation in &decl.relations {
                let target = match resolve_one(ctx, decl, relation, &mut diagnostics) {
                    Ok(target) => target,
                    Err(err) => {
                        errors.push(err);
                        continue;
                    }
                };
                if !first {
                    continue;
                }

                let referencing = match relation.kind {
                    RelationKind::HasMany => target,
                    RelationKind::BelongsTo => source,
                };
                debug!(
                    model = %decl.name,
                    accessor = %relation.accessor,
                    target = %relation.target,
                    "resolved relationship"
                );
                relationships.push(Relationship {
                    id: RelationshipId(relationships.len()),
                    source,
                    kind: relation.kind,
                    target,
                    accessor: relation.accessor.clone(),
                    foreign_key: relation.foreign_key.clone(),
                    referencing,
                    paired_with: None,
                });
            }
        }

        pair(&mut relationships);
        for relationship in relationships.iter().filter(|r| r.paired_with.is_none()) {
            let source = &ctx.model(relationship.source).name;
            diagnostics.push(
                Diagnostic::info(
                    PHASE,
                    format!(
                        "'{}.{}' has no inverse on '{}'; the accessor is one-directional",
                        source,
                        relationship.accessor,
                        ctx.model(relationship.target).name
                    ),
                )
                .at(format!("models.{}", source)),
            );
        }

        ctx.relationships = relationships;
        ctx.errors.extend(errors);
        ctx.diagnostics.extend(diagnostics);
    }
}

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        PHASE
    }

    fn description(&self) -> &'static str {
        "Resolve hasMany/belongsTo declarations into relationship edges"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        self.apply(ctx);
        Ok(())
    }
}

/// One end of a relation: a lowered model or the declaration itself.
struct End<'a> {
    name: &'a str,
    identifier: &'a [String],
    fields: &'a [Field],
}

impl<'a> End<'a> {
    fn field(&self, name: &str) -> Option<&'a Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<'a> From<&'a Model> for End<'a> {
    fn from(model: &'a Model) -> Self {
        Self {
            name: &model.name,
            identifier: &model.identifier,
            fields: &model.fields,
        }
    }
}

impl<'a> From<&'a ModelDecl> for End<'a> {
    fn from(decl: &'a ModelDecl) -> Self {
        Self {
            name: &decl.name,
            identifier: &decl.identifier,
            fields: &decl.fields,
        }
    }
}

/// Resolve one declaration to its target model.
fn resolve_one(
    ctx: &CompilationContext,
    decl: &ModelDecl,
    relation: &RelationDecl,
    diagnostics: &mut Vec<Diagnostic>,
) -> std::result::Result<ModelId, StructuralError> {
    let dangling = |reason: String| StructuralError::DanglingRelationship {
        model: decl.name.clone(),
        target: relation.target.clone(),
        accessor: relation.accessor.clone(),
        foreign_key: relation.foreign_key.clone(),
        reason,
    };

    let target = ctx
        .model_id(&relation.target)
        .ok_or_else(|| dangling(format!("no model named '{}' exists", relation.target)))?;

    let (referencing, referenced) = match relation.kind {
        RelationKind::HasMany => (End::from(ctx.model(target)), End::from(decl)),
        RelationKind::BelongsTo => (End::from(decl), End::from(ctx.model(target))),
    };

    let key = referencing.field(&relation.foreign_key).ok_or_else(|| {
        dangling(format!(
            "'{}' has no field '{}' to hold the foreign key",
            referencing.name, relation.foreign_key
        ))
    })?;
    if !key.kind.is_scalar() {
        return Err(dangling(format!(
            "foreign key '{}.{}' must be a scalar field, found {}",
            referencing.name, relation.foreign_key, key.kind
        )));
    }

    if let Some(message) = key_mismatch(&referenced, &referencing, key) {
        diagnostics.push(Diagnostic::warning(PHASE, message).at(format!("models.{}", decl.name)));
    }

    Ok(target)
}

/// Compare the foreign key's kind with a single-field identifier on the
/// referenced model.
fn key_mismatch(referenced: &End<'_>, referencing: &End<'_>, key: &Field) -> Option<String> {
    let [id_name] = referenced.identifier else {
        return None;
    };
    let id_field = referenced.field(id_name)?;
    if id_field.kind == key.kind {
        return None;
    }
    Some(format!(
        "foreign key '{}.{}' is {} but '{}' is identified by {} '{}'",
        referencing.name, key.name, key.kind, referenced.name, id_field.kind, id_name
    ))
}

/// Link declarations that describe the same relation from both ends.
fn pair(relationships: &mut [Relationship]) {
    for i in 0..relationships.len() {
        if relationships[i].paired_with.is_some() {
            continue;
        }
        let partner = (i + 1..relationships.len()).find(|&j| {
            let (a, b) = (&relationships[i], &relationships[j]);
            b.paired_with.is_none()
                && a.kind != b.kind
                && a.source == b.target
                && a.target == b.source
                && a.referencing == b.referencing
                && a.foreign_key == b.foreign_key
        });
        if let Some(j) = partner {
            relationships[i].paired_with = Some(RelationshipId(j));
            relationships[j].paired_with = Some(RelationshipId(i));
        }
    }
}
