//! Info operation - schema overview.

use std::path::Path;

use strata_ir::Schema;
use tracing::debug;

use crate::reports::{AccessLine, InfoReport, ModelInfo, RelationshipInfo, Stats};

/// Execute the info operation.
///
/// Collects an overview of a validated schema.
pub fn info(schema: &Schema, config_path: &Path) -> InfoReport {
    debug!(models = schema.models().len(), "collecting schema overview");
    let models: Vec<ModelInfo> = schema
        .models()
        .iter()
        .map(|model| ModelInfo {
            name: model.name.clone(),
            identifier: model.identifier.clone(),
            fields: model
                .fields
                .iter()
                .map(|f| {
                    let marker = if f.required { "" } else { "?" };
                    format!("{}{}: {}", f.name, marker, f.kind)
                })
                .collect(),
            access: model
                .access
                .iter()
                .filter(|(_, principals)| !principals.is_empty())
                .map(|(op, principals)| AccessLine {
                    operation: op.to_string(),
                    principals: principals.iter().map(|p| p.name()).collect(),
                })
                .collect(),
        })
        .collect();

    let relationships = schema
        .relationships()
        .iter()
        .map(|r| RelationshipInfo {
            source: schema.model_by_id(r.source).name.clone(),
            accessor: r.accessor.clone(),
            kind: r.kind.as_str().to_string(),
            target: schema.model_by_id(r.target).name.clone(),
            foreign_key: format!(
                "{}.{}",
                schema.model_by_id(r.referencing).name,
                r.foreign_key
            ),
            paired: r.paired_with.is_some(),
        })
        .collect();

    let cycles = schema
        .cycles()
        .iter()
        .map(|cycle| {
            let mut names: Vec<&str> = cycle
                .iter()
                .map(|id| schema.model_by_id(*id).name.as_str())
                .collect();
            if let Some(first) = names.first().copied() {
                names.push(first);
            }
            names.join(" -> ")
        })
        .collect();

    let modes = schema.authorization();

    InfoReport {
        config_path: std::fs::canonicalize(config_path)
            .unwrap_or_else(|_| config_path.to_path_buf()),
        default_mode: modes.default_mode.as_str().to_string(),
        api_key_days: modes.api_key.as_ref().map(|k| k.expires_in_days),
        stats: Stats {
            models: models.len(),
            fields: models.iter().map(|m| m.fields.len()).sum(),
            relationships: schema.relationships().len(),
            cycles: schema.cycles().len(),
        },
        models,
        relationships,
        cycles,
    }
}
