//! Info command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from schema info.
#[derive(Debug)]
pub struct InfoReport {
    /// Declaration file path.
    pub config_path: PathBuf,
    /// Schema default authorization mode.
    pub default_mode: String,
    /// API key lifetime, when API keys are configured.
    pub api_key_days: Option<u32>,
    pub stats: Stats,
    pub models: Vec<ModelInfo>,
    pub relationships: Vec<RelationshipInfo>,
    /// Reference cycles, rendered as `A -> B -> A`.
    pub cycles: Vec<String>,
}

/// Schema statistics.
#[derive(Debug, Default)]
pub struct Stats {
    pub models: usize,
    /// Stored fields across all models.
    pub fields: usize,
    pub relationships: usize,
    pub cycles: usize,
}

#[derive(Debug)]
pub struct ModelInfo {
    pub name: String,
    pub identifier: Vec<String>,
    /// `name: kind`, with `?` marking optional fields.
    pub fields: Vec<String>,
    /// Operations with at least one allowed principal mode.
    pub access: Vec<AccessLine>,
}

#[derive(Debug)]
pub struct AccessLine {
    pub operation: String,
    pub principals: Vec<String>,
}

#[derive(Debug)]
pub struct RelationshipInfo {
    pub source: String,
    pub accessor: String,
    pub kind: String,
    pub target: String,
    /// `Model.field` holding the key.
    pub foreign_key: String,
    pub paired: bool,
}

impl Report for InfoReport {
    fn render(&self, out: &mut dyn Output) {
        out.newline();

        // Header
        let title = self.config_path.display().to_string();
        out.preformatted(&format!("  {}", title));
        out.preformatted(&format!("  {}", "─".repeat(title.chars().count())));
        out.newline();

        // Authorization
        out.preformatted(&format!("  Default auth   {}", self.default_mode));
        if let Some(days) = self.api_key_days {
            out.preformatted(&format!("  API key        expires in {} days", days));
        }
        out.newline();

        // Statistics
        out.preformatted("  Statistics");
        out.preformatted("  ──────────");
        out.preformatted(&format!("  Models         {}", self.stats.models));
        out.preformatted(&format!("  Fields         {}", self.stats.fields));
        out.preformatted(&format!("  Relationships  {}", self.stats.relationships));
        out.preformatted(&format!("  Cycles         {}", self.stats.cycles));
        out.newline();

        // Models
        out.preformatted("  Models");
        out.preformatted("  ──────");
        for model in &self.models {
            out.preformatted(&format!(
                "  {} [{}]",
                model.name,
                model.identifier.join(", ")
            ));
            for field in &model.fields {
                out.preformatted(&format!("    {}", field));
            }
            if model.access.is_empty() {
                out.preformatted("    └─ no access");
            }
            for line in &model.access {
                out.preformatted(&format!(
                    "    └─ {:<7} {}",
                    line.operation,
                    line.principals.join(", ")
                ));
            }
        }

        // Relationships
        if !self.relationships.is_empty() {
            out.newline();
            out.preformatted("  Relationships");
            out.preformatted("  ─────────────");
            for rel in &self.relationships {
                let paired = if rel.paired { "" } else { " (one-directional)" };
                out.preformatted(&format!(
                    "  {}.{} {} {} via {}{}",
                    rel.source, rel.accessor, rel.kind, rel.target, rel.foreign_key, paired
                ));
            }
        }

        if !self.cycles.is_empty() {
            out.newline();
            out.preformatted("  Cycles");
            out.preformatted("  ──────");
            for cycle in &self.cycles {
                out.preformatted(&format!("  {}", cycle));
            }
        }
    }
}
