//! Check operation - declaration validation.

use std::path::Path;

use miette::Diagnostic as _;
use strata_codegen::{StructuralError, pipeline::Severity};
use strata_manifest::Declarations;
use tracing::debug;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs every validation step and collects structural errors and advisory
/// diagnostics, so all problems are reported in one pass.
pub fn check(declarations: Declarations, config_path: &Path) -> CheckReport {
    debug!(config = %config_path.display(), "checking declarations");
    let ctx = strata_codegen::check(declarations);

    let mut errors: Vec<String> = ctx.errors.iter().map(format_error).collect();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        models: ctx.models.len(),
        relationships: ctx.relationships.len(),
        errors,
        warnings,
        infos,
    }
}

fn format_error(error: &StructuralError) -> String {
    match error.help() {
        Some(help) => format!("{}\n  help: {}", error, help),
        None => error.to_string(),
    }
}
