//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from declaration validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the declaration file.
    pub config_path: PathBuf,
    /// Number of distinct models lowered.
    pub models: usize,
    /// Number of resolved relationships.
    pub relationships: usize,
    /// Structural errors and error diagnostics.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid ({} {}, {} {})",
                self.config_path.display(),
                self.models,
                plural(self.models, "model", "models"),
                self.relationships,
                plural(self.relationships, "relationship", "relationships"),
            ));
        } else {
            out.preformatted(&format!(
                "✗ {} has {} {}",
                self.config_path.display(),
                self.errors.len(),
                plural(self.errors.len(), "error", "errors"),
            ));
        }
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
