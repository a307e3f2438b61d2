//! Lint trait for declaration checks.

use strata_manifest::Declarations;

use crate::{StructuralError, pipeline::Diagnostic};

/// Information about a lint.
#[derive(Debug, Clone)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A check run over the whole set of declarations.
///
/// Lints push blocking problems to `errors` and advisory findings to
/// `diagnostics`. They never stop at the first problem.
pub trait Lint: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(
        &self,
        declarations: &Declarations,
        errors: &mut Vec<StructuralError>,
        diagnostics: &mut Vec<Diagnostic>,
    );

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
