//! Validate phase - uniqueness, identifier and advisory checks.

mod lint;
pub mod lints;

use eyre::Result;
pub use lint::{Lint, LintInfo};
pub use lints::{AuthorizationLint, DuplicateFieldLint, DuplicateModelLint, IdentifierLint};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that checks declarations with configurable lints.
///
/// The default lints run uniqueness checks before identifier checks.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a validate phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(DuplicateModelLint),
                Box::new(DuplicateFieldLint),
                Box::new(IdentifierLint),
                Box::new(AuthorizationLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint, run after the existing ones.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }

    /// Run every lint against the context's declarations.
    pub fn apply(&self, ctx: &mut CompilationContext) {
        for lint in &self.lints {
            lint.check(&ctx.declarations, &mut ctx.errors, &mut ctx.diagnostics);
        }
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check uniqueness, identifiers and authorization coverage"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        self.apply(ctx);
        Ok(())
    }
}
