//! Pipeline orchestrator.

use eyre::{Result, bail};
use strata_manifest::Declarations;
use tracing::{debug, info, warn};

use super::{
    CompilationContext, Diagnostic, Phase, Plugin, Severity,
    phases::{AnalyzePhase, LowerPhase, ResolvePhase, ValidatePhase},
};

/// The validation pipeline.
///
/// Runs the built-in phases (validate, lower, resolve, analyze) followed by
/// any user phases, calling plugin hooks around each one. Structural errors
/// never stop the run; an error diagnostic, or a failing phase or plugin,
/// stops every later phase.
///
/// # Example
///
/// ```
/// use strata_codegen::pipeline::Pipeline;
/// use strata_manifest::{a, model, schema};
///
/// let declarations = schema()
///     .model(model("Todo").field("content", a::string()))?
///     .build();
///
/// let ctx = Pipeline::new().check(declarations);
/// let schema = ctx.into_schema().expect("no structural errors");
/// assert_eq!(schema.models().len(), 1);
/// # Ok::<(), Box<strata_manifest::Error>>(())
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline with the built-in phases and default lints.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the validate phase, e.g. to add custom lints.
    pub fn validate_with(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every phase and return the context, whatever it found.
    ///
    /// A phase or plugin failure is recorded as an error diagnostic of that
    /// phase. Call [`CompilationContext::into_schema`] to obtain the schema
    /// or the full list of structural errors.
    pub fn check(&self, declarations: Declarations) -> CompilationContext {
        let mut ctx = CompilationContext::new(declarations);
        debug!(models = ctx.declarations.models.len(), "validating declarations");

        let builtin: [&dyn Phase; 4] = [&self.validate, &LowerPhase, &ResolvePhase, &AnalyzePhase];
        let finished = builtin.into_iter().all(|phase| self.step(phase, &mut ctx))
            && self.phases.iter().all(|phase| self.step(phase.as_ref(), &mut ctx));
        if !finished {
            warn!("pipeline stopped on an error diagnostic");
        }

        for diagnostic in &ctx.diagnostics {
            diagnostic.trace();
        }
        if !ctx.errors.is_empty() {
            warn!(errors = ctx.errors.len(), "declarations have structural errors");
        }
        info!(
            models = ctx.models.len(),
            relationships = ctx.relationships.len(),
            errors = ctx.error_count(),
            warnings = ctx.warning_count(),
            "pipeline finished"
        );
        ctx
    }

    /// Run the pipeline on a set of declarations.
    ///
    /// Structural errors do not fail the run; they are collected on the
    /// returned context.
    ///
    /// # Errors
    ///
    /// Returns an error if a lint reports an error diagnostic, or if a custom
    /// phase or plugin fails.
    pub fn run(&self, declarations: Declarations) -> Result<CompilationContext> {
        let ctx = self.check(declarations);
        if let Some(failed) = ctx.diagnostics_of(Severity::Error).next() {
            bail!("{} phase failed: {}", failed.phase, failed.message);
        }
        Ok(ctx)
    }

    /// Run one phase; returns false once later phases must not run.
    fn step(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> bool {
        if let Err(err) = self.run_phase(phase, ctx) {
            ctx.add_diagnostic(Diagnostic::error(phase.name(), format!("{:#}", err)));
        }
        ctx.diagnostics_of(Severity::Error).next().is_none()
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        debug!(phase = phase_name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
