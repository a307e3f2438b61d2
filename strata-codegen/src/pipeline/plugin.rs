//! Pipeline plugin trait for extensibility.

use eyre::Result;

use super::CompilationContext;

/// A plugin that can hook into the compilation pipeline.
///
/// Plugins receive callbacks before and after each phase runs and may
/// inspect or extend the compilation context.
///
/// # Example
///
/// ```
/// use strata_codegen::pipeline::{CompilationContext, Plugin};
///
/// struct ModelCount;
///
/// impl Plugin for ModelCount {
///     fn name(&self) -> &'static str {
///         "model-count"
///     }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> eyre::Result<()> {
///         if phase == "lower" {
///             ctx.add_info(phase, format!("{} model(s)", ctx.models.len()));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (used in trace output).
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    ///
    /// # Arguments
    ///
    /// * `phase` - The name of the phase about to run
    /// * `ctx` - The compilation context (can be modified)
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    ///
    /// # Arguments
    ///
    /// * `phase` - The name of the phase that just completed
    /// * `ctx` - The compilation context (can be modified)
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
