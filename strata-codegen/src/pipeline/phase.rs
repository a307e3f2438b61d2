//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the validation pipeline.
///
/// Built-in phases, in order:
/// - `ValidatePhase` - uniqueness and identifier checks, advisory lints
/// - `LowerPhase` - assigns model ids and compiles authorization tables
/// - `ResolvePhase` - turns relationship declarations into edges
/// - `AnalyzePhase` - records reference cycles
///
/// Custom phases run after these and see the fully resolved context.
pub trait Phase: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error only to abort the pipeline. Declaration mistakes are
    /// recorded on the context so that every one of them is reported.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
