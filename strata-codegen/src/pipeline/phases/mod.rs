//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - uniqueness and identifier checks, advisory lints
//! - [`LowerPhase`] - model ids and compiled authorization tables
//! - [`ResolvePhase`] - relationship declarations become edges
//! - [`AnalyzePhase`] - reference cycles

mod analyze;
mod lower;
mod resolve;
mod validate;

pub use analyze::{AnalyzePhase, reference_cycles};
pub use lower::LowerPhase;
pub use resolve::ResolvePhase;
pub use validate::{
    AuthorizationLint, DuplicateFieldLint, DuplicateModelLint, IdentifierLint, Lint, LintInfo,
    ValidatePhase,
};
