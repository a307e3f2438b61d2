//! Validation pipeline.
//!
//! A [`Pipeline`] turns [`Declarations`](strata_manifest::Declarations) into a
//! validated [`Schema`](strata_ir::Schema) through explicit phases:
//!
//! - validate: uniqueness and identifier checks plus advisory lints
//! - lower: model ids and compiled authorization tables
//! - resolve: relationship declarations become typed edges
//! - analyze: reference cycles are recorded
//!
//! Structural errors accumulate on the [`CompilationContext`] rather than
//! stopping the run, so one pass reports every declaration mistake.

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
