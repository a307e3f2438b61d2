//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod info;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult, PreviewFile};
pub use info::{AccessLine, InfoReport, ModelInfo, RelationshipInfo, Stats};
pub use output::{Report, TerminalOutput};
#[cfg(test)]
pub use output::test_support::RecordingOutput;
