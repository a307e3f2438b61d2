//! Language-specific abstractions.
//!
//! - [`LanguageCodegen`] - renders a client shape into source files
//! - [`TypeMapper`] - maps field kinds to language types
//! - [`PreviewFile`], [`GenerateResult`] - generated output

mod traits;

pub use traits::{GenerateResult, LanguageCodegen, PreviewFile, TypeMapper, write_files};
