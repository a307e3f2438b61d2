//! TypeScript declaration builders.
//!
//! These produce [`CodeFragment`](strata_codegen::builder::CodeFragment)s
//! that are rendered through a `CodeBuilder`.

mod types;

pub use types::{Field, ObjectType, Union};
