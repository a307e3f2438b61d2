//! Schema validation and client type projection for Strata.
//!
//! Takes the [`Declarations`](strata_manifest::Declarations) produced by the
//! model builders and turns them into an immutable
//! [`Schema`](strata_ir::Schema): duplicate and identifier checks,
//! relationship resolution, authorization compilation and cycle analysis.
//! A validated schema can be projected into a [`ClientShape`] for code
//! generators.
//!
//! # Module Organization
//!
//! - [`pipeline`] - validation phases, lints and diagnostics
//! - [`builder`] - code building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`language`] - traits implemented by language generators

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod authorization;
pub mod builder;
mod error;
mod export;
pub mod language;
pub mod pipeline;
mod projection;
mod shared;
mod validate;

pub use authorization::compile;
pub use error::StructuralError;
pub use export::{schema_to_json, to_json};
pub use projection::{AccessorShape, Cardinality, ClientShape, FieldShape, ModelShape, project};
pub use shared::SharedSchema;
pub use validate::{check, validate};
