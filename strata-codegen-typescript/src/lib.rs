//! TypeScript client type generator for Strata.
//!
//! Renders the [`ClientShape`](strata_codegen::ClientShape) of a validated
//! schema as TypeScript type aliases, so application code gets a checked
//! record type per model.
//!
//! # Usage
//!
//! ```ignore
//! use strata_codegen::{language::LanguageCodegen, validate};
//! use strata_codegen_typescript::Generator;
//! use std::path::Path;
//!
//! let schema = validate(declarations)?;
//! let generator = Generator::from_schema(&schema);
//!
//! // Preview files without writing
//! let files = generator.preview();
//!
//! // Generate files to disk
//! let result = generator.generate(Path::new("src/generated"))?;
//! ```
//!
//! # Generated Output
//!
//! A single `schema.ts` holding:
//!
//! - an `Operation` union of the CRUDL operations
//! - one `export type <Model> = { ... }` per model, fields then accessors
//! - a `Schema` map from model name to its identifier and permitted operations

mod generator;
mod type_mapper;

pub mod ast;
pub mod files;

pub use generator::{Generator, SCHEMA_FILE};
pub use strata_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use type_mapper::TypeScriptTypeMapper;
