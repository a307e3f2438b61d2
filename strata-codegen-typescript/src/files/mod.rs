//! TypeScript file generators.

mod schema_ts;

pub use schema_ts::SchemaTs;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Generated by strata. Do not edit.";
