//! Schema value types for the Strata data-model definer.
//!
//! This crate holds the types shared by the declaration front-end
//! (`strata-manifest`) and the validation/projection pipeline
//! (`strata-codegen`). A validated [`Schema`] is the sole artifact handed to
//! provisioning and code generation.
//!
//! # Architecture
//!
//! ```text
//! builder / strata.toml → strata-manifest (Declarations) → strata-codegen (Schema) → ClientShape
//! ```
//!
//! Everything here is plain data: construction rules live in the crates that
//! produce these values, so a `Schema` can be treated as an immutable,
//! freely shareable value once it exists.

mod access;
mod field;
mod schema;

pub use access::{
    AccessTable, ApiKeyConfig, AuthMode, AuthRule, AuthorizationModes, Operation, PrincipalMode,
};
pub use field::{DefaultValue, Field, FieldKind};
pub use schema::{Model, ModelId, RelationKind, Relationship, RelationshipId, Schema};
