//! Model declarations for Strata.
//!
//! Models are declared either in code through [`ModelBuilder`] and the
//! [`a`] field library, or in a `strata.toml` file read by [`StrataToml`].
//! Both produce [`Declarations`], which `strata-codegen` validates into a
//! resolved schema.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod auth;
mod error;
mod field;
mod manifest;
mod model;
mod schema;
mod validate;

pub use auth::{Allow, parse_operation, parse_principal_mode, parse_rule};
pub use error::{Error, Result, SourceContext};
pub use field::{FieldBuilder, Modifiers, a, array_of, field};
pub use manifest::{
    ApiKeySection, AuthorizationSection, DEFAULT_FILENAME, FieldEntry, FieldTable, Manifest,
    ModelEntry, RuleEntry, StrataToml, parse_declarations,
};
pub use model::{
    DEFAULT_IDENTIFIER, Member, ModelBuilder, ModelDecl, Relation, RelationDecl, check_identifier,
    model,
};
pub use schema::{API_KEY_EXPIRY_DAYS, Declarations, SchemaBuilder, schema};
pub use validate::{find_name_span, validate_name};
