//! Declaration file (`strata.toml`) format.

mod file;
mod parse;

pub use file::StrataToml;
use indexmap::IndexMap;
pub use parse::{DEFAULT_FILENAME, parse_declarations};
use serde::Deserialize;

/// Root of a strata.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Schema-wide authorization modes
    #[serde(default)]
    pub authorization: AuthorizationSection,

    /// Models keyed by name, in file order
    #[serde(default)]
    pub models: IndexMap<String, ModelEntry>,
}

/// `[authorization]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorizationSection {
    /// One of `api-key`, `user-pool`, `iam`, `oidc`
    pub default_mode: Option<String>,

    /// API key settings
    pub api_key: Option<ApiKeySection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKeySection {
    pub expires_in_days: u32,
}

/// `[models.<Name>]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    /// Primary-key field names; defaults to `["id"]`
    pub identifier: Option<Vec<String>>,

    /// Authorization rules
    #[serde(default)]
    pub authorization: Vec<RuleEntry>,

    /// Fields and relationships, in file order
    #[serde(default)]
    pub fields: IndexMap<String, FieldEntry>,
}

/// One authorization rule: `{ allow = "owner", operations = ["read"] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    pub allow: String,
    pub operations: Option<Vec<String>>,
}

/// A field is either a bare kind name or a table.
///
/// ```toml
/// content = "string"
/// itemID = { type = "string", required = true }
/// logs = { has_many = "AttendaceLog", references = "itemID" }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    Shorthand(String),
    Table(FieldTable),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldTable {
    #[serde(rename = "type")]
    pub ty: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub array: bool,

    /// Members of an `enum` field
    pub values: Option<Vec<String>>,

    pub default: Option<toml::Value>,

    /// Target model of a one-to-many relationship
    pub has_many: Option<String>,

    /// Target model of a many-to-one relationship
    pub belongs_to: Option<String>,

    /// Foreign-key field of a relationship
    pub references: Option<String>,
}
