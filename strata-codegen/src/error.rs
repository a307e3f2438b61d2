//! Structural errors found while validating a set of declarations.

use miette::Diagnostic;
use thiserror::Error;

/// A declaration mistake that prevents the schema from being built.
///
/// Validation collects every structural error it finds instead of stopping
/// at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum StructuralError {
    #[error("duplicate model name '{name}'")]
    #[diagnostic(
        code(strata::duplicate_model_name),
        help("model names must be unique within a schema")
    )]
    DuplicateModelName { name: String },

    #[error("duplicate field '{field}' on model '{model}'")]
    #[diagnostic(
        code(strata::duplicate_field_name),
        help("fields and relationship accessors share one namespace per model")
    )]
    DuplicateFieldName { model: String, field: String },

    #[error("invalid identifier for model '{model}'")]
    #[diagnostic(code(strata::invalid_identifier), help("{reason}"))]
    InvalidIdentifier { model: String, reason: String },

    #[error("dangling relationship '{model}.{accessor}' to '{target}'")]
    #[diagnostic(code(strata::dangling_relationship), help("{reason}"))]
    DanglingRelationship {
        model: String,
        target: String,
        accessor: String,
        foreign_key: String,
        reason: String,
    },
}

impl StructuralError {
    /// Name of the model the error was reported against.
    pub fn model(&self) -> &str {
        match self {
            StructuralError::DuplicateModelName { name } => name,
            StructuralError::DuplicateFieldName { model, .. }
            | StructuralError::InvalidIdentifier { model, .. }
            | StructuralError::DanglingRelationship { model, .. } => model,
        }
    }
}
