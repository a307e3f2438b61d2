//! Built-in lints.

mod authorization;
mod duplicate_field;
mod duplicate_model;
mod identifier;

pub use authorization::AuthorizationLint;
pub use duplicate_field::DuplicateFieldLint;
pub use duplicate_model::DuplicateModelLint;
pub use identifier::IdentifierLint;
