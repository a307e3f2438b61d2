//! Lint for identifier well-formedness.

use strata_manifest::{Declarations, Error, check_identifier};

use super::super::Lint;
use crate::{StructuralError, pipeline::Diagnostic};

/// Lint that re-checks every model's identifier.
///
/// Builders already reject bad identifiers, but declarations can also be
/// assembled by hand, so validation checks them again.
pub struct IdentifierLint;

impl Lint for IdentifierLint {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn description(&self) -> &'static str {
        "Identifiers must name existing, required, scalar fields"
    }

    fn check(
        &self,
        declarations: &Declarations,
        errors: &mut Vec<StructuralError>,
        _diagnostics: &mut Vec<Diagnostic>,
    ) {
        for model in &declarations.models {
            if let Err(err) = check_identifier(model) {
                let reason = match *err {
                    Error::InvalidIdentifier { reason, .. } => reason,
                    other => other.to_string(),
                };
                errors.push(StructuralError::InvalidIdentifier {
                    model: model.name.clone(),
                    reason,
                });
            }
        }
    }
}
