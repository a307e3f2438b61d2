//! Advisory lint for authorization coverage.

use strata_ir::PrincipalMode;
use strata_manifest::Declarations;

use super::super::Lint;
use crate::{StructuralError, pipeline::Diagnostic};

/// Lint that warns about default-deny models and API-key rules the schema
/// cannot honor.
pub struct AuthorizationLint;

impl Lint for AuthorizationLint {
    fn name(&self) -> &'static str {
        "authorization"
    }

    fn description(&self) -> &'static str {
        "Warn about models no caller can reach"
    }

    fn check(
        &self,
        declarations: &Declarations,
        _errors: &mut Vec<StructuralError>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let api_key = declarations.authorization.accepts_api_key();

        for model in &declarations.models {
            let location = format!("models.{}", model.name);

            if model.rules.is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "model '{}' has no authorization rules; every operation is denied",
                            model.name
                        ),
                    )
                    .at(&location),
                );
            }

            let grants_api_key = model
                .rules
                .iter()
                .any(|rule| rule.principal == PrincipalMode::PublicApiKey);
            if grants_api_key && !api_key {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "model '{}' allows public-api-key but the schema has no API key configured",
                            model.name
                        ),
                    )
                    .at(location),
                );
            }
        }
    }
}
