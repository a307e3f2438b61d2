//! Lint for duplicate field and accessor names within a model.

use std::collections::HashSet;

use strata_manifest::Declarations;

use super::super::Lint;
use crate::{StructuralError, pipeline::Diagnostic};

/// Lint that errors when a model repeats a member name.
pub struct DuplicateFieldLint;

impl Lint for DuplicateFieldLint {
    fn name(&self) -> &'static str {
        "duplicate-field"
    }

    fn description(&self) -> &'static str {
        "Detect fields or accessors declared twice on one model"
    }

    fn check(
        &self,
        declarations: &Declarations,
        errors: &mut Vec<StructuralError>,
        _diagnostics: &mut Vec<Diagnostic>,
    ) {
        for model in &declarations.models {
            let mut seen = HashSet::new();
            let mut reported = HashSet::new();
            for name in model.member_names() {
                if !seen.insert(name) && reported.insert(name) {
                    errors.push(StructuralError::DuplicateFieldName {
                        model: model.name.clone(),
                        field: name.to_string(),
                    });
                }
            }
        }
    }
}
