//! Lint for duplicate model names.

use std::collections::HashSet;

use strata_manifest::Declarations;

use super::super::Lint;
use crate::{StructuralError, pipeline::Diagnostic};

/// Lint that errors on every repeated model name.
///
/// The first declaration of a name wins; each later one is an error.
pub struct DuplicateModelLint;

impl Lint for DuplicateModelLint {
    fn name(&self) -> &'static str {
        "duplicate-model"
    }

    fn description(&self) -> &'static str {
        "Detect models declared more than once"
    }

    fn check(
        &self,
        declarations: &Declarations,
        errors: &mut Vec<StructuralError>,
        _diagnostics: &mut Vec<Diagnostic>,
    ) {
        let mut seen = HashSet::new();
        for model in &declarations.models {
            if !seen.insert(model.name.as_str()) {
                errors.push(StructuralError::DuplicateModelName {
                    name: model.name.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use strata_manifest::{a, model, schema};

    use super::*;

    fn check(declarations: &Declarations) -> Vec<StructuralError> {
        let mut errors = Vec::new();
        DuplicateModelLint.check(declarations, &mut errors, &mut Vec::new());
        errors
    }

    #[test]
    fn test_distinct_names() {
        let declarations = schema()
            .model(model("Todo"))
            .unwrap()
            .model(model("Note"))
            .unwrap()
            .build();
        assert!(check(&declarations).is_empty());
    }

    #[test]
    fn test_each_repeat_reported() {
        let todo = model("Todo").field("content", a::string()).build().unwrap();
        let declarations = schema()
            .declared(todo.clone())
            .declared(todo.clone())
            .declared(todo)
            .build();
        assert_eq!(check(&declarations).len(), 2);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let declarations = schema()
            .model(model("Todo"))
            .unwrap()
            .model(model("todo"))
            .unwrap()
            .build();
        assert!(check(&declarations).is_empty());
    }
}
