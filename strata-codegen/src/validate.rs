//! Schema graph validation.

use strata_ir::Schema;
use strata_manifest::Declarations;

use crate::{
    StructuralError,
    pipeline::{CompilationContext, Pipeline},
};

/// Run the default [`Pipeline`] and return the full compilation context.
///
/// Steps run in a fixed order: uniqueness, identifiers, relationship
/// resolution, cycle analysis. Structural errors from every step are kept
/// on the context; advisory findings are in `diagnostics`.
pub fn check(declarations: Declarations) -> CompilationContext {
    Pipeline::new().check(declarations)
}

/// Validate declarations into an immutable [`Schema`].
///
/// # Errors
///
/// Returns every structural error found, not just the first.
///
/// # Example
///
/// ```
/// use strata_codegen::validate;
/// use strata_manifest::{a, model, schema};
///
/// let declarations = schema()
///     .model(
///         model("EventReport")
///             .field("eventID", a::string().required())
///             .field("attendaceLog", a::has_many("AttendaceLog", "itemID"))
///             .identifier(["eventID"]),
///     )?
///     .model(
///         model("AttendaceLog")
///             .field("itemID", a::string().required())
///             .identifier(["itemID"]),
///     )?
///     .build();
///
/// let schema = validate(declarations).expect("valid schema");
/// assert_eq!(schema.relationships().len(), 1);
/// # Ok::<(), Box<strata_manifest::Error>>(())
/// ```
pub fn validate(declarations: Declarations) -> Result<Schema, Vec<StructuralError>> {
    check(declarations).into_schema()
}

#[cfg(test)]
mod tests {
    use strata_ir::{Operation, PrincipalMode};
    use strata_manifest::{a, model, schema};

    use super::*;
    use crate::pipeline::Severity;

    #[test]
    fn test_todo_without_rules_validates() {
        let schema = validate(
            schema()
                .model(model("Todo").field("content", a::string()))
                .unwrap()
                .build(),
        )
        .unwrap();

        let todo = schema.model("Todo").unwrap();
        assert!(todo.field("content").unwrap().is_optional());
        for op in Operation::ALL {
            assert!(todo.access.allowed(op).is_empty());
        }
    }

    #[test]
    fn test_errors_accumulate() {
        let todo = model("Todo").field("content", a::string()).build().unwrap();
        let report = model("EventReport")
            .field("ghosts", a::has_many("Ghost", "x"))
            .build()
            .unwrap();
        let declarations = schema()
            .declared(todo.clone())
            .declared(todo)
            .declared(report)
            .build();

        let errors = validate(declarations).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], StructuralError::DuplicateModelName { .. }));
        assert!(matches!(
            errors[1],
            StructuralError::DanglingRelationship { .. }
        ));
    }

    #[test]
    fn test_duplicate_model_relations_still_resolved() {
        let first = model("Report").field("name", a::string()).build().unwrap();
        let second = model("Report")
            .field("name", a::string())
            .field("ghosts", a::has_many("Ghost", "x"))
            .build()
            .unwrap();

        let errors = validate(schema().declared(first).declared(second).build()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            StructuralError::DuplicateModelName { name } if name == "Report"
        ));
        assert!(matches!(
            &errors[1],
            StructuralError::DanglingRelationship { target, .. } if target == "Ghost"
        ));
    }

    #[test]
    fn test_cycles_do_not_block() {
        let ctx = check(
            schema()
                .model(
                    model("PlayerReport")
                        .field("name", a::string().required())
                        .field("firstEventID", a::string())
                        .field("events", a::has_many("EventReport", "playerName"))
                        .identifier(["name"]),
                )
                .unwrap()
                .model(
                    model("EventReport")
                        .field("eventID", a::string().required())
                        .field("playerName", a::string())
                        .field("player", a::belongs_to("PlayerReport", "playerName"))
                        .identifier(["eventID"]),
                )
                .unwrap()
                .build(),
        );

        assert_eq!(ctx.cycles.len(), 1);
        assert!(
            ctx.diagnostics_of(Severity::Info)
                .any(|d| d.message.starts_with("reference cycle"))
        );
        let schema = ctx.into_schema().unwrap();
        assert_eq!(schema.cycles().len(), 1);
    }

    #[test]
    fn test_access_tables_compiled() {
        let schema = validate(
            schema()
                .model(
                    model("Post")
                        .field("title", a::string())
                        .authorization(|allow| vec![allow.guest().to([Operation::Read])]),
                )
                .unwrap()
                .build(),
        )
        .unwrap();

        let post = schema.model("Post").unwrap();
        assert_eq!(post.access.permitted_operations(), vec![Operation::Read]);
        assert!(post.access.allows(Operation::Read, &PrincipalMode::Guest));
    }
}
