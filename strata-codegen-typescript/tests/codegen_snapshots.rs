//! Snapshot tests for TypeScript code generation.
//!
//! These tests verify that the generated TypeScript code matches expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use strata_codegen::validate;
use strata_codegen_typescript::{Generator, LanguageCodegen, SCHEMA_FILE};
use strata_manifest::Declarations;

/// Validate a declaration file and render its schema.ts.
fn generate_schema_ts(source: &str) -> String {
    let declarations: Declarations = source.parse().expect("Failed to parse declarations");
    let schema = validate(declarations).expect("Validation failed");
    let files = Generator::from_schema(&schema).preview();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, SCHEMA_FILE);
    files.into_iter().next().map(|f| f.content).unwrap_or_default()
}

#[test]
fn test_related_models() {
    let content = generate_schema_ts(
        r#"
        [authorization]
        default_mode = "api-key"

        [models.Todo]
        authorization = [{ allow = "public-api-key" }]

        [models.Todo.fields]
        content = "string"
        status = { type = "enum", values = ["OPEN", "DONE"], default = "OPEN" }

        [models.EventReport]
        identifier = ["eventID"]
        authorization = [{ allow = "authenticated", operations = ["read", "list"] }]

        [models.EventReport.fields]
        eventID = { type = "string", required = true }
        firstTimeNames = { type = "string", array = true }
        attendaceLog = { has_many = "AttendaceLog", references = "eventID" }

        [models.AttendaceLog]
        identifier = ["itemID"]

        [models.AttendaceLog.fields]
        itemID = { type = "string", required = true }
        eventID = "string"
        event = { belongs_to = "EventReport", references = "eventID" }
        "#,
    );

    insta::assert_snapshot!(content, @r#"
    // Generated by strata. Do not edit.

    /** An operation a principal may be granted on a model. */
    export type Operation = "create" | "read" | "update" | "delete" | "list";

    export type Todo = {
      id: string;
      content?: string | null;
      /** Defaults to "OPEN". */
      status?: "OPEN" | "DONE";
    };

    export type EventReport = {
      eventID: string;
      firstTimeNames?: string[] | null;
      attendaceLog: AttendaceLog[];
    };

    export type AttendaceLog = {
      itemID: string;
      eventID?: string | null;
      event?: EventReport | null;
    };

    /** Identifier and permitted operations of every model. */
    export type Schema = {
      Todo: {
        type: Todo;
        identifier: ["id"];
        operations: ["create", "read", "update", "delete", "list"];
      };
      EventReport: {
        type: EventReport;
        identifier: ["eventID"];
        operations: ["read", "list"];
      };
      AttendaceLog: {
        type: AttendaceLog;
        identifier: ["itemID"];
        operations: [];
      };
    };
    "#);
}

#[test]
fn test_single_model_without_rules() {
    let content = generate_schema_ts(
        r#"
        [models.GlobalStatistics]
        identifier = ["id"]

        [models.GlobalStatistics.fields]
        id = { type = "integer", required = true }
        eventCount = "integer"
        "#,
    );

    insta::assert_snapshot!(content, @r#"
    // Generated by strata. Do not edit.

    /** An operation a principal may be granted on a model. */
    export type Operation = "create" | "read" | "update" | "delete" | "list";

    export type GlobalStatistics = {
      id: number;
      eventCount?: number | null;
    };

    /** Identifier and permitted operations of every model. */
    export type Schema = {
      GlobalStatistics: {
        type: GlobalStatistics;
        identifier: ["id"];
        operations: [];
      };
    };
    "#);
}

#[test]
fn test_event_fixture() {
    let content = generate_schema_ts(include_str!(
        "../../strata-codegen/tests/fixtures/events.toml"
    ));

    assert!(content.contains("export type PlayerEvent = {\n  itemID: string;\n  time: number;\n"));
    assert!(content.contains("  type: string;\n"));
    assert!(content.contains("  firstTimeNames?: string[] | null;\n  attendaceLog: AttendaceLog[];\n};\n"));
    assert!(content.contains("  eventsAttended: EventReport[];\n"));
    assert!(content.contains("  joined: boolean;\n"));
    // every model appears in the Schema map
    for model in [
        "Todo",
        "PlayerEvent",
        "EventReport",
        "AttendaceLog",
        "PlayerReport",
        "WorldReport",
        "GlobalStatistics",
    ] {
        assert!(content.contains(&format!("  {}: {{\n    type: {};\n", model, model)));
    }
}

#[test]
fn test_generate_writes_schema_file() {
    let declarations: Declarations = r#"
        [models.Todo.fields]
        content = "string"
    "#
    .parse()
    .unwrap();
    let schema = validate(declarations).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let result = Generator::from_schema(&schema)
        .generate(dir.path())
        .unwrap();

    assert_eq!(result.written, vec![dir.path().join(SCHEMA_FILE)]);
    let written = std::fs::read_to_string(dir.path().join(SCHEMA_FILE)).unwrap();
    assert!(written.contains("export type Todo = {\n  id: string;\n  content?: string | null;\n};\n"));
}
