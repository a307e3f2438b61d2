//! Generate operation - client types or schema handoff.

use std::path::Path;

use eyre::{Context, Result};
use strata_ir::Schema;
use tracing::{debug, info};

use crate::{
    format::OutputFormat,
    reports::{GenerateReport, GenerationResult, PreviewFile},
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output directory for generated files.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
pub fn generate(
    schema: &Schema,
    format: OutputFormat,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let generator = format.generator(schema)?;
    debug!(
        language = generator.language(),
        dry_run = opts.dry_run,
        "generating"
    );

    let result = if opts.dry_run {
        let files = generator
            .preview()
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let written = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate code")?;
        info!(
            files = written.written.len(),
            output = %opts.output_dir.display(),
            "wrote generated files"
        );
        GenerationResult::Written(written.written)
    };

    Ok(GenerateReport {
        language: generator.language(),
        models: schema.models().len(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use strata_manifest::{a, model, schema};

    use super::*;

    fn todo() -> Schema {
        strata_codegen::validate(
            schema()
                .model(model("Todo").field("content", a::string()))
                .unwrap()
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let report = generate(
            &todo(),
            OutputFormat::TypeScript,
            GenerateOptions {
                output_dir: dir.path(),
                dry_run: true,
            },
        )
        .unwrap();

        match report.result {
            GenerationResult::Preview(files) => assert_eq!(files[0].path, "schema.ts"),
            GenerationResult::Written(_) => panic!("dry run wrote files"),
        }
        assert!(!dir.path().join("schema.ts").exists());
    }

    #[test]
    fn test_writes_json_handoff() {
        let dir = tempfile::tempdir().unwrap();

        let report = generate(
            &todo(),
            OutputFormat::Json,
            GenerateOptions {
                output_dir: dir.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert_eq!(report.language, "json");
        let content = std::fs::read_to_string(dir.path().join("schema.json")).unwrap();
        assert!(content.contains("\"Todo\""));
    }
}
