//! Output format dispatch.
//!
//! Maps the `--format` flag to a generator for a validated schema.

use clap::ValueEnum;
use eyre::{Context, Result};
use strata_codegen::{
    language::{LanguageCodegen, PreviewFile},
    schema_to_json,
};
use strata_codegen_typescript::Generator as TypeScriptGenerator;
use strata_ir::Schema;

/// Path of the JSON handoff file, relative to the output directory.
const SCHEMA_JSON: &str = "schema.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// TypeScript client types (schema.ts)
    #[value(name = "ts", alias = "typescript")]
    TypeScript,
    /// Validated schema as JSON, for provisioning (schema.json)
    Json,
}

impl OutputFormat {
    /// Create a generator for this format.
    pub fn generator(self, schema: &Schema) -> Result<Box<dyn LanguageCodegen>> {
        match self {
            OutputFormat::TypeScript => Ok(Box::new(TypeScriptGenerator::from_schema(schema))),
            OutputFormat::Json => Ok(Box::new(JsonHandoff::new(schema)?)),
        }
    }
}

/// The serialized schema, emitted as a single file.
struct JsonHandoff {
    content: String,
}

impl JsonHandoff {
    fn new(schema: &Schema) -> Result<Self> {
        let mut content = schema_to_json(schema).wrap_err("Failed to serialize schema")?;
        content.push('\n');
        Ok(Self { content })
    }
}

impl LanguageCodegen for JsonHandoff {
    fn language(&self) -> &'static str {
        "json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        vec![PreviewFile {
            path: SCHEMA_JSON.to_string(),
            content: self.content.clone(),
        }]
    }
}
