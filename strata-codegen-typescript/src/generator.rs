//! TypeScript client type generator.

use strata_codegen::{
    ClientShape,
    language::{LanguageCodegen, PreviewFile},
    project,
};
use strata_ir::Schema;

use crate::files::SchemaTs;

/// Path of the generated file, relative to the output directory.
pub const SCHEMA_FILE: &str = "schema.ts";

/// TypeScript code generator that renders a client shape as type aliases.
pub struct Generator {
    shape: ClientShape,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        vec![PreviewFile {
            path: SCHEMA_FILE.to_string(),
            content: SchemaTs::new(&self.shape).render(),
        }]
    }
}

impl Generator {
    pub fn new(shape: ClientShape) -> Self {
        Self { shape }
    }

    /// Project a validated schema and generate from its client shape.
    pub fn from_schema(schema: &Schema) -> Self {
        Self::new(project(schema))
    }

    pub fn shape(&self) -> &ClientShape {
        &self.shape
    }
}
