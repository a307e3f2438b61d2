//! Language-agnostic code generation traits.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use strata_ir::FieldKind;
use tracing::debug;

/// Trait for client type generators.
///
/// Implement this trait to emit the client shape in a new language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "typescript")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "ts")
    fn file_extension(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Vec<PreviewFile>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        write_files(&self.preview(), output_dir)
    }
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files written, in preview order
    pub written: Vec<PathBuf>,
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    pub content: String,
}

/// Write previewed files below `output_dir`, creating directories as needed.
pub fn write_files(files: &[PreviewFile], output_dir: &Path) -> Result<GenerateResult> {
    let mut result = GenerateResult::default();
    for file in files {
        let path = output_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &file.content)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "wrote generated file");
        result.written.push(path);
    }
    Ok(result)
}

/// Maps field kinds to language-specific type strings.
pub trait TypeMapper {
    fn language(&self) -> &'static str;

    /// Type of a present value of `kind`.
    fn map_kind(&self, kind: &FieldKind) -> String;

    /// Type of a value that may be absent.
    fn map_optional(&self, kind: &FieldKind) -> String {
        format!("{} | null", self.map_kind(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl LanguageCodegen for Fixed {
        fn language(&self) -> &'static str {
            "text"
        }

        fn file_extension(&self) -> &'static str {
            "txt"
        }

        fn preview(&self) -> Vec<PreviewFile> {
            vec![PreviewFile {
                path: "nested/schema.txt".into(),
                content: "Todo\n".into(),
            }]
        }
    }

    #[test]
    fn test_default_generate_writes_preview() {
        let dir = tempfile::tempdir().unwrap();

        let result = Fixed.generate(dir.path()).unwrap();

        assert_eq!(result.written, vec![dir.path().join("nested/schema.txt")]);
        let content = std::fs::read_to_string(dir.path().join("nested/schema.txt")).unwrap();
        assert_eq!(content, "Todo\n");
    }
}
