use std::path::{Path, PathBuf};

use super::parse_declarations;
use crate::{Declarations, Result};

/// Represents a strata.toml file with both raw content and parsed declarations.
pub struct StrataToml {
    path: PathBuf,
    content: String,
    declarations: Declarations,
}

impl StrataToml {
    /// Open and parse a declaration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let declarations = parse_declarations(&content, &filename)?;

        Ok(Self {
            path,
            content,
            declarations,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed declarations.
    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    pub fn into_declarations(self) -> Declarations {
        self.declarations
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::Error;

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[models.Todo.fields]\ncontent = \"string\"").unwrap();

        let toml = StrataToml::open(file.path()).unwrap();
        assert_eq!(toml.path(), file.path());
        assert!(toml.content().contains("content"));
        assert_eq!(toml.declarations().models.len(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StrataToml::open(dir.path().join("strata.toml"))
            .err()
            .unwrap();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
