use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::validate::find_name_span;

/// Result type for declaration building (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Wraps builder errors raised while reading a declaration file so they
/// point at the offending name in the source.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Attach source location to an error raised while declaring `name`.
    ///
    /// `path` lists the enclosing names (e.g. `["models", "Todo"]`) and
    /// narrows the span search.
    pub fn declaration_error(&self, name: &str, path: &[&str], source: Box<Error>) -> Box<Error> {
        Box::new(Error::Declaration {
            src: self.named_source(),
            span: find_name_span(&self.src, path, name),
            name: name.to_string(),
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the path to a declaration file with --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse declaration file")]
    #[diagnostic(code(strata::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid declaration of '{name}'")]
    #[diagnostic(code(strata::declaration))]
    Declaration {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unsupported field kind '{kind}'")]
    #[diagnostic(code(strata::unsupported_field_kind), help("{reason}"))]
    UnsupportedFieldKind { kind: String, reason: String },

    #[error("invalid identifier for model '{model}'")]
    #[diagnostic(code(strata::invalid_identifier), help("{reason}"))]
    InvalidIdentifier { model: String, reason: String },

    #[error("unknown principal mode '{mode}'")]
    #[diagnostic(
        code(strata::unknown_principal_mode),
        help("valid modes are: public-api-key, guest, authenticated, owner, group:<name>")
    )]
    UnknownPrincipalMode { mode: String },

    #[error("unknown operation '{operation}'")]
    #[diagnostic(
        code(strata::unknown_operation),
        help("valid operations are: create, read, update, delete, list")
    )]
    UnknownOperation { operation: String },

    #[error("invalid default for field '{field}'")]
    #[diagnostic(code(strata::invalid_default), help("{reason}"))]
    InvalidDefault { field: String, reason: String },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(help(
        "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
    ))]
    InvalidName {
        name: String,
        context: String,
        reason: String,
    },

    #[error("invalid setting '{setting}'")]
    #[diagnostic(code(strata::invalid_setting), help("{reason}"))]
    InvalidSetting { setting: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(strata::validation_error))]
    Validation { message: String },
}

impl Error {
    pub fn unsupported_field_kind(kind: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnsupportedFieldKind {
            kind: kind.into(),
            reason: reason.into(),
        })
    }

    pub fn invalid_identifier(model: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidIdentifier {
            model: model.into(),
            reason: reason.into(),
        })
    }

    pub fn invalid_default(field: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidDefault {
            field: field.into(),
            reason: reason.into(),
        })
    }

    pub fn invalid_setting(setting: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidSetting {
            setting: setting.into(),
            reason: reason.into(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Validation {
            message: message.into(),
        })
    }

    /// The builder error underneath any source-location wrapper.
    pub fn root(&self) -> &Error {
        match self {
            Error::Declaration { source, .. } => source.root(),
            other => other,
        }
    }
}
