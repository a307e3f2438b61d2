//! Name validation and source span lookup for declaration files.

use miette::SourceSpan;

use crate::{Error, Result};

/// Check that `name` can be used for a model, field or accessor.
pub(crate) fn check_name(name: &str, context: &str) -> Result<()> {
    match validate_name(name) {
        Some(reason) => Err(Box::new(Error::InvalidName {
            name: name.to_string(),
            context: context.to_string(),
            reason: reason.to_string(),
        })),
        None => Ok(()),
    }
}

/// Validate that a name is a plain identifier.
/// Returns None if valid, Some(reason) if invalid
pub fn validate_name(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    // Double-underscore names are reserved for API introspection
    if name.starts_with("__") {
        return Some("names starting with '__' are reserved");
    }

    None
}

/// Find the span of a declared name in the TOML source.
///
/// `path` holds the enclosing table keys, e.g. `["models", "Todo", "fields"]`
/// for a field of `Todo`. Table headers (`[models.Todo]`) are tried first,
/// then `name = ...` keys inside the enclosing table, then any occurrence.
pub fn find_name_span(src: &str, path: &[&str], name: &str) -> Option<SourceSpan> {
    let dotted = if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path.join("."), name)
    };

    for pattern in [format!("[{}]", dotted), format!("[{}.", dotted)] {
        if let Some(pos) = src.find(&pattern) {
            // skip '[' and the enclosing path
            let start = pos + 1 + dotted.len() - name.len();
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    let section_start = if path.is_empty() {
        0
    } else {
        src.find(&format!("[{}]", path.join(".")))
            .map(|pos| pos + 1)
            .unwrap_or(0)
    };

    let mut offset = section_start;
    for line in src[section_start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_key = trimmed
            .strip_prefix(name)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_key {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, name.len())));
        }
        offset += line.len();
    }

    // Fallback: just find the name anywhere (less precise)
    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("itemID").is_none());
        assert!(validate_name("EventReport").is_none());
        assert!(validate_name("_private").is_none());
        assert!(validate_name("q1EventAttendance").is_none());
    }

    #[test]
    fn test_invalid_start_character() {
        assert!(validate_name("1st").is_some());
        assert!(validate_name("-name").is_some());
    }

    #[test]
    fn test_invalid_characters() {
        assert!(validate_name("event-report").is_some());
        assert!(validate_name("hello world").is_some());
        assert!(validate_name("name@test").is_some());
    }

    #[test]
    fn test_reserved_prefix() {
        assert!(validate_name("__typename").is_some());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_name(""), Some("name cannot be empty"));
    }

    #[test]
    fn test_check_name_error() {
        let err = check_name("bad name", "field").unwrap_err();
        assert_eq!(err.to_string(), "invalid field name 'bad name'");
    }

    #[test]
    fn test_find_model_header_span() {
        let src = "[models.Todo]\nauthorization = []\n";
        let span = find_name_span(src, &["models"], "Todo").unwrap();
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), 4);
    }

    #[test]
    fn test_find_nested_header_span() {
        let src = "[models.Todo.fields]\ncontent = \"string\"\n";
        let span = find_name_span(src, &["models"], "Todo").unwrap();
        assert_eq!(span.offset(), 8);
    }

    #[test]
    fn test_find_key_span() {
        let src = "[models.A.fields]\nname = \"string\"\n\n[models.B.fields]\nname = \"integer\"\n";
        let span = find_name_span(src, &["models", "B", "fields"], "name").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "name");
        assert!(span.offset() > src.find("[models.B").unwrap());
    }
}
