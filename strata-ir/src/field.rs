//! Field kinds and stored fields.

use serde::Serialize;

/// The kind of value a field stores.
///
/// Arrays nest exactly one level: an array element is always a scalar or an
/// enum. The declaration front-end rejects anything deeper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "of")]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    /// Closed set of string members.
    Enum(Vec<String>),
    /// Ordered list of the element kind.
    Array(Box<FieldKind>),
}

impl FieldKind {
    /// Get the declaration name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum(_) => "enum",
            FieldKind::Array(_) => "array",
        }
    }

    /// Returns true for kinds that can carry a foreign key.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            FieldKind::String | FieldKind::Integer | FieldKind::Boolean | FieldKind::Enum(_)
        )
    }

    pub fn is_array(&self) -> bool {
        matches!(self, FieldKind::Array(_))
    }

    /// The element kind for arrays, `None` otherwise.
    pub fn element(&self) -> Option<&FieldKind> {
        match self {
            FieldKind::Array(inner) => Some(inner),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Enum(members) => write!(f, "enum({})", members.join(" | ")),
            FieldKind::Array(inner) => write!(f, "{}[]", inner),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A default value attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl DefaultValue {
    /// Returns true if this value may be stored in a field of `kind`.
    pub fn fits(&self, kind: &FieldKind) -> bool {
        match (self, kind) {
            (DefaultValue::String(_), FieldKind::String) => true,
            (DefaultValue::Integer(_), FieldKind::Integer) => true,
            (DefaultValue::Boolean(_), FieldKind::Boolean) => true,
            (DefaultValue::String(s), FieldKind::Enum(members)) => members.contains(s),
            _ => false,
        }
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::String(s) => write!(f, "{:?}", s),
            DefaultValue::Integer(i) => write!(f, "{}", i),
            DefaultValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::String(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Integer(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Boolean(value)
    }
}

/// A stored, typed attribute of a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field name, unique within its model.
    pub name: String,
    /// Stored value kind.
    pub kind: FieldKind,
    /// Whether a value must always be present.
    pub required: bool,
    /// Value used when a record is created without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// True when the field was added by the builder rather than declared.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub implicit: bool,
}

impl Field {
    pub fn is_optional(&self) -> bool {
        !self.required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::String.to_string(), "string");
        assert_eq!(
            FieldKind::Array(Box::new(FieldKind::Integer)).to_string(),
            "integer[]"
        );
        assert_eq!(
            FieldKind::Enum(vec!["OPEN".into(), "CLOSED".into()]).to_string(),
            "enum(OPEN | CLOSED)"
        );
    }

    #[test]
    fn test_scalar_kinds() {
        assert!(FieldKind::String.is_scalar());
        assert!(FieldKind::Enum(vec!["A".into()]).is_scalar());
        assert!(!FieldKind::Array(Box::new(FieldKind::String)).is_scalar());
    }

    #[test]
    fn test_default_fits_kind() {
        assert!(DefaultValue::Integer(3).fits(&FieldKind::Integer));
        assert!(!DefaultValue::Integer(3).fits(&FieldKind::String));
        let status = FieldKind::Enum(vec!["OPEN".into(), "CLOSED".into()]);
        assert!(DefaultValue::String("OPEN".into()).fits(&status));
        assert!(!DefaultValue::String("PENDING".into()).fits(&status));
        assert!(!DefaultValue::Boolean(true).fits(&FieldKind::Array(Box::new(FieldKind::Boolean))));
    }

    #[test]
    fn test_kind_serializes_tagged() {
        let json = serde_json::to_string(&FieldKind::Array(Box::new(FieldKind::String))).unwrap();
        assert_eq!(json, r#"{"kind":"array","of":{"kind":"string"}}"#);
    }
}
