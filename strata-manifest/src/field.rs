//! Field type library.
//!
//! Fields are declared with the constructors in [`a`] and refined with
//! modifiers:
//!
//! ```
//! use strata_manifest::a;
//!
//! let count = a::integer().required();
//! let names = a::string().array();
//! let status = a::enumeration(["OPEN", "CLOSED"]).default("OPEN");
//! ```
//!
//! Fields are optional unless marked `.required()`.

use strata_ir::{DefaultValue, Field, FieldKind};

use crate::{Error, Result};

/// Modifiers applied to a field kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub required: bool,
    pub default: Option<DefaultValue>,
}

/// Construct a field from a kind and its modifiers.
///
/// # Errors
///
/// Returns `UnsupportedFieldKind` for malformed kinds (nested arrays, empty
/// or repeated enum members) and `InvalidDefault` when the default does not
/// fit the kind.
pub fn field(name: &str, kind: FieldKind, modifiers: Modifiers) -> Result<Field> {
    check_kind(&kind)?;

    if let Some(default) = &modifiers.default {
        if kind.is_array() {
            return Err(Error::invalid_default(name, "array fields cannot have a default"));
        }
        if !default.fits(&kind) {
            return Err(Error::invalid_default(
                name,
                format!("default {} is not a valid {}", default, kind),
            ));
        }
    }

    Ok(Field {
        name: name.to_string(),
        kind,
        required: modifiers.required,
        default: modifiers.default,
        implicit: false,
    })
}

/// Wrap `kind` in an array.
///
/// # Errors
///
/// Arrays of arrays are not supported.
pub fn array_of(kind: FieldKind) -> Result<FieldKind> {
    if kind.is_array() {
        return Err(Error::unsupported_field_kind(
            format!("{}[]", kind),
            "arrays of arrays are not supported; declare a separate model instead",
        ));
    }
    Ok(FieldKind::Array(Box::new(kind)))
}

fn check_kind(kind: &FieldKind) -> Result<()> {
    match kind {
        FieldKind::Enum(members) => {
            if members.is_empty() {
                return Err(Error::unsupported_field_kind(
                    "enum",
                    "an enum must declare at least one member",
                ));
            }
            for (i, member) in members.iter().enumerate() {
                if member.is_empty() {
                    return Err(Error::unsupported_field_kind(
                        "enum",
                        "enum members cannot be empty",
                    ));
                }
                if members[..i].contains(member) {
                    return Err(Error::unsupported_field_kind(
                        "enum",
                        format!("enum member '{}' is declared twice", member),
                    ));
                }
            }
            Ok(())
        }
        FieldKind::Array(inner) => {
            if inner.is_array() {
                return Err(Error::unsupported_field_kind(
                    kind.to_string(),
                    "arrays of arrays are not supported; declare a separate model instead",
                ));
            }
            check_kind(inner)
        }
        _ => Ok(()),
    }
}

/// Fluent field declaration, finished by the model builder.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    kind: FieldKind,
    array_depth: usize,
    modifiers: Modifiers,
}

impl FieldBuilder {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            array_depth: 0,
            modifiers: Modifiers::default(),
        }
    }

    /// Values must always be present.
    pub fn required(mut self) -> Self {
        self.modifiers.required = true;
        self
    }

    /// Store a list of this kind instead of a single value.
    pub fn array(mut self) -> Self {
        self.array_depth += 1;
        self
    }

    /// Value used when a record is created without one.
    pub fn default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.modifiers.default = Some(value.into());
        self
    }

    /// Finish the declaration under `name`.
    pub fn build(self, name: &str) -> Result<Field> {
        let mut kind = self.kind;
        for _ in 0..self.array_depth {
            kind = array_of(kind)?;
        }
        field(name, kind, self.modifiers)
    }
}

/// Field and relationship constructors.
pub mod a {
    use strata_ir::{FieldKind, RelationKind};

    use super::FieldBuilder;
    use crate::model::Relation;

    pub fn string() -> FieldBuilder {
        FieldBuilder::new(FieldKind::String)
    }

    pub fn integer() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Integer)
    }

    pub fn boolean() -> FieldBuilder {
        FieldBuilder::new(FieldKind::Boolean)
    }

    /// A closed set of string members.
    pub fn enumeration<I, S>(members: I) -> FieldBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldBuilder::new(FieldKind::Enum(
            members.into_iter().map(Into::into).collect(),
        ))
    }

    /// One-to-many accessor; `target` holds `foreign_key`.
    pub fn has_many(target: impl Into<String>, foreign_key: impl Into<String>) -> Relation {
        Relation::new(RelationKind::HasMany, target, foreign_key)
    }

    /// Many-to-one accessor; the declaring model holds `foreign_key`.
    pub fn belongs_to(target: impl Into<String>, foreign_key: impl Into<String>) -> Relation {
        Relation::new(RelationKind::BelongsTo, target, foreign_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_default_to_optional() {
        let field = a::string().build("content").unwrap();
        assert!(field.is_optional());
        assert_eq!(field.kind, FieldKind::String);
        assert!(!field.implicit);
    }

    #[test]
    fn test_required_modifier() {
        let field = a::integer().required().build("time").unwrap();
        assert!(field.required);
    }

    #[test]
    fn test_array_modifier() {
        let field = a::string().array().build("firstTimeNames").unwrap();
        assert_eq!(field.kind, FieldKind::Array(Box::new(FieldKind::String)));
    }

    #[test]
    fn test_nested_array_is_unsupported() {
        let err = a::string().array().array().build("matrix").unwrap_err();
        assert!(matches!(*err, Error::UnsupportedFieldKind { .. }));

        let err = array_of(FieldKind::Array(Box::new(FieldKind::Integer))).unwrap_err();
        assert!(matches!(*err, Error::UnsupportedFieldKind { .. }));
    }

    #[test]
    fn test_nested_array_kind_rejected_by_field() {
        let nested = FieldKind::Array(Box::new(FieldKind::Array(Box::new(FieldKind::Boolean))));
        let err = field("flags", nested, Modifiers::default()).unwrap_err();
        assert!(matches!(*err, Error::UnsupportedFieldKind { .. }));
    }

    #[test]
    fn test_enum_members_checked() {
        let empty: [&str; 0] = [];
        assert!(a::enumeration(empty).build("status").is_err());
        assert!(a::enumeration(["A", "A"]).build("status").is_err());
        assert!(a::enumeration(["A", "B"]).array().build("statuses").is_ok());
    }

    #[test]
    fn test_default_must_fit_kind() {
        assert!(a::integer().default(3_i64).build("count").is_ok());
        assert!(a::boolean().default(false).build("joined").is_ok());

        let err = a::integer().default("three").build("count").unwrap_err();
        assert!(matches!(*err, Error::InvalidDefault { .. }));

        let err = a::enumeration(["OPEN", "CLOSED"])
            .default("PENDING")
            .build("status")
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidDefault { .. }));
    }

    #[test]
    fn test_array_default_rejected() {
        let err = a::string().array().default("x").build("tags").unwrap_err();
        assert!(matches!(*err, Error::InvalidDefault { .. }));
    }

    #[test]
    fn test_field_constructor() {
        let field = field(
            "region",
            FieldKind::String,
            Modifiers {
                required: true,
                default: Some("eu".into()),
            },
        )
        .unwrap();
        assert!(field.required);
        assert_eq!(field.default, Some(DefaultValue::String("eu".into())));
    }
}
