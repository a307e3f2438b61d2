//! Conversion from the file format into builder declarations.

use std::str::FromStr;

use strata_ir::{ApiKeyConfig, AuthMode, AuthorizationModes, DefaultValue, FieldKind, RelationKind};
use tracing::debug;

use super::{AuthorizationSection, FieldEntry, FieldTable, Manifest, ModelEntry};
use crate::{
    Declarations, Error, Result, SchemaBuilder,
    auth::parse_rule,
    error::SourceContext,
    field::FieldBuilder,
    model::{Member, ModelBuilder, Relation},
};

/// Filename used in diagnostics when none is given.
pub const DEFAULT_FILENAME: &str = "strata.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(s, DEFAULT_FILENAME);
        toml::from_str(s).map_err(|e| source_ctx.parse_error(e))
    }
}

impl FromStr for Declarations {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_declarations(s, DEFAULT_FILENAME)
    }
}

/// Parse a declaration file into model declarations.
///
/// Errors carry the file source and point at the offending name.
pub fn parse_declarations(content: &str, filename: &str) -> Result<Declarations> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    let declarations = manifest.into_declarations(&source_ctx)?;
    debug!(
        file = filename,
        models = declarations.models.len(),
        "parsed declarations"
    );
    Ok(declarations)
}

impl Manifest {
    /// Drive the builders with this file's content.
    pub fn into_declarations(self, ctx: &SourceContext) -> Result<Declarations> {
        let modes = self
            .authorization
            .to_modes()
            .map_err(|e| ctx.declaration_error("authorization", &[], e))?;
        let mut builder = SchemaBuilder::new()
            .authorization_modes(modes)
            .map_err(|e| ctx.declaration_error("expires_in_days", &["authorization"], e))?;

        for (name, entry) in self.models {
            let model = entry.into_builder(&name, ctx)?;
            builder = builder
                .model(model)
                .map_err(|e| ctx.declaration_error(&name, &["models"], e))?;
        }

        Ok(builder.build())
    }
}

impl AuthorizationSection {
    fn to_modes(&self) -> Result<AuthorizationModes> {
        let default_mode = match self.default_mode.as_deref() {
            None => AuthMode::default(),
            Some(mode) => parse_auth_mode(mode)?,
        };
        Ok(AuthorizationModes {
            default_mode,
            api_key: self.api_key.as_ref().map(|key| ApiKeyConfig {
                expires_in_days: key.expires_in_days,
            }),
        })
    }
}

fn parse_auth_mode(mode: &str) -> Result<AuthMode> {
    [
        AuthMode::ApiKey,
        AuthMode::UserPool,
        AuthMode::Iam,
        AuthMode::Oidc,
    ]
    .into_iter()
    .find(|m| m.as_str() == mode)
    .ok_or_else(|| {
        Error::invalid_setting(
            "authorization.default_mode",
            format!(
                "unknown mode '{}'; expected one of api-key, user-pool, iam, oidc",
                mode
            ),
        )
    })
}

impl ModelEntry {
    fn into_builder(self, name: &str, ctx: &SourceContext) -> Result<ModelBuilder> {
        let field_path = ["models", name, "fields"];
        let mut builder = ModelBuilder::new(name);

        for (field_name, entry) in self.fields {
            let member = entry
                .into_member(&field_name)
                .map_err(|e| ctx.declaration_error(&field_name, &field_path, e))?;
            // Check fields here so errors point at the field rather than the model
            if let Member::Field(field) = &member {
                field
                    .clone()
                    .build(&field_name)
                    .map_err(|e| ctx.declaration_error(&field_name, &field_path, e))?;
            }
            builder = builder.field(field_name, member);
        }

        if let Some(identifier) = self.identifier {
            builder = builder.identifier(identifier);
        }

        let rules = self
            .authorization
            .iter()
            .map(|rule| parse_rule(&rule.allow, rule.operations.as_deref()))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| ctx.declaration_error(name, &["models"], e))?;

        Ok(builder.authorization(move |_| rules))
    }
}

impl FieldEntry {
    fn into_member(self, name: &str) -> Result<Member> {
        match self {
            FieldEntry::Shorthand(ty) => Ok(Member::Field(FieldBuilder::new(parse_kind(&ty, None)?))),
            FieldEntry::Table(table) => table.into_member(name),
        }
    }
}

impl FieldTable {
    fn into_member(self, name: &str) -> Result<Member> {
        let relation = match (self.has_many.clone(), self.belongs_to.clone()) {
            (Some(_), Some(_)) => {
                return Err(Error::validation(format!(
                    "'{}' cannot declare both has_many and belongs_to",
                    name
                )));
            }
            (Some(target), None) => Some((RelationKind::HasMany, target)),
            (None, Some(target)) => Some((RelationKind::BelongsTo, target)),
            (None, None) => None,
        };

        if let Some((kind, target)) = relation {
            return self.into_relation(name, kind, target);
        }

        if self.references.is_some() {
            return Err(Error::validation(format!(
                "'{}' sets `references`, which is only valid with has_many or belongs_to",
                name
            )));
        }

        let ty = self
            .ty
            .ok_or_else(|| Error::validation(format!("field '{}' must declare a `type`", name)))?;
        let mut field = FieldBuilder::new(parse_kind(&ty, self.values)?);
        if self.required {
            field = field.required();
        }
        if self.array {
            field = field.array();
        }
        if let Some(value) = self.default {
            field = field.default(default_value(name, value)?);
        }

        Ok(Member::Field(field))
    }

    fn into_relation(self, name: &str, kind: RelationKind, target: String) -> Result<Member> {
        let has_field_options = self.ty.is_some()
            || self.required
            || self.array
            || self.values.is_some()
            || self.default.is_some();
        if has_field_options {
            return Err(Error::validation(format!(
                "relationship '{}' only accepts {} and `references`",
                name,
                match kind {
                    RelationKind::HasMany => "`has_many`",
                    RelationKind::BelongsTo => "`belongs_to`",
                }
            )));
        }

        let foreign_key = self.references.ok_or_else(|| {
            Error::validation(format!(
                "relationship '{}' must name its foreign key with `references`",
                name
            ))
        })?;

        Ok(Member::Relation(Relation::new(kind, target, foreign_key)))
    }
}

fn parse_kind(ty: &str, values: Option<Vec<String>>) -> Result<FieldKind> {
    let kind = match ty {
        "string" => FieldKind::String,
        "integer" => FieldKind::Integer,
        "boolean" => FieldKind::Boolean,
        "enum" => {
            let members = values.ok_or_else(|| {
                Error::unsupported_field_kind("enum", "enum fields must list their `values`")
            })?;
            return Ok(FieldKind::Enum(members));
        }
        other => {
            return Err(Error::unsupported_field_kind(
                other,
                "valid kinds are: string, integer, boolean, enum",
            ));
        }
    };

    if values.is_some() {
        return Err(Error::validation(format!(
            "`values` is only valid for enum fields, not {}",
            ty
        )));
    }
    Ok(kind)
}

fn default_value(field: &str, value: toml::Value) -> Result<DefaultValue> {
    match value {
        toml::Value::String(s) => Ok(DefaultValue::String(s)),
        toml::Value::Integer(i) => Ok(DefaultValue::Integer(i)),
        toml::Value::Boolean(b) => Ok(DefaultValue::Boolean(b)),
        other => Err(Error::invalid_default(
            field,
            format!(
                "defaults must be strings, integers or booleans, got {}",
                other.type_str()
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use strata_ir::{Operation, PrincipalMode};

    use super::*;

    fn parse(content: &str) -> Result<Declarations> {
        content.parse()
    }

    #[test]
    fn test_parse_models_in_file_order() {
        let decls = parse(
            r#"
            [models.Todo]
            authorization = [{ allow = "public-api-key" }]

            [models.Todo.fields]
            content = "string"

            [models.AttendaceLog]
            identifier = ["itemID"]
            authorization = [{ allow = "authenticated" }]

            [models.AttendaceLog.fields]
            itemID = { type = "string", required = true }
            time = { type = "integer", required = true }
            joined = { type = "boolean", required = true }
            "#,
        )
        .unwrap();

        let names: Vec<_> = decls.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Todo", "AttendaceLog"]);

        let log = decls.model("AttendaceLog").unwrap();
        let fields: Vec<_> = log.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["itemID", "time", "joined"]);
        assert_eq!(log.rules[0].principal, PrincipalMode::Authenticated);

        let todo = decls.model("Todo").unwrap();
        assert_eq!(todo.identifier, vec!["id"]);
        assert!(todo.field("content").unwrap().is_optional());
    }

    #[test]
    fn test_parse_relations_and_arrays() {
        let decls = parse(
            r#"
            [models.EventReport]
            identifier = ["eventID"]

            [models.EventReport.fields]
            eventID = { type = "string", required = true }
            attendaceLog = { has_many = "AttendaceLog", references = "itemID" }
            firstTimeNames = { type = "string", array = true }
            "#,
        )
        .unwrap();

        let report = decls.model("EventReport").unwrap();
        assert_eq!(report.relations.len(), 1);
        assert_eq!(report.relations[0].target, "AttendaceLog");
        assert_eq!(report.relations[0].kind, RelationKind::HasMany);
        assert_eq!(
            report.field("firstTimeNames").unwrap().kind,
            FieldKind::Array(Box::new(FieldKind::String))
        );
    }

    #[test]
    fn test_parse_enum_with_default() {
        let decls = parse(
            r#"
            [models.Ticket.fields]
            status = { type = "enum", values = ["OPEN", "CLOSED"], default = "OPEN" }
            "#,
        )
        .unwrap();
        let status = decls.model("Ticket").unwrap().field("status").unwrap();
        assert_eq!(status.default, Some(DefaultValue::String("OPEN".into())));
    }

    #[test]
    fn test_parse_rule_operations() {
        let decls = parse(
            r#"
            [models.Post]
            authorization = [
                { allow = "owner" },
                { allow = "guest", operations = ["read", "list"] },
            ]
            "#,
        )
        .unwrap();
        let rules = &decls.model("Post").unwrap().rules;
        assert_eq!(rules[1].covered(), vec![Operation::Read, Operation::List]);
    }

    #[test]
    fn test_parse_authorization_modes() {
        let decls = parse(
            r#"
            [authorization]
            default_mode = "user-pool"
            api_key = { expires_in_days = 30 }
            "#,
        )
        .unwrap();
        assert_eq!(decls.authorization.default_mode, AuthMode::UserPool);
        assert_eq!(
            decls.authorization.api_key,
            Some(ApiKeyConfig {
                expires_in_days: 30
            })
        );
    }

    #[test]
    fn test_unsupported_kind_points_at_field() {
        let err = parse(
            r#"
            [models.Todo.fields]
            content = "float"
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::Declaration { ref name, .. } if name == "content"));
        assert!(matches!(err.root(), Error::UnsupportedFieldKind { .. }));
    }

    #[test]
    fn test_unknown_principal_mode() {
        let err = parse(
            r#"
            [models.Todo]
            authorization = [{ allow = "admin" }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err.root(), Error::UnknownPrincipalMode { .. }));
    }

    #[test]
    fn test_invalid_identifier_points_at_model() {
        let err = parse(
            r#"
            [models.PlayerEvent]
            identifier = ["itemID"]

            [models.PlayerEvent.fields]
            itemID = "string"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Declaration { ref name, .. } if name == "PlayerEvent"));
        assert!(matches!(err.root(), Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_relation_requires_references() {
        let err = parse(
            r#"
            [models.A.fields]
            items = { has_many = "B" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err.root(), Error::Validation { .. }));
    }

    #[test]
    fn test_enum_requires_values() {
        let err = parse(
            r#"
            [models.A.fields]
            status = "enum"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err.root(), Error::UnsupportedFieldKind { .. }));
    }

    #[test]
    fn test_unknown_default_mode() {
        let err = parse(
            r#"
            [authorization]
            default_mode = "magic"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err.root(), Error::InvalidSetting { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse("[models.Todo\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_float_default_rejected() {
        let err = parse(
            r#"
            [models.A.fields]
            ratio = { type = "integer", default = 0.5 }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err.root(), Error::InvalidDefault { .. }));
    }
}
