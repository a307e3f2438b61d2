//! Model builder.

use strata_ir::{AuthRule, Field, FieldKind, RelationKind};

use crate::{
    Error, Result,
    auth::Allow,
    field::FieldBuilder,
    validate::check_name,
};

/// Name of the identifier used when a model declares none.
pub const DEFAULT_IDENTIFIER: &str = "id";

/// A relationship entry declared among a model's fields.
///
/// Relations do not store a value on the declaring model; they register a
/// pending declaration resolved once every model is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    pub target: String,
    pub foreign_key: String,
}

impl Relation {
    pub fn new(
        kind: RelationKind,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            target: target.into(),
            foreign_key: foreign_key.into(),
        }
    }
}

/// A pending relationship declaration, named by its accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecl {
    pub accessor: String,
    pub kind: RelationKind,
    pub target: String,
    pub foreign_key: String,
}

/// Anything that can be declared under a field name.
#[derive(Debug, Clone)]
pub enum Member {
    Field(FieldBuilder),
    Relation(Relation),
}

impl From<FieldBuilder> for Member {
    fn from(field: FieldBuilder) -> Self {
        Member::Field(field)
    }
}

impl From<Relation> for Member {
    fn from(relation: Relation) -> Self {
        Member::Relation(relation)
    }
}

/// A finished model declaration, not yet checked against other models.
///
/// Produced by [`ModelBuilder::build`]; fields are public so other
/// front-ends can hand declarations straight to validation.
#[derive(Debug, Clone)]
pub struct ModelDecl {
    pub name: String,
    /// Stored fields in declaration order.
    pub fields: Vec<Field>,
    /// Relationship entries in declaration order.
    pub relations: Vec<RelationDecl>,
    /// Ordered primary-key field names.
    pub identifier: Vec<String>,
    pub rules: Vec<AuthRule>,
}

impl ModelDecl {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Every declared member name: fields first, then accessors.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.relations.iter().map(|r| r.accessor.as_str()))
    }
}

/// Start declaring a model.
pub fn model(name: impl Into<String>) -> ModelBuilder {
    ModelBuilder::new(name)
}

/// Fluent model declaration.
///
/// ```
/// use strata_manifest::{ModelBuilder, a};
///
/// let log = ModelBuilder::new("AttendaceLog")
///     .field("itemID", a::string().required())
///     .field("joined", a::boolean().required())
///     .identifier(["itemID"])
///     .authorization(|allow| vec![allow.authenticated()])
///     .build()
///     .unwrap();
///
/// assert_eq!(log.identifier, vec!["itemID"]);
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    members: Vec<(String, Member)>,
    identifier: Option<Vec<String>>,
    rules: Vec<AuthRule>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            identifier: None,
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a field or relationship.
    pub fn field(mut self, name: impl Into<String>, member: impl Into<Member>) -> Self {
        self.members.push((name.into(), member.into()));
        self
    }

    /// Declare several members at once, keeping their order.
    pub fn fields<I, N, M>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = (N, M)>,
        N: Into<String>,
        M: Into<Member>,
    {
        self.members.extend(
            members
                .into_iter()
                .map(|(name, member)| (name.into(), member.into())),
        );
        self
    }

    /// Set the ordered primary-key field names.
    pub fn identifier<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Attach authorization rules returned by `rules`.
    ///
    /// Repeated calls append; rules are additive.
    pub fn authorization<F>(mut self, rules: F) -> Self
    where
        F: FnOnce(&Allow) -> Vec<AuthRule>,
    {
        self.rules.extend(rules(&Allow::new()));
        self
    }

    /// Finish the declaration.
    ///
    /// # Errors
    ///
    /// Fails fast on the first malformed name, field or identifier.
    /// Duplicate member names are left for schema validation, which reports
    /// every duplicate at once.
    pub fn build(self) -> Result<ModelDecl> {
        check_name(&self.name, "model")?;

        let mut fields = Vec::new();
        let mut relations = Vec::new();
        for (name, member) in self.members {
            check_name(&name, "field")?;
            match member {
                Member::Field(builder) => fields.push(builder.build(&name)?),
                Member::Relation(relation) => {
                    check_name(&relation.target, "model")?;
                    relations.push(RelationDecl {
                        accessor: name,
                        kind: relation.kind,
                        target: relation.target,
                        foreign_key: relation.foreign_key,
                    });
                }
            }
        }

        let identifier = match self.identifier {
            Some(names) => names,
            None => {
                if !fields.iter().any(|f: &Field| f.name == DEFAULT_IDENTIFIER) {
                    fields.insert(0, implicit_id());
                }
                vec![DEFAULT_IDENTIFIER.to_string()]
            }
        };

        let decl = ModelDecl {
            name: self.name,
            fields,
            relations,
            identifier,
            rules: self.rules,
        };
        check_identifier(&decl)?;

        Ok(decl)
    }
}

fn implicit_id() -> Field {
    Field {
        name: DEFAULT_IDENTIFIER.to_string(),
        kind: FieldKind::String,
        required: true,
        default: None,
        implicit: true,
    }
}

/// Check that every identifier name is a required field of `model`.
///
/// Returns the first violation; schema validation calls this for every
/// model and collects the results.
pub fn check_identifier(model: &ModelDecl) -> Result<()> {
    if model.identifier.is_empty() {
        return Err(Error::invalid_identifier(
            &model.name,
            "the identifier must name at least one field",
        ));
    }

    for (i, name) in model.identifier.iter().enumerate() {
        if model.identifier[..i].contains(name) {
            return Err(Error::invalid_identifier(
                &model.name,
                format!("'{}' appears more than once in the identifier", name),
            ));
        }

        match model.field(name) {
            Some(field) if field.is_optional() => {
                return Err(Error::invalid_identifier(
                    &model.name,
                    format!("'{}' is optional; mark it .required() to use it as an identifier", name),
                ));
            }
            Some(field) if field.kind.is_array() => {
                return Err(Error::invalid_identifier(
                    &model.name,
                    format!("'{}' is an array and cannot identify a record", name),
                ));
            }
            Some(_) => {}
            None => {
                return Err(Error::invalid_identifier(
                    &model.name,
                    format!("'{}' is not a field of '{}'", name, model.name),
                ));
            }
        }
    }

    Ok(())
}
