//! Authorization rule declaration.

use strata_ir::{AuthRule, Operation, PrincipalMode};

use crate::{Error, Result};

/// Capability handed to authorization callbacks.
///
/// Exposes one constructor per supported principal mode:
///
/// ```
/// use strata_ir::Operation;
/// use strata_manifest::{ModelBuilder, a};
///
/// let post = ModelBuilder::new("Post")
///     .field("title", a::string().required())
///     .authorization(|allow| {
///         vec![
///             allow.owner(),
///             allow.guest().to([Operation::Read, Operation::List]),
///         ]
///     });
/// ```
#[derive(Debug)]
pub struct Allow {
    _private: (),
}

impl Allow {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    /// Callers presenting the schema's API key.
    pub fn public_api_key(&self) -> AuthRule {
        AuthRule::new(PrincipalMode::PublicApiKey)
    }

    /// Unauthenticated identity-pool callers.
    pub fn guest(&self) -> AuthRule {
        AuthRule::new(PrincipalMode::Guest)
    }

    /// Any signed-in user.
    pub fn authenticated(&self) -> AuthRule {
        AuthRule::new(PrincipalMode::Authenticated)
    }

    /// The owner of each record.
    pub fn owner(&self) -> AuthRule {
        AuthRule::new(PrincipalMode::Owner)
    }

    /// Members of the named group.
    pub fn group(&self, name: impl Into<String>) -> AuthRule {
        AuthRule::new(PrincipalMode::Group(name.into()))
    }
}

/// Parse a principal mode by its declaration name.
pub fn parse_principal_mode(mode: &str) -> Result<PrincipalMode> {
    let parsed = match mode {
        "public-api-key" => PrincipalMode::PublicApiKey,
        "guest" => PrincipalMode::Guest,
        "authenticated" => PrincipalMode::Authenticated,
        "owner" => PrincipalMode::Owner,
        _ => match mode.strip_prefix("group:") {
            Some(group) if !group.is_empty() => PrincipalMode::Group(group.to_string()),
            _ => {
                return Err(Box::new(Error::UnknownPrincipalMode {
                    mode: mode.to_string(),
                }));
            }
        },
    };
    Ok(parsed)
}

/// Parse an operation by name.
pub fn parse_operation(operation: &str) -> Result<Operation> {
    Operation::ALL
        .into_iter()
        .find(|op| op.as_str() == operation)
        .ok_or_else(|| {
            Box::new(Error::UnknownOperation {
                operation: operation.to_string(),
            })
        })
}

/// Build a rule from declaration strings.
///
/// `operations` of `None` covers every operation.
pub fn parse_rule(mode: &str, operations: Option<&[String]>) -> Result<AuthRule> {
    let rule = AuthRule::new(parse_principal_mode(mode)?);
    match operations {
        Some(ops) => {
            let ops = ops
                .iter()
                .map(|op| parse_operation(op))
                .collect::<Result<Vec<_>>>()?;
            Ok(rule.to(ops))
        }
        None => Ok(rule),
    }
}
