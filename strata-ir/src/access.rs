//! Authorization vocabulary: operations, principal modes, rules and the
//! compiled per-operation access table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

/// A CRUDL operation on a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Operation {
    /// Every operation, in CRUDL order.
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
        Operation::List,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of caller a rule grants access to.
///
/// Serializes as its declaration name, e.g. `"owner"` or `"group:admins"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrincipalMode {
    /// Any caller presenting the schema's API key.
    PublicApiKey,
    /// Unauthenticated callers of an identity pool.
    Guest,
    /// Any signed-in user.
    Authenticated,
    /// The user recorded as the owner of a record.
    Owner,
    /// Members of a named user group.
    Group(String),
}

impl PrincipalMode {
    /// Declaration name of the mode (groups render as `group:<name>`).
    pub fn name(&self) -> String {
        match self {
            PrincipalMode::PublicApiKey => "public-api-key".to_string(),
            PrincipalMode::Guest => "guest".to_string(),
            PrincipalMode::Authenticated => "authenticated".to_string(),
            PrincipalMode::Owner => "owner".to_string(),
            PrincipalMode::Group(group) => format!("group:{}", group),
        }
    }
}

impl Serialize for PrincipalMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl std::fmt::Display for PrincipalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// A grant of some or all operations to one principal mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRule {
    pub principal: PrincipalMode,
    /// Covered operations; `None` covers all of them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<BTreeSet<Operation>>,
}

impl AuthRule {
    /// A rule covering every operation.
    pub fn new(principal: PrincipalMode) -> Self {
        Self {
            principal,
            operations: None,
        }
    }

    /// Narrow the rule to the given operations.
    ///
    /// Calling `to` more than once accumulates operations.
    pub fn to(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations
            .get_or_insert_with(BTreeSet::new)
            .extend(operations);
        self
    }

    /// Operations this rule grants.
    pub fn covered(&self) -> Vec<Operation> {
        match &self.operations {
            Some(ops) => ops.iter().copied().collect(),
            None => Operation::ALL.to_vec(),
        }
    }
}

/// Compiled access-control table for one model.
///
/// Every operation is always present; an empty set means no principal mode
/// may perform it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessTable {
    allowed: BTreeMap<Operation, BTreeSet<PrincipalMode>>,
}

impl AccessTable {
    /// A table denying every operation.
    pub fn deny_all() -> Self {
        Self {
            allowed: Operation::ALL
                .iter()
                .map(|op| (*op, BTreeSet::new()))
                .collect(),
        }
    }

    /// Allow `principal` to perform `operation`.
    pub fn grant(&mut self, operation: Operation, principal: PrincipalMode) {
        self.allowed.entry(operation).or_default().insert(principal);
    }

    /// Principal modes allowed to perform `operation`.
    pub fn allowed(&self, operation: Operation) -> &BTreeSet<PrincipalMode> {
        // deny_all seeds every operation, so the entry is always present
        &self.allowed[&operation]
    }

    pub fn allows(&self, operation: Operation, principal: &PrincipalMode) -> bool {
        self.allowed(operation).contains(principal)
    }

    /// Operations at least one principal mode may perform.
    pub fn permitted_operations(&self) -> Vec<Operation> {
        self.allowed
            .iter()
            .filter(|(_, principals)| !principals.is_empty())
            .map(|(op, _)| *op)
            .collect()
    }

    /// Returns true if no operation is allowed for anyone.
    pub fn is_deny_all(&self) -> bool {
        self.allowed.values().all(BTreeSet::is_empty)
    }

    /// Iterate operations with their allowed principal modes, in CRUDL order.
    pub fn iter(&self) -> impl Iterator<Item = (Operation, &BTreeSet<PrincipalMode>)> {
        self.allowed.iter().map(|(op, principals)| (*op, principals))
    }
}

impl Default for AccessTable {
    fn default() -> Self {
        Self::deny_all()
    }
}

/// How callers authenticate against the generated API by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    #[default]
    ApiKey,
    UserPool,
    Iam,
    Oidc,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::ApiKey => "api-key",
            AuthMode::UserPool => "user-pool",
            AuthMode::Iam => "iam",
            AuthMode::Oidc => "oidc",
        }
    }
}

/// API key settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiKeyConfig {
    /// Days until the issued key expires.
    pub expires_in_days: u32,
}

/// Schema-wide authorization settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuthorizationModes {
    pub default_mode: AuthMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKeyConfig>,
}

impl AuthorizationModes {
    /// Returns true if callers can present an API key.
    pub fn accepts_api_key(&self) -> bool {
        self.default_mode == AuthMode::ApiKey || self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_without_operations_covers_all() {
        let rule = AuthRule::new(PrincipalMode::Authenticated);
        assert_eq!(rule.covered(), Operation::ALL.to_vec());
    }

    #[test]
    fn test_rule_to_accumulates() {
        let rule = AuthRule::new(PrincipalMode::Guest)
            .to([Operation::Read])
            .to([Operation::List, Operation::Read]);
        assert_eq!(rule.covered(), vec![Operation::Read, Operation::List]);
    }

    #[test]
    fn test_deny_all_table() {
        let table = AccessTable::deny_all();
        assert!(table.is_deny_all());
        for op in Operation::ALL {
            assert!(table.allowed(op).is_empty());
        }
        assert!(table.permitted_operations().is_empty());
    }

    #[test]
    fn test_grant() {
        let mut table = AccessTable::deny_all();
        table.grant(Operation::Read, PrincipalMode::Owner);
        assert!(table.allows(Operation::Read, &PrincipalMode::Owner));
        assert!(!table.allows(Operation::Read, &PrincipalMode::Guest));
        assert_eq!(table.permitted_operations(), vec![Operation::Read]);
        assert!(!table.is_deny_all());
    }

    #[test]
    fn test_principal_names() {
        assert_eq!(PrincipalMode::PublicApiKey.to_string(), "public-api-key");
        assert_eq!(
            PrincipalMode::Group("admins".into()).to_string(),
            "group:admins"
        );
    }

    #[test]
    fn test_api_key_acceptance() {
        let modes = AuthorizationModes {
            default_mode: AuthMode::UserPool,
            api_key: None,
        };
        assert!(!modes.accepts_api_key());
        assert!(AuthorizationModes::default().accepts_api_key());
    }

    #[test]
    fn test_principals_serialize_as_declaration_names() {
        let mut table = AccessTable::deny_all();
        table.grant(Operation::Read, PrincipalMode::Group("admins".into()));
        table.grant(Operation::Read, PrincipalMode::PublicApiKey);

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(
            value["read"],
            serde_json::json!(["public-api-key", "group:admins"])
        );
    }
}
