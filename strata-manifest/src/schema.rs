//! Schema-level declaration.

use strata_ir::{ApiKeyConfig, AuthorizationModes};
use tracing::debug;

use crate::{
    Error, Result,
    model::{ModelBuilder, ModelDecl, RelationDecl},
};

/// Accepted range for API key lifetimes, in days.
pub const API_KEY_EXPIRY_DAYS: std::ops::RangeInclusive<u32> = 1..=365;

/// Every declared model, ready for validation.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    /// Models in declaration order.
    pub models: Vec<ModelDecl>,
    pub authorization: AuthorizationModes,
}

impl Declarations {
    /// Pending relationship declarations with their declaring model.
    pub fn relations(&self) -> impl Iterator<Item = (&ModelDecl, &RelationDecl)> {
        self.models
            .iter()
            .flat_map(|model| model.relations.iter().map(move |rel| (model, rel)))
    }

    /// The first model declared under `name`.
    pub fn model(&self, name: &str) -> Option<&ModelDecl> {
        self.models.iter().find(|m| m.name == name)
    }
}

/// Start declaring a schema.
pub fn schema() -> SchemaBuilder {
    SchemaBuilder::new()
}

/// Collects model declarations.
///
/// ```
/// use strata_manifest::{SchemaBuilder, a, model};
///
/// let declarations = SchemaBuilder::new()
///     .model(
///         model("Todo")
///             .field("content", a::string())
///             .authorization(|allow| vec![allow.public_api_key()]),
///     )?
///     .build();
///
/// assert_eq!(declarations.models.len(), 1);
/// # Ok::<(), Box<strata_manifest::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    models: Vec<ModelDecl>,
    authorization: AuthorizationModes,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and add a model.
    ///
    /// # Errors
    ///
    /// Propagates the model builder's error for this model.
    pub fn model(mut self, builder: ModelBuilder) -> Result<Self> {
        let decl = builder.build()?;
        debug!(model = %decl.name, fields = decl.fields.len(), "declared model");
        self.models.push(decl);
        Ok(self)
    }

    /// Add an already built declaration.
    pub fn declared(mut self, decl: ModelDecl) -> Self {
        self.models.push(decl);
        self
    }

    /// Set schema-wide authorization modes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSetting` when the API key lifetime is out of range.
    pub fn authorization_modes(mut self, modes: AuthorizationModes) -> Result<Self> {
        let out_of_range = modes
            .api_key
            .filter(|key| !API_KEY_EXPIRY_DAYS.contains(&key.expires_in_days));
        if let Some(ApiKeyConfig { expires_in_days }) = out_of_range {
            return Err(Error::invalid_setting(
                "api_key.expires_in_days",
                format!(
                    "API keys must expire within {} to {} days, got {}",
                    API_KEY_EXPIRY_DAYS.start(),
                    API_KEY_EXPIRY_DAYS.end(),
                    expires_in_days
                ),
            ));
        }
        self.authorization = modes;
        Ok(self)
    }

    pub fn build(self) -> Declarations {
        Declarations {
            models: self.models,
            authorization: self.authorization,
        }
    }
}
