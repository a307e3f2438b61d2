//! Compilation context passed through pipeline phases.

use std::collections::HashMap;

use strata_ir::{Model, ModelId, Relationship, Schema};
use strata_manifest::Declarations;

use super::diagnostic::{Diagnostic, Severity};
use crate::StructuralError;

/// State carried through every phase.
///
/// Phases read the declarations, fill in the lowered models and resolved
/// relationships, and append errors and diagnostics. Nothing here is
/// published until [`CompilationContext::into_schema`] succeeds.
#[derive(Debug)]
pub struct CompilationContext {
    /// Declarations being validated.
    pub declarations: Declarations,
    /// Lowered models, one per distinct name (populated by LowerPhase).
    pub models: Vec<Model>,
    /// Resolved relationship edges (populated by ResolvePhase).
    pub relationships: Vec<Relationship>,
    /// Reference cycles (populated by AnalyzePhase).
    pub cycles: Vec<Vec<ModelId>>,
    /// Structural errors; any entry blocks the schema.
    pub errors: Vec<StructuralError>,
    /// Advisory findings.
    pub diagnostics: Vec<Diagnostic>,
    index: HashMap<String, ModelId>,
}

impl CompilationContext {
    pub fn new(declarations: Declarations) -> Self {
        Self {
            declarations,
            models: Vec::new(),
            relationships: Vec::new(),
            cycles: Vec::new(),
            errors: Vec::new(),
            diagnostics: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns true if a structural error or an error diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
            + self
                .diagnostics
                .iter()
                .filter(|d| d.severity.is_error())
                .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_error(&mut self, error: StructuralError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics of the given severity, in the order they were recorded.
    pub fn diagnostics_of(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    /// Register a lowered model and return its id.
    pub(crate) fn push_model(&mut self, mut model: Model) -> ModelId {
        let id = ModelId(self.models.len());
        model.id = id;
        self.index.insert(model.name.clone(), id);
        self.models.push(model);
        id
    }

    /// Look up a lowered model by name.
    pub fn model_id(&self, name: &str) -> Option<ModelId> {
        self.index.get(name).copied()
    }

    pub fn model(&self, id: ModelId) -> &Model {
        &self.models[id.0]
    }

    /// Publish the schema, or hand back every structural error found.
    ///
    /// Error diagnostics from custom lints or phases are not consulted here;
    /// [`Pipeline::run`](super::Pipeline::run) refuses them.
    pub fn into_schema(self) -> Result<Schema, Vec<StructuralError>> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        Ok(Schema::from_parts(
            self.models,
            self.relationships,
            self.cycles,
            self.declarations.authorization,
        ))
    }
}
