//! Lower phase - model declarations become indexed models.

use eyre::Result;
use strata_ir::{Model, ModelId};
use tracing::debug;

use crate::{
    authorization::compile,
    pipeline::{CompilationContext, Phase},
};

/// Phase that assigns model ids and compiles authorization tables.
///
/// Only the first declaration of each model name is lowered; later ones
/// were already reported as duplicates.
pub struct LowerPhase;

impl LowerPhase {
    pub fn apply(&self, ctx: &mut CompilationContext) {
        let models: Vec<Model> = ctx
            .declarations
            .models
            .iter()
            .map(|decl| Model {
                id: ModelId(0),
                name: decl.name.clone(),
                fields: decl.fields.clone(),
                identifier: decl.identifier.clone(),
                rules: decl.rules.clone(),
                access: compile(&decl.rules),
            })
            .collect();

        for model in models {
            if ctx.model_id(&model.name).is_some() {
                continue;
            }
            let name = model.name.clone();
            let id = ctx.push_model(model);
            debug!(model = %name, id = id.0, "lowered model");
        }
    }
}

impl Phase for LowerPhase {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn description(&self) -> &'static str {
        "Index models and compile authorization rules"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        self.apply(ctx);
        Ok(())
    }
}
