//! Analyze phase - records reference cycles between models.

use eyre::Result;
use strata_ir::{ModelId, Relationship};

use crate::pipeline::{CompilationContext, Diagnostic, Phase};

/// Phase that finds cycles in the model reference graph.
///
/// Cycles are legal; they are recorded on the schema and reported as info
/// diagnostics.
pub struct AnalyzePhase;

impl AnalyzePhase {
    pub fn apply(&self, ctx: &mut CompilationContext) {
        let cycles = reference_cycles(ctx.models.len(), &ctx.relationships);

        for cycle in &cycles {
            let mut names: Vec<&str> = cycle
                .iter()
                .map(|id| ctx.models[id.0].name.as_str())
                .collect();
            let first = names[0];
            names.push(first);
            ctx.diagnostics.push(
                Diagnostic::info(
                    "analyze",
                    format!("reference cycle: {}", names.join(" -> ")),
                )
                .at(format!("models.{}", first)),
            );
        }

        ctx.cycles = cycles;
    }
}

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Record reference cycles between models"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        self.apply(ctx);
        Ok(())
    }
}

/// Strongly connected components with more than one model, plus models
/// that reference themselves. Each cycle is sorted by id, and cycles are
/// ordered by their smallest id.
pub fn reference_cycles(model_count: usize, relationships: &[Relationship]) -> Vec<Vec<ModelId>> {
    let mut edges = vec![Vec::new(); model_count];
    for r in relationships {
        edges[r.source.0].push(r.target.0);
    }

    let mut tarjan = Tarjan::new(&edges);
    for node in 0..model_count {
        if tarjan.index[node].is_none() {
            tarjan.visit(node);
        }
    }

    let mut cycles: Vec<Vec<ModelId>> = tarjan
        .components
        .into_iter()
        .filter(|component| component.len() > 1 || edges[component[0]].contains(&component[0]))
        .map(|mut component| {
            component.sort_unstable();
            component.into_iter().map(ModelId).collect()
        })
        .collect();
    cycles.sort();
    cycles
}

struct Tarjan<'a> {
    edges: &'a [Vec<usize>],
    next_index: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl<'a> Tarjan<'a> {
    fn new(edges: &'a [Vec<usize>]) -> Self {
        let n = edges.len();
        Self {
            edges,
            next_index: 0,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn visit(&mut self, node: usize) {
        self.index[node] = Some(self.next_index);
        self.lowlink[node] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[node] = true;

        let edges = self.edges;
        for &next in &edges[node] {
            match self.index[next] {
                None => {
                    self.visit(next);
                    self.lowlink[node] = self.lowlink[node].min(self.lowlink[next]);
                }
                Some(index) if self.on_stack[next] => {
                    self.lowlink[node] = self.lowlink[node].min(index);
                }
                Some(_) => {}
            }
        }

        if Some(self.lowlink[node]) == self.index[node] {
            let mut component = Vec::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack[member] = false;
                component.push(member);
                if member == node {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

#[cfg(test)]
mod tests {
    use strata_ir::{RelationKind, RelationshipId};

    use super::*;

    fn edge(id: usize, source: usize, target: usize) -> Relationship {
        Relationship {
            id: RelationshipId(id),
            source: ModelId(source),
            kind: RelationKind::HasMany,
            target: ModelId(target),
            accessor: format!("r{}", id),
            foreign_key: "fk".into(),
            referencing: ModelId(target),
            paired_with: None,
        }
    }

    #[test]
    fn test_acyclic() {
        let cycles = reference_cycles(3, &[edge(0, 0, 1), edge(1, 1, 2)]);
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_mutual_reference() {
        let cycles = reference_cycles(3, &[edge(0, 2, 1), edge(1, 1, 2), edge(2, 0, 1)]);
        assert_eq!(cycles, vec![vec![ModelId(1), ModelId(2)]]);
    }

    #[test]
    fn test_self_reference() {
        let cycles = reference_cycles(2, &[edge(0, 1, 1)]);
        assert_eq!(cycles, vec![vec![ModelId(1)]]);
    }

    #[test]
    fn test_separate_cycles_ordered() {
        let cycles = reference_cycles(
            5,
            &[
                edge(0, 3, 4),
                edge(1, 4, 3),
                edge(2, 0, 1),
                edge(3, 1, 2),
                edge(4, 2, 0),
            ],
        );
        assert_eq!(
            cycles,
            vec![
                vec![ModelId(0), ModelId(1), ModelId(2)],
                vec![ModelId(3), ModelId(4)],
            ]
        );
    }
}
