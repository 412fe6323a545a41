//! Lint for user types that reach themselves through references.

use std::collections::HashMap;

use apidef_core::{Diagnostic, DiagnosticKind};
use apidef_expr::{DefinitionKind, RootExpr};
use indexmap::IndexMap;

use super::{super::Lint, error};

/// Lint that errors when a chain of named-type references leads back to its
/// start. Each cycle is reported once, at the first type on it in
/// declaration order.
pub struct TypeCycleLint;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Active,
    Done,
}

impl Lint for TypeCycleLint {
    fn name(&self) -> &'static str {
        "type-cycle"
    }

    fn description(&self) -> &'static str {
        "Reject named types that reference themselves"
    }

    fn check(&self, root: &RootExpr, diagnostics: &mut Vec<Diagnostic>) {
        let graph: IndexMap<&str, Vec<&str>> = root
            .types
            .iter()
            .map(|t| (t.name.as_str(), t.attribute.ty.references()))
            .collect();

        let mut state = HashMap::new();
        let mut stack = Vec::new();
        for &name in graph.keys() {
            visit(name, &graph, &mut state, &mut stack, diagnostics);
        }
    }
}

fn visit<'a>(
    name: &'a str,
    graph: &IndexMap<&'a str, Vec<&'a str>>,
    state: &mut HashMap<&'a str, Visit>,
    stack: &mut Vec<&'a str>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match state.get(name) {
        Some(Visit::Done) => return,
        Some(Visit::Active) => {
            let start = stack.iter().position(|n| *n == name).unwrap_or(0);
            let mut path: Vec<&str> = stack[start..].to_vec();
            path.push(name);
            diagnostics.push(error(
                DiagnosticKind::ShapeViolation,
                format!(
                    "type \"{}\" references itself through {}",
                    name,
                    path.join(" > ")
                ),
                &DefinitionKind::Type.describe(name),
            ));
            return;
        }
        None => {}
    }

    // Undefined names are the unresolved-reference lint's concern.
    let Some(edges) = graph.get(name) else {
        return;
    };

    state.insert(name, Visit::Active);
    stack.push(name);
    for &next in edges {
        visit(next, graph, state, stack, diagnostics);
    }
    stack.pop();
    state.insert(name, Visit::Done);
}
