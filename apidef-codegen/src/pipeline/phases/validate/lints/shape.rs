//! Lint for methods with too many payloads or results.

use apidef_core::{Diagnostic, DiagnosticKind};
use apidef_expr::{DefinitionKind, RootExpr};

use super::{super::Lint, error, join};

/// Lint that errors when a method declares more than one payload or more
/// than one result.
pub struct ShapeLint;

impl Lint for ShapeLint {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn description(&self) -> &'static str {
        "Allow at most one payload and one result per method"
    }

    fn check(&self, root: &RootExpr, diagnostics: &mut Vec<Diagnostic>) {
        for svc in &root.services {
            let svc_loc = DefinitionKind::Service.describe(&svc.name);
            for method in &svc.methods {
                let location = join(&svc_loc, DefinitionKind::Method, &method.name);
                for (what, count) in [("payload", method.payloads.len()), ("result", method.results.len())] {
                    if count > 1 {
                        diagnostics.push(error(
                            DiagnosticKind::ShapeViolation,
                            format!("method \"{}\" declares {} {}s; at most one is allowed", method.name, count, what),
                            &location,
                        ));
                    }
                }
            }
        }
    }
}
