//! Lint for errors that reuse a built-in error name.

use apidef_core::{Diagnostic, DiagnosticKind};
use apidef_expr::{DefinitionKind, ErrorExpr, RESERVED_ERROR_NAMES, RootExpr};

use super::{super::Lint, error, join};

/// Lint that errors when a design declares an error named like a built-in
/// one without marking it as an override.
pub struct ReservedErrorLint;

impl Lint for ReservedErrorLint {
    fn name(&self) -> &'static str {
        "reserved-error"
    }

    fn description(&self) -> &'static str {
        "Require an explicit override to redefine built-in errors"
    }

    fn check(&self, root: &RootExpr, diagnostics: &mut Vec<Diagnostic>) {
        for svc in &root.services {
            let svc_loc = DefinitionKind::Service.describe(&svc.name);
            check_errors(&svc.errors, &svc_loc, diagnostics);
            for method in &svc.methods {
                let method_loc = join(&svc_loc, DefinitionKind::Method, &method.name);
                check_errors(&method.errors, &method_loc, diagnostics);
            }
        }
    }
}

fn check_errors(errors: &[ErrorExpr], location: &str, diagnostics: &mut Vec<Diagnostic>) {
    for err in errors {
        if !err.override_builtin && RESERVED_ERROR_NAMES.contains(&err.name.as_str()) {
            diagnostics.push(error(
                DiagnosticKind::ShapeViolation,
                format!(
                    "error \"{}\" redefines a built-in error; declare it as an override to replace it",
                    err.name
                ),
                location,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use apidef_eval::{AttributeArgs, evaluate};

    use super::*;

    #[test]
    fn test_reserved_name_requires_override() {
        let evaluation = evaluate(|ev| {
            ev.service("divider", |ev| {
                ev.error("timeout", ());
                ev.method("divide", |ev| {
                    ev.error("not_found", AttributeArgs::new().override_builtin());
                });
            });
        });

        let mut diagnostics = Vec::new();
        ReservedErrorLint.check(&evaluation.root, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is(DiagnosticKind::ShapeViolation));
        assert!(diagnostics[0].message.starts_with("error \"timeout\""));
        assert_eq!(diagnostics[0].location.as_deref(), Some("service \"divider\""));
    }
}
