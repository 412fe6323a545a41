//! Lint for blank descriptions.

use apidef_core::Diagnostic;
use apidef_expr::{DefinitionKind, RootExpr};

use super::{super::Lint, join};

/// Lint that warns when a description is present but blank.
///
/// Descriptions become doc comments in generated code; a blank one renders
/// as an empty `///` line.
pub struct EmptyDescriptionLint;

impl Lint for EmptyDescriptionLint {
    fn name(&self) -> &'static str {
        "empty-description"
    }

    fn description(&self) -> &'static str {
        "Warn about blank descriptions"
    }

    fn check(&self, root: &RootExpr, diagnostics: &mut Vec<Diagnostic>) {
        let mut warn = |description: Option<&str>, location: String| {
            if description.is_some_and(|d| d.trim().is_empty()) {
                diagnostics.push(
                    Diagnostic::warning("validate", "description is empty").at(location),
                );
            }
        };

        if let Some(api) = &root.api {
            warn(api.description.as_deref(), DefinitionKind::Api.describe(&api.name));
        }
        for svc in &root.services {
            let svc_loc = DefinitionKind::Service.describe(&svc.name);
            warn(svc.description.as_deref(), svc_loc.clone());
            for err in &svc.errors {
                warn(err.description(), join(&svc_loc, DefinitionKind::Error, &err.name));
            }
            for method in &svc.methods {
                let method_loc = join(&svc_loc, DefinitionKind::Method, &method.name);
                warn(method.description.as_deref(), method_loc.clone());
                for err in &method.errors {
                    warn(err.description(), join(&method_loc, DefinitionKind::Error, &err.name));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use apidef_eval::evaluate;

    use super::*;

    #[test]
    fn test_blank_description_warns() {
        let evaluation = evaluate(|ev| {
            ev.service("divider", |ev| {
                ev.description("   ");
                ev.method("divide", |ev| ev.description("Divide a by b"));
            });
        });

        let mut diagnostics = Vec::new();
        EmptyDescriptionLint.check(&evaluation.root, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert_eq!(diagnostics[0].location.as_deref(), Some("service \"divider\""));
    }
}
