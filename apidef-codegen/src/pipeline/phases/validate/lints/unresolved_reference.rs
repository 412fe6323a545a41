//! Lint for references to undefined types and responses.

use apidef_core::{Diagnostic, DiagnosticKind};
use apidef_expr::{DefinitionKind, RootExpr, ResponseRef};

use super::{super::Lint, attribute_sites, error, join};

/// Lint that errors when a type descriptor names an undefined user type, or a
/// method response names an undefined response.
pub struct UnresolvedReferenceLint;

impl Lint for UnresolvedReferenceLint {
    fn name(&self) -> &'static str {
        "unresolved-reference"
    }

    fn description(&self) -> &'static str {
        "Detect references to undefined types and responses"
    }

    fn check(&self, root: &RootExpr, diagnostics: &mut Vec<Diagnostic>) {
        for site in attribute_sites(root) {
            for name in site.attribute.ty.references() {
                if root.user_type(name).is_none() {
                    diagnostics.push(error(
                        DiagnosticKind::UnresolvedReference,
                        format!("type \"{}\" is not defined", name),
                        &site.location,
                    ));
                }
            }
        }

        let api_responses = root.api.as_ref().map(|a| a.http.responses.as_slice());
        for svc in &root.services {
            let svc_loc = DefinitionKind::Service.describe(&svc.name);
            for method in &svc.methods {
                let Some(http) = &method.http else {
                    continue;
                };
                for response in &http.responses {
                    let ResponseRef::Named(name) = response else {
                        continue;
                    };
                    let declared = api_responses
                        .is_some_and(|responses| responses.iter().any(|r| &r.name == name));
                    if !declared && root.http.default_response(name).is_none() {
                        let location = join(&svc_loc, DefinitionKind::Method, &method.name);
                        diagnostics.push(error(
                            DiagnosticKind::UnresolvedReference,
                            format!("response \"{}\" is not defined", name),
                            &format!("{} > http", location),
                        ));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use apidef_eval::evaluate;
    use apidef_expr::{DataType, Primitive};

    use super::*;

    fn check(root: &RootExpr) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        UnresolvedReferenceLint.check(root, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_defined_types_resolve() {
        let evaluation = evaluate(|ev| {
            ev.user_type("Operands", |ev| ev.attribute("a", Primitive::Int));
            ev.service("divider", |ev| {
                ev.method("divide", |ev| {
                    ev.payload(DataType::named("Operands"));
                    ev.http(|ev| ev.response_ref("NotFound"));
                });
            });
        });
        assert!(check(&evaluation.root).is_empty());
    }

    #[test]
    fn test_missing_type_is_reported_at_site() {
        let evaluation = evaluate(|ev| {
            ev.service("divider", |ev| {
                ev.method("divide", |ev| {
                    ev.result(DataType::array_of(DataType::named("Quotient")));
                });
            });
        });

        let diagnostics = check(&evaluation.root);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is(DiagnosticKind::UnresolvedReference));
        assert_eq!(
            diagnostics[0].location.as_deref(),
            Some("service \"divider\" > method \"divide\" > result")
        );
    }

    #[test]
    fn test_missing_response_is_reported() {
        let evaluation = evaluate(|ev| {
            ev.api("calc", |ev| ev.response("Teapot", 418));
            ev.service("divider", |ev| {
                ev.method("divide", |ev| {
                    ev.http(|ev| {
                        ev.response_ref("Teapot");
                        ev.response_ref("Gone");
                    });
                });
            });
        });

        let diagnostics = check(&evaluation.root);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "response \"Gone\" is not defined");
    }
}
