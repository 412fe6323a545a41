//! Built-in lints for design validation.

mod duplicate_name;
mod empty_description;
mod reserved_error;
mod shape;
mod type_cycle;
mod unresolved_reference;

use apidef_core::{Diagnostic, DiagnosticKind};
use apidef_expr::{AttributeExpr, DefinitionKind, RootExpr};
pub use duplicate_name::DuplicateNameLint;
pub use empty_description::EmptyDescriptionLint;
pub use reserved_error::ReservedErrorLint;
pub use shape::ShapeLint;
pub use type_cycle::TypeCycleLint;
pub use unresolved_reference::UnresolvedReferenceLint;

const PHASE: &str = "validate";

fn error(kind: DiagnosticKind, message: String, location: &str) -> Diagnostic {
    Diagnostic::error(PHASE, message).kind(kind).at(location)
}

fn join(parent: &str, kind: DefinitionKind, name: &str) -> String {
    if parent.is_empty() {
        kind.describe(name)
    } else {
        format!("{} > {}", parent, kind.describe(name))
    }
}

/// A top-level attribute in the graph and where it lives.
struct AttributeSite<'a> {
    location: String,
    attribute: &'a AttributeExpr,
}

/// Every top-level attribute: user types, errors, payloads and results, in
/// declaration order.
fn attribute_sites(root: &RootExpr) -> Vec<AttributeSite<'_>> {
    let mut sites = Vec::new();
    for ty in &root.types {
        sites.push(AttributeSite {
            location: DefinitionKind::Type.describe(&ty.name),
            attribute: &ty.attribute,
        });
    }
    for svc in &root.services {
        let svc_loc = DefinitionKind::Service.describe(&svc.name);
        for err in &svc.errors {
            sites.push(AttributeSite {
                location: join(&svc_loc, DefinitionKind::Error, &err.name),
                attribute: &err.attribute,
            });
        }
        for method in &svc.methods {
            let method_loc = join(&svc_loc, DefinitionKind::Method, &method.name);
            for payload in &method.payloads {
                sites.push(AttributeSite {
                    location: format!("{} > payload", method_loc),
                    attribute: payload,
                });
            }
            for result in &method.results {
                sites.push(AttributeSite {
                    location: format!("{} > result", method_loc),
                    attribute: result,
                });
            }
            for err in &method.errors {
                sites.push(AttributeSite {
                    location: join(&method_loc, DefinitionKind::Error, &err.name),
                    attribute: &err.attribute,
                });
            }
        }
    }
    sites
}
