//! Lint for sibling name collisions.

use std::collections::HashSet;

use apidef_core::{Diagnostic, DiagnosticKind, to_pascal_case, to_snake_case};
use apidef_expr::{DataType, DefinitionKind, RootExpr};

use super::{super::Lint, attribute_sites, error, join};

/// Lint that errors when two siblings share a name.
///
/// Namespaces: services and user types at the root, methods and errors in a
/// service, errors in a method (which share the namespace of their service's
/// errors), members of an object. Each repeat after the first declaration is
/// one error.
///
/// Apart from services, names also collide when they case to the same type
/// or field identifier ("divide" and "Divide", "div_by_zero" and
/// "DivByZero"). Services each get their own module, and clashing module
/// names are renumbered by the generator.
pub struct DuplicateNameLint;

impl Lint for DuplicateNameLint {
    fn name(&self) -> &'static str {
        "duplicate-name"
    }

    fn description(&self) -> &'static str {
        "Detect definitions sharing a name with a sibling"
    }

    fn check(&self, root: &RootExpr, diagnostics: &mut Vec<Diagnostic>) {
        let mut services = Namespace::verbatim();
        for svc in &root.services {
            services.declare(&svc.name, DefinitionKind::Service, "root", diagnostics);
        }
        let mut types = Namespace::identifiers();
        for ty in &root.types {
            types.declare(&ty.name, DefinitionKind::Type, "root", diagnostics);
        }

        for svc in &root.services {
            let svc_loc = DefinitionKind::Service.describe(&svc.name);
            let mut methods = Namespace::identifiers();
            for method in &svc.methods {
                methods.declare(&method.name, DefinitionKind::Method, &svc_loc, diagnostics);
            }
            let mut service_errors = Namespace::identifiers();
            for err in &svc.errors {
                service_errors.declare(&err.name, DefinitionKind::Error, &svc_loc, diagnostics);
            }

            for method in &svc.methods {
                let method_loc = join(&svc_loc, DefinitionKind::Method, &method.name);
                let mut errors = Namespace::identifiers();
                for err in &method.errors {
                    let described = DefinitionKind::Error.describe(&err.name);
                    if let Some(earlier) = service_errors.find(&err.name) {
                        let message = if earlier == err.name {
                            format!("{} is already defined by {}", described, svc_loc)
                        } else {
                            format!(
                                "{} has the same identifier as {} of {}",
                                described,
                                DefinitionKind::Error.describe(earlier),
                                svc_loc
                            )
                        };
                        diagnostics.push(error(DiagnosticKind::DuplicateName, message, &method_loc));
                    } else {
                        errors.declare(&err.name, DefinitionKind::Error, &method_loc, diagnostics);
                    }
                }
            }
        }

        for site in attribute_sites(root) {
            check_members(&site.attribute.ty, &site.location, diagnostics);
        }
    }
}

/// Names declared so far in one namespace.
struct Namespace<'a> {
    names: Vec<&'a str>,
    exact: HashSet<&'a str>,
    cased: bool,
}

impl<'a> Namespace<'a> {
    fn verbatim() -> Self {
        Self {
            names: Vec::new(),
            exact: HashSet::new(),
            cased: false,
        }
    }

    fn identifiers() -> Self {
        Self {
            cased: true,
            ..Self::verbatim()
        }
    }

    /// The earlier name `name` clashes with, if any.
    fn find(&self, name: &str) -> Option<&'a str> {
        if let Some(&same) = self.exact.get(name) {
            return Some(same);
        }
        if !self.cased {
            return None;
        }
        let (pascal, snake) = (to_pascal_case(name), to_snake_case(name));
        self.names
            .iter()
            .copied()
            .find(|prev| to_pascal_case(prev) == pascal || to_snake_case(prev) == snake)
    }

    /// Record `name`, or report it if it clashes with an earlier sibling.
    /// A clashing name is not recorded, so n repeats give n - 1 errors.
    fn declare(
        &mut self,
        name: &'a str,
        kind: DefinitionKind,
        location: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        match self.find(name) {
            None => {
                self.names.push(name);
                self.exact.insert(name);
            }
            Some(earlier) if earlier == name => diagnostics.push(error(
                DiagnosticKind::DuplicateName,
                format!("{} is defined more than once", kind.describe(name)),
                location,
            )),
            Some(earlier) => diagnostics.push(error(
                DiagnosticKind::DuplicateName,
                format!(
                    "{} has the same identifier as {}",
                    kind.describe(name),
                    kind.describe(earlier)
                ),
                location,
            )),
        }
    }
}

fn check_members(ty: &DataType, location: &str, diagnostics: &mut Vec<Diagnostic>) {
    match ty {
        DataType::Object(members) => {
            let mut names = Namespace::identifiers();
            for member in members {
                names.declare(&member.name, DefinitionKind::Attribute, location, diagnostics);
            }
            for member in members {
                let member_loc = join(location, DefinitionKind::Attribute, &member.name);
                check_members(&member.attribute.ty, &member_loc, diagnostics);
            }
        }
        DataType::Array(elem) => check_members(elem, location, diagnostics),
        DataType::Map(key, value) => {
            check_members(key, location, diagnostics);
            check_members(value, location, diagnostics);
        }
        DataType::Empty | DataType::Primitive(_) | DataType::Ref(_) | DataType::ErrorResult => {}
    }
}
