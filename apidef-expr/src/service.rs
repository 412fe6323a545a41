//! Service, method and error definitions.

use serde::Serialize;

use crate::{AttributeExpr, DataType, MethodHttpExpr, ServiceHttpExpr};

/// An error a service or method may return.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorExpr {
    pub name: String,
    pub attribute: AttributeExpr,
    /// Set when the design deliberately redefines a built-in error name.
    pub override_builtin: bool,
}

impl ErrorExpr {
    /// Create an error using the built-in error result type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute: AttributeExpr::new(DataType::ErrorResult),
            override_builtin: false,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.attribute.description.as_deref()
    }
}

/// A method of a service.
///
/// Payloads and results are kept as lists so that a design declaring more
/// than one of either can be reported by validation instead of silently
/// overwritten.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MethodExpr {
    pub name: String,
    pub description: Option<String>,
    pub payloads: Vec<AttributeExpr>,
    pub results: Vec<AttributeExpr>,
    pub errors: Vec<ErrorExpr>,
    pub http: Option<MethodHttpExpr>,
}

impl MethodExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The method payload, if declared.
    pub fn payload(&self) -> Option<&AttributeExpr> {
        self.payloads.first()
    }

    /// The method result, if declared.
    pub fn result(&self) -> Option<&AttributeExpr> {
        self.results.first()
    }

    /// True when a payload with a non-empty type is declared.
    pub fn has_payload(&self) -> bool {
        self.payload().is_some_and(|p| !p.ty.is_empty())
    }

    /// True when a result with a non-empty type is declared.
    pub fn has_result(&self) -> bool {
        self.result().is_some_and(|r| !r.ty.is_empty())
    }

    pub fn error(&self, name: &str) -> Option<&ErrorExpr> {
        self.errors.iter().find(|e| e.name == name)
    }
}

/// A service: an ordered group of methods sharing a set of errors.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ServiceExpr {
    pub name: String,
    pub description: Option<String>,
    /// Methods in declaration order; generation relies on this order.
    pub methods: Vec<MethodExpr>,
    pub errors: Vec<ErrorExpr>,
    pub http: Option<ServiceHttpExpr>,
}

impl ServiceExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Find a method by name.
    pub fn method(&self, name: &str) -> Option<&MethodExpr> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Find a service-level error by name.
    pub fn error(&self, name: &str) -> Option<&ErrorExpr> {
        self.errors.iter().find(|e| e.name == name)
    }

    /// Errors a method can return: the service errors followed by the method's
    /// own errors.
    pub fn effective_errors<'a>(&'a self, method: &'a MethodExpr) -> Vec<&'a ErrorExpr> {
        self.errors.iter().chain(method.errors.iter()).collect()
    }

    /// Every error declared anywhere in the service, first declaration of each
    /// name winning, in declaration order.
    pub fn all_errors(&self) -> Vec<&ErrorExpr> {
        let mut out: Vec<&ErrorExpr> = Vec::new();
        let declared = self
            .errors
            .iter()
            .chain(self.methods.iter().flat_map(|m| m.errors.iter()));
        for err in declared {
            if !out.iter().any(|e| e.name == err.name) {
                out.push(err);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Primitive;

    fn divider() -> ServiceExpr {
        let mut svc = ServiceExpr::new("divider");
        svc.errors.push(ErrorExpr::new("invalid_arguments"));
        let mut divide = MethodExpr::new("divide");
        divide.errors.push(ErrorExpr::new("div_by_zero"));
        svc.methods.push(divide);
        let mut modulo = MethodExpr::new("modulo");
        modulo.errors.push(ErrorExpr::new("div_by_zero"));
        svc.methods.push(modulo);
        svc
    }

    #[test]
    fn test_effective_errors_include_service_errors() {
        let svc = divider();
        let divide = svc.method("divide").unwrap();
        let names: Vec<_> = svc
            .effective_errors(divide)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["invalid_arguments", "div_by_zero"]);
    }

    #[test]
    fn test_all_errors_deduplicates_by_name() {
        let svc = divider();
        let names: Vec<_> = svc.all_errors().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["invalid_arguments", "div_by_zero"]);
    }

    #[test]
    fn test_error_defaults_to_error_result() {
        let err = ErrorExpr::new("timeout");
        assert_eq!(err.attribute.ty, DataType::ErrorResult);
        assert!(!err.override_builtin);
    }

    #[test]
    fn test_empty_payload_is_not_a_payload() {
        let mut m = MethodExpr::new("ping");
        assert!(!m.has_payload());
        m.payloads.push(AttributeExpr::new(DataType::Empty));
        assert!(!m.has_payload());
        m.payloads[0].ty = Primitive::Int.into();
        assert!(m.has_payload());
    }
}
