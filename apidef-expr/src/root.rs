//! The graph root.

use serde::Serialize;

use crate::{AttributeExpr, HttpResponseExpr, HttpRoot, ServiceExpr};

/// API-wide HTTP defaults declared inside the API definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ApiHttpExpr {
    pub path: Option<String>,
    pub schemes: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub responses: Vec<HttpResponseExpr>,
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ApiExpr {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub http: ApiHttpExpr,
}

impl ApiExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A named type that attributes can reference with [`crate::DataType::Ref`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTypeExpr {
    pub name: String,
    pub attribute: AttributeExpr,
}

/// The root of the expression graph.
///
/// Exactly one root exists per evaluation run. The evaluator fills it in, the
/// derive phase completes [`RootExpr::http`], and the validated root is then
/// only reachable through a read-only design handle.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RootExpr {
    pub api: Option<ApiExpr>,
    /// Services in declaration order.
    pub services: Vec<ServiceExpr>,
    /// User types in declaration order.
    pub types: Vec<UserTypeExpr>,
    /// HTTP projection, derived after validation.
    pub http: HttpRoot,
}

impl RootExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a service by name.
    pub fn service(&self, name: &str) -> Option<&ServiceExpr> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Find a user type by name.
    pub fn user_type(&self, name: &str) -> Option<&UserTypeExpr> {
        self.types.iter().find(|t| t.name == name)
    }

    /// The API name, falling back to the first service name.
    pub fn api_name(&self) -> &str {
        self.api
            .as_ref()
            .map(|a| a.name.as_str())
            .or_else(|| self.services.first().map(|s| s.name.as_str()))
            .unwrap_or("api")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_name_fallbacks() {
        let mut root = RootExpr::new();
        assert_eq!(root.api_name(), "api");

        root.services.push(ServiceExpr::new("divider"));
        assert_eq!(root.api_name(), "divider");

        root.api = Some(ApiExpr::new("calc"));
        assert_eq!(root.api_name(), "calc");
    }

    #[test]
    fn test_lookup_by_name() {
        let mut root = RootExpr::new();
        root.services.push(ServiceExpr::new("divider"));
        assert!(root.service("divider").is_some());
        assert!(root.service("adder").is_none());
        assert!(root.user_type("DivideRequest").is_none());
    }
}
