//! HTTP transport projection.
//!
//! Services and methods carry the HTTP settings declared in the design
//! ([`ServiceHttpExpr`], [`MethodHttpExpr`]). The projection itself, one
//! [`ResourceExpr`] per service with one [`ActionExpr`] per method, is
//! derived from them after validation.

use serde::Serialize;

use crate::{MethodExpr, ServiceExpr};

/// Media type used when a service does not declare one.
pub const DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// HTTP request methods accepted in routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Parse a method name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }
}

/// A route: method plus path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
}

/// A response declared on a method, either inline by status code or by the
/// name of an API-wide or built-in response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseRef {
    Status(u16),
    Named(String),
}

/// Resource-level HTTP settings declared inside a service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ServiceHttpExpr {
    pub path: Option<String>,
    pub media_type: Option<String>,
}

/// Action-level HTTP settings declared inside a method.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MethodHttpExpr {
    pub routes: Vec<Route>,
    pub responses: Vec<ResponseRef>,
}

/// A MIME encoding the API consumes or produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingExpr {
    pub mime_type: String,
}

/// An HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpResponseExpr {
    pub name: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HttpResponseExpr {
    pub fn new(name: impl Into<String>, status: u16) -> Self {
        Self {
            name: name.into(),
            status,
            description: None,
        }
    }
}

/// The HTTP projection of one method.
///
/// An action is created together with its resource and keeps the name of the
/// method it projects; the name cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionExpr {
    name: String,
    pub routes: Vec<Route>,
    pub responses: Vec<HttpResponseExpr>,
}

impl ActionExpr {
    fn for_method(method: &MethodExpr) -> Self {
        Self {
            name: method.name.clone(),
            routes: method
                .http
                .as_ref()
                .map(|h| h.routes.clone())
                .unwrap_or_default(),
            responses: Vec::new(),
        }
    }

    /// Name of the originating method.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The HTTP projection of one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceExpr {
    name: String,
    pub path: Option<String>,
    pub media_type: String,
    actions: Vec<ActionExpr>,
}

impl ResourceExpr {
    /// Name of the originating service.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Actions, one per service method, in method order.
    pub fn actions(&self) -> &[ActionExpr] {
        &self.actions
    }

    /// Mutable access to actions; the set itself is fixed at creation.
    pub fn actions_mut(&mut self) -> &mut [ActionExpr] {
        &mut self.actions
    }

    pub fn action(&self, name: &str) -> Option<&ActionExpr> {
        self.actions.iter().find(|a| a.name == name)
    }
}

/// API-wide HTTP settings and the resources derived from services.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRoot {
    /// Common request path prefix for all endpoints.
    pub path: Option<String>,
    pub schemes: Vec<String>,
    pub consumes: Vec<EncodingExpr>,
    pub produces: Vec<EncodingExpr>,
    resources: Vec<ResourceExpr>,
    /// Responses declared for the whole API.
    pub responses: Vec<HttpResponseExpr>,
    /// Built-in responses.
    pub default_responses: Vec<HttpResponseExpr>,
}

impl Default for HttpRoot {
    fn default() -> Self {
        Self {
            path: None,
            schemes: Vec::new(),
            consumes: Vec::new(),
            produces: Vec::new(),
            resources: Vec::new(),
            responses: Vec::new(),
            default_responses: vec![
                HttpResponseExpr::new("OK", 200),
                HttpResponseExpr::new("Created", 201),
                HttpResponseExpr::new("NoContent", 204),
                HttpResponseExpr::new("BadRequest", 400),
                HttpResponseExpr::new("Unauthorized", 401),
                HttpResponseExpr::new("NotFound", 404),
                HttpResponseExpr::new("InternalServerError", 500),
            ],
        }
    }
}

impl HttpRoot {
    /// The API-wide response with the given name, if any.
    pub fn response(&self, name: &str) -> Option<&HttpResponseExpr> {
        self.responses.iter().find(|r| r.name == name)
    }

    /// The built-in response with the given name, if any.
    pub fn default_response(&self, name: &str) -> Option<&HttpResponseExpr> {
        self.default_responses.iter().find(|r| r.name == name)
    }

    /// Resolve a response name against API-wide responses first, then
    /// built-ins.
    pub fn resolve_response(&self, name: &str) -> Option<&HttpResponseExpr> {
        self.response(name).or_else(|| self.default_response(name))
    }

    /// The resource with the given name, if any.
    pub fn resource(&self, name: &str) -> Option<&ResourceExpr> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn resources(&self) -> &[ResourceExpr] {
        &self.resources
    }

    /// Return the resource for `service`, creating it on first use.
    ///
    /// Creation builds one action per service method. Later calls with a
    /// service of the same name return the existing resource unchanged.
    pub fn resource_for(&mut self, service: &ServiceExpr) -> &mut ResourceExpr {
        let index = match self.resources.iter().position(|r| r.name == service.name) {
            Some(index) => index,
            None => {
                let http = service.http.as_ref();
                self.resources.push(ResourceExpr {
                    name: service.name.clone(),
                    path: http.and_then(|h| h.path.clone()),
                    media_type: http
                        .and_then(|h| h.media_type.clone())
                        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
                    actions: service.methods.iter().map(ActionExpr::for_method).collect(),
                });
                self.resources.len() - 1
            }
        };
        &mut self.resources[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ServiceExpr {
        let mut svc = ServiceExpr::new("divider");
        svc.methods.push(MethodExpr::new("divide"));
        svc.methods.push(MethodExpr::new("modulo"));
        svc
    }

    #[test]
    fn test_resource_for_creates_one_action_per_method() {
        let mut http = HttpRoot::default();
        let res = http.resource_for(&service());

        assert_eq!(res.name(), "divider");
        assert_eq!(res.media_type, DEFAULT_MEDIA_TYPE);
        let names: Vec<_> = res.actions().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["divide", "modulo"]);
    }

    #[test]
    fn test_resource_for_is_memoized_by_name() {
        let mut http = HttpRoot::default();
        http.resource_for(&service()).path = Some("/div".into());

        let mut changed = service();
        changed.methods.pop();
        let res = http.resource_for(&changed);

        assert_eq!(res.path.as_deref(), Some("/div"));
        assert_eq!(res.actions().len(), 2);
        assert_eq!(http.resources().len(), 1);
    }

    #[test]
    fn test_resolve_response_prefers_api_responses() {
        let mut http = HttpRoot::default();
        http.responses.push(HttpResponseExpr::new("NotFound", 410));

        assert_eq!(http.resolve_response("NotFound").unwrap().status, 410);
        assert_eq!(http.resolve_response("OK").unwrap().status, 200);
        assert!(http.resolve_response("Teapot").is_none());
    }

    #[test]
    fn test_http_method_from_name() {
        assert_eq!(HttpMethod::from_name("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_name("TRACE"), None);
    }
}
