//! Builder operations.
//!
//! Each builder looks at the current context, records an
//! incompatible-context error when it does not apply there, and otherwise
//! adds its definition to the context (or builds it in a nested context and
//! attaches it once the body returns).

use apidef_core::DiagnosticKind;
use apidef_expr::{
    ApiExpr, AttributeExpr, DataType, DefinitionKind, ErrorExpr, HttpMethod, HttpResponseExpr,
    Member, MethodExpr, Primitive, ResponseRef, Route, ServiceExpr, UserTypeExpr,
};

use crate::{AttributeArgs, Context, Evaluator};

impl Evaluator {
    /// Define the API. Accepted at the root, once.
    #[track_caller]
    pub fn api(&mut self, name: &str, body: impl FnOnce(&mut Evaluator)) {
        if self.current().is_some() {
            self.incompatible("api");
            return;
        }
        if let Some(existing) = &self.root().api {
            let message = format!("api \"{}\" is already defined as \"{}\"", name, existing.name);
            self.record(DiagnosticKind::DuplicateName, message);
            return;
        }
        if let Context::Api(api) = self.execute(Context::Api(ApiExpr::new(name)), body) {
            self.root_mut().api = Some(api);
        }
    }

    /// Define a service. Accepted at the root.
    #[track_caller]
    pub fn service(&mut self, name: &str, body: impl FnOnce(&mut Evaluator)) {
        if self.current().is_some() {
            self.incompatible("service");
            return;
        }
        if let Context::Service(svc) = self.execute(Context::Service(ServiceExpr::new(name)), body)
        {
            self.root_mut().services.push(svc);
        }
    }

    /// Define a named object type. Accepted at the root.
    #[track_caller]
    pub fn user_type(&mut self, name: &str, body: impl FnOnce(&mut Evaluator)) {
        if self.current().is_some() {
            self.incompatible("type");
            return;
        }
        let attribute = AttributeExpr::new(DataType::Object(Vec::new()));
        let attribute = self.run_attribute(DefinitionKind::Type, name, attribute, body);
        self.root_mut().types.push(UserTypeExpr {
            name: name.to_string(),
            attribute,
        });
    }

    /// Define a method. Accepted in a service.
    #[track_caller]
    pub fn method(&mut self, name: &str, body: impl FnOnce(&mut Evaluator)) {
        if !matches!(self.current(), Some(Context::Service(_))) {
            self.incompatible("method");
            return;
        }
        if let Context::Method(method) = self.execute(Context::Method(MethodExpr::new(name)), body)
        {
            match self.current_mut() {
                Some(Context::Service(svc)) => svc.methods.push(method),
                _ => self.incompatible("method"),
            }
        }
    }

    /// Declare an error. Accepted in a service or a method; the error belongs
    /// to whichever is current. The type defaults to the error result type.
    #[track_caller]
    pub fn error(&mut self, name: &str, args: impl Into<AttributeArgs>) {
        let args = args.into();
        let error = ErrorExpr {
            name: name.to_string(),
            attribute: args.to_attribute(DataType::ErrorResult),
            override_builtin: args.override_builtin,
        };
        self.attach_error(error);
    }

    /// Declare an error whose type is built by `body`.
    #[track_caller]
    pub fn error_with(
        &mut self,
        name: &str,
        args: impl Into<AttributeArgs>,
        body: impl FnOnce(&mut Evaluator),
    ) {
        if !matches!(
            self.current(),
            Some(Context::Service(_)) | Some(Context::Method(_))
        ) {
            self.incompatible("error");
            return;
        }
        let args = args.into();
        let attribute = args.to_attribute(DataType::Object(Vec::new()));
        let attribute = self.run_attribute(DefinitionKind::Error, name, attribute, body);
        self.attach_error(ErrorExpr {
            name: name.to_string(),
            attribute,
            override_builtin: args.override_builtin,
        });
    }

    /// Declare the method payload. Accepted in a method.
    #[track_caller]
    pub fn payload(&mut self, args: impl Into<AttributeArgs>) {
        let attribute = args.into().to_attribute(DataType::Empty);
        self.attach_payload(attribute);
    }

    /// Declare the method payload as an object built by `body`.
    #[track_caller]
    pub fn payload_with(&mut self, args: impl Into<AttributeArgs>, body: impl FnOnce(&mut Evaluator)) {
        if !matches!(self.current(), Some(Context::Method(_))) {
            self.incompatible("payload");
            return;
        }
        let attribute = args.into().to_attribute(DataType::Object(Vec::new()));
        let attribute = self.run_attribute(DefinitionKind::Attribute, "payload", attribute, body);
        self.attach_payload(attribute);
    }

    /// Declare the method result. Accepted in a method.
    #[track_caller]
    pub fn result(&mut self, args: impl Into<AttributeArgs>) {
        let attribute = args.into().to_attribute(DataType::Empty);
        self.attach_result(attribute);
    }

    /// Declare the method result as an object built by `body`.
    #[track_caller]
    pub fn result_with(&mut self, args: impl Into<AttributeArgs>, body: impl FnOnce(&mut Evaluator)) {
        if !matches!(self.current(), Some(Context::Method(_))) {
            self.incompatible("result");
            return;
        }
        let attribute = args.into().to_attribute(DataType::Object(Vec::new()));
        let attribute = self.run_attribute(DefinitionKind::Attribute, "result", attribute, body);
        self.attach_result(attribute);
    }

    /// Add a member to the object being built. The type defaults to string.
    #[track_caller]
    pub fn attribute(&mut self, name: &str, args: impl Into<AttributeArgs>) {
        let attribute = args.into().to_attribute(Primitive::String.into());
        self.add_member(name, attribute);
    }

    /// Add an object member whose own members are built by `body`.
    #[track_caller]
    pub fn attribute_with(
        &mut self,
        name: &str,
        args: impl Into<AttributeArgs>,
        body: impl FnOnce(&mut Evaluator),
    ) {
        if !matches!(self.current(), Some(Context::Attribute { .. })) {
            self.incompatible("attribute");
            return;
        }
        let attribute = args.into().to_attribute(DataType::Object(Vec::new()));
        let attribute = self.run_attribute(DefinitionKind::Attribute, name, attribute, body);
        self.add_member(name, attribute);
    }

    /// Set the description of the current definition.
    #[track_caller]
    pub fn description(&mut self, text: &str) {
        let text = text.to_string();
        match self.current_mut() {
            Some(Context::Api(api)) => api.description = Some(text),
            Some(Context::Service(svc)) => svc.description = Some(text),
            Some(Context::Method(m)) => m.description = Some(text),
            Some(Context::Attribute { attribute, .. }) => attribute.description = Some(text),
            Some(Context::ServiceHttp(_)) | Some(Context::MethodHttp(_)) | None => {
                self.incompatible("description")
            }
        }
    }

    #[track_caller]
    pub fn title(&mut self, title: &str) {
        match self.current_mut() {
            Some(Context::Api(api)) => api.title = Some(title.to_string()),
            _ => self.incompatible("title"),
        }
    }

    #[track_caller]
    pub fn version(&mut self, version: &str) {
        match self.current_mut() {
            Some(Context::Api(api)) => api.version = Some(version.to_string()),
            _ => self.incompatible("version"),
        }
    }

    /// Declare HTTP settings. In a service `body` configures the resource,
    /// in a method it configures the action. Repeated calls extend the same
    /// settings.
    #[track_caller]
    pub fn http(&mut self, body: impl FnOnce(&mut Evaluator)) {
        match self.current_mut() {
            Some(Context::Service(svc)) => {
                let http = svc.http.take().unwrap_or_default();
                if let Context::ServiceHttp(http) = self.execute(Context::ServiceHttp(http), body) {
                    if let Some(Context::Service(svc)) = self.current_mut() {
                        svc.http = Some(http);
                    }
                }
            }
            Some(Context::Method(m)) => {
                let http = m.http.take().unwrap_or_default();
                if let Context::MethodHttp(http) = self.execute(Context::MethodHttp(http), body) {
                    if let Some(Context::Method(m)) = self.current_mut() {
                        m.http = Some(http);
                    }
                }
            }
            _ => self.incompatible("http"),
        }
    }

    /// Set the API-wide path prefix, or the resource path inside a service's
    /// HTTP settings.
    #[track_caller]
    pub fn path(&mut self, path: &str) {
        match self.current_mut() {
            Some(Context::Api(api)) => api.http.path = Some(path.to_string()),
            Some(Context::ServiceHttp(http)) => http.path = Some(path.to_string()),
            _ => self.incompatible("path"),
        }
    }

    #[track_caller]
    pub fn scheme(&mut self, scheme: &str) {
        match self.current_mut() {
            Some(Context::Api(api)) => api.http.schemes.push(scheme.to_string()),
            _ => self.incompatible("scheme"),
        }
    }

    /// Add a MIME type the API accepts.
    #[track_caller]
    pub fn consumes(&mut self, mime_type: &str) {
        match self.current_mut() {
            Some(Context::Api(api)) => api.http.consumes.push(mime_type.to_string()),
            _ => self.incompatible("consumes"),
        }
    }

    /// Add a MIME type the API returns.
    #[track_caller]
    pub fn produces(&mut self, mime_type: &str) {
        match self.current_mut() {
            Some(Context::Api(api)) => api.http.produces.push(mime_type.to_string()),
            _ => self.incompatible("produces"),
        }
    }

    /// Declare a named API-wide response that methods can refer to.
    #[track_caller]
    pub fn response(&mut self, name: &str, status: u16) {
        match self.current_mut() {
            Some(Context::Api(api)) => api.http.responses.push(HttpResponseExpr::new(name, status)),
            _ => self.incompatible("response"),
        }
    }

    /// Add a route to the current method's HTTP settings.
    #[track_caller]
    pub fn route(&mut self, method: HttpMethod, path: &str) {
        match self.current_mut() {
            Some(Context::MethodHttp(http)) => http.routes.push(Route {
                method,
                path: path.to_string(),
            }),
            _ => self.incompatible(&method.as_str().to_ascii_lowercase()),
        }
    }

    #[track_caller]
    pub fn get(&mut self, path: &str) {
        self.route(HttpMethod::Get, path);
    }

    #[track_caller]
    pub fn post(&mut self, path: &str) {
        self.route(HttpMethod::Post, path);
    }

    #[track_caller]
    pub fn put(&mut self, path: &str) {
        self.route(HttpMethod::Put, path);
    }

    #[track_caller]
    pub fn patch(&mut self, path: &str) {
        self.route(HttpMethod::Patch, path);
    }

    #[track_caller]
    pub fn delete(&mut self, path: &str) {
        self.route(HttpMethod::Delete, path);
    }

    /// Declare a response of the current method by status code.
    #[track_caller]
    pub fn status(&mut self, code: u16) {
        match self.current_mut() {
            Some(Context::MethodHttp(http)) => http.responses.push(ResponseRef::Status(code)),
            _ => self.incompatible("status"),
        }
    }

    /// Declare a response of the current method by the name of an API-wide
    /// or built-in response.
    #[track_caller]
    pub fn response_ref(&mut self, name: &str) {
        match self.current_mut() {
            Some(Context::MethodHttp(http)) => {
                http.responses.push(ResponseRef::Named(name.to_string()))
            }
            _ => self.incompatible("response"),
        }
    }

    /// Set the media type of the current service's resource.
    #[track_caller]
    pub fn media_type(&mut self, identifier: &str) {
        match self.current_mut() {
            Some(Context::ServiceHttp(http)) => http.media_type = Some(identifier.to_string()),
            _ => self.incompatible("media type"),
        }
    }

    fn run_attribute(
        &mut self,
        kind: DefinitionKind,
        name: &str,
        attribute: AttributeExpr,
        body: impl FnOnce(&mut Evaluator),
    ) -> AttributeExpr {
        let context = Context::Attribute {
            kind,
            name: name.to_string(),
            attribute,
        };
        match self.execute(context, body) {
            Context::Attribute { attribute, .. } => attribute,
            other => unreachable!("execute returned {} for an attribute", other.kind_name()),
        }
    }

    #[track_caller]
    fn attach_error(&mut self, error: ErrorExpr) {
        match self.current_mut() {
            Some(Context::Service(svc)) => svc.errors.push(error),
            Some(Context::Method(m)) => m.errors.push(error),
            _ => self.incompatible("error"),
        }
    }

    #[track_caller]
    fn attach_payload(&mut self, attribute: AttributeExpr) {
        match self.current_mut() {
            Some(Context::Method(m)) => m.payloads.push(attribute),
            _ => self.incompatible("payload"),
        }
    }

    #[track_caller]
    fn attach_result(&mut self, attribute: AttributeExpr) {
        match self.current_mut() {
            Some(Context::Method(m)) => m.results.push(attribute),
            _ => self.incompatible("result"),
        }
    }

    #[track_caller]
    fn add_member(&mut self, name: &str, attribute: AttributeExpr) {
        let parent_ty = match self.current_mut() {
            Some(Context::Attribute { attribute: parent, .. }) => &mut parent.ty,
            _ => {
                self.incompatible("attribute");
                return;
            }
        };
        let member = Member {
            name: name.to_string(),
            attribute,
        };
        if parent_ty.is_empty() {
            *parent_ty = DataType::Object(Vec::new());
        }
        match parent_ty {
            DataType::Object(members) => members.push(member),
            other => {
                let message = format!("cannot add member \"{}\" to a value of type {}", name, other);
                self.record(DiagnosticKind::ShapeViolation, message);
            }
        }
    }
}
