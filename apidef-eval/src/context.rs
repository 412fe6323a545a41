//! Evaluation contexts.

use apidef_expr::{
    ApiExpr, AttributeExpr, DefinitionKind, MethodExpr, MethodHttpExpr, ServiceExpr,
    ServiceHttpExpr,
};

/// The definition currently being built.
///
/// Nested builder bodies run with one of these on top of the evaluator's
/// stack; an empty stack means the root is current. Every builder matches on
/// this enum to decide where its result attaches.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    /// The API definition.
    Api(ApiExpr),
    /// A service definition.
    Service(ServiceExpr),
    /// A method definition.
    Method(MethodExpr),
    /// An attribute being given members: a user type, an error type, a
    /// payload or result, or an object member.
    Attribute {
        kind: DefinitionKind,
        name: String,
        attribute: AttributeExpr,
    },
    /// HTTP settings of the enclosing service.
    ServiceHttp(ServiceHttpExpr),
    /// HTTP settings of the enclosing method.
    MethodHttp(MethodHttpExpr),
}

impl Context {
    /// Short description used to build diagnostic locations.
    pub fn describe(&self) -> String {
        match self {
            Context::Api(api) => DefinitionKind::Api.describe(&api.name),
            Context::Service(svc) => DefinitionKind::Service.describe(&svc.name),
            Context::Method(m) => DefinitionKind::Method.describe(&m.name),
            Context::Attribute { kind, name, .. } => kind.describe(name),
            Context::ServiceHttp(_) | Context::MethodHttp(_) => "http".to_string(),
        }
    }

    /// Name of the context kind as used in incompatible-context messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Context::Api(_) => "api",
            Context::Service(_) => "service",
            Context::Method(_) => "method",
            Context::Attribute { .. } => "attribute",
            Context::ServiceHttp(_) => "service http",
            Context::MethodHttp(_) => "method http",
        }
    }
}
