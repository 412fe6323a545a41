//! Expression graph types for apidef designs.
//!
//! The graph is produced by the evaluator (`apidef-eval`), checked and
//! completed by the validation pipeline (`apidef-codegen`) and read by the
//! file generators.
//!
//! # Architecture
//!
//! ```text
//! builder calls → Evaluator → RootExpr → Pipeline (validate, derive) → Design → generators
//! ```
//!
//! Ownership follows the definition nesting: the root owns services and user
//! types, a service owns its methods and errors, a method owns its errors and
//! type descriptors. References to named types ([`DataType::Ref`]) are plain
//! names resolved during validation, never owning links, so the graph is a
//! tree by construction.

mod http;
mod root;
mod service;
mod types;

pub use http::{
    ActionExpr, DEFAULT_MEDIA_TYPE, EncodingExpr, HttpMethod, HttpResponseExpr, HttpRoot,
    MethodHttpExpr, ResourceExpr, ResponseRef, Route, ServiceHttpExpr,
};
pub use root::{ApiExpr, ApiHttpExpr, RootExpr, UserTypeExpr};
pub use service::{ErrorExpr, MethodExpr, ServiceExpr};
pub use types::{
    AttributeExpr, DataType, Member, ParseTypeError, Primitive, RESERVED_ERROR_NAMES,
};

/// The kind tag of a definition, used in locations and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Api,
    Service,
    Method,
    Error,
    Attribute,
    Type,
    Resource,
    Action,
    Response,
}

impl DefinitionKind {
    /// Lower-case name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionKind::Api => "api",
            DefinitionKind::Service => "service",
            DefinitionKind::Method => "method",
            DefinitionKind::Error => "error",
            DefinitionKind::Attribute => "attribute",
            DefinitionKind::Type => "type",
            DefinitionKind::Resource => "resource",
            DefinitionKind::Action => "action",
            DefinitionKind::Response => "response",
        }
    }

    /// Format `kind "name"`, the building block of diagnostic locations.
    pub fn describe(&self, name: &str) -> String {
        format!("{} \"{}\"", self.as_str(), name)
    }
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
