//! Generated file descriptors.
//!
//! Each descriptor extracts the data its template needs from the design
//! when it is built; rendering never looks at the design again.

mod endpoints_rs;
mod errors_rs;
mod mod_rs;
mod service_rs;
mod types_rs;

use apidef_codegen::{generation::ImportSpec, naming::NamingConvention};
use apidef_expr::DataType;
pub use endpoints_rs::{EndpointData, EndpointsData, EndpointsRs};
pub use errors_rs::{ErrorEnumData, ErrorVariantData, ErrorsData, ErrorsRs};
pub use mod_rs::{ModDecl, ModRs};
pub use service_rs::{ServiceData, ServiceMethodData, ServiceRs};
pub use types_rs::{TypeAlias, TypesData, TypesRs};

use crate::type_mapper::{ERROR_RESULT, uses_error_result};

/// Module holding user types and the error result struct.
pub const TYPES_MODULE: &str = "crate::types";

/// Type names derived from design names.
#[derive(Debug, Clone, Copy)]
pub struct RustNames<'a> {
    naming: &'a NamingConvention,
}

impl<'a> RustNames<'a> {
    pub fn new(naming: &'a NamingConvention) -> Self {
        Self { naming }
    }

    pub fn naming(&self) -> &'a NamingConvention {
        self.naming
    }

    /// Service trait name (e.g. "divider" -> "Divider").
    pub fn service_trait(&self, service: &str) -> String {
        self.naming.type_name(service)
    }

    pub fn endpoint_enum(&self, service: &str) -> String {
        format!("{}Endpoint", self.naming.type_name(service))
    }

    pub fn response_enum(&self, service: &str) -> String {
        format!("{}Response", self.naming.type_name(service))
    }

    pub fn payload(&self, method: &str) -> String {
        format!("{}Payload", self.naming.type_name(method))
    }

    pub fn result(&self, method: &str) -> String {
        format!("{}Result", self.naming.type_name(method))
    }

    pub fn error_enum(&self, method: &str) -> String {
        format!("{}Error", self.naming.type_name(method))
    }

    /// Struct for an inline error object. Method-level errors are prefixed
    /// with the method so two methods may declare differently shaped errors
    /// with the same name.
    pub fn error_details(&self, method: Option<&str>, error: &str) -> String {
        match method {
            Some(method) => format!(
                "{}{}Details",
                self.naming.type_name(method),
                self.naming.type_name(error)
            ),
            None => format!("{}Details", self.naming.type_name(error)),
        }
    }
}

/// Imports from the types module needed by `ty`.
pub(crate) fn type_imports(ty: &DataType, naming: &NamingConvention) -> Vec<ImportSpec> {
    let mut imports: Vec<ImportSpec> = ty
        .references()
        .into_iter()
        .map(|name| ImportSpec::symbol(TYPES_MODULE, naming.type_name(name)))
        .collect();
    if uses_error_result(ty) {
        imports.push(ImportSpec::symbol(TYPES_MODULE, ERROR_RESULT));
    }
    imports
}

/// Rust string literal for `s`.
pub(crate) fn quoted(s: &str) -> String {
    format!("{:?}", s)
}
