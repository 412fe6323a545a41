//! The validated design and the failure returned instead of it.

use std::sync::Arc;

use apidef_core::Diagnostic;
use apidef_expr::{RootExpr, ServiceExpr, UserTypeExpr};
use thiserror::Error;

/// A validated, read-only expression graph.
///
/// Only the pipeline can create one, and only from a root that passed every
/// lint. Cloning is cheap; all clones share the same graph.
#[derive(Debug, Clone)]
pub struct Design {
    root: Arc<RootExpr>,
    warnings: Vec<Diagnostic>,
}

impl Design {
    pub(crate) fn new(root: RootExpr, warnings: Vec<Diagnostic>) -> Self {
        Self {
            root: Arc::new(root),
            warnings,
        }
    }

    pub fn root(&self) -> &RootExpr {
        &self.root
    }

    /// Services in declaration order.
    pub fn services(&self) -> &[ServiceExpr] {
        &self.root.services
    }

    pub fn types(&self) -> &[UserTypeExpr] {
        &self.root.types
    }

    pub fn name(&self) -> &str {
        self.root.api_name()
    }

    /// Non-fatal diagnostics found while validating.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Returned when a design has errors.
///
/// Holds every diagnostic of the run in order: evaluation problems first,
/// then validation problems in lint order.
#[derive(Debug, Clone, Error)]
#[error("design has {} error(s)", count_errors(.diagnostics))]
pub struct ValidationFailure {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationFailure {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        count_errors(&self.diagnostics)
    }
}

fn count_errors(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.severity.is_error()).count()
}
