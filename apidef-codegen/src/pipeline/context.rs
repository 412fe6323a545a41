//! Compilation context passed through pipeline phases.

use apidef_core::{Diagnostic, Severity};
use apidef_eval::Evaluation;
use apidef_expr::RootExpr;

/// State carried through the pipeline phases.
///
/// Starts from an evaluation result: the root it built and the diagnostics
/// the builders recorded. Phases append their own diagnostics after those,
/// so the final list reads in the order problems were found.
#[derive(Debug)]
pub struct CompilationContext {
    /// The graph being validated and completed.
    pub root: RootExpr,
    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(root: RootExpr) -> Self {
        Self {
            root,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}

impl From<Evaluation> for CompilationContext {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            root: evaluation.root,
            diagnostics: evaluation.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = CompilationContext::new(RootExpr::new());

        assert!(ctx.root.services.is_empty());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = CompilationContext::new(RootExpr::new());

        ctx.add_error("test", "test error");
        ctx.add_warning("test", "test warning");

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn test_evaluation_diagnostics_come_first() {
        let evaluation = apidef_eval::evaluate(|ev| ev.method("orphan", |_| {}));
        let mut ctx = CompilationContext::from(evaluation);
        ctx.add_error("validate", "later");

        assert_eq!(ctx.diagnostics[0].phase, apidef_eval::PHASE);
        assert_eq!(ctx.diagnostics[1].phase, "validate");
    }
}
