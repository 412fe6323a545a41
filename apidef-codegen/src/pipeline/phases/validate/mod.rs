//! Validate phase - runs lints over the evaluated graph.

mod lint;
pub mod lints;

use eyre::Result;
pub use lint::{Lint, LintInfo};
pub use lints::{
    DuplicateNameLint, EmptyDescriptionLint, ReservedErrorLint, ShapeLint, TypeCycleLint,
    UnresolvedReferenceLint,
};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the graph using configurable lints.
///
/// Lints run in order and all of them run, so one pass reports every
/// problem. Errors do not abort this phase; the pipeline skips the
/// following phases instead.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a validate phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(UnresolvedReferenceLint),
                Box::new(DuplicateNameLint),
                Box::new(ShapeLint),
                Box::new(ReservedErrorLint),
                Box::new(TypeCycleLint),
                Box::new(EmptyDescriptionLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check graph integrity and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for lint in &self.lints {
            let before = ctx.diagnostics.len();
            lint.check(&ctx.root, &mut ctx.diagnostics);
            tracing::trace!(
                lint = lint.name(),
                found = ctx.diagnostics.len() - before,
                "lint finished"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use apidef_core::Diagnostic;
    use apidef_expr::RootExpr;

    use super::*;

    #[test]
    fn test_default_lint_order() {
        assert_eq!(
            ValidatePhase::new().lint_names(),
            vec![
                "unresolved-reference",
                "duplicate-name",
                "shape",
                "reserved-error",
                "type-cycle",
                "empty-description"
            ]
        );
    }

    #[test]
    fn test_errors_do_not_fail_the_phase() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn description(&self) -> &'static str {
                "Always produces an error"
            }
            fn check(&self, _root: &RootExpr, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("test", "forced error"));
            }
        }

        let mut ctx = CompilationContext::new(RootExpr::new());
        let phase = ValidatePhase::empty()
            .with_lint(AlwaysErrorLint)
            .with_lint(AlwaysErrorLint);

        assert!(phase.run(&mut ctx).is_ok());
        assert_eq!(ctx.error_count(), 2);
    }
}
