//! Pipeline orchestrator.

use apidef_core::Diagnostic;
use apidef_eval::Evaluation;
use eyre::Result;

use super::{
    CompilationContext, Design, Phase, Plugin, ValidationFailure,
    phases::{DerivePhase, ValidatePhase},
};

/// The validation pipeline orchestrator.
///
/// Runs the validate phase, then (if validation found no errors) the derive
/// phase followed by any user phases. Plugin hooks are called before and
/// after each phase that runs.
///
/// # Example
///
/// ```
/// use apidef_codegen::pipeline::Pipeline;
/// use apidef_eval::evaluate;
///
/// let evaluation = evaluate(|ev| {
///     ev.service("divider", |ev| ev.method("divide", |_| {}));
/// });
///
/// let design = Pipeline::new().run(evaluation).unwrap();
/// assert_eq!(design.name(), "divider");
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the default lints.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the validate phase, e.g. to add project lints.
    pub fn validate_with(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Validate an evaluation result and, if it is clean, complete it.
    ///
    /// Executes the phases in order:
    /// 1. ValidatePhase - runs the lints, collects diagnostics
    /// 2. DerivePhase - builds the HTTP projection
    /// 3. User phases (if any)
    ///
    /// Phases after validation only run while no error has been recorded.
    /// A phase or plugin that fails outright stops the run; its error is
    /// recorded as a diagnostic of that phase.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] holding every diagnostic of the run if
    /// any of them is an error.
    pub fn run(&self, evaluation: Evaluation) -> Result<Design, ValidationFailure> {
        let mut ctx = CompilationContext::from(evaluation);

        let later: Vec<&dyn Phase> = std::iter::once(&DerivePhase as &dyn Phase)
            .chain(self.phases.iter().map(|p| p.as_ref()))
            .collect();

        let mut ok = self.run_phase(&self.validate, &mut ctx);
        for phase in later {
            if !ok || ctx.has_errors() {
                break;
            }
            ok = self.run_phase(phase, &mut ctx);
        }

        if ctx.has_errors() {
            tracing::debug!(errors = ctx.error_count(), "design rejected");
            return Err(ValidationFailure {
                diagnostics: ctx.diagnostics,
            });
        }
        tracing::debug!(warnings = ctx.warning_count(), "design accepted");
        Ok(Design::new(ctx.root, ctx.diagnostics))
    }

    /// Run a single phase with plugin hooks. Returns `false` if the phase or
    /// a hook failed.
    #[tracing::instrument(level = "debug", skip_all, fields(phase = phase.name()))]
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> bool {
        let phase_name = phase.name();
        match self.run_hooked(phase, ctx) {
            Ok(()) => true,
            Err(report) => {
                tracing::debug!(error = %report, "phase failed");
                ctx.add_diagnostic(Diagnostic::error(phase_name, format!("{:#}", report)));
                false
            }
        }
    }

    fn run_hooked(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use apidef_core::DiagnosticKind;
    use apidef_eval::evaluate;
    use eyre::bail;

    use super::*;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingPhase;

    impl Phase for FailingPhase {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn description(&self) -> &'static str {
            "Always fails"
        }

        fn run(&self, _ctx: &mut CompilationContext) -> Result<()> {
            bail!("out of disk")
        }
    }

    fn divider() -> Evaluation {
        evaluate(|ev| {
            ev.service("divider", |ev| {
                ev.error("DivByZero", "Division by zero");
                ev.method("divide", |ev| {
                    ev.payload_with((), |ev| {
                        ev.attribute("a", apidef_expr::Primitive::Int);
                        ev.attribute("b", apidef_expr::Primitive::Int);
                    });
                    ev.result(apidef_expr::Primitive::Int);
                });
            });
        })
    }

    #[test]
    fn test_valid_design_is_derived() {
        let design = Pipeline::new().run(divider()).expect("design should be valid");

        assert_eq!(design.name(), "divider");
        assert!(design.warnings().is_empty());
        assert_eq!(design.root().http.resources().len(), 1);
    }

    #[test]
    fn test_evaluation_diagnostics_come_first() {
        let evaluation = evaluate(|ev| {
            ev.method("orphan", |_| {});
            ev.service("s", |ev| {
                ev.method("m", |ev| ev.payload(apidef_expr::DataType::named("Missing")));
            });
        });

        let failure = Pipeline::new().run(evaluation).unwrap_err();
        let kinds: Vec<_> = failure.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                Some(DiagnosticKind::IncompatibleContext),
                Some(DiagnosticKind::UnresolvedReference)
            ]
        );
        assert_eq!(failure.diagnostics[0].phase, "eval");
        assert_eq!(failure.diagnostics[1].phase, "validate");
    }

    #[test]
    fn test_later_phases_skipped_on_errors() {
        let (plugin, before_count, after_count) = CountingPlugin::new();
        let evaluation = evaluate(|ev| {
            ev.service("s", |_| {});
            ev.service("s", |_| {});
        });

        let failure = Pipeline::new().plugin(plugin).run(evaluation).unwrap_err();

        assert_eq!(failure.error_count(), 1);
        // validate only
        assert_eq!(before_count.load(Ordering::SeqCst), 1);
        assert_eq!(after_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        pipeline.run(divider()).expect("pipeline should succeed");

        // validate + derive
        assert_eq!(before_count.load(Ordering::SeqCst), 2);
        assert_eq!(after_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failing_phase_becomes_diagnostic() {
        let failure = Pipeline::new()
            .phase(FailingPhase)
            .run(divider())
            .unwrap_err();

        assert_eq!(failure.error_count(), 1);
        assert_eq!(failure.diagnostics[0].phase, "failing");
        assert_eq!(failure.diagnostics[0].message, "out of disk");
    }

    #[test]
    fn test_custom_validate_phase() {
        let evaluation = evaluate(|ev| {
            ev.service("s", |_| {});
            ev.service("s", |_| {});
        });

        let design = Pipeline::new()
            .validate_with(ValidatePhase::empty())
            .run(evaluation);
        assert!(design.is_ok());
    }
}
