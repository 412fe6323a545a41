//! The evaluator: context stack plus error accumulation.

use std::panic::Location;

use apidef_core::{Diagnostic, DiagnosticKind};
use apidef_expr::RootExpr;

use crate::Context;

/// Phase name recorded on evaluation diagnostics.
pub const PHASE: &str = "eval";

/// Where the evaluator is in its lifecycle.
///
/// `Finalized` is not represented: [`Evaluator::finish`] consumes the
/// evaluator, so no builder can run afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalState {
    /// No builder body is executing; the root is current.
    Idle,
    /// At least one builder body is executing.
    Evaluating,
}

/// The outcome of an evaluation run.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The graph built by the run.
    pub root: RootExpr,
    /// Structural problems recorded by builders, in call order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Evaluation {
    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

/// Executes builder functions and tracks which definition is current.
///
/// The evaluator owns the root under construction and a stack of
/// [`Context`]s. Definitions being built live on the stack; when their body
/// returns they are popped and attached to whatever is current again.
#[derive(Debug, Default)]
pub struct Evaluator {
    root: RootExpr,
    stack: Vec<Context>,
    diagnostics: Vec<Diagnostic>,
}

impl Evaluator {
    /// Create an evaluator with an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active context, or `None` when the root is current.
    pub fn current(&self) -> Option<&Context> {
        self.stack.last()
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut Context> {
        self.stack.last_mut()
    }

    /// Number of contexts on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn state(&self) -> EvalState {
        if self.stack.is_empty() {
            EvalState::Idle
        } else {
            EvalState::Evaluating
        }
    }

    /// The root built so far.
    pub fn root(&self) -> &RootExpr {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut RootExpr {
        &mut self.root
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Push `context`, run `body`, then pop and return the finished context.
    ///
    /// Nested calls are balanced by construction: every push made here is
    /// undone before returning, whatever `body` records.
    pub fn execute(&mut self, context: Context, body: impl FnOnce(&mut Evaluator)) -> Context {
        tracing::trace!(context = %context.describe(), depth = self.stack.len(), "enter");
        self.stack.push(context);
        let depth = self.stack.len();

        body(self);

        debug_assert_eq!(self.stack.len(), depth, "unbalanced context stack");
        let context = self
            .stack
            .pop()
            .expect("context pushed by execute is still on the stack");
        tracing::trace!(context = %context.describe(), depth = self.stack.len(), "leave");
        context
    }

    /// Path of the current definition, e.g. `service "divider" > method "divide"`.
    pub fn location(&self) -> String {
        if self.stack.is_empty() {
            return "root".to_string();
        }
        self.stack
            .iter()
            .map(Context::describe)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Record an error against the current definition.
    #[track_caller]
    pub fn record(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let caller = Location::caller();
        let diagnostic = Diagnostic::error(PHASE, message)
            .kind(kind)
            .at(self.location())
            .from_source(format!("{}:{}:{}", caller.file(), caller.line(), caller.column()));
        tracing::debug!(%diagnostic, "builder error");
        self.diagnostics.push(diagnostic);
    }

    /// Record that `builder` was called where the current context does not
    /// accept it.
    #[track_caller]
    pub fn incompatible(&mut self, builder: &str) {
        let context = match self.current() {
            Some(ctx) => ctx.kind_name(),
            None => "root",
        };
        self.record(
            DiagnosticKind::IncompatibleContext,
            format!("{} cannot be used in {} context", builder, context),
        );
    }

    /// Stop accepting builder calls and hand over the graph.
    ///
    /// # Panics
    ///
    /// Panics if a context is still on the stack. Builder bodies borrow the
    /// evaluator mutably, so this only happens if the stack was corrupted.
    pub fn finish(self) -> Evaluation {
        assert!(
            self.stack.is_empty(),
            "cannot finalize evaluation while {} context(s) are active",
            self.stack.len()
        );
        tracing::debug!(
            services = self.root.services.len(),
            types = self.root.types.len(),
            errors = self.diagnostics.len(),
            "evaluation finished"
        );
        Evaluation {
            root: self.root,
            diagnostics: self.diagnostics,
        }
    }
}

/// Run `body` against a fresh evaluator and return the result.
///
/// # Example
///
/// ```
/// use apidef_eval::evaluate;
///
/// let evaluation = evaluate(|ev| {
///     ev.service("divider", |ev| {
///         ev.method("divide", |_| {});
///     });
/// });
/// assert!(!evaluation.has_errors());
/// assert_eq!(evaluation.root.services[0].methods[0].name, "divide");
/// ```
pub fn evaluate(body: impl FnOnce(&mut Evaluator)) -> Evaluation {
    let mut evaluator = Evaluator::new();
    body(&mut evaluator);
    evaluator.finish()
}

#[cfg(test)]
mod tests {
    use apidef_expr::{MethodExpr, ServiceExpr};

    use super::*;

    #[test]
    fn test_execute_restores_previous_context() {
        let mut ev = Evaluator::new();
        assert_eq!(ev.state(), EvalState::Idle);

        let finished = ev.execute(Context::Service(ServiceExpr::new("a")), |ev| {
            assert_eq!(ev.depth(), 1);
            assert_eq!(ev.state(), EvalState::Evaluating);
            ev.execute(Context::Method(MethodExpr::new("m")), |ev| {
                assert_eq!(ev.depth(), 2);
                ev.execute(Context::Method(MethodExpr::new("deeper")), |ev| {
                    assert_eq!(ev.depth(), 3);
                });
                assert!(matches!(ev.current(), Some(Context::Method(m)) if m.name == "m"));
            });
            assert!(matches!(ev.current(), Some(Context::Service(s)) if s.name == "a"));
        });

        assert!(matches!(finished, Context::Service(_)));
        assert!(ev.current().is_none());
        assert_eq!(ev.state(), EvalState::Idle);
    }

    #[test]
    fn test_context_restored_when_body_records_errors() {
        let mut ev = Evaluator::new();
        ev.execute(Context::Service(ServiceExpr::new("a")), |ev| {
            ev.execute(Context::Method(MethodExpr::new("m")), |ev| {
                ev.record(DiagnosticKind::ShapeViolation, "boom");
            });
            assert!(matches!(ev.current(), Some(Context::Service(_))));
        });
        assert!(ev.current().is_none());
        assert_eq!(ev.diagnostics().len(), 1);
    }

    #[test]
    fn test_location_joins_stack() {
        let mut ev = Evaluator::new();
        assert_eq!(ev.location(), "root");
        ev.execute(Context::Service(ServiceExpr::new("divider")), |ev| {
            ev.execute(Context::Method(MethodExpr::new("divide")), |ev| {
                assert_eq!(ev.location(), "service \"divider\" > method \"divide\"");
            });
        });
    }

    #[test]
    fn test_record_captures_caller() {
        let mut ev = Evaluator::new();
        ev.record(DiagnosticKind::DuplicateName, "dup");
        let diag = &ev.diagnostics()[0];
        assert_eq!(diag.phase, PHASE);
        assert_eq!(diag.location.as_deref(), Some("root"));
        assert!(diag.source.as_deref().unwrap().contains("evaluator.rs"));
    }

    #[test]
    fn test_incompatible_names_context() {
        let mut ev = Evaluator::new();
        ev.incompatible("method");
        let diag = &ev.diagnostics()[0];
        assert!(diag.is(DiagnosticKind::IncompatibleContext));
        assert_eq!(diag.message, "method cannot be used in root context");
    }

    #[test]
    fn test_finish_returns_root_and_diagnostics() {
        let mut ev = Evaluator::new();
        ev.record(DiagnosticKind::ShapeViolation, "bad");
        let evaluation = ev.finish();
        assert!(evaluation.has_errors());
        assert!(evaluation.root.services.is_empty());
    }
}
