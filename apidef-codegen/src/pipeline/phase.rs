//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A phase in the validation pipeline.
///
/// Built-in phases:
/// - `ValidatePhase` - runs the lints and collects diagnostics
/// - `DerivePhase` - completes the HTTP projection of a valid graph
///
/// Phases after the first one that leaves errors behind are skipped.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Problems with the design
    /// itself are recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
