//! Pipeline plugin trait.

use eyre::Result;

use super::CompilationContext;

/// A hook into the validation pipeline.
///
/// Plugins are called before and after each phase that runs and may inspect
/// or modify the context, e.g. to add project-specific diagnostics.
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
