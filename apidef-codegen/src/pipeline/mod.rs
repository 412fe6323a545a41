//! Validation pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that turns an evaluation
//! result into a validated [`Design`]. The pipeline provides:
//!
//! - Explicit phase boundaries (validate, then derive)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection via [`CompilationContext`]
//!
//! # Example
//!
//! ```
//! use apidef_codegen::pipeline::Pipeline;
//! use apidef_eval::evaluate;
//!
//! let evaluation = evaluate(|ev| {
//!     ev.service("divider", |ev| ev.description(""));
//! });
//!
//! let design = Pipeline::new().run(evaluation).unwrap();
//! for diag in design.warnings() {
//!     eprintln!("warning: {}", diag.message);
//! }
//! ```

mod context;
mod design;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use design::{Design, ValidationFailure};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
