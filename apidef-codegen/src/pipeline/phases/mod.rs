//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - runs the lints and collects diagnostics
//! - [`DerivePhase`] - builds the HTTP projection of a valid graph

mod derive;
mod validate;

pub use derive::DerivePhase;
pub use validate::{
    DuplicateNameLint, EmptyDescriptionLint, Lint, LintInfo, ReservedErrorLint, ShapeLint,
    TypeCycleLint, UnresolvedReferenceLint, ValidatePhase,
};
