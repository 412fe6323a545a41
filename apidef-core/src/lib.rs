//! Core utilities and types for apidef.
//!
//! This crate provides the pieces every other apidef crate agrees on: the
//! diagnostic surface used by evaluation, validation and generation, the
//! identifier casing helpers, and generated-file writing.

mod diagnostic;
mod file;
mod utils;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use file::{File, GENERATED_HEADER, Overwrite, WriteResult, write_file};
pub use utils::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
