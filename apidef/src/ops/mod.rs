//! Core operations.
//!
//! The business logic of the apidef commands, separated from argument
//! parsing and output rendering.

pub mod check;
pub mod generate;

pub use check::{check, validate};
pub use generate::{GenerateOptions, generate};
