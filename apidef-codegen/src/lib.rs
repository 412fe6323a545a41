//! Validation pipeline and shared code generation utilities for apidef.
//!
//! This crate turns an evaluation result into a validated [`pipeline::Design`]
//! and provides the language-agnostic machinery language generators (e.g.
//! `apidef-codegen-rust`) render designs with.
//!
//! # Module Organization
//!
//! - [`pipeline`] - Validation phases, lints and the frozen design
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`section`] - Header and body sections, templates, assembly
//! - [`paths`] - Collision-free output path allocation
//! - [`naming`] - Target-language naming rules
//! - [`generation`] - Output management (ImportCollector, FileRegistry, etc.)
//! - [`language`] - Language generator traits and the per-file render step

pub mod builder;
pub mod generation;
pub mod language;
pub mod naming;
pub mod paths;
pub mod pipeline;
pub mod section;

pub use language::{
    CodegenFile, GenerateReport, GeneratedFile, GeneratorConfig, LanguageCodegen, TypeMapper,
    render_file,
};
pub use pipeline::{Design, Pipeline, ValidationFailure};
