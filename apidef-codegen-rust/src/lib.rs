//! Rust code generation for apidef designs.
//!
//! ```
//! use apidef_codegen::{Pipeline, paths::ReservedPaths};
//! use apidef_codegen_rust::{Generator, LanguageCodegen};
//! use apidef_eval::evaluate;
//!
//! let design = Pipeline::new()
//!     .run(evaluate(|ev| ev.service("divider", |ev| ev.method("divide", |_| {}))))
//!     .unwrap();
//! let report = Generator::default().generate(&design, &mut ReservedPaths::new());
//!
//! assert!(report.is_success());
//! assert!(report.file("src/endpoints/divider.rs").is_some());
//! ```

mod generator;
mod type_mapper;

pub mod ast;
pub mod files;
pub mod shapes;

pub use apidef_codegen::{GenerateReport, LanguageCodegen};
pub use generator::Generator;
pub use type_mapper::{ERROR_RESULT, RustTypeMapper};
