//! Snapshot tests for Rust code generation.
//!
//! Designs are evaluated and validated through the full pipeline before
//! generation, so these tests cover the same path the CLI takes.

use apidef_codegen::{
    Design, Pipeline, ValidationFailure,
    paths::{PathTemplate, ReservedPaths, unique_path},
};
use apidef_codegen_rust::{GenerateReport, Generator, LanguageCodegen};
use apidef_core::DiagnosticKind;
use apidef_eval::{Evaluator, evaluate};
use apidef_expr::Primitive;

fn run(body: impl FnOnce(&mut Evaluator)) -> Result<Design, ValidationFailure> {
    Pipeline::new().run(evaluate(body))
}

fn generate(body: impl FnOnce(&mut Evaluator)) -> GenerateReport {
    let design = run(body).expect("design should be valid");
    Generator::default().generate(&design, &mut ReservedPaths::new())
}

/// Get a specific file from the generated output.
fn file<'a>(report: &'a GenerateReport, path: &str) -> &'a str {
    report
        .file(path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{} not generated; got {:?}", path, report.paths()))
}

fn divider(ev: &mut Evaluator) {
    ev.service("divider", |ev| {
        ev.error("invalid_arguments", ());
        ev.method("divide", |ev| {
            ev.payload_with((), |ev| {
                ev.attribute("a", Primitive::Int);
                ev.attribute("b", Primitive::Int);
            });
            ev.result(Primitive::Float64);
            ev.error("div_by_zero", ());
        });
    });
}

#[test]
fn test_endpoints_wrap_service_methods() {
    let report = generate(|ev| {
        ev.service("divider", |ev| {
            ev.method("divide", |ev| {
                ev.payload_with((), |ev| {
                    ev.attribute("a", Primitive::Int);
                    ev.attribute("b", Primitive::Int);
                });
                ev.result(Primitive::Float64);
            });
            ev.method("reset", |_| {});
        });
    });

    insta::assert_snapshot!(file(&report, "src/endpoints/divider.rs"), @r#"
    // Code generated by apidef. DO NOT EDIT.

    //! Endpoints of the divider service.

    use crate::services::divider::{DividePayload, Divider};
    use crate::errors::divider::{DivideError, ResetError};

    /// A request to one method of the divider service.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DividerEndpoint {
        Divide(DividePayload),
        Reset,
    }

    /// Outcome of a call to one method of the divider service.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DividerResponse {
        Divide(Result<f64, DivideError>),
        Reset(Result<(), ResetError>),
    }

    impl DividerEndpoint {
        /// Method names, in declaration order.
        pub const METHODS: &'static [&'static str] = &["divide", "reset"];

        /// Name of the method this request is for.
        pub fn method(&self) -> &'static str {
            match self {
                Self::Divide(_) => "divide",
                Self::Reset => "reset",
            }
        }

        /// HTTP verb and path of the method's route, if it has one.
        pub fn route(&self) -> Option<(&'static str, &'static str)> {
            match self {
                Self::Divide(_) => None,
                Self::Reset => None,
            }
        }

        /// Status code of a successful response.
        pub fn status(&self) -> u16 {
            match self {
                Self::Divide(_) => 200,
                Self::Reset => 200,
            }
        }

        /// Call the service method this request is for.
        pub fn call<S: Divider + ?Sized>(self, service: &S) -> DividerResponse {
            match self {
                Self::Divide(payload) => DividerResponse::Divide(service.divide(payload)),
                Self::Reset => DividerResponse::Reset(service.reset()),
            }
        }
    }
    "#);
}

#[test]
fn test_error_enum_lists_service_and_method_errors() {
    let report = generate(divider);

    insta::assert_snapshot!(file(&report, "src/errors/divider.rs"), @r#"
    // Code generated by apidef. DO NOT EDIT.

    //! Errors of the divider service.

    use crate::types::ErrorResult;

    /// Errors returned by `divide`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DivideError {
        InvalidArguments(ErrorResult),
        DivByZero(ErrorResult),
    }

    impl std::fmt::Display for DivideError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::InvalidArguments(_) => f.write_str("invalid_arguments"),
                Self::DivByZero(_) => f.write_str("div_by_zero"),
            }
        }
    }

    impl std::error::Error for DivideError {}
    "#);
}

#[test]
fn test_service_trait_and_payload() {
    let report = generate(divider);
    let service = file(&report, "src/services/divider.rs");

    assert!(service.contains("use crate::errors::divider::DivideError;"));
    assert!(service.contains("pub struct DividePayload {\n    pub a: i64,\n    pub b: i64,\n}"));
    assert!(service.contains(
        "pub trait Divider {\n    fn divide(&self, payload: DividePayload) -> Result<f64, DivideError>;\n}"
    ));

    let endpoints = file(&report, "src/endpoints/divider.rs");
    assert!(endpoints.contains("use crate::services::divider::{DividePayload, Divider};"));
    assert!(endpoints.contains("    Divide(DividePayload),\n"));
}

#[test]
fn test_crate_root_declares_every_module() {
    let report = generate(divider);

    insta::assert_snapshot!(file(&report, "src/lib.rs"), @r#"
    // Code generated by apidef. DO NOT EDIT.

    //! Generated code for the divider API.

    pub mod types;
    pub mod errors;
    pub mod services;
    pub mod endpoints;
    "#);
}

#[test]
fn test_duplicate_error_name_fails_once() {
    let failure = run(|ev| {
        ev.service("divider", |ev| {
            ev.error("div_by_zero", ());
            ev.method("divide", |ev| ev.error("div_by_zero", ()));
        });
    })
    .expect_err("duplicate error should fail validation");

    let duplicates: Vec<_> = failure
        .errors()
        .filter(|d| d.is(DiagnosticKind::DuplicateName))
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(failure.error_count(), 1);
    assert_eq!(
        duplicates[0].location.as_deref(),
        Some("service \"divider\" > method \"divide\"")
    );
}

#[test]
fn test_duplicate_method_reported_once_with_owner() {
    let failure = run(|ev| {
        ev.service("divider", |ev| {
            ev.method("divide", |_| {});
            ev.method("divide", |_| {});
        });
    })
    .expect_err("duplicate method should fail validation");

    assert_eq!(failure.diagnostics.len(), 1);
    let diagnostic = &failure.diagnostics[0];
    assert!(diagnostic.is(DiagnosticKind::DuplicateName));
    assert_eq!(diagnostic.message, "method \"divide\" is defined more than once");
    assert_eq!(diagnostic.location.as_deref(), Some("service \"divider\""));
}

#[test]
fn test_names_casing_to_one_identifier_fail_validation() {
    let failure = run(|ev| {
        ev.service("divider", |ev| {
            ev.error("div_by_zero", ());
            ev.method("divide", |_| {});
            ev.method("Divide", |ev| ev.error("DivByZero", ()));
        });
    })
    .expect_err("colliding identifiers should fail validation");

    let locations: Vec<_> = failure
        .errors()
        .filter(|d| d.is(DiagnosticKind::DuplicateName))
        .map(|d| d.location.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(
        locations,
        vec!["service \"divider\"", "service \"divider\" > method \"Divide\""]
    );
}

#[test]
fn test_numbered_template_allocates_in_order() {
    let template = PathTemplate::new("gen/part{n}.rs").unwrap();
    let mut reserved = ReservedPaths::new();

    let paths: Vec<String> = (0..3)
        .map(|_| unique_path(&template, &mut reserved).unwrap())
        .collect();

    assert_eq!(paths, vec!["gen/part0.rs", "gen/part1.rs", "gen/part2.rs"]);
    assert_eq!(reserved.allocated().count(), 3);
}

#[test]
fn test_generation_is_deterministic() {
    let first = generate(divider);
    let second = generate(divider);

    assert_eq!(first.paths(), second.paths());
    for (a, b) in first.files.iter().zip(&second.files) {
        assert_eq!(a.content, b.content, "{} differs between runs", a.path);
    }
}

#[test]
fn test_every_file_carries_the_generated_header() {
    let report = generate(divider);

    assert!(report.is_success());
    for f in &report.files {
        assert!(
            f.content.starts_with("// Code generated by apidef. DO NOT EDIT.\n"),
            "{} has no header",
            f.path
        );
    }
}

#[test]
fn test_write_generated_files() {
    let dir = tempfile::tempdir().unwrap();
    let report = generate(divider);
    let expected = report.files.len();

    let stats = report.into_registry().write_all(dir.path()).unwrap();

    assert_eq!(stats.written(), expected);
    assert_eq!(stats.skipped(), 0);
    let lib = std::fs::read_to_string(dir.path().join("src/lib.rs")).unwrap();
    assert!(lib.contains("pub mod services;"));
    assert!(dir.path().join("src/errors/divider.rs").exists());
}
