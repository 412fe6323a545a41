//! Check operation - design validation.

use std::path::Path;

use apidef_codegen::{Design, Pipeline, ValidationFailure};
use apidef_eval::evaluate;

use crate::{
    design::{DesignFile, replay},
    reports::{CheckReport, DesignSummary, ServiceSummary},
};

/// Evaluate and validate a design file.
///
/// Builder call sites point into the replay code rather than the design
/// file, so they are dropped from the diagnostics.
pub fn validate(file: &DesignFile) -> Result<Design, ValidationFailure> {
    let evaluation = evaluate(|ev| replay(file, ev));
    Pipeline::new().run(evaluation).map_err(|mut failure| {
        for diagnostic in &mut failure.diagnostics {
            diagnostic.source = None;
        }
        failure
    })
}

/// Execute the check operation.
pub fn check(file: &DesignFile, design_path: &Path) -> CheckReport {
    match validate(file) {
        Ok(design) => CheckReport {
            design_path: design_path.to_path_buf(),
            diagnostics: design.warnings().to_vec(),
            summary: Some(summarize(&design)),
        },
        Err(failure) => failed(failure, design_path),
    }
}

/// Report for a design that did not validate.
pub fn failed(failure: ValidationFailure, design_path: &Path) -> CheckReport {
    CheckReport {
        design_path: design_path.to_path_buf(),
        diagnostics: failure.diagnostics,
        summary: None,
    }
}

fn summarize(design: &Design) -> DesignSummary {
    let api = design.root().api.as_ref();
    DesignSummary {
        api: design.name().to_string(),
        title: api.and_then(|a| a.title.clone()),
        version: api.and_then(|a| a.version.clone()),
        types: design.types().iter().map(|t| t.name.clone()).collect(),
        services: design
            .services()
            .iter()
            .map(|svc| ServiceSummary {
                name: svc.name.clone(),
                methods: svc.methods.iter().map(|m| m.name.clone()).collect(),
                errors: svc.all_errors().len(),
            })
            .collect(),
    }
}
