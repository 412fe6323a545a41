//! Check command report data structures.

use std::path::PathBuf;

use apidef_core::Diagnostic;
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from design validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub design_path: PathBuf,
    /// Every diagnostic of the run, in the order it was found.
    pub diagnostics: Vec<Diagnostic>,
    /// Present when the design is valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DesignSummary>,
}

/// What a valid design defines.
#[derive(Debug, Serialize)]
pub struct DesignSummary {
    pub api: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub types: Vec<String>,
    pub services: Vec<ServiceSummary>,
}

#[derive(Debug, Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub methods: Vec<String>,
    pub errors: usize,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            out.diagnostic(diagnostic);
        }
        if !self.diagnostics.is_empty() {
            out.newline();
        }

        let Some(summary) = self.summary.as_ref().filter(|_| self.is_valid()) else {
            let errors = self.diagnostics.iter().filter(|d| d.severity.is_error()).count();
            out.preformatted(&format!(
                "✗ {} has {} error{}",
                self.design_path.display(),
                errors,
                plural(errors)
            ));
            return;
        };

        out.preformatted(&format!("✓ {} is valid", self.design_path.display()));
        out.newline();

        let mut heading = summary.api.clone();
        if let Some(version) = &summary.version {
            heading.push_str(&format!(" v{}", version));
        }
        if let Some(title) = &summary.title {
            heading.push_str(&format!(" ({})", title));
        }
        out.preformatted(&heading);

        if !summary.types.is_empty() {
            out.newline();
            out.section(&format!("Types ({})", summary.types.len()));
            for ty in &summary.types {
                out.list_item(ty);
            }
        }

        out.newline();
        out.section(&format!("Services ({})", summary.services.len()));
        for svc in &summary.services {
            out.list_item(&format!(
                "{}: {} method{}, {} error{}",
                svc.name,
                svc.methods.len(),
                plural(svc.methods.len()),
                svc.errors,
                plural(svc.errors)
            ));
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use apidef_core::DiagnosticKind;

    use super::*;
    use crate::reports::BufferOutput;

    fn summary() -> DesignSummary {
        DesignSummary {
            api: "calc".into(),
            title: None,
            version: Some("1.0".into()),
            types: Vec::new(),
            services: vec![ServiceSummary {
                name: "divider".into(),
                methods: vec!["divide".into()],
                errors: 2,
            }],
        }
    }

    #[test]
    fn test_render_valid() {
        let report = CheckReport {
            design_path: "design.toml".into(),
            diagnostics: Vec::new(),
            summary: Some(summary()),
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.text(),
            "✓ design.toml is valid\n\ncalc v1.0\n\nServices (1):\n  - divider: 1 method, 2 errors"
        );
    }

    #[test]
    fn test_render_errors() {
        let report = CheckReport {
            design_path: "design.toml".into(),
            diagnostics: vec![
                Diagnostic::error("validate", "type \"Money\" is not defined")
                    .kind(DiagnosticKind::UnresolvedReference)
                    .at("type \"Order\""),
            ],
            summary: None,
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.is_valid());
        assert_eq!(
            out.lines,
            vec![
                "error[unresolved-reference]: type \"Money\" is not defined (at type \"Order\")",
                "",
                "✗ design.toml has 1 error",
            ]
        );
    }

    #[test]
    fn test_json_omits_missing_summary() {
        let report = CheckReport {
            design_path: "design.toml".into(),
            diagnostics: vec![Diagnostic::error("eval", "boom")],
            summary: None,
        };
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("summary").is_none());
        assert_eq!(json["diagnostics"][0]["severity"], "Error");
        assert_eq!(json["diagnostics"][0]["phase"], "eval");
    }
}
