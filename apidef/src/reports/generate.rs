//! Gen command report data structures.

use std::path::PathBuf;

use apidef_core::Diagnostic;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerationReport {
    pub api_name: String,
    /// Validation warnings.
    pub warnings: Vec<Diagnostic>,
    pub result: GenerationResult,
}

#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
    /// Some files could not be generated; nothing was written.
    Failed(Vec<Diagnostic>),
}

#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    pub written: Vec<String>,
    /// Paths left alone because they already existed.
    pub skipped: Vec<String>,
}

#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        !matches!(self.result, GenerationResult::Failed(_))
    }
}

impl Report for GenerationReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.diagnostic(warning);
        }

        match &self.result {
            GenerationResult::Written(written) => {
                out.key_value(
                    "Generated",
                    &format!("{} ({})", self.api_name, written.output_dir.display()),
                );
                for path in &written.written {
                    out.added_item(path);
                }
                if !written.skipped.is_empty() {
                    out.newline();
                    out.section("Skipped (already exist)");
                    for path in &written.skipped {
                        out.list_item(path);
                    }
                }
            }
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!("{} files would be generated", files.len()));
            }
            GenerationResult::Failed(failures) => {
                for failure in failures {
                    out.diagnostic(failure);
                }
                out.newline();
                out.preformatted("No files were written.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render_written() {
        let report = GenerationReport {
            api_name: "calc".into(),
            warnings: Vec::new(),
            result: GenerationResult::Written(WrittenResult {
                output_dir: "out".into(),
                written: vec!["src/lib.rs".into()],
                skipped: vec!["src/types.rs".into()],
            }),
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "Generated: calc (out)",
                "  + src/lib.rs",
                "",
                "Skipped (already exist):",
                "  - src/types.rs",
            ]
        );
    }

    #[test]
    fn test_failed_generation_is_not_success() {
        let report = GenerationReport {
            api_name: "calc".into(),
            warnings: Vec::new(),
            result: GenerationResult::Failed(vec![Diagnostic::error("generate", "no free path")]),
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.is_success());
        assert_eq!(out.lines.last().map(String::as_str), Some("No files were written."));
    }
}
