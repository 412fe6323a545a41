//! Generate operation - code generation from a validated design.

use std::path::Path;

use apidef_codegen::{Design, GeneratorConfig, paths::ReservedPaths};
use apidef_codegen_rust::{Generator, LanguageCodegen};
use apidef_core::Overwrite;
use eyre::{Context, Result};

use crate::{
    design::DesignFile,
    reports::{GenerationReport, GenerationResult, PreviewFile, WrittenResult},
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    pub output_dir: &'a Path,
    /// Preview without writing files.
    pub dry_run: bool,
    /// Leave files that already exist untouched.
    pub keep_existing: bool,
}

/// Execute the generate operation.
///
/// Nothing is written unless every file rendered.
pub fn generate(
    file: &DesignFile,
    design: &Design,
    opts: GenerateOptions<'_>,
) -> Result<GenerationReport> {
    let mut config = GeneratorConfig::default();
    if let Some(header) = &file.codegen.header {
        config = config.with_header(header.as_str());
    }
    let mut reserved: ReservedPaths = file.codegen.reserved.iter().map(String::as_str).collect();

    let report = Generator::new(config).generate(design, &mut reserved);
    tracing::debug!(
        files = report.files.len(),
        failures = report.failures.len(),
        "generation finished"
    );

    let result = if !report.is_success() {
        GenerationResult::Failed(report.failures)
    } else if opts.dry_run {
        GenerationResult::Preview(
            report
                .files
                .into_iter()
                .map(|f| PreviewFile {
                    path: f.path,
                    content: f.content,
                })
                .collect(),
        )
    } else {
        let mut registry = report.into_registry();
        if opts.keep_existing {
            registry.set_overwrite(Overwrite::IfMissing);
        }
        let stats = registry
            .write_all(opts.output_dir)
            .wrap_err("Failed to write generated files")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written: stats.written_paths,
            skipped: stats.skipped_paths,
        })
    };

    Ok(GenerationReport {
        api_name: design.name().to_string(),
        warnings: design.warnings().to_vec(),
        result,
    })
}
