//! Language-specific abstractions.
//!
//! A language generator turns a [`Design`] into a list of [`CodegenFile`]
//! descriptors and renders each one through [`render_file`]: allocate a
//! path, render the sections, assemble the text.

use apidef_core::{Diagnostic, DiagnosticKind, GENERATED_HEADER, Overwrite};
use apidef_expr::{DataType, Primitive};

use crate::{
    builder::Indent,
    generation::{FileCategory, FileEntry, FileRegistry},
    naming::{NamingConvention, RUST_NAMING},
    paths::{AllocationError, PathTemplate, ReservedPaths, unique_path},
    pipeline::Design,
    section::{Section, SectionRenderer, assemble},
};

/// Phase name used for generation diagnostics.
pub const PHASE: &str = "generate";

/// One output file kind: where it goes and what it contains.
pub trait CodegenFile {
    /// Descriptor name used in diagnostics (e.g. `endpoints "divider"`).
    fn name(&self) -> String;

    fn category(&self) -> FileCategory;

    /// How an existing file at the allocated path is treated.
    fn overwrite(&self) -> Overwrite {
        Overwrite::Always
    }

    /// The relative path to allocate, with one `{n}` placeholder.
    fn path_template(&self) -> Result<PathTemplate, AllocationError>;

    /// Header and body sections, in output order.
    fn sections(&self, renderer: &SectionRenderer) -> Vec<Section>;
}

/// A rendered file at its allocated path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub category: FileCategory,
    pub content: String,
    pub overwrite: Overwrite,
}

impl From<GeneratedFile> for FileEntry {
    fn from(file: GeneratedFile) -> Self {
        FileEntry::new(file.path, file.content, file.category).with_overwrite(file.overwrite)
    }
}

/// Allocate a path for `file` and render it.
///
/// An allocation failure fails only this file; it is returned as a
/// diagnostic located at the descriptor name.
#[tracing::instrument(level = "debug", skip_all, fields(file = %file.name()))]
pub fn render_file(
    file: &dyn CodegenFile,
    renderer: &SectionRenderer,
    reserved: &mut ReservedPaths,
) -> Result<GeneratedFile, Diagnostic> {
    let path = file
        .path_template()
        .and_then(|template| unique_path(&template, reserved))
        .map_err(|err| allocation_diagnostic(&file.name(), &err))?;

    let content = assemble(&file.sections(renderer));
    tracing::debug!(%path, bytes = content.len(), "rendered file");
    Ok(GeneratedFile {
        path,
        category: file.category(),
        content,
        overwrite: file.overwrite(),
    })
}

/// Diagnostic for a failed path allocation.
pub fn allocation_diagnostic(location: &str, err: &AllocationError) -> Diagnostic {
    let diagnostic = Diagnostic::error(PHASE, err.to_string()).at(location);
    match err {
        AllocationError::Exhausted { .. } => diagnostic.kind(DiagnosticKind::AllocationExhausted),
        AllocationError::InvalidTemplate { .. } => diagnostic,
    }
}

/// Result of one generation run.
///
/// Files that rendered are kept even when others failed; callers decide
/// whether a partial result is usable.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub files: Vec<GeneratedFile>,
    pub failures: Vec<Diagnostic>,
}

impl GenerateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of [`render_file`].
    pub fn push(&mut self, outcome: Result<GeneratedFile, Diagnostic>) {
        match outcome {
            Ok(file) => self.files.push(file),
            Err(diagnostic) => self.failures.push(diagnostic),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Allocated paths, in generation order.
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn into_registry(self) -> FileRegistry {
        let mut registry = FileRegistry::new();
        registry.register_all(self.files.into_iter().map(FileEntry::from));
        registry
    }
}

/// Settings shared by every file of a generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub naming: NamingConvention,
    pub indent: Indent,
    /// Comment placed first in every file.
    pub header: String,
}

impl GeneratorConfig {
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn renderer(&self) -> SectionRenderer {
        SectionRenderer::new(self.indent, self.header.clone())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            naming: RUST_NAMING,
            indent: Indent::RUST,
            header: GENERATED_HEADER.to_string(),
        }
    }
}

/// Trait for language-specific code generators.
///
/// Implement this trait to add support for generating code in a new
/// language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "rust")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "rs")
    fn file_extension(&self) -> &'static str;

    /// Render every file of `design`, allocating paths from `reserved`.
    fn generate(&self, design: &Design, reserved: &mut ReservedPaths) -> GenerateReport;
}

/// Trait for mapping design types to language-specific type strings.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a primitive to a language type
    fn map_primitive(&self, primitive: Primitive) -> &'static str;

    /// Map any type descriptor. Inline objects have no name of their own, so
    /// generators pass the name to use for them as `inline_name`.
    fn map_type(&self, ty: &DataType, inline_name: &str) -> String;

    /// Map an optional value (e.g., `Option<String>` in Rust)
    fn map_optional(&self, ty: &DataType, inline_name: &str) -> String {
        format!("Option<{}>", self.map_type(ty, inline_name))
    }
}
