//! File registration for generated output.
//!
//! Generators register every rendered file here; the registry then decides
//! ordering, previews and writes, so the CLI never handles file rules itself.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//! registry.register(FileEntry::new("src/types.rs", types_rs, FileCategory::Types));
//! registry.register(FileEntry::new("src/service/mod.rs", mod_rs, FileCategory::Module));
//! registry.write_all(&output_dir)?;
//! ```

use std::path::{Path, PathBuf};

use apidef_core::{File, Overwrite, WriteResult};
use eyre::Result;
use serde::Serialize;

/// Kind of generated file, determining write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// User-defined types and the error result struct.
    Types,
    /// Error enums, one per service.
    Errors,
    /// Service traits.
    Service,
    /// Endpoint request wrappers.
    Endpoints,
    /// `mod.rs` files tying the others together. Written last.
    Module,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Types => "types",
            FileCategory::Errors => "errors",
            FileCategory::Service => "service",
            FileCategory::Endpoints => "endpoints",
            FileCategory::Module => "module",
        }
    }
}

/// A file to be generated.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Relative path from output directory.
    pub path: String,
    pub content: String,
    pub category: FileCategory,
    pub overwrite: Overwrite,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>, category: FileCategory) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category,
            overwrite: Overwrite::Always,
        }
    }

    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn full_path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    /// Write this file under `base`, honoring its overwrite rule.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        File::new(self.full_path(base), self.content.as_str())
            .with_overwrite(self.overwrite)
            .write()
    }
}

/// Registry of files to generate, written in category order.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    pub fn register_all(&mut self, entries: impl IntoIterator<Item = FileEntry>) {
        self.entries.extend(entries);
    }

    /// All entries, sorted by category; registration order within a category.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    pub fn entries_by_category(&self, category: FileCategory) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply one overwrite rule to every entry.
    pub fn set_overwrite(&mut self, overwrite: Overwrite) {
        for entry in &mut self.entries {
            entry.overwrite = overwrite;
        }
    }

    /// What would be written, without touching the filesystem.
    pub fn preview(&self) -> Vec<PreviewEntry> {
        self.entries()
            .map(|e| PreviewEntry {
                path: e.path.clone(),
                content: e.content.clone(),
                category: e.category,
            })
            .collect()
    }

    /// Write all files to the output directory.
    pub fn write_all(&self, base: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        for entry in self.entries() {
            match entry.write(base)? {
                WriteResult::Written => stats.written_paths.push(entry.path.clone()),
                WriteResult::Skipped => stats.skipped_paths.push(entry.path.clone()),
            }
        }

        tracing::debug!(
            written = stats.written_paths.len(),
            skipped = stats.skipped_paths.len(),
            base = %base.display(),
            "wrote generated files"
        );
        Ok(stats)
    }
}

/// A preview entry for displaying what would be generated.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewEntry {
    pub path: String,
    pub content: String,
    pub category: FileCategory,
}

/// Statistics from a write operation.
#[derive(Debug, Default, Serialize)]
pub struct WriteStats {
    pub written_paths: Vec<String>,
    /// Paths left alone because they already existed.
    pub skipped_paths: Vec<String>,
}

impl WriteStats {
    pub fn written(&self) -> usize {
        self.written_paths.len()
    }

    pub fn skipped(&self) -> usize {
        self.skipped_paths.len()
    }
}
