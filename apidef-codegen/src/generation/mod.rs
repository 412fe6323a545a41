//! Code generation outputs and file management.
//!
//! - [`ImportCollector`] / [`ImportSpec`] - import tracking and deduplication
//! - [`FileRegistry`] - declarative file registration, preview and writing

mod imports;
mod registry;

pub use imports::{ImportCollector, ImportSpec};
pub use registry::{FileCategory, FileEntry, FileRegistry, PreviewEntry, WriteStats};
