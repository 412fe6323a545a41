//! Report data structures for commands.
//!
//! Operations build reports; commands render them to an [`Output`] or, for
//! `--json`, serialize them.

mod check;
mod generate;
mod output;

pub use check::{CheckReport, DesignSummary, ServiceSummary};
pub use generate::{GenerationReport, GenerationResult, PreviewFile, WrittenResult};
pub use output::{Report, TerminalOutput};
#[cfg(test)]
pub use output::{BufferOutput, Output};
