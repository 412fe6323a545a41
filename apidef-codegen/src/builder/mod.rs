//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - indented text builder used by templates
//! - [`CodeFragment`] / [`Renderable`] - intermediate form for item builders
//! - [`Indent`] - indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
