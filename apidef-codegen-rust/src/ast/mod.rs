//! Rust item builders for generating structs, enums and traits.
//!
//! These provide a high-level API for constructing Rust syntax, which is
//! then rendered via [`CodeBuilder::emit`](apidef_codegen::builder::CodeBuilder::emit).

mod enums;
mod structs;
mod traits;

pub use enums::{Enum, Variant};
pub use structs::{Field, Struct};
pub use traits::{Trait, TraitMethod};
