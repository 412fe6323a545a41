//! Indentation configuration for generated code.

use serde::Deserialize;

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, the rustfmt default.
    pub const RUST: Self = Self::Spaces(4);

    /// Write one indent level to `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Self::Spaces(width) => out.extend(std::iter::repeat_n(' ', *width as usize)),
            Self::Tab => out.push('\t'),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}
