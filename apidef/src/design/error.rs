use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for design file loading (boxed to keep it small on the stack).
pub type Result<T> = std::result::Result<T, Box<DesignError>>;

/// Errors reading or parsing a design file.
#[derive(Debug, Error, Diagnostic)]
pub enum DesignError {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the design file with --design <path>"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse design file")]
    #[diagnostic(code(apidef::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl DesignError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Self::Io {
            path: path.into(),
            source,
        })
    }

    pub fn parse(src: &str, filename: &str, source: toml::de::Error) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Self::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}
