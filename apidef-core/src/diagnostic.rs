//! Diagnostic types shared by evaluation, validation and generation.
//!
//! A design run never stops at the first problem: builders, lints and file
//! generators push [`Diagnostic`]s into a list that is reported verbatim at
//! the end.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// An error that marks the run as failed.
    Error,
    /// A warning that doesn't prevent generation but should be addressed.
    Warning,
    /// Informational message.
    Info,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// The class of problem a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A builder was invoked while the current context does not accept it.
    IncompatibleContext,
    /// Two siblings share a name in a namespace that requires uniqueness.
    DuplicateName,
    /// A type descriptor names a type that is not defined.
    UnresolvedReference,
    /// A definition has a disallowed combination of children.
    ShapeViolation,
    /// No free output path could be found for a generated file.
    AllocationExhausted,
}

impl DiagnosticKind {
    /// Stable kebab-case code, used in rendered diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::IncompatibleContext => "incompatible-context",
            DiagnosticKind::DuplicateName => "duplicate-name",
            DiagnosticKind::UnresolvedReference => "unresolved-reference",
            DiagnosticKind::ShapeViolation => "shape-violation",
            DiagnosticKind::AllocationExhausted => "allocation-exhausted",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A diagnostic message from a phase of a design run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The problem class, if it is one of the well-known kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiagnosticKind>,
    /// The phase that produced this diagnostic ("eval", "validate", "generate").
    pub phase: String,
    /// The diagnostic message.
    pub message: String,
    /// Definition path the problem was found at (e.g. `service "divider" > method "divide"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Source position of the builder call that produced it, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind: None,
            phase: phase.into(),
            message: message.into(),
            location: None,
            source: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    /// Create a new info diagnostic.
    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    /// Tag this diagnostic with a problem kind.
    pub fn kind(mut self, kind: DiagnosticKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach the source position of the offending call.
    pub fn from_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns true if this diagnostic has the given kind.
    pub fn is(&self, kind: DiagnosticKind) -> bool {
        self.kind == Some(kind)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{}[{}]: {}", self.severity, kind, self.message)?,
            None => write!(f, "{}: {}", self.severity, self.message)?,
        }
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        if let Some(src) = &self.source {
            write!(f, " [{}]", src)?;
        }
        Ok(())
    }
}
