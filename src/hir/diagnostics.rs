//! Diagnostics reported by the front-end for individual packages.
//!
//! These are soft errors: a package with diagnostics is still indexed,
//! traversed and inverted, its results may just be incomplete.

use std::fmt;
use std::sync::Arc;

/// Which stage of the front-end produced a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Unknown,
    /// Package discovery / listing.
    List,
    Parse,
    Type,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A front-end message attached to a package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Position as reported by the front-end, e.g. `a/a.go:3:7`.
    pub position: Option<Arc<str>>,
    pub message: Arc<str>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            position: None,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, message)
        }
    }

    pub fn with_position(mut self, position: impl Into<Arc<str>>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(pos) => write!(f, "{}: {}", pos, self.message),
            None => f.write_str(&self.message),
        }
    }
}
