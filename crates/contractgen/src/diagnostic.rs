use derive_more::{Deref, Display, IntoIterator};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Severity
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[display("warning")]
    Warning,

    #[display("error")]
    Error,
}

///
/// DiagnosticCode
///
/// Stable identifiers surfaced to the host's build output.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum DiagnosticCode {
    AmbiguousMarker,
    InvalidMarker,
    NonPartialScope,
    UnresolvedSettingsMember,
}

impl DiagnosticCode {
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::InvalidMarker => "CG0001",
            Self::AmbiguousMarker => "CG0002",
            Self::UnresolvedSettingsMember => "CG0003",
            Self::NonPartialScope => "CG0004",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

///
/// Diagnostic
///
/// One generation-time finding about a single candidate. `target` is the
/// candidate's fully qualified name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub target: String,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        code: DiagnosticCode,
        severity: Severity,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            target: target.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} [{}]",
            self.severity, self.code, self.message, self.target
        )
    }
}

///
/// Diagnostics
///
/// Ordered collection of diagnostics produced during one pass.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| !d.is_error())
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.0 {
            writeln!(f, "{diagnostic}")?;
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_code_and_target() {
        let diagnostic = Diagnostic::new(
            DiagnosticCode::AmbiguousMarker,
            Severity::Error,
            "App.Pair",
            "marker applied twice",
        );

        assert_eq!(
            diagnostic.to_string(),
            "error CG0002: marker applied twice [App.Pair]"
        );
    }

    #[test]
    fn errors_and_warnings_are_split_by_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add(Diagnostic::new(
            DiagnosticCode::UnresolvedSettingsMember,
            Severity::Warning,
            "App.Pair",
            "missing",
        ));
        assert!(!diagnostics.has_errors());

        diagnostics.add(Diagnostic::new(
            DiagnosticCode::InvalidMarker,
            Severity::Error,
            "App.Pair",
            "bad",
        ));
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.errors().count(), 1);
        assert_eq!(diagnostics.warnings().count(), 1);
    }
}
