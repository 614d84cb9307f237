use crate::{
    config::ConfigError,
    diagnostic::{Diagnostic, DiagnosticCode, Severity},
    host::HostError,
    pass::PassError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Failures that stop a whole pass. Per-candidate failures never surface
/// here; they become diagnostics.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Pass(#[from] PassError),
}

///
/// GenerateError
///
/// Why a single candidate produced no unit for one engine.
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error("'{marker}' could not be bound: {source}")]
    InvalidMarker {
        marker: &'static str,
        #[source]
        source: darling::Error,
    },

    #[error("'{marker}' is not applied to this type")]
    MissingMarker { marker: &'static str },

    #[error("'{marker}' is applied {count} times; exactly one usage is allowed")]
    AmbiguousMarker { marker: &'static str, count: usize },

    #[error("settings member '{member}' is not a static property, field or parameterless method")]
    UnresolvedSettingsMember { member: String },

    #[error("enclosing type '{scope}' must be declared partial")]
    NonPartialScope { scope: String },
}

impl GenerateError {
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        match self {
            Self::InvalidMarker { .. } | Self::MissingMarker { .. } => DiagnosticCode::InvalidMarker,
            Self::AmbiguousMarker { .. } => DiagnosticCode::AmbiguousMarker,
            Self::UnresolvedSettingsMember { .. } => DiagnosticCode::UnresolvedSettingsMember,
            Self::NonPartialScope { .. } => DiagnosticCode::NonPartialScope,
        }
    }

    /// Error-severity diagnostic for the candidate named `target`.
    #[must_use]
    pub fn into_diagnostic(self, target: impl Into<String>) -> Diagnostic {
        Diagnostic::new(self.code(), Severity::Error, target, self.to_string())
    }
}
