//! Failures of the document pipeline and of language services.

use thiserror::Error;

use crate::{error::Diagnostic, uri::DocumentUri};

/// Error returned when a source text cannot be turned into a model.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The language service reported at least one error-severity diagnostic.
    ///
    /// The message holds every error message in diagnostic order, one per
    /// line.
    #[error("{0}")]
    Validation(String),

    /// The build finished without fatal diagnostics but produced no model.
    #[error("Invalid EVML document: empty parse result.")]
    EmptyResult,

    /// The language service itself failed to build the document.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl DocumentError {
    /// Builds a [`DocumentError::Validation`] from the fatal diagnostics in
    /// `diagnostics`.
    ///
    /// Returns `None` if no diagnostic has error severity.
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Option<Self> {
        let messages: Vec<&str> = diagnostics
            .iter()
            .filter(|diag| diag.is_fatal())
            .map(Diagnostic::message)
            .collect();

        if messages.is_empty() {
            None
        } else {
            Some(Self::Validation(messages.join("\n")))
        }
    }
}

/// Error reported by a [`LanguageService`](crate::LanguageService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The document was never registered, or has already been removed.
    #[error("Document `{0}` is not registered")]
    UnknownDocument(DocumentUri),

    /// The service could not complete the build.
    #[error("Language service failed: {0}")]
    Build(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_errors_yields_none() {
        let diagnostics = vec![Diagnostic::warning("w"), Diagnostic::hint("h")];
        assert!(DocumentError::from_diagnostics(&diagnostics).is_none());
        assert!(DocumentError::from_diagnostics(&[]).is_none());
    }

    #[test]
    fn test_errors_joined_in_order() {
        let diagnostics = vec![
            Diagnostic::error("first"),
            Diagnostic::warning("skipped"),
            Diagnostic::error("second"),
        ];

        let err = DocumentError::from_diagnostics(&diagnostics).expect("has errors");
        assert_eq!(err.to_string(), "first\nsecond");
    }

    #[test]
    fn test_service_error_is_transparent() {
        let err: DocumentError = ServiceError::Build("timeout".to_string()).into();
        assert_eq!(err.to_string(), "Language service failed: timeout");
    }
}
