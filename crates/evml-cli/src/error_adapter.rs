//! Error adapter for converting EvmlError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`DocumentError::Validation`] carries one message per line; each line is
//! rendered as its own report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use evml::EvmlError;
use evml_document::DocumentError;

/// Adapter for a single validation message.
#[derive(Debug)]
pub struct MessageAdapter<'a> {
    message: &'a str,
}

impl fmt::Display for MessageAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for MessageAdapter<'_> {}

impl MietteDiagnostic for MessageAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("evml::validation"))
    }
}

/// Adapter for [`EvmlError`] variants without per-message detail.
pub struct ErrorAdapter<'a>(pub &'a EvmlError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            EvmlError::Io(_) => "evml::io",
            EvmlError::Document(_) => "evml::document",
            EvmlError::Persistence { .. } => "evml::persistence",
            EvmlError::Fullscreen(_) => "evml::fullscreen",
            EvmlError::UnknownBlock(_) => "evml::block",
            EvmlError::Config(_) => "evml::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            EvmlError::Persistence { .. } => Some(Box::new(
                "check that the output directory exists and is writable",
            )),
            EvmlError::Config(_) => Some(Box::new("see `evml --help` for the --config option")),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    Message(MessageAdapter<'a>),
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Message(m) => fmt::Display::fmt(m, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Message(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Message(m) => m.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Message(m) => m.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert an [`EvmlError`] into a list of reportable errors.
///
/// A validation error yields one [`Reportable`] per message line; every other
/// error yields a single [`Reportable`].
pub fn to_reportables(err: &EvmlError) -> Vec<Reportable<'_>> {
    match err {
        EvmlError::Document(DocumentError::Validation(messages)) => messages
            .lines()
            .map(|message| Reportable::Message(MessageAdapter { message }))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_validation_lines_are_separate() {
        let err = EvmlError::from(DocumentError::Validation(
            "first error\nsecond error".to_string(),
        ));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first error");
        assert_eq!(reportables[1].to_string(), "second error");
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()).as_deref(),
            Some("evml::validation")
        );
    }

    #[test]
    fn test_persistence_error() {
        let err = EvmlError::persistence(
            "event-model-00.evml",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Failed to save event-model-00.evml: denied");
                assert_eq!(
                    e.code().map(|c| c.to_string()).as_deref(),
                    Some("evml::persistence")
                );
                assert!(e.help().is_some());
            }
            Reportable::Message(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_empty_result_is_single_report() {
        let err = EvmlError::from(DocumentError::EmptyResult);

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].to_string(),
            "Invalid EVML document: empty parse result."
        );
    }
}
