//! Severity levels for diagnostics.
//!
//! Language services rank diagnostics on a numeric scale where `1` is the
//! most severe. Only [`Severity::Error`] blocks model extraction.

use std::fmt;

/// The severity level of a diagnostic.
///
/// The discriminants match the numeric severity ranks reported by
/// language services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// A fatal error. The document cannot produce a model.
    Error = 1,

    /// A non-fatal warning about potential issues.
    Warning = 2,

    /// Informational message.
    Information = 3,

    /// A hint, usually a suggested improvement.
    Hint = 4,
}

impl Severity {
    /// Returns the numeric severity rank, `1` being the most severe.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Converts a numeric severity rank back into a [`Severity`].
    ///
    /// Returns `None` for ranks outside `1..=4`.
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Severity::Error),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Information),
            4 => Some(Severity::Hint),
            _ => None,
        }
    }

    /// Returns `true` if this is an error severity.
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Information => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_round_trip() {
        for severity in [
            Severity::Error,
            Severity::Warning,
            Severity::Information,
            Severity::Hint,
        ] {
            assert_eq!(Severity::from_rank(severity.rank()), Some(severity));
        }
    }

    #[test]
    fn test_unknown_rank() {
        assert_eq!(Severity::from_rank(0), None);
        assert_eq!(Severity::from_rank(5), None);
    }

    #[test]
    fn test_only_error_is_error() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(!Severity::Information.is_error());
        assert!(!Severity::Hint.is_error());
    }

    #[test]
    fn test_ordering_most_severe_first() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Information < Severity::Hint);
    }
}
