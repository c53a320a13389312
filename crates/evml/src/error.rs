//! Error types for explorer operations.
//!
//! This module provides the main error type [`EvmlError`] which wraps the
//! conditions that can occur while rendering, exporting and presenting
//! diagrams.

use std::io;

use thiserror::Error;

use evml_document::DocumentError;

/// Failure reported by the host's fullscreen facility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Fullscreen request failed: {0}")]
pub struct FullscreenError(pub String);

/// The main error type for explorer operations.
#[derive(Debug, Error)]
pub enum EvmlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Failed to save {filename}: {source}")]
    Persistence {
        filename: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Fullscreen(#[from] FullscreenError),

    #[error("Unknown diagram block: {0}")]
    UnknownBlock(u64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EvmlError {
    /// Create a new `Persistence` error for `filename`.
    pub fn persistence(filename: impl Into<String>, source: io::Error) -> Self {
        Self::Persistence {
            filename: filename.into(),
            source,
        }
    }
}
