//! Diagnostics and error types for the document pipeline.
//!
//! - [`Severity`] ranks a [`Diagnostic`]; only errors are fatal.
//! - [`DocumentError`] is returned when a source cannot produce a model.
//! - [`ServiceError`] is reported by language service implementations.

mod diagnostic;
mod document_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use document_error::{DocumentError, ServiceError};
pub use severity::Severity;
