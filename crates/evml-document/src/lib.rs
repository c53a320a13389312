//! EVML document pipeline.
//!
//! Turns diagram source text into a model through an external
//! [`LanguageService`], one short-lived [`EphemeralDocument`] per render.
//!
//! # Pipeline Stages
//!
//! 1. **Registration**: the source is registered with the language service
//!    at a fresh [`DocumentUri`]
//! 2. **Build**: the service parses and validates the document
//! 3. **Extraction**: error-severity diagnostics fail the render, otherwise
//!    the model is handed to the caller
//! 4. **Cleanup**: the document is deleted from the service on every path
//!
//! Fenced diagram blocks can be pulled out of Markdown with
//! [`fence::extract_blocks`].

pub mod error;
pub mod fence;

mod document;
mod pipeline;
mod registry;
mod service;
mod uri;

pub use document::EphemeralDocument;
pub use error::{Diagnostic, DocumentError, ServiceError, Severity};
pub use pipeline::{DocumentPipeline, IdSequence};
pub use registry::DocumentRegistry;
pub use service::{BuildOutput, LanguageService};
pub use uri::{DEFAULT_NAMESPACE, DocumentUri, EXTENSION, SCHEME, UriError};
