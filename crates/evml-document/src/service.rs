//! The language service contract.
//!
//! A language service parses and validates diagram sources. The pipeline only
//! relies on the narrow capability set below, so any implementation that
//! can register a document, build it and forget it again is substitutable.

use async_trait::async_trait;

use crate::{
    error::{Diagnostic, ServiceError},
    uri::DocumentUri,
};

/// Outcome of building one document: its diagnostics and, if parsing got
/// far enough, a model.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput<M> {
    diagnostics: Vec<Diagnostic>,
    model: Option<M>,
}

impl<M> BuildOutput<M> {
    /// Creates a build outcome.
    pub fn new(diagnostics: Vec<Diagnostic>, model: Option<M>) -> Self {
        Self { diagnostics, model }
    }

    /// Creates a clean outcome holding `model` and no diagnostics.
    pub fn model(model: M) -> Self {
        Self::new(Vec::new(), Some(model))
    }

    /// Returns the diagnostics in the order the service reported them.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Splits the outcome into diagnostics and model.
    pub fn into_parts(self) -> (Vec<Diagnostic>, Option<M>) {
        (self.diagnostics, self.model)
    }
}

/// External parser and validator of diagram sources.
///
/// Documents are addressed by [`DocumentUri`]. The service keeps registered
/// documents until they are deleted explicitly; it never collects them on
/// its own.
#[async_trait]
pub trait LanguageService: Send + Sync {
    /// The structured model produced from a valid source.
    type Model: Send;

    /// Registers `source` at `uri`.
    fn add_document(&self, uri: &DocumentUri, source: &str);

    /// Parses and validates the document registered at `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the service cannot build the document at
    /// all. Problems in the source itself are reported as diagnostics in the
    /// returned [`BuildOutput`] instead.
    async fn build(&self, uri: &DocumentUri) -> Result<BuildOutput<Self::Model>, ServiceError>;

    /// Forgets the document at `uri`. Returns `true` if it was registered.
    fn delete_document(&self, uri: &DocumentUri) -> bool;

    /// Forgets every document in `namespace` and returns how many there were.
    fn delete_documents(&self, namespace: &str) -> usize;
}
