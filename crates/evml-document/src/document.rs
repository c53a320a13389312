//! The ephemeral parse unit.

use crate::{
    error::{Diagnostic, DocumentError},
    service::BuildOutput,
    uri::DocumentUri,
};

/// A transient parse unit owned by the pipeline for one build-and-extract
/// call.
///
/// The document starts out holding only its location and source text. After
/// the language service has built it, [`record`](Self::record) stores the
/// diagnostics and model, and [`into_model`](Self::into_model) hands the
/// model over to the caller unless a fatal diagnostic was reported.
#[derive(Debug)]
pub struct EphemeralDocument<M> {
    uri: DocumentUri,
    source: String,
    diagnostics: Vec<Diagnostic>,
    model: Option<M>,
}

impl<M> EphemeralDocument<M> {
    /// Creates an unbuilt document at `uri` holding `source`.
    pub fn new(uri: DocumentUri, source: impl Into<String>) -> Self {
        Self {
            uri,
            source: source.into(),
            diagnostics: Vec::new(),
            model: None,
        }
    }

    /// Returns the virtual location of this document.
    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    /// Returns the raw source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the diagnostics recorded by the last build.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the model recorded by the last build, if any.
    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    /// Stores the outcome of a build, replacing any earlier one.
    pub fn record(&mut self, output: BuildOutput<M>) {
        let (diagnostics, model) = output.into_parts();
        self.diagnostics = diagnostics;
        self.model = model;
    }

    /// Consumes the document and returns its model.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::Validation`] if any diagnostic has error severity,
    ///   even when a model was produced.
    /// - [`DocumentError::EmptyResult`] if there are no fatal diagnostics
    ///   but no model either.
    pub fn into_model(self) -> Result<M, DocumentError> {
        if let Some(err) = DocumentError::from_diagnostics(&self.diagnostics) {
            return Err(err);
        }

        self.model.ok_or(DocumentError::EmptyResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> EphemeralDocument<&'static str> {
        EphemeralDocument::new(DocumentUri::new("evml", 0), "slice Checkout")
    }

    #[test]
    fn test_new_document_is_unbuilt() {
        let doc = document();
        assert_eq!(doc.source(), "slice Checkout");
        assert!(doc.diagnostics().is_empty());
        assert!(doc.model().is_none());
    }

    #[test]
    fn test_model_extracted_despite_warnings() {
        let mut doc = document();
        doc.record(BuildOutput::new(
            vec![Diagnostic::warning("unused"), Diagnostic::info("fyi")],
            Some("model"),
        ));

        assert_eq!(doc.into_model().expect("no fatal diagnostics"), "model");
    }

    #[test]
    fn test_errors_block_extraction() {
        let mut doc = document();
        doc.record(BuildOutput::new(
            vec![Diagnostic::error("bad token")],
            Some("partial model"),
        ));

        let err = doc.into_model().unwrap_err();
        assert!(matches!(err, DocumentError::Validation(ref msg) if msg == "bad token"));
    }

    #[test]
    fn test_missing_model_is_empty_result() {
        let mut doc = document();
        doc.record(BuildOutput::new(Vec::new(), None));

        assert!(matches!(doc.into_model(), Err(DocumentError::EmptyResult)));
    }
}
