//! The document pipeline: source text in, model out.
//!
//! Each call to [`DocumentPipeline::render`] runs the full lifecycle of one
//! ephemeral document:
//!
//! 1. draw a fresh id and derive the document's virtual location,
//! 2. register the source with the language service,
//! 3. await the build,
//! 4. reject the result if any diagnostic is an error,
//! 5. extract the model,
//! 6. delete the document from the service again.
//!
//! Step 6 runs on every exit path. The registration is held by a guard that
//! deletes the document when dropped, so it also runs when the build fails,
//! panics, or the render future is dropped before completion.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use log::{debug, trace, warn};

use crate::{
    document::EphemeralDocument,
    error::DocumentError,
    service::LanguageService,
    uri::{DEFAULT_NAMESPACE, DocumentUri},
};

/// Strictly increasing source of document ids.
///
/// Ids are never reset or reused for the lifetime of the sequence, which
/// keeps concurrently built documents at distinct locations.
#[derive(Debug, Default)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    /// Creates a sequence whose first id is `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Draws the next id.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the id the next call to [`next_id`](Self::next_id) will draw.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Builds models from source text through a [`LanguageService`].
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = DocumentPipeline::new(Arc::new(service));
/// match pipeline.render("slice Checkout").await {
///     Ok(model) => mount(model),
///     Err(err) => show_error(err.to_string()),
/// }
/// ```
pub struct DocumentPipeline<S: LanguageService> {
    service: Arc<S>,
    namespace: String,
    ids: IdSequence,
}

impl<S: LanguageService> DocumentPipeline<S> {
    /// Creates a pipeline placing its documents in the default namespace.
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            namespace: DEFAULT_NAMESPACE.to_string(),
            ids: IdSequence::new(),
        }
    }

    /// Places documents in `namespace` instead of the default one.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Draws document ids from `ids`.
    pub fn with_sequence(mut self, ids: IdSequence) -> Self {
        self.ids = ids;
        self
    }

    /// Returns the language service.
    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Returns the namespace documents are placed in.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the id sequence.
    pub fn ids(&self) -> &IdSequence {
        &self.ids
    }

    /// Parses and validates `source` and returns its model.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::Validation`] with every error-severity message,
    ///   newline-joined in diagnostic order.
    /// - [`DocumentError::EmptyResult`] if the build produced no model.
    /// - [`DocumentError::Service`] if the service failed to build at all.
    pub async fn render(&self, source: &str) -> Result<S::Model, DocumentError> {
        let uri = DocumentUri::new(self.namespace.as_str(), self.ids.next_id());
        let mut document = EphemeralDocument::new(uri, source);

        self.service.add_document(document.uri(), document.source());
        let _registration = Registration {
            service: self.service.as_ref(),
            uri: document.uri().clone(),
        };

        debug!(uri:% = document.uri(); "Building ephemeral document");
        let output = self.service.build(document.uri()).await?;
        document.record(output);

        for diag in document.diagnostics().iter().filter(|diag| !diag.is_fatal()) {
            debug!(
                uri:% = document.uri(),
                severity:% = diag.severity(),
                message = diag.message();
                "Non-fatal diagnostic"
            );
        }

        document.into_model()
    }

    /// Deletes every document in this pipeline's namespace from the service.
    ///
    /// Renders clean up after themselves; this is for shutting down while
    /// builds may still be in flight.
    pub fn release_namespace(&self) -> usize {
        let removed = self.service.delete_documents(&self.namespace);
        debug!(namespace = self.namespace, removed = removed; "Released document namespace");
        removed
    }
}

/// Deletes a registered document when dropped.
struct Registration<'a, S: LanguageService + ?Sized> {
    service: &'a S,
    uri: DocumentUri,
}

impl<S: LanguageService + ?Sized> Drop for Registration<'_, S> {
    fn drop(&mut self) {
        if self.service.delete_document(&self.uri) {
            trace!(uri:% = self.uri; "Ephemeral document removed");
        } else {
            warn!(uri:% = self.uri; "Ephemeral document was already removed");
        }
    }
}
