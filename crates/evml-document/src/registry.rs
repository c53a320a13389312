//! In-memory registry of documents known to a language service.
//!
//! The registry never removes entries on its own. Whoever adds a document is
//! responsible for deleting it again, otherwise the registry grows with every
//! render.

use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use log::trace;

use crate::uri::DocumentUri;

/// Thread-safe, insertion-ordered map from [`DocumentUri`] to source text.
///
/// Language service implementations can embed a registry to back
/// [`LanguageService::add_document`](crate::LanguageService::add_document)
/// and the matching delete operations.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: Mutex<IndexMap<DocumentUri, String>>,
}

impl DocumentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` at `uri`.
    ///
    /// Returns `false` if a document was already registered at `uri`; its
    /// source is replaced.
    pub fn add(&self, uri: DocumentUri, source: impl Into<String>) -> bool {
        trace!(uri:% = uri; "Registering document");
        self.lock().insert(uri, source.into()).is_none()
    }

    /// Returns a copy of the source registered at `uri`.
    pub fn source(&self, uri: &DocumentUri) -> Option<String> {
        self.lock().get(uri).cloned()
    }

    /// Returns `true` if a document is registered at `uri`.
    pub fn contains(&self, uri: &DocumentUri) -> bool {
        self.lock().contains_key(uri)
    }

    /// Removes the document at `uri`. Returns `true` if one was registered.
    pub fn remove(&self, uri: &DocumentUri) -> bool {
        trace!(uri:% = uri; "Removing document");
        self.lock().shift_remove(uri).is_some()
    }

    /// Removes every document in `namespace` and returns how many were
    /// removed.
    pub fn remove_namespace(&self, namespace: &str) -> usize {
        let mut documents = self.lock();
        let before = documents.len();
        documents.retain(|uri, _| !uri.is_in_namespace(namespace));
        before - documents.len()
    }

    /// Returns the registered locations in registration order.
    pub fn uris(&self) -> Vec<DocumentUri> {
        self.lock().keys().cloned().collect()
    }

    /// Returns the number of registered documents.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no document is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<DocumentUri, String>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
