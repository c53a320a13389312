//! Saving diagram source and renderings as content-addressed artifacts.
//!
//! Every artifact is named after the SHA-256 digest of the diagram source it
//! came from, so saving the same source twice always targets the same file:
//!
//! - source: `event-model-<hash>.evml`, payload the source verbatim
//! - rendering: `event-model-<hash>.svg`, payload the serialized root with an
//!   XML declaration

mod storage;

pub use storage::{FsStorage, LogNotifier, Notifier, StorageAdapter};

use std::{fmt, sync::Arc};

use log::{error, info};
use sha2::{Digest, Sha256};
use svg::node::element::Element;

use crate::error::EvmlError;

/// Filename prefix shared by all artifacts.
pub const FILENAME_PREFIX: &str = "event-model-";

/// Declaration prepended to serialized renderings.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Returns the lowercase hex SHA-256 digest of `source`.
///
/// # Examples
///
/// ```
/// # use evml::export::content_hash;
/// assert_eq!(
///     content_hash("abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn content_hash(source: &str) -> String {
    format!("{:x}", Sha256::digest(source.as_bytes()))
}

/// Prefixes `markup` with [`XML_DECLARATION`] unless it already starts with one.
pub fn with_xml_declaration(markup: &str) -> String {
    if markup.starts_with("<?xml") {
        markup.to_string()
    } else {
        format!("{XML_DECLARATION}\n{markup}")
    }
}

/// The kind of content an artifact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Diagram source text.
    Source,
    /// Serialized rendering.
    Rendering,
}

impl ArtifactKind {
    /// Returns the filename extension for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Source => "evml",
            Self::Rendering => "svg",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Rendering => write!(f, "rendering"),
        }
    }
}

/// A named payload ready to be written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    kind: ArtifactKind,
    filename: String,
    payload: String,
}

impl ExportArtifact {
    fn new(kind: ArtifactKind, hash: &str, payload: String) -> Self {
        Self {
            kind,
            filename: format!("{FILENAME_PREFIX}{hash}.{}", kind.extension()),
            payload,
        }
    }

    /// Returns the artifact kind.
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Returns the storage filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the content to write.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Builds the source artifact for `source` whose digest is `hash`.
pub fn export_source(source: &str, hash: &str) -> ExportArtifact {
    ExportArtifact::new(ArtifactKind::Source, hash, source.to_string())
}

/// Builds the rendering artifact for a mounted `root` whose source digest is `hash`.
pub fn export_rendering(root: &Element, hash: &str) -> ExportArtifact {
    let markup = root.to_string();
    ExportArtifact::new(ArtifactKind::Rendering, hash, with_xml_declaration(&markup))
}

/// Writes artifacts to storage and reports the outcome to the user.
#[derive(Clone)]
pub struct ExportService {
    storage: Arc<dyn StorageAdapter>,
    notifier: Arc<dyn Notifier>,
}

impl ExportService {
    /// Creates a service writing to `storage` and reporting through `notifier`.
    pub fn new(storage: Arc<dyn StorageAdapter>, notifier: Arc<dyn Notifier>) -> Self {
        Self { storage, notifier }
    }

    /// Writes `artifact`, overwriting any existing file of the same name.
    ///
    /// The user is notified either way. A failed write is not retried.
    pub async fn save(&self, artifact: &ExportArtifact) -> Result<(), EvmlError> {
        let filename = artifact.filename();

        match self.storage.write(filename, artifact.payload()).await {
            Ok(()) => {
                info!(filename = filename, kind:% = artifact.kind(); "Artifact saved");
                self.notifier.notify(&format!("Saved {filename}"));
                Ok(())
            }
            Err(err) => {
                error!(filename = filename, err:% = err; "Failed to save artifact");
                self.notifier.notify(&format!("Failed to save {filename}"));
                Err(EvmlError::persistence(filename, err))
            }
        }
    }

    /// Exports and saves `source`.
    pub async fn save_source(&self, source: &str) -> Result<ExportArtifact, EvmlError> {
        let artifact = export_source(source, &content_hash(source));
        self.save(&artifact).await?;
        Ok(artifact)
    }

    /// Exports and saves the rendering `root` of the source digested as `hash`.
    pub async fn save_rendering(
        &self,
        root: &Element,
        hash: &str,
    ) -> Result<ExportArtifact, EvmlError> {
        let artifact = export_rendering(root, hash);
        self.save(&artifact).await?;
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use svg::Node;

    use super::*;

    #[test]
    fn test_content_hash_is_stable_and_distinct() {
        assert_eq!(content_hash("abc"), content_hash("abc"));
        assert_ne!(content_hash("abc"), content_hash("abd"));
        assert_eq!(content_hash("").len(), 64);
        assert!(
            content_hash("slice Checkout")
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_export_source() {
        let hash = content_hash("abc");
        let artifact = export_source("abc", &hash);

        assert_eq!(artifact.kind(), ArtifactKind::Source);
        assert_eq!(artifact.filename(), format!("event-model-{hash}.evml"));
        assert_eq!(artifact.payload(), "abc");
    }

    #[test]
    fn test_export_rendering_adds_declaration() {
        let mut root = Element::new("svg");
        root.assign("width", 10);

        let artifact = export_rendering(&root, "00ff");

        assert_eq!(artifact.filename(), "event-model-00ff.svg");
        assert!(
            artifact
                .payload()
                .starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg")
        );
    }

    #[test]
    fn test_with_xml_declaration() {
        let declared = "<?xml version=\"1.1\"?>\n<svg/>";
        assert_eq!(with_xml_declaration(declared), declared);
        assert_eq!(
            with_xml_declaration("<svg/>"),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg/>"
        );
    }
}
