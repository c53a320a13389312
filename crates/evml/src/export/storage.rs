//! Storage and notification seams used by the export service.

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use log::{debug, info};

/// Host storage that artifacts are written into.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Writes `payload` to `path`, replacing any existing content.
    ///
    /// `path` is relative to the storage root.
    async fn write(&self, path: &str, payload: &str) -> io::Result<()>;
}

/// A sink for short, transient user notices.
pub trait Notifier: Send + Sync {
    /// Shows `message` to the user.
    fn notify(&self, message: &str);
}

/// A [`Notifier`] that writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("{message}");
    }
}

/// A [`StorageAdapter`] rooted at a directory of the local file system.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Creates storage writing under `root`. The directory must exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl StorageAdapter for FsStorage {
    async fn write(&self, path: &str, payload: &str) -> io::Result<()> {
        let target = self.root.join(path);
        debug!(path:? = target, bytes = payload.len(); "Writing artifact");
        tokio::fs::write(&target, payload).await
    }
}
