//! Integration tests for exporting artifacts to the file system.

mod common;

use std::{fs, sync::Arc};

use evml::{
    EvmlError,
    export::{ExportService, FsStorage, content_hash},
};

use common::RecordingNotifier;

#[tokio::test]
async fn test_same_source_overwrites_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ExportService::new(Arc::new(FsStorage::new(dir.path())), notifier.clone());

    let first = service.save_source("abc").await.unwrap();
    let second = service.save_source("abc").await.unwrap();
    assert_eq!(first.filename(), second.filename());

    let expected = format!("event-model-{}.evml", content_hash("abc"));
    assert_eq!(first.filename(), expected);

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(dir.path().join(&expected)).unwrap(), "abc");
    assert_eq!(notifier.notices().len(), 2);
}

#[tokio::test]
async fn test_different_sources_write_different_files() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExportService::new(
        Arc::new(FsStorage::new(dir.path())),
        Arc::new(RecordingNotifier::default()),
    );

    service.save_source("slice A").await.unwrap();
    service.save_source("slice B").await.unwrap();

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn test_missing_directory_reports_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ExportService::new(
        Arc::new(FsStorage::new(dir.path().join("missing"))),
        notifier.clone(),
    );

    let err = service.save_source("abc").await.unwrap_err();

    assert!(matches!(err, EvmlError::Persistence { .. }));
    assert_eq!(
        notifier.notices(),
        vec![format!(
            "Failed to save event-model-{}.evml",
            content_hash("abc")
        )]
    );
}
