//! CLI logic for the EVML export tool.
//!
//! Extracts every fenced `evml` block from a Markdown document and writes
//! each one as a content-addressed `event-model-<hash>.evml` file.

pub mod config;
pub mod error_adapter;

mod args;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{info, warn};

use evml::{
    EvmlError,
    export::{ExportService, FsStorage, LogNotifier},
};
use evml_document::fence::{self, LANGUAGE};

/// Run the EVML CLI application
///
/// Returns the number of blocks exported. Identical blocks are written to
/// the same file, so fewer files than blocks may exist afterwards.
///
/// # Errors
///
/// Returns `EvmlError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Failed artifact writes
pub fn run(args: &Args) -> Result<usize, EvmlError> {
    info!(input_path = args.input; "Extracting diagram blocks");

    let app_config = config::load_config(args.config.as_ref())?;
    let out_dir = output_dir(args, app_config.export().directory());

    let markdown = fs::read_to_string(&args.input)?;
    let blocks = fence::extract_blocks(&markdown, LANGUAGE);
    if blocks.is_empty() {
        warn!(input_path = args.input; "No evml blocks found");
        return Ok(0);
    }

    fs::create_dir_all(&out_dir)?;
    let export = ExportService::new(Arc::new(FsStorage::new(&out_dir)), Arc::new(LogNotifier));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        for block in &blocks {
            let artifact = export.save_source(block.body()).await?;
            info!(line = block.line(), filename = artifact.filename(); "Block exported");
        }
        Ok::<_, EvmlError>(())
    })?;

    info!(
        blocks = blocks.len(),
        out_dir = out_dir.display().to_string();
        "Export completed"
    );

    Ok(blocks.len())
}

fn output_dir(args: &Args, configured: Option<&Path>) -> PathBuf {
    match (&args.out_dir, configured) {
        (Some(dir), _) => PathBuf::from(dir),
        (None, Some(dir)) => dir.to_path_buf(),
        (None, None) => PathBuf::from("."),
    }
}
