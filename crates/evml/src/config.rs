//! Configuration types for the Event Model explorer.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! any format; the CLI reads TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`PipelineConfig`] - Where ephemeral documents are placed.
//! - [`ExportConfig`] - Where exported artifacts are written.
//!
//! # Example
//!
//! ```
//! # use evml::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.pipeline().namespace(), "evml");
//! assert!(config.export().directory().is_none());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use evml_document::DEFAULT_NAMESPACE;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Document pipeline section.
    #[serde(default)]
    pipeline: PipelineConfig,

    /// Export section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(pipeline: PipelineConfig, export: ExportConfig) -> Self {
        Self { pipeline, export }
    }

    /// Returns the pipeline configuration.
    pub fn pipeline(&self) -> &PipelineConfig {
        &self.pipeline
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Document pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Namespace segment of ephemeral document locations,
    /// `memory://<namespace>/<id>.evml`.
    #[serde(default = "default_namespace")]
    namespace: String,
}

impl PipelineConfig {
    /// Creates a pipeline configuration using `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Returns the document namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Export configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Directory artifacts are written to by file-system storage. Hosts with
    /// their own storage namespace ignore it.
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl ExportConfig {
    /// Creates an export configuration writing to `directory`.
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    /// Returns the configured export directory, if any.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}
