//! Event Model explorer.
//!
//! Renders fenced Event Modeling diagrams embedded in documents, lets the
//! user explore them with zoom and pan in a dedicated panel, and exports
//! their source or rendering as content-addressed files.
//!
//! # Components
//!
//! - [`plugin::EvmlPlugin`] - Entry point the host drives block by block.
//! - [`host::DiagramHost`] - Mounts renderer output into containers.
//! - [`explorer::ExplorerSurface`] - Toolbar and zoom/pan viewport of a panel.
//! - [`export::ExportService`] - Writes `event-model-<hash>` artifacts.
//!
//! Parsing and validation are delegated to an external language service
//! through [`evml_document::LanguageService`], and drawing to an external
//! [`host::DiagramRenderer`].

pub mod config;
pub mod explorer;
pub mod export;
pub mod host;
pub mod menu;
pub mod plugin;
pub mod workspace;

mod error;

pub use evml_core::{geometry, viewport};
pub use evml_document as document;

pub use error::{EvmlError, FullscreenError};
pub use plugin::{EvmlPlugin, HostServices};
