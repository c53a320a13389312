//! Command-line argument definitions for the EVML CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input document, output directory,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Event Model export tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the Markdown document containing `evml` blocks
    #[arg(help = "Path to the input Markdown file")]
    pub input: String,

    /// Directory the `event-model-<hash>.evml` files are written to
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
