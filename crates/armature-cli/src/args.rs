//! Command-line argument definitions for the armature CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, publishing, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the armature model tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model manifest (TOML)
    #[arg(help = "Path to the model manifest")]
    pub input: String,

    /// Path to the output document JSON file
    #[arg(short, long, default_value = "workspace.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Publish the document to the configured endpoint instead of writing it to disk
    #[arg(long)]
    pub publish: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
