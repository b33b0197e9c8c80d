//! CLI argument definitions for Hearth.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hearth - home inventory settings.
///
/// Start with `hearth config list` to see every resolved setting and where it
/// came from.
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(author, version, about = "Inspect hearth's resolved settings", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Read settings from <path> instead of the platform config directory.
    /// Can also be set via HEARTH_CONFIG_PATH environment variable.
    #[arg(short = 'C', long = "config", global = true)]
    pub config_path: Option<PathBuf>,

    /// Log resolution details to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Settings inspection commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a resolved configuration value
    Get {
        /// Configuration key (e.g., llm.model, documents.max_file_size)
        key: String,
    },

    /// List all resolved configuration values and their sources
    List,

    /// Show the settings file location and whether it exists
    Path,

    /// Print an annotated example settings file
    Template,

    /// Resolve and validate settings, reporting any deprecations
    Check,
}
