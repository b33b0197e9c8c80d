//! Hearth - settings core for a home inventory tool.
//!
//! This library resolves the application's configuration: built-in defaults,
//! an optional `config.toml`, and environment overrides, merged into one
//! validated [`config::Config`] at startup. The `hearth` binary exposes
//! commands to inspect the result.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

/// Library-level error type for Hearth operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Hearth operations.
pub type Result<T> = std::result::Result<T, Error>;
