//! Settings resolution for hearth.
//!
//! Settings come from three layers, merged field by field:
//!
//! 1. Environment variables (highest precedence)
//! 2. `config.toml`
//! 3. Built-in defaults
//!
//! ## config.toml
//!
//! Located at `~/.config/hearth/config.toml` on Linux (the platform config
//! directory elsewhere), or wherever `HEARTH_CONFIG_PATH` points. The file is
//! optional and never written by hearth; `hearth config template` prints an
//! annotated starting point.
//!
//! Contains:
//! - `[llm]` - `base_url`, `model`, `extra_context`, `timeout`
//! - `[documents]` - `max_file_size`, `cache_ttl`, and the deprecated
//!   `cache_ttl_days`
//!
//! Sizes accept integers or unit strings (`50 MiB`, `1.5 GB`); durations
//! accept integer seconds, unit groups (`1h30m`), or days (`30d`).
//!
//! Use [`Config::load`] for the common case and [`resolve`] when the caller
//! needs provenance or controls the environment.

pub mod duration;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod size;
pub mod template;
pub mod types;

use std::path::PathBuf;

pub use duration::{ParseDurationError, format_duration, parse_duration};
pub use error::{ConfigError, ErrorKind};
pub use resolver::{
    EnvSource, ProcessEnv, Resolved, ResolvedConfig, Sources, ValueSource, bridge_cache_ttl,
    config_path, ollama_base_url, resolve,
};
pub use schema::{DurationValue, SettingsFile, SizeValue};
pub use size::{ParseSizeError, format_bytes, parse_byte_size};
pub use template::example_config;
pub use types::{Config, DocumentsConfig, LlmConfig};

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "hearth";

/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the settings file location.
pub const CONFIG_PATH_ENV: &str = "HEARTH_CONFIG_PATH";

/// Environment variable naming the Ollama host (sets `llm.base_url`).
pub const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";

/// Environment variable overriding `llm.model`.
pub const LLM_MODEL_ENV: &str = "HEARTH_LLM_MODEL";

/// Environment variable overriding `llm.timeout`.
pub const LLM_TIMEOUT_ENV: &str = "HEARTH_LLM_TIMEOUT";

/// Environment variable overriding `documents.max_file_size`.
pub const MAX_DOCUMENT_SIZE_ENV: &str = "HEARTH_MAX_DOCUMENT_SIZE";

/// Environment variable overriding `documents.cache_ttl`.
pub const CACHE_TTL_ENV: &str = "HEARTH_CACHE_TTL";

/// Deprecated environment variable overriding `documents.cache_ttl_days`.
pub const CACHE_TTL_DAYS_ENV: &str = "HEARTH_CACHE_TTL_DAYS";

/// Default settings file location, e.g. `~/.config/hearth/config.toml`.
///
/// `None` when the platform has no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
