//! The resolved settings snapshot and its built-in defaults.

use std::time::Duration;

/// Default LLM endpoint (a local Ollama server's OpenAI-compatible API).
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "qwen3";

/// Default LLM request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default maximum importable document size (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 << 20;

/// Default document cache retention, in days.
pub const DEFAULT_CACHE_TTL_DAYS: u64 = 30;

const SECONDS_PER_DAY: u64 = 86_400;

/// Default document cache retention.
pub fn default_cache_ttl() -> Duration {
    Duration::from_secs(DEFAULT_CACHE_TTL_DAYS * SECONDS_PER_DAY)
}

/// Fully resolved, validated settings.
///
/// Built once per resolution and never mutated. Invariants:
/// - `llm.base_url` has no trailing `/`
/// - `llm.timeout` is positive
/// - `documents.max_file_size` is positive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub llm: LlmConfig,
    pub documents: DocumentsConfig,
}

/// Language-model connection settings, handed to the model client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    /// Free-form text appended to system prompts. May be empty.
    pub extra_context: String,
    pub timeout: Duration,
}

/// Document handling settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentsConfig {
    /// Import size guard, in bytes.
    pub max_file_size: u64,
    /// Age at which cached documents are evicted. Zero disables eviction.
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            documents: DocumentsConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            extra_context: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            cache_ttl: default_cache_ttl(),
        }
    }
}

impl DocumentsConfig {
    /// Whether the startup sweep should evict anything at all.
    pub fn evicts(&self) -> bool {
        !self.cache_ttl.is_zero()
    }
}
