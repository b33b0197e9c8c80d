//! Annotated example `config.toml`.

use chrono::TimeDelta;
use std::path::Path;

use super::duration::format_duration;
use super::size::format_bytes;
use super::types::{
    DEFAULT_BASE_URL, DEFAULT_CACHE_TTL_DAYS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MODEL,
    DEFAULT_TIMEOUT,
};
use super::{
    CACHE_TTL_DAYS_ENV, CACHE_TTL_ENV, CONFIG_PATH_ENV, LLM_MODEL_ENV, LLM_TIMEOUT_ENV,
    MAX_DOCUMENT_SIZE_ENV, OLLAMA_HOST_ENV,
};

/// Render a commented example settings file showing every key with its
/// built-in default.
///
/// All keys are commented out, so the text as-is is a valid settings file
/// that changes nothing.
pub fn example_config(config_path: &Path) -> String {
    let timeout = TimeDelta::from_std(DEFAULT_TIMEOUT)
        .map(format_duration)
        .unwrap_or_else(|_| format!("{}s", DEFAULT_TIMEOUT.as_secs()));

    format!(
        r#"# hearth settings
#
# Save as: {path}
# (or point {config_path_env} at another file)
#
# Every key is optional. Uncomment a line to override its default.
# Environment variables take precedence over this file.

[llm]
# Base URL of an OpenAI-compatible API. A local Ollama server by default.
# Env: {ollama_host_env} (e.g. http://gpu-box:11434; "/v1" is appended)
# base_url = "{base_url}"

# Model name passed to the API.
# Env: {model_env}
# model = "{model}"

# Extra text added to every prompt, e.g. facts about your house.
# extra_context = ""

# Request timeout: integer seconds or a duration like "30s" or "1m30s".
# Must be positive. Empty means the default.
# Env: {timeout_env}
# timeout = "{timeout}"

[documents]
# Largest file that can be imported: bytes, or a size with a unit
# (B, KB, KiB, MB, MiB, GB, GiB, TB, TiB).
# Env: {max_size_env}
# max_file_size = "{max_file_size}"

# How long extracted documents stay in the cache: integer seconds,
# a duration like "720h", or days like "30d". "0d" keeps them forever.
# Env: {cache_ttl_env}
# cache_ttl = "{cache_ttl}"

# Deprecated: whole days of cache retention. Use cache_ttl instead
# (e.g. "{cache_ttl_days}d"); setting both is an error.
# Env: {cache_ttl_days_env}
## cache_ttl_days = {cache_ttl_days}
"#,
        path = config_path.display(),
        config_path_env = CONFIG_PATH_ENV,
        ollama_host_env = OLLAMA_HOST_ENV,
        base_url = DEFAULT_BASE_URL,
        model_env = LLM_MODEL_ENV,
        model = DEFAULT_MODEL,
        timeout_env = LLM_TIMEOUT_ENV,
        timeout = timeout,
        max_size_env = MAX_DOCUMENT_SIZE_ENV,
        max_file_size = format_bytes(DEFAULT_MAX_FILE_SIZE),
        cache_ttl_env = CACHE_TTL_ENV,
        cache_ttl = format_duration(TimeDelta::days(DEFAULT_CACHE_TTL_DAYS as i64)),
        cache_ttl_days_env = CACHE_TTL_DAYS_ENV,
        cache_ttl_days = DEFAULT_CACHE_TTL_DAYS,
    )
}
