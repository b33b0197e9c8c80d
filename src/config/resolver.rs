//! Layered settings resolution.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. Environment variables (non-empty values only)
//! 2. `config.toml`
//! 3. Built-in defaults
//!
//! Each layer is recorded per field as `Option<Resolved<T>>`, so "not set" is
//! never confused with an explicit zero. Layers collapse to concrete values
//! only when the final [`Config`] is assembled and validated.
//!
//! ## Environment variables
//!
//! | Variable | Field |
//! | --- | --- |
//! | `OLLAMA_HOST` | `llm.base_url` (`/v1` appended when missing) |
//! | `HEARTH_LLM_MODEL` | `llm.model` |
//! | `HEARTH_LLM_TIMEOUT` | `llm.timeout` |
//! | `HEARTH_MAX_DOCUMENT_SIZE` | `documents.max_file_size` |
//! | `HEARTH_CACHE_TTL` | `documents.cache_ttl` |
//! | `HEARTH_CACHE_TTL_DAYS` | `documents.cache_ttl_days` (deprecated) |
//!
//! Malformed numeric overrides are ignored with a warning and the previous
//! layer's value is kept.

use chrono::TimeDelta;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use super::duration::{format_duration, parse_duration};
use super::error::ConfigError;
use super::schema::{DurationValue, SettingsFile, keys};
use super::size::parse_byte_size;
use super::types::{
    Config, DEFAULT_BASE_URL, DEFAULT_CACHE_TTL_DAYS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MODEL,
    DEFAULT_TIMEOUT, DocumentsConfig, LlmConfig,
};
use super::{
    CACHE_TTL_DAYS_ENV, CACHE_TTL_ENV, CONFIG_PATH_ENV, LLM_MODEL_ENV, LLM_TIMEOUT_ENV,
    MAX_DOCUMENT_SIZE_ENV, OLLAMA_HOST_ENV, default_config_path,
};

/// Path suffix of the OpenAI-compatible API on an Ollama host.
pub const OLLAMA_API_SUFFIX: &str = "/v1";

/// Source of environment variables.
///
/// Production code uses [`ProcessEnv`]; tests pass a `HashMap` so they never
/// touch the real process environment.
pub trait EnvSource {
    /// Look up a variable. `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Built-in default value
    Default,
    /// Value from the settings file at this path
    File(PathBuf),
    /// Value from environment variable
    EnvVar(String),
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::Default => write!(f, "default"),
            ValueSource::File(path) => write!(f, "file:{}", path.display()),
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }

    /// Create a value that came from the built-in defaults.
    pub fn default_value(value: T) -> Self {
        Self::new(value, ValueSource::Default)
    }

    /// Transform the value, keeping its source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved::new(f(self.value), self.source)
    }
}

/// Where each field of a [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub base_url: ValueSource,
    pub model: ValueSource,
    pub extra_context: ValueSource,
    pub timeout: ValueSource,
    pub max_file_size: ValueSource,
    pub cache_ttl: ValueSource,
}

/// A resolved [`Config`] plus resolution details.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The validated settings
    pub config: Config,
    /// Per-field provenance
    pub sources: Sources,
    /// The settings file that was read, if one existed
    pub file: Option<PathBuf>,
    /// Deprecation warnings (e.g., legacy `cache_ttl_days` in use)
    pub deprecation_warnings: Vec<String>,
}

impl Config {
    /// Resolve settings from the default file location and the process
    /// environment.
    ///
    /// `HEARTH_CONFIG_PATH` overrides the file location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path(None, &ProcessEnv);
        resolve(path.as_deref(), &ProcessEnv).map(|resolved| resolved.config)
    }

    /// Resolve settings from an explicit file and the process environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        resolve(Some(path), &ProcessEnv).map(|resolved| resolved.config)
    }
}

/// Settings file location: `explicit` (e.g. a `--config` flag) if given,
/// else `HEARTH_CONFIG_PATH` if set, else the platform config directory.
pub fn config_path(explicit: Option<&Path>, env: &impl EnvSource) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| non_empty_var(env, CONFIG_PATH_ENV).map(PathBuf::from))
        .or_else(default_config_path)
}

/// Resolve settings from defaults, an optional file, and `env`.
///
/// A missing file is not an error. Resolution is all-or-nothing: any parse,
/// validation, or conflict error aborts it.
pub fn resolve(path: Option<&Path>, env: &impl EnvSource) -> Result<ResolvedConfig, ConfigError> {
    let mut layers = Layers::default();

    let mut file = None;
    match path {
        Some(path) => match SettingsFile::read(path)? {
            Some(settings) => {
                debug!(path = %path.display(), "loaded settings file");
                layers.apply_file(settings, path)?;
                file = Some(path.to_path_buf());
            }
            None => debug!(path = %path.display(), "no settings file, using defaults"),
        },
        None => debug!("no config directory on this platform, skipping settings file"),
    }

    layers.apply_env(env);

    let mut resolved = layers.finish()?;
    resolved.file = file;
    Ok(resolved)
}

/// Reconcile `cache_ttl` with the deprecated `cache_ttl_days`.
///
/// - both set: conflict
/// - only `cache_ttl_days`: `days * 24h`, with a deprecation warning
/// - only `cache_ttl`: used as is
/// - neither: the default retention
pub fn bridge_cache_ttl(
    current: Option<Resolved<TimeDelta>>,
    legacy: Option<Resolved<i64>>,
) -> Result<(Resolved<TimeDelta>, Option<String>), ConfigError> {
    match (current, legacy) {
        (Some(_), Some(_)) => Err(ConfigError::Conflict {
            current: keys::CACHE_TTL,
            legacy: keys::CACHE_TTL_DAYS,
        }),
        (None, Some(days)) => {
            let ttl = TimeDelta::try_days(days.value).ok_or_else(|| {
                ConfigError::validation(
                    keys::CACHE_TTL_DAYS,
                    days.value.to_string(),
                    "is out of range",
                )
            })?;
            let warning = format!(
                "{} is deprecated ({}); use {} = \"{}d\" instead",
                keys::CACHE_TTL_DAYS,
                days.source,
                keys::CACHE_TTL,
                days.value
            );
            Ok((Resolved::new(ttl, days.source), Some(warning)))
        }
        (Some(ttl), None) => Ok((ttl, None)),
        (None, None) => Ok((
            Resolved::default_value(TimeDelta::days(DEFAULT_CACHE_TTL_DAYS as i64)),
            None,
        )),
    }
}

/// Rewrite an `OLLAMA_HOST` value into an API base URL.
///
/// Trailing slashes are trimmed and `/v1` is appended unless already present.
pub fn ollama_base_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.ends_with(OLLAMA_API_SUFFIX) {
        host.to_string()
    } else {
        format!("{}{}", host, OLLAMA_API_SUFFIX)
    }
}

/// Explicitly supplied values, merged across file and environment.
#[derive(Debug, Default)]
struct Layers {
    base_url: Option<Resolved<String>>,
    model: Option<Resolved<String>>,
    extra_context: Option<Resolved<String>>,
    timeout: Option<Resolved<DurationValue>>,
    max_file_size: Option<Resolved<i64>>,
    cache_ttl: Option<Resolved<TimeDelta>>,
    cache_ttl_days: Option<Resolved<i64>>,
}

impl Layers {
    /// Overlay the file's values. String-typed numbers are parsed strictly.
    fn apply_file(&mut self, settings: SettingsFile, path: &Path) -> Result<(), ConfigError> {
        let source = || ValueSource::File(path.to_path_buf());
        let SettingsFile { llm, documents } = settings;

        overlay(&mut self.base_url, llm.base_url, source());
        overlay(&mut self.model, llm.model, source());
        overlay(&mut self.extra_context, llm.extra_context, source());
        overlay(&mut self.timeout, llm.timeout, source());

        if let Some(size) = documents.max_file_size {
            let bytes = size.to_bytes(keys::MAX_FILE_SIZE)?;
            self.max_file_size = Some(Resolved::new(bytes, source()));
        }
        if let Some(ttl) = documents.cache_ttl {
            let ttl = ttl.to_delta(keys::CACHE_TTL)?;
            self.cache_ttl = Some(Resolved::new(ttl, source()));
        }
        overlay(&mut self.cache_ttl_days, documents.cache_ttl_days, source());

        Ok(())
    }

    /// Overlay environment overrides. Malformed numbers are ignored.
    fn apply_env(&mut self, env: &impl EnvSource) {
        let source = |name: &str| ValueSource::EnvVar(name.to_string());

        if let Some(host) = non_empty_var(env, OLLAMA_HOST_ENV) {
            self.base_url = Some(Resolved::new(ollama_base_url(&host), source(OLLAMA_HOST_ENV)));
        }
        if let Some(model) = non_empty_var(env, LLM_MODEL_ENV) {
            self.model = Some(Resolved::new(model, source(LLM_MODEL_ENV)));
        }
        if let Some(timeout) = non_empty_var(env, LLM_TIMEOUT_ENV) {
            self.timeout = Some(Resolved::new(
                DurationValue::Text(timeout),
                source(LLM_TIMEOUT_ENV),
            ));
        }

        if let Some(raw) = non_empty_var(env, MAX_DOCUMENT_SIZE_ENV) {
            let parsed = raw
                .trim()
                .parse::<i64>()
                .or_else(|_| parse_byte_size(&raw).map(|bytes| bytes as i64));
            match parsed {
                Ok(bytes) => {
                    self.max_file_size = Some(Resolved::new(bytes, source(MAX_DOCUMENT_SIZE_ENV)))
                }
                Err(err) => ignore_override(MAX_DOCUMENT_SIZE_ENV, &raw, &err),
            }
        }

        if let Some(raw) = non_empty_var(env, CACHE_TTL_ENV) {
            match parse_duration(&raw) {
                Ok(ttl) => self.cache_ttl = Some(Resolved::new(ttl, source(CACHE_TTL_ENV))),
                Err(err) => ignore_override(CACHE_TTL_ENV, &raw, &err),
            }
        }

        if let Some(raw) = non_empty_var(env, CACHE_TTL_DAYS_ENV) {
            match raw.trim().parse::<i64>() {
                Ok(days) => {
                    self.cache_ttl_days = Some(Resolved::new(days, source(CACHE_TTL_DAYS_ENV)))
                }
                Err(err) => ignore_override(CACHE_TTL_DAYS_ENV, &raw, &err),
            }
        }
    }

    /// Fill defaults, normalize, bridge, and validate.
    fn finish(self) -> Result<ResolvedConfig, ConfigError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| Resolved::default_value(DEFAULT_BASE_URL.to_string()))
            .map(|url| url.trim_end_matches('/').to_string());
        let model = self
            .model
            .unwrap_or_else(|| Resolved::default_value(DEFAULT_MODEL.to_string()));
        let extra_context = self
            .extra_context
            .unwrap_or_else(|| Resolved::default_value(String::new()));

        let (cache_ttl, warning) = bridge_cache_ttl(self.cache_ttl, self.cache_ttl_days)?;
        if let Some(ref warning) = warning {
            warn!("{}", warning);
        }

        let timeout = validate_timeout(self.timeout)?;
        let max_file_size = validate_max_file_size(
            self.max_file_size
                .unwrap_or_else(|| Resolved::default_value(DEFAULT_MAX_FILE_SIZE as i64)),
        )?;
        let cache_ttl = validate_cache_ttl(cache_ttl)?;

        let sources = Sources {
            base_url: base_url.source,
            model: model.source,
            extra_context: extra_context.source,
            timeout: timeout.source,
            max_file_size: max_file_size.source,
            cache_ttl: cache_ttl.source,
        };

        Ok(ResolvedConfig {
            config: Config {
                llm: LlmConfig {
                    base_url: base_url.value,
                    model: model.value,
                    extra_context: extra_context.value,
                    timeout: timeout.value,
                },
                documents: DocumentsConfig {
                    max_file_size: max_file_size.value,
                    cache_ttl: cache_ttl.value,
                },
            },
            sources,
            file: None,
            deprecation_warnings: warning.into_iter().collect(),
        })
    }
}

fn overlay<T>(slot: &mut Option<Resolved<T>>, value: Option<T>, source: ValueSource) {
    if let Some(value) = value {
        *slot = Some(Resolved::new(value, source));
    }
}

fn non_empty_var(env: &impl EnvSource, name: &str) -> Option<String> {
    env.var(name).filter(|value| !value.is_empty())
}

fn ignore_override(name: &str, raw: &str, err: &dyn std::fmt::Display) {
    warn!(
        var = name,
        value = raw,
        error = %err,
        "ignoring malformed environment override"
    );
}

/// An empty or absent timeout falls back to the default; anything else must
/// parse to a positive duration.
fn validate_timeout(
    raw: Option<Resolved<DurationValue>>,
) -> Result<Resolved<Duration>, ConfigError> {
    let raw = match raw {
        Some(raw) if !raw.value.is_blank() => raw,
        _ => return Ok(Resolved::default_value(DEFAULT_TIMEOUT)),
    };

    let delta = raw.value.to_delta(keys::TIMEOUT)?;
    match delta.to_std() {
        Ok(timeout) if !timeout.is_zero() => Ok(Resolved::new(timeout, raw.source)),
        _ => Err(ConfigError::validation(
            keys::TIMEOUT,
            format_duration(delta),
            "must be a positive duration",
        )),
    }
}

fn validate_max_file_size(size: Resolved<i64>) -> Result<Resolved<u64>, ConfigError> {
    match u64::try_from(size.value) {
        Ok(bytes) if bytes > 0 => Ok(Resolved::new(bytes, size.source)),
        _ => Err(ConfigError::validation(
            keys::MAX_FILE_SIZE,
            size.value.to_string(),
            "must be greater than zero",
        )),
    }
}

fn validate_cache_ttl(ttl: Resolved<TimeDelta>) -> Result<Resolved<Duration>, ConfigError> {
    match ttl.value.to_std() {
        Ok(duration) => Ok(Resolved::new(duration, ttl.source)),
        Err(_) => Err(ConfigError::validation(
            keys::CACHE_TTL,
            format_duration(ttl.value),
            "must not be negative",
        )),
    }
}
