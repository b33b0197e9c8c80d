//! Command implementations for the Hearth CLI.
//!
//! Each command resolves settings through [`crate::config::resolve`] and
//! returns a value that can be rendered as JSON or as human-readable text.

use chrono::TimeDelta;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::schema::keys;
use crate::config::{
    EnvSource, ResolvedConfig, example_config, format_bytes, format_duration, resolve,
};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait CommandResult {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// One resolved setting.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: serde_json::Value,
    pub source: String,
    #[serde(skip)]
    pub display: String,
}

/// Result of `hearth config list`.
#[derive(Debug, Serialize)]
pub struct ConfigList {
    pub path: Option<PathBuf>,
    pub file_found: bool,
    pub settings: Vec<ConfigEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deprecation_warnings: Vec<String>,
}

impl CommandResult for ConfigList {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        lines.push(match &self.path {
            Some(path) if self.file_found => format!("Settings file: {}", path.display()),
            Some(path) => format!("Settings file: {} (not found, using defaults)", path.display()),
            None => "Settings file: none (no config directory on this platform)".to_string(),
        });
        lines.push(String::new());

        let width = self.settings.iter().map(|e| e.key.len()).max().unwrap_or(0);
        for entry in &self.settings {
            lines.push(format!(
                "{:width$} = {}  ({})",
                entry.key,
                entry.display,
                entry.source,
                width = width
            ));
        }

        for warning in &self.deprecation_warnings {
            lines.push(format!("Warning: {}", warning));
        }
        lines.join("\n")
    }
}

impl CommandResult for ConfigEntry {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        self.display.clone()
    }
}

/// Result of `hearth config path`.
#[derive(Debug, Serialize)]
pub struct ConfigPathInfo {
    pub path: Option<PathBuf>,
    pub exists: bool,
}

impl CommandResult for ConfigPathInfo {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        match &self.path {
            Some(path) if self.exists => path.display().to_string(),
            Some(path) => format!("{} (does not exist)", path.display()),
            None => "No config directory on this platform".to_string(),
        }
    }
}

/// Result of `hearth config check`.
#[derive(Debug, Serialize)]
pub struct ConfigCheck {
    pub ok: bool,
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deprecation_warnings: Vec<String>,
}

impl CommandResult for ConfigCheck {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![match &self.file {
            Some(path) => format!("Settings OK ({})", path.display()),
            None => "Settings OK (defaults and environment only)".to_string(),
        }];
        for warning in &self.deprecation_warnings {
            lines.push(format!("Warning: {}", warning));
        }
        lines.join("\n")
    }
}

/// List every resolved setting with its source.
pub fn config_list(path: Option<&Path>, env: &impl EnvSource) -> Result<ConfigList> {
    let resolved = resolve(path, env)?;
    Ok(ConfigList {
        path: path.map(Path::to_path_buf),
        file_found: resolved.file.is_some(),
        settings: entries(&resolved),
        deprecation_warnings: resolved.deprecation_warnings,
    })
}

/// Look up a single resolved setting by its dotted key.
pub fn config_get(path: Option<&Path>, env: &impl EnvSource, key: &str) -> Result<ConfigEntry> {
    if key == keys::CACHE_TTL_DAYS {
        return Err(Error::InvalidInput(format!(
            "{} is deprecated and folded into {}; query that instead",
            keys::CACHE_TTL_DAYS,
            keys::CACHE_TTL
        )));
    }

    let resolved = resolve(path, env)?;
    entries(&resolved)
        .into_iter()
        .find(|entry| entry.key == key)
        .ok_or_else(|| {
            let valid: Vec<&str> = keys::ALL
                .iter()
                .copied()
                .filter(|k| *k != keys::CACHE_TTL_DAYS)
                .collect();
            Error::InvalidInput(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                valid.join(", ")
            ))
        })
}

/// Report where the settings file is expected.
pub fn config_path_info(path: Option<&Path>) -> ConfigPathInfo {
    ConfigPathInfo {
        path: path.map(Path::to_path_buf),
        exists: path.is_some_and(Path::is_file),
    }
}

/// Annotated example settings file for `path`.
pub fn config_template(path: Option<&Path>) -> String {
    let fallback = PathBuf::from("~/.config/hearth/config.toml");
    example_config(path.unwrap_or(&fallback))
}

/// Resolve and validate settings.
pub fn config_check(path: Option<&Path>, env: &impl EnvSource) -> Result<ConfigCheck> {
    let resolved = resolve(path, env)?;
    Ok(ConfigCheck {
        ok: true,
        file: resolved.file,
        deprecation_warnings: resolved.deprecation_warnings,
    })
}

fn entries(resolved: &ResolvedConfig) -> Vec<ConfigEntry> {
    let config = &resolved.config;
    let sources = &resolved.sources;
    let text = |key, value: &str, source: &crate::config::ValueSource| ConfigEntry {
        key,
        value: serde_json::Value::from(value),
        source: source.to_string(),
        display: value.to_string(),
    };
    let duration = |key, value: Duration, source: &crate::config::ValueSource| {
        let display = duration_string(value);
        ConfigEntry {
            key,
            value: serde_json::Value::from(display.clone()),
            source: source.to_string(),
            display,
        }
    };

    vec![
        text(keys::BASE_URL, &config.llm.base_url, &sources.base_url),
        text(keys::MODEL, &config.llm.model, &sources.model),
        text(
            keys::EXTRA_CONTEXT,
            &config.llm.extra_context,
            &sources.extra_context,
        ),
        duration(keys::TIMEOUT, config.llm.timeout, &sources.timeout),
        ConfigEntry {
            key: keys::MAX_FILE_SIZE,
            value: serde_json::Value::from(config.documents.max_file_size),
            source: sources.max_file_size.to_string(),
            display: format_bytes(config.documents.max_file_size),
        },
        duration(keys::CACHE_TTL, config.documents.cache_ttl, &sources.cache_ttl),
    ]
}

fn duration_string(value: Duration) -> String {
    TimeDelta::from_std(value)
        .map(format_duration)
        .unwrap_or_else(|_| format!("{}s", value.as_secs()))
}
