//! TOML schema for `config.toml`.
//!
//! Every field is optional so that "absent" can be told apart from an explicit
//! value, zero included. Numeric settings that also accept unit strings are
//! decoded as untagged enums and routed to the matching parser.
//!
//! # Schema
//!
//! ```toml
//! [llm]
//! base_url = "http://localhost:11434/v1"
//! model = "qwen3"
//! extra_context = "My house was built in 1962."
//! timeout = "5s"
//!
//! [documents]
//! max_file_size = "50 MiB"   # or 52428800
//! cache_ttl = "30d"          # or 2592000, or "720h"
//! # cache_ttl_days = 30      # deprecated
//! ```

use chrono::TimeDelta;
use serde::Deserialize;
use std::path::Path;

use super::duration::{parse_duration, within_range};
use super::error::ConfigError;
use super::size::{ParseSizeError, parse_byte_size};

/// Dotted key names, as used in error messages and `hearth config get`.
pub mod keys {
    pub const BASE_URL: &str = "llm.base_url";
    pub const MODEL: &str = "llm.model";
    pub const EXTRA_CONTEXT: &str = "llm.extra_context";
    pub const TIMEOUT: &str = "llm.timeout";
    pub const MAX_FILE_SIZE: &str = "documents.max_file_size";
    pub const CACHE_TTL: &str = "documents.cache_ttl";
    pub const CACHE_TTL_DAYS: &str = "documents.cache_ttl_days";

    /// Every recognized key, in file order.
    pub const ALL: [&str; 7] = [
        BASE_URL,
        MODEL,
        EXTRA_CONTEXT,
        TIMEOUT,
        MAX_FILE_SIZE,
        CACHE_TTL,
        CACHE_TTL_DAYS,
    ];
}

/// Section names in `config.toml`.
pub const SECTIONS: [&str; 2] = ["llm", "documents"];

/// Parsed contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub llm: LlmSection,

    #[serde(default)]
    pub documents: DocumentsSection,
}

/// `[llm]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LlmSection {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub extra_context: Option<String>,
    /// Integer seconds or a duration string; an empty string means "use the
    /// default".
    pub timeout: Option<DurationValue>,
}

/// `[documents]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentsSection {
    pub max_file_size: Option<SizeValue>,
    pub cache_ttl: Option<DurationValue>,
    /// Deprecated whole-day retention; exclusive with `cache_ttl`.
    pub cache_ttl_days: Option<i64>,
}

/// A byte size written either as a TOML integer or as a unit string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    untagged,
    expecting = "an integer byte count or a size string like \"50 MiB\""
)]
pub enum SizeValue {
    Bytes(i64),
    Text(String),
}

impl SizeValue {
    /// Resolve to a byte count. Integers pass through untouched (sign checks
    /// happen during validation); strings go through [`parse_byte_size`].
    pub fn to_bytes(&self, field: &str) -> Result<i64, ConfigError> {
        match self {
            SizeValue::Bytes(bytes) => Ok(*bytes),
            SizeValue::Text(text) => match parse_byte_size(text) {
                // parse_byte_size caps at i64::MAX
                Ok(bytes) => Ok(bytes as i64),
                Err(ParseSizeError::Overflow { input }) => Err(ConfigError::Overflow {
                    field: field.to_string(),
                    input,
                }),
                Err(err) => Err(ConfigError::Parse {
                    field: field.to_string(),
                    input: text.clone(),
                    reason: err.to_string(),
                }),
            },
        }
    }
}

/// A duration written either as integer seconds or as a duration string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    untagged,
    expecting = "integer seconds or a duration string like \"30s\" or \"30d\""
)]
pub enum DurationValue {
    Seconds(i64),
    Text(String),
}

impl DurationValue {
    /// True for an empty (or all-whitespace) string.
    pub fn is_blank(&self) -> bool {
        matches!(self, DurationValue::Text(text) if text.trim().is_empty())
    }

    pub fn to_delta(&self, field: &str) -> Result<TimeDelta, ConfigError> {
        match self {
            DurationValue::Seconds(seconds) => TimeDelta::try_seconds(*seconds)
                .and_then(within_range)
                .ok_or_else(|| ConfigError::Parse {
                    field: field.to_string(),
                    input: seconds.to_string(),
                    reason: format!("{} seconds is out of range", seconds),
                }),
            DurationValue::Text(text) => parse_duration(text).map_err(|err| ConfigError::Parse {
                field: field.to_string(),
                input: text.clone(),
                reason: err.to_string(),
            }),
        }
    }
}

impl SettingsFile {
    /// Decode a settings document. Unknown keys are ignored.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and decode the file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse(&content).map(Some).map_err(|e| {
            let message = match e.span() {
                Some(span) => {
                    let line = content[..span.start].matches('\n').count() + 1;
                    format!("{} (line {})", e.message(), line)
                }
                None => e.message().to_string(),
            };
            ConfigError::FileParse {
                path: path.to_path_buf(),
                message,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty() {
        assert_eq!(SettingsFile::parse("").unwrap(), SettingsFile::default());
    }

    #[test]
    fn test_parse_full() {
        let file = SettingsFile::parse(
            r#"
[llm]
base_url = "http://gpu-box:11434/v1"
model = "llama3"
extra_context = "We have a septic tank."
timeout = "30s"

[documents]
max_file_size = "10 MiB"
cache_ttl = "7d"
"#,
        )
        .unwrap();

        assert_eq!(file.llm.model.as_deref(), Some("llama3"));
        assert_eq!(file.llm.timeout, Some(DurationValue::Text("30s".to_string())));
        assert_eq!(
            file.documents.max_file_size,
            Some(SizeValue::Text("10 MiB".to_string()))
        );
        assert_eq!(
            file.documents.cache_ttl,
            Some(DurationValue::Text("7d".to_string()))
        );
        assert_eq!(file.documents.cache_ttl_days, None);
    }

    #[test]
    fn test_numeric_fields_accept_integers() {
        let file = SettingsFile::parse(
            r#"
[llm]
timeout = 30

[documents]
max_file_size = 1048576
cache_ttl = 3600
cache_ttl_days = 0
"#,
        )
        .unwrap();

        assert_eq!(file.llm.timeout, Some(DurationValue::Seconds(30)));
        assert_eq!(file.documents.max_file_size, Some(SizeValue::Bytes(1_048_576)));
        assert_eq!(file.documents.cache_ttl, Some(DurationValue::Seconds(3600)));
        assert_eq!(file.documents.cache_ttl_days, Some(0));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let file = SettingsFile::parse(
            r#"
[llm]
model = "llama3"
temperature = 0.2

[ui]
theme = "dark"
"#,
        )
        .unwrap();
        assert_eq!(file.llm.model.as_deref(), Some("llama3"));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(SettingsFile::parse("[llm]\nmodel = 3\n").is_err());
        assert!(SettingsFile::parse("[documents]\nmax_file_size = true\n").is_err());
        assert!(SettingsFile::parse("llm = 5\n").is_err());
    }

    #[test]
    fn test_mismatched_value_names_accepted_forms() {
        let err = SettingsFile::parse("[documents]\nmax_file_size = 1.5\n").unwrap_err();
        assert!(err.message().contains("integer byte count"), "{}", err);
        assert!(!err.message().contains("SizeValue"));

        let err = SettingsFile::parse("[llm]\ntimeout = 1.5\n").unwrap_err();
        assert!(err.message().contains("integer seconds"), "{}", err);
        assert!(!err.message().contains("DurationValue"));
    }

    #[test]
    fn test_size_value_to_bytes() {
        let field = keys::MAX_FILE_SIZE;
        assert_eq!(SizeValue::Bytes(-4).to_bytes(field).unwrap(), -4);
        assert_eq!(
            SizeValue::Text("2 KiB".to_string()).to_bytes(field).unwrap(),
            2048
        );

        let err = SizeValue::Text("2 QiB".to_string())
            .to_bytes(field)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains(field));

        let err = SizeValue::Text("99999999 TiB".to_string())
            .to_bytes(field)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_duration_value_to_delta() {
        let field = keys::CACHE_TTL;
        assert_eq!(
            DurationValue::Seconds(60).to_delta(field).unwrap(),
            TimeDelta::minutes(1)
        );
        assert_eq!(
            DurationValue::Text("2d".to_string()).to_delta(field).unwrap(),
            TimeDelta::days(2)
        );
        let err = DurationValue::Text("soon".to_string())
            .to_delta(field)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("soon"));

        let err = DurationValue::Seconds(i64::MAX).to_delta(field).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_duration_value_is_blank() {
        assert!(DurationValue::Text(String::new()).is_blank());
        assert!(DurationValue::Text("  ".to_string()).is_blank());
        assert!(!DurationValue::Text("5s".to_string()).is_blank());
        assert!(!DurationValue::Seconds(0).is_blank());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(
            SettingsFile::read(&dir.path().join("config.toml"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm\nmodel = \"x\"\n").unwrap();

        let err = SettingsFile::read(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = SettingsFile::read(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
