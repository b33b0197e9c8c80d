//! Errors produced while resolving settings.

use std::path::PathBuf;

/// Broad category of a [`ConfigError`], for callers that branch on the kind
/// of failure rather than its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The settings file exists but could not be read.
    Io,
    /// Malformed file syntax, size, duration, or unit.
    Parse,
    /// A byte size too large to represent.
    Overflow,
    /// A value that parsed but violates a constraint.
    Validation,
    /// Two mutually exclusive keys were both set.
    Conflict,
}

/// Settings resolution failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {message}", .path.display())]
    FileParse { path: PathBuf, message: String },

    #[error("{field}: {reason}")]
    Parse {
        field: String,
        input: String,
        reason: String,
    },

    #[error("{field}: value {input:?} overflows a 64-bit byte count; try a smaller unit")]
    Overflow { field: String, input: String },

    #[error("{field}: {value} {constraint}")]
    Validation {
        field: String,
        value: String,
        constraint: String,
    },

    #[error("{current} and {legacy} cannot both be set; remove {legacy} (deprecated)")]
    Conflict {
        current: &'static str,
        legacy: &'static str,
    },
}

impl ConfigError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Read { .. } => ErrorKind::Io,
            ConfigError::FileParse { .. } | ConfigError::Parse { .. } => ErrorKind::Parse,
            ConfigError::Overflow { .. } => ErrorKind::Overflow,
            ConfigError::Validation { .. } => ErrorKind::Validation,
            ConfigError::Conflict { .. } => ErrorKind::Conflict,
        }
    }

    pub(crate) fn validation(
        field: &str,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        ConfigError::Validation {
            field: field.to_string(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let err = ConfigError::FileParse {
            path: PathBuf::from("/tmp/config.toml"),
            message: "expected `=`".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = ConfigError::Conflict {
            current: "documents.cache_ttl",
            legacy: "documents.cache_ttl_days",
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_messages_name_the_problem() {
        let err = ConfigError::FileParse {
            path: PathBuf::from("/tmp/config.toml"),
            message: "expected `=`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/config.toml"));
        assert!(msg.contains("expected `=`"));

        let err = ConfigError::validation("documents.max_file_size", "0", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "documents.max_file_size: 0 must be greater than zero"
        );

        let err = ConfigError::Conflict {
            current: "documents.cache_ttl",
            legacy: "documents.cache_ttl_days",
        };
        let msg = err.to_string();
        assert!(msg.contains("documents.cache_ttl"));
        assert!(msg.contains("documents.cache_ttl_days"));
        assert!(msg.contains("cannot both be set"));
    }
}
