//! Common test utilities for hearth integration tests.
//!
//! Provides `TestEnv` for isolated test environments that never read the
//! user's real `~/.config/hearth/config.toml` or inherit their overrides.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Variables the binary reads; cleared on every command.
const HEARTH_VARS: &[&str] = &[
    "OLLAMA_HOST",
    "HEARTH_LLM_MODEL",
    "HEARTH_LLM_TIMEOUT",
    "HEARTH_MAX_DOCUMENT_SIZE",
    "HEARTH_CACHE_TTL",
    "HEARTH_CACHE_TTL_DAYS",
    "HEARTH_LOG",
];

/// A test environment with an isolated config directory.
///
/// The `hearth()` method returns a `Command` that points `HEARTH_CONFIG_PATH`
/// at `config.toml` inside the temp directory, making tests parallel-safe.
pub struct TestEnv {
    pub config_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with no settings file.
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a new test environment with `contents` as the settings file.
    pub fn with_config(contents: &str) -> Self {
        let env = Self::new();
        std::fs::write(env.config_path(), contents).unwrap();
        env
    }

    /// Get a Command for the hearth binary with an isolated settings file.
    pub fn hearth(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hearth"));
        for var in HEARTH_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HEARTH_CONFIG_PATH", self.config_path());
        cmd
    }

    /// Path of the settings file (may not exist).
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.toml")
    }

    /// Get the path to the config directory.
    pub fn path(&self) -> &Path {
        self.config_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
