//! Configuration for a test time aggregation
//!
//! Values come from presets, an optional `testtime.toml` and host-style
//! properties such as `testtime.loglimit=10`.
//!
//! # Example testtime.toml
//!
//! ```toml
//! log_limit = 5
//! file_limit = 20
//! directories = ["surefire-reports", "failsafe-reports", "it/reports"]
//! ```

use crate::error::TestTimeError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the persisted report inside the output directory
pub const REPORT_FILE_NAME: &str = "testtimes.txt";

pub const LOG_LIMIT_PROPERTY: &str = "testtime.loglimit";
pub const FILE_LIMIT_PROPERTY: &str = "testtime.filelimit";
pub const DIRECTORIES_PROPERTY: &str = "testtime.directories";
pub const SKIP_TESTS_PROPERTY: &str = "skipTests";

pub const DEFAULT_DIRECTORIES: [&str; 2] = ["surefire-reports", "failsafe-reports"];

/// Limits and report directory names for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTimeConfig {
    /// Entries per section in the interactive output (0 = no sections)
    pub log_limit: usize,
    /// Entries per section in `testtimes.txt` (0 = summary line only)
    pub file_limit: usize,
    /// Report directory names, matched against trailing path segments
    pub directories: Vec<String>,
}

impl Default for TestTimeConfig {
    fn default() -> Self {
        Self::single_module()
    }
}

impl TestTimeConfig {
    /// Defaults for one module's build: short console ranking, no file ranking
    pub fn single_module() -> Self {
        Self {
            log_limit: 5,
            file_limit: 0,
            directories: default_directories(),
        }
    }

    /// Defaults for a whole multi-module build: quiet console, top 20 in the file
    pub fn all_modules() -> Self {
        Self {
            log_limit: 0,
            file_limit: 20,
            directories: default_directories(),
        }
    }

    /// Load a configuration from a TOML file; absent keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::default().merge_file(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::default().merge_toml_str(content)
    }

    /// Overlay the keys set in a TOML file on top of `self`
    pub fn merge_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        self.merge_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn merge_toml_str(mut self, content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context("Failed to parse TOML")?;
        if let Some(limit) = file.log_limit {
            self.log_limit = limit;
        }
        if let Some(limit) = file.file_limit {
            self.file_limit = limit;
        }
        if let Some(directories) = file.directories {
            self.directories = directories;
        }
        self.validate()?;
        Ok(self)
    }

    /// Apply one `key=value` property
    ///
    /// Unknown keys are ignored. A limit that is not a non-negative integer
    /// leaves the current value in place and is returned as an error so the
    /// caller can report it.
    pub fn apply_property(&mut self, key: &str, value: &str) -> Result<(), TestTimeError> {
        match key {
            LOG_LIMIT_PROPERTY => self.log_limit = parse_limit(key, value, self.log_limit)?,
            FILE_LIMIT_PROPERTY => self.file_limit = parse_limit(key, value, self.file_limit)?,
            DIRECTORIES_PROPERTY => self.directories = split_directories(value),
            _ => tracing::debug!(key, "ignoring unknown property"),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), TestTimeError> {
        if self.directories.is_empty() {
            return Err(TestTimeError::InvalidConfig(
                "at least one report directory name is required".to_string(),
            ));
        }
        if self.directories.iter().any(|d| d.trim().is_empty()) {
            return Err(TestTimeError::InvalidConfig(
                "report directory names must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Keys present in a `testtime.toml`; absent keys leave the base untouched
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    log_limit: Option<usize>,
    file_limit: Option<usize>,
    directories: Option<Vec<String>>,
}

fn default_directories() -> Vec<String> {
    DEFAULT_DIRECTORIES.iter().map(|d| d.to_string()).collect()
}

fn parse_limit(key: &str, value: &str, current: usize) -> Result<usize, TestTimeError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| TestTimeError::InvalidLimit {
            key: key.to_string(),
            value: value.to_string(),
            default: current,
        })
}

/// Comma-separated directory names, blanks dropped
pub fn split_directories(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a `skipTests` property value asks to skip the run
///
/// A bare `-DskipTests` (empty value) counts as true.
pub fn skip_tests_requested(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("true")
}

/// Split `key=value`; a bare `key` has an empty value
pub fn parse_property(raw: &str) -> (&str, &str) {
    match raw.split_once('=') {
        Some((key, value)) => (key.trim(), value),
        None => (raw.trim(), ""),
    }
}
