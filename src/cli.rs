//! CLI argument parsing for testtime

use crate::config::{self, TestTimeConfig};
use crate::error::TestTimeError;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Build root scanned when none is given
pub const DEFAULT_BUILD_ROOT: &str = "target";

#[derive(Parser, Debug)]
#[command(name = "testtime")]
#[command(version)]
#[command(
    about = "Rank the slowest test suites and test cases of a build",
    long_about = None
)]
pub struct Cli {
    /// Build output roots to scan (default: target)
    #[arg(value_name = "BUILD_ROOTS")]
    pub build_roots: Vec<PathBuf>,

    /// Directory receiving testtimes.txt (default: first build root)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Entries per section in the console output (0 disables the ranking)
    #[arg(long = "log-limit", value_name = "N")]
    pub log_limit: Option<usize>,

    /// Entries per section in testtimes.txt (0 writes only the summary line)
    #[arg(long = "file-limit", value_name = "N")]
    pub file_limit: Option<usize>,

    /// Report directory names to look for (comma separated)
    #[arg(
        short = 'd',
        long = "directories",
        value_name = "NAMES",
        value_delimiter = ','
    )]
    pub directories: Option<Vec<String>>,

    /// Use whole-build defaults (no console ranking, top 20 in the file)
    #[arg(long = "all-modules")]
    pub all_modules: bool,

    /// Load settings from a TOML file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Property override, e.g. -D testtime.filelimit=30 or -D skipTests
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Skip the run entirely
    #[arg(long = "skip-tests")]
    pub skip_tests: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Roots to scan, falling back to `target`
    pub fn roots(&self) -> Vec<PathBuf> {
        if self.build_roots.is_empty() {
            vec![PathBuf::from(DEFAULT_BUILD_ROOT)]
        } else {
            self.build_roots.clone()
        }
    }

    /// Where testtimes.txt goes
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| self.build_roots.first().cloned())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_ROOT))
    }

    /// Whether `--skip-tests` or a `skipTests` property asks to skip the run
    pub fn skip_requested(&self) -> bool {
        self.skip_tests
            || self.properties.iter().any(|raw| {
                let (key, value) = config::parse_property(raw);
                key == config::SKIP_TESTS_PROPERTY && config::skip_tests_requested(value)
            })
    }

    /// Resolve the configuration: preset, then file, then properties, then flags
    ///
    /// Bad property limits are not fatal; they come back alongside the
    /// configuration for the caller to report.
    pub fn resolve_config(&self) -> Result<(TestTimeConfig, Vec<TestTimeError>)> {
        let preset = if self.all_modules {
            TestTimeConfig::all_modules()
        } else {
            TestTimeConfig::single_module()
        };
        let mut config = match &self.config {
            Some(path) => preset.merge_file(path)?,
            None => preset,
        };

        let mut warnings = Vec::new();
        for raw in &self.properties {
            let (key, value) = config::parse_property(raw);
            if let Err(warning) = config.apply_property(key, value) {
                warnings.push(warning);
            }
        }

        if let Some(limit) = self.log_limit {
            config.log_limit = limit;
        }
        if let Some(limit) = self.file_limit {
            config.file_limit = limit;
        }
        if let Some(directories) = &self.directories {
            config.directories = directories
                .iter()
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }

        config
            .validate()
            .context("Invalid report directory configuration")?;
        Ok((config, warnings))
    }
}
