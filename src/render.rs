//! Rendering of the ranked timings to the interactive and persisted sinks
//!
//! Both sinks share one layout and each has its own limit. A limit of zero
//! drops the ranking sections from that sink entirely; the persisted file
//! still gets its processing summary and timestamp.
//!
//! ```text
//!
//! Slowest Test Suites
//! ===================
//!    1.250  SuiteA
//! --------
//!    1.250  Total
//!
//! Slowest Test Cases
//! ==================
//!    0.750  pkg.Cls.t1
//! --------
//!    0.750  Total
//!
//! Note: Suite total can be less than case total when tests are run in parallel.
//! Processed 1 directories and 1 files in 0.01 s
//! Mon Oct 19 14:03:07 +02:00 2026
//! ```

use crate::aggregator::AggregationRun;
use crate::config::REPORT_FILE_NAME;
use crate::error::TestTimeError;
use crate::record::{TimingKind, TimingRecord};
use crate::reporter::Reporter;
use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const PARALLEL_NOTE: &str =
    "Note: Suite total can be less than case total when tests are run in parallel.";

const TOTAL_SEPARATOR: &str = "--------";

/// `Date.toString()`-like layout
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %:z %Y";

/// Top entries of one kind plus the total over every record of that kind
///
/// Zero-duration records never appear in `entries` but still count towards
/// `total`.
#[derive(Debug, Clone)]
pub struct RankedView<'a> {
    kind: TimingKind,
    entries: Vec<&'a TimingRecord>,
    total: f64,
}

impl<'a> RankedView<'a> {
    pub fn new(records: &'a [TimingRecord], kind: TimingKind, limit: usize) -> Self {
        let mut of_kind: Vec<&TimingRecord> =
            records.iter().filter(|r| r.kind() == kind).collect();
        of_kind.sort_by(|a, b| b.duration().total_cmp(&a.duration()));

        // Summing an empty f64 iterator yields -0.0
        let total = of_kind.iter().fold(0.0, |acc, r| acc + r.duration());
        let entries = of_kind
            .into_iter()
            .filter(|r| r.duration() != 0.0)
            .take(limit)
            .collect();

        Self {
            kind,
            entries,
            total,
        }
    }

    pub fn kind(&self) -> TimingKind {
        self.kind
    }

    pub fn entries(&self) -> &[&'a TimingRecord] {
        &self.entries
    }

    /// Sum of every duration of this kind, zeros included
    pub fn total(&self) -> f64 {
        self.total
    }

    fn push_lines(&self, lines: &mut Vec<String>) {
        let heading = self.kind.heading();
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.push("=".repeat(heading.len()));
        lines.extend(self.entries.iter().map(|r| r.to_string()));
        lines.push(TOTAL_SEPARATOR.to_string());
        lines.push(format!("{:8.3}  Total", self.total));
    }
}

/// Counters line closing the persisted report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingSummary {
    pub directories: usize,
    pub files: usize,
    pub elapsed: Duration,
}

impl fmt::Display for ProcessingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} directories and {} files in {:.2} s",
            self.directories,
            self.files,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Formats a finished run for both sinks
#[derive(Debug)]
pub struct ReportRenderer<'a> {
    records: &'a [TimingRecord],
    summary: ProcessingSummary,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(run: &'a AggregationRun) -> Self {
        Self::from_parts(
            run.records(),
            ProcessingSummary {
                directories: run.directories_visited(),
                files: run.files_scanned(),
                elapsed: run.elapsed(),
            },
        )
    }

    pub fn from_parts(records: &'a [TimingRecord], summary: ProcessingSummary) -> Self {
        Self { records, summary }
    }

    pub fn summary(&self) -> ProcessingSummary {
        self.summary
    }

    /// Suite and case sections for a given limit; empty when `limit` is zero
    pub fn ranking_lines(&self, limit: usize) -> Vec<String> {
        if limit == 0 {
            return Vec::new();
        }
        let mut lines = Vec::new();
        RankedView::new(self.records, TimingKind::Suite, limit).push_lines(&mut lines);
        RankedView::new(self.records, TimingKind::Case, limit).push_lines(&mut lines);
        lines.push(String::new());
        lines.push(PARALLEL_NOTE.to_string());
        lines
    }

    /// Send the ranking to the interactive sink
    pub fn emit_interactive<R: Reporter + ?Sized>(&self, limit: usize, reporter: &mut R) {
        for line in self.ranking_lines(limit) {
            reporter.info(&line);
        }
    }

    /// Full content of the persisted report
    pub fn file_contents(&self, limit: usize, emitted_at: DateTime<Local>) -> String {
        let mut out = String::new();
        for line in self.ranking_lines(limit) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&self.summary.to_string());
        out.push('\n');
        out.push_str(&emitted_at.format(TIMESTAMP_FORMAT).to_string());
        out.push('\n');
        out
    }

    /// Write `testtimes.txt` into `output_dir`, creating the directory if needed
    ///
    /// Returns the written path, or `None` after reporting why it could not
    /// be written.
    pub fn write_file<R: Reporter + ?Sized>(
        &self,
        output_dir: &Path,
        limit: usize,
        reporter: &mut R,
    ) -> Option<PathBuf> {
        if !output_dir.exists() {
            if let Err(source) = fs::create_dir_all(output_dir) {
                reporter.failure(&TestTimeError::CreateOutputDir {
                    path: output_dir.to_path_buf(),
                    source,
                });
                return None;
            }
        }

        let path = output_dir.join(REPORT_FILE_NAME);
        match fs::write(&path, self.file_contents(limit, Local::now())) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "wrote test time report");
                Some(path)
            }
            Err(source) => {
                reporter.failure(&TestTimeError::WriteReport { path, source });
                None
            }
        }
    }
}
