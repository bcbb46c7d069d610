//! Line-oriented timing extraction from JUnit-style XML reports
//!
//! Reports are not parsed as documents. Each line is matched on its own
//! against a single pattern:
//!
//! ```text
//! <testsuite ... name="N" ... time="T"
//! <testcase  ... name="N" ... classname="C" ... time="T"
//! ```
//!
//! `classname` is optional but, when present, must sit between `name` and
//! `time`. Tags spanning several lines or attributes in another order are not
//! recognized. Truncated or otherwise broken reports still yield whatever
//! lines are intact.

use crate::error::TestTimeError;
use crate::record::{TimingKind, TimingRecord};
use crate::reporter::Reporter;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const REPORT_LINE_PATTERN: &str =
    r#"^.*<test(suite|case).* name="([^"]+)"(.* classname="([^"]+)")*.* time="([^"]*)""#;

static REPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(REPORT_LINE_PATTERN).expect("report line pattern is a valid regex")
});

/// Result of matching one report line
#[derive(Debug, Clone, PartialEq)]
pub enum LineMatch {
    /// The line carried a usable timing
    Record(TimingRecord),
    /// The line matched but its `time` value is not a valid duration
    MalformedDuration { name: String, token: String },
}

/// Match a single line. `None` means the line carries no timing at all.
pub fn match_line(line: &str) -> Option<LineMatch> {
    let caps = REPORT_LINE.captures(line)?;
    let kind = TimingKind::from_tag_suffix(caps.get(1)?.as_str())?;
    let name = caps.get(2)?.as_str();
    let name = match caps.get(4) {
        Some(classname) => format!("{}.{}", classname.as_str(), name),
        None => name.to_string(),
    };
    let token = caps.get(5)?.as_str();

    Some(match parse_duration(token) {
        Some(duration) => LineMatch::Record(TimingRecord::new(kind, name, duration)),
        None => LineMatch::MalformedDuration {
            name,
            token: token.to_string(),
        },
    })
}

/// Seconds as written in a `time` attribute
fn parse_duration(token: &str) -> Option<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
}

/// Extract every timing found in `content`, reporting malformed durations
///
/// `file` only labels failures.
pub fn extract_str<R: Reporter + ?Sized>(
    content: &str,
    file: &Path,
    reporter: &mut R,
) -> Vec<TimingRecord> {
    let mut records = Vec::new();
    for line in content.lines() {
        match match_line(line) {
            Some(LineMatch::Record(record)) => records.push(record),
            Some(LineMatch::MalformedDuration { name, token }) => {
                reporter.failure(&TestTimeError::MalformedDuration {
                    token,
                    name,
                    file: file.to_path_buf(),
                });
            }
            None => {}
        }
    }
    records
}

/// Read one report file and extract its timings
///
/// An unreadable file is reported and contributes nothing.
pub fn extract_file<R: Reporter + ?Sized>(path: &Path, reporter: &mut R) -> Vec<TimingRecord> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) => {
            reporter.failure(&TestTimeError::ReadReport {
                path: path.to_path_buf(),
                source,
            });
            return Vec::new();
        }
    };
    let content = String::from_utf8_lossy(&bytes);
    let records = extract_str(&content, path, reporter);
    tracing::debug!(
        file = %path.display(),
        records = records.len(),
        "extracted report timings"
    );
    records
}
