//! Timing records extracted from test reports

use std::fmt;

/// Which test entity a timing belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingKind {
    /// A `<testsuite>` element, aggregating many cases
    Suite,
    /// A single `<testcase>` element
    Case,
}

impl TimingKind {
    /// Map the tag suffix captured after `<test` to a kind
    pub fn from_tag_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "suite" => Some(Self::Suite),
            "case" => Some(Self::Case),
            _ => None,
        }
    }

    /// Heading used for this kind in the rendered report
    pub fn heading(self) -> &'static str {
        match self {
            Self::Suite => "Slowest Test Suites",
            Self::Case => "Slowest Test Cases",
        }
    }
}

/// One measured duration for a named suite or case
///
/// Records are created by the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    kind: TimingKind,
    name: String,
    duration: f64,
}

impl TimingRecord {
    /// Create a record. `duration` is in seconds and must be finite and non-negative.
    pub fn new(kind: TimingKind, name: impl Into<String>, duration: f64) -> Self {
        debug_assert!(duration.is_finite() && duration >= 0.0);
        Self {
            kind,
            name: name.into(),
            duration,
        }
    }

    pub fn kind(&self) -> TimingKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_suite(&self) -> bool {
        self.kind == TimingKind::Suite
    }

    pub fn is_case(&self) -> bool {
        self.kind == TimingKind::Case
    }
}

/// Report line layout: duration right-aligned in 8 columns, 3 decimals, two spaces, name
impl fmt::Display for TimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:8.3}  {}", self.duration, self.name)
    }
}
