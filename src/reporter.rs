//! Output channel shared by the interactive report and failure reporting
//!
//! The interactive ranking is written line by line through [`Reporter::info`];
//! every recoverable failure goes through [`Reporter::failure`]. The message of
//! a failure is its `Display` text and the optional cause is its
//! [`std::error::Error::source`].

use crate::error::TestTimeError;
use std::error::Error as _;
use std::io::Write;

/// Sink for informational lines and recoverable failures
pub trait Reporter {
    /// Emit one line of interactive output
    fn info(&mut self, line: &str);

    /// Report a recoverable failure
    fn failure(&mut self, failure: &TestTimeError);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn info(&mut self, line: &str) {
        (**self).info(line);
    }

    fn failure(&mut self, failure: &TestTimeError) {
        (**self).failure(failure);
    }
}

/// Writes report lines and warnings to a terminal-like writer
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn info(&mut self, line: &str) {
        // Console output is best-effort; a closed pipe must not fail the run
        let _ = writeln!(self.out, "{}", line);
    }

    fn failure(&mut self, failure: &TestTimeError) {
        let message = describe(failure);
        tracing::warn!("{}", message);
        let _ = writeln!(self.out, "warning: {}", message);
    }
}

/// Keeps everything in memory
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    lines: Vec<String>,
    failures: Vec<String>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Informational lines, in emission order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Failure messages including their cause, in emission order
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

impl Reporter for CollectingReporter {
    fn info(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn failure(&mut self, failure: &TestTimeError) {
        self.failures.push(describe(failure));
    }
}

/// `message` or `message: cause`
fn describe(failure: &TestTimeError) -> String {
    match failure.source() {
        Some(cause) => format!("{}: {}", failure, cause),
        None => failure.to_string(),
    }
}
