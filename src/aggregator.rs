//! Aggregation of timings across every build root of one invocation

use crate::config::TestTimeConfig;
use crate::record::TimingRecord;
use crate::render::ReportRenderer;
use crate::reporter::Reporter;
use crate::scanner::DirectoryScanner;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// State of a single aggregation
///
/// Counters only grow while scanning and are frozen by [`finish`], which
/// also sorts the records by descending duration.
///
/// [`finish`]: AggregationRun::finish
#[derive(Debug)]
pub struct AggregationRun {
    records: Vec<TimingRecord>,
    directories_visited: usize,
    files_scanned: usize,
    started: Instant,
    finished: Option<Instant>,
    report_path: Option<PathBuf>,
}

impl AggregationRun {
    /// Begin the scan phase now
    pub fn start() -> Self {
        Self {
            records: Vec::new(),
            directories_visited: 0,
            files_scanned: 0,
            started: Instant::now(),
            finished: None,
            report_path: None,
        }
    }

    pub(crate) fn add_directory(&mut self) {
        debug_assert!(self.finished.is_none(), "counters are frozen");
        self.directories_visited += 1;
    }

    /// Count one scanned file together with whatever it yielded
    pub(crate) fn add_file(&mut self, records: Vec<TimingRecord>) {
        debug_assert!(self.finished.is_none(), "counters are frozen");
        self.files_scanned += 1;
        self.records.extend(records);
    }

    /// End the scan phase and rank the records
    pub fn finish(&mut self) {
        if self.finished.is_some() {
            return;
        }
        self.finished = Some(Instant::now());
        // Ties keep no particular order
        self.records
            .sort_unstable_by(|a, b| b.duration().total_cmp(&a.duration()));
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Records in insertion order while scanning, ranked once finished
    pub fn records(&self) -> &[TimingRecord] {
        &self.records
    }

    pub fn directories_visited(&self) -> usize {
        self.directories_visited
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// Wall time of the scan phase (up to now if still scanning)
    pub fn elapsed(&self) -> Duration {
        self.finished
            .unwrap_or_else(Instant::now)
            .duration_since(self.started)
    }

    /// Where the persisted report was written, if it was
    pub fn report_path(&self) -> Option<&Path> {
        self.report_path.as_deref()
    }

    pub(crate) fn set_report_path(&mut self, path: PathBuf) {
        self.report_path = Some(path);
    }
}

/// Scans build roots, ranks their timings and renders both report sinks
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: TestTimeConfig,
    scanner: DirectoryScanner,
}

impl Aggregator {
    pub fn new(config: TestTimeConfig) -> Self {
        let scanner = DirectoryScanner::new(&config.directories);
        Self { config, scanner }
    }

    pub fn config(&self) -> &TestTimeConfig {
        &self.config
    }

    /// Scan every root in order and return the finished, ranked run
    pub fn collect<P, R>(&self, build_roots: &[P], reporter: &mut R) -> AggregationRun
    where
        P: AsRef<Path>,
        R: Reporter + ?Sized,
    {
        let mut run = AggregationRun::start();
        for root in build_roots {
            self.scanner.scan(root.as_ref(), &mut run, reporter);
        }
        run.finish();
        tracing::info!(
            directories = run.directories_visited(),
            files = run.files_scanned(),
            records = run.records().len(),
            elapsed_ms = run.elapsed().as_millis() as u64,
            "scan complete"
        );
        run
    }

    /// Collect, then write the interactive view to `reporter` and the
    /// persisted view to `output_dir`
    ///
    /// Never fails: every problem is reported and the affected part skipped.
    pub fn run<P, R>(&self, output_dir: &Path, build_roots: &[P], reporter: &mut R) -> AggregationRun
    where
        P: AsRef<Path>,
        R: Reporter + ?Sized,
    {
        let mut run = self.collect(build_roots, reporter);
        let renderer = ReportRenderer::new(&run);
        renderer.emit_interactive(self.config.log_limit, reporter);
        if let Some(path) = renderer.write_file(output_dir, self.config.file_limit, reporter) {
            run.set_report_path(path);
        }
        run
    }
}
