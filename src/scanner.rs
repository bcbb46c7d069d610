//! Discovery of test report directories inside build output roots
//!
//! A directory is a report directory when its path ends with one of the
//! configured names, compared component by component: `surefire-reports`
//! matches `module/target/surefire-reports` but not `target/my-surefire-reports`,
//! and a multi-segment name such as `it/failsafe-reports` must match both
//! trailing segments.

use crate::aggregator::AggregationRun;
use crate::error::TestTimeError;
use crate::extract;
use crate::reporter::Reporter;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static REPORT_FILE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("*.xml").expect("report file glob is a valid pattern"));

/// Walks build roots and feeds every report file to the extractor
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    targets: Vec<PathBuf>,
}

impl DirectoryScanner {
    /// Create a scanner looking for directories ending with any of `target_names`
    pub fn new<S: AsRef<str>>(target_names: &[S]) -> Self {
        Self {
            targets: target_names
                .iter()
                .map(|name| PathBuf::from(name.as_ref()))
                .filter(|target| target.components().next().is_some())
                .collect(),
        }
    }

    /// Whether `dir` is a report directory
    pub fn is_report_dir(&self, dir: &Path) -> bool {
        self.targets.iter().any(|target| dir.ends_with(target))
    }

    /// Scan one build root, adding its timings and counters to `run`
    ///
    /// A root that does not exist is skipped silently. If the root cannot be
    /// fully traversed the failure is reported and the root contributes
    /// nothing.
    pub fn scan<R: Reporter + ?Sized>(
        &self,
        root: &Path,
        run: &mut AggregationRun,
        reporter: &mut R,
    ) {
        if !root.exists() {
            tracing::debug!(root = %root.display(), "skipping missing build root");
            return;
        }

        let report_dirs = match self.find_report_dirs(root) {
            Ok(dirs) => dirs,
            Err(failure) => {
                reporter.failure(&failure);
                return;
            }
        };
        tracing::debug!(
            root = %root.display(),
            directories = report_dirs.len(),
            "found report directories"
        );

        for dir in report_dirs {
            self.scan_report_dir(&dir, run, reporter);
        }
    }

    /// All matching directories under `root`, including `root` itself
    fn find_report_dirs(&self, root: &Path) -> Result<Vec<PathBuf>, TestTimeError> {
        let mut dirs = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| TestTimeError::WalkRoot {
                root: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_dir() && self.is_report_dir(entry.path()) {
                dirs.push(entry.into_path());
            }
        }
        Ok(dirs)
    }

    fn scan_report_dir<R: Reporter + ?Sized>(
        &self,
        dir: &Path,
        run: &mut AggregationRun,
        reporter: &mut R,
    ) {
        run.add_directory();
        let files = match list_report_files(dir) {
            Ok(files) => files,
            Err(source) => {
                reporter.failure(&TestTimeError::ListDirectory {
                    path: dir.to_path_buf(),
                    source,
                });
                return;
            }
        };
        for file in files {
            let records = extract::extract_file(&file, reporter);
            run.add_file(records);
        }
    }
}

/// Regular `*.xml` files directly inside `dir`, sorted by name
fn list_report_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| REPORT_FILE.matches(name));
        if matches && entry.path().is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CollectingReporter;
    use std::fs;
    use tempfile::TempDir;

    const SUITE: &str = r#"<testsuite name="pkg.FooTest" time="1.5" tests="1">
  <testcase name="works" classname="pkg.FooTest" time="1.25"/>
</testsuite>
"#;

    fn scanner() -> DirectoryScanner {
        DirectoryScanner::new(&["surefire-reports", "failsafe-reports"])
    }

    #[test]
    fn test_is_report_dir_is_segment_wise() {
        let s = DirectoryScanner::new(&["x-reports"]);
        assert!(s.is_report_dir(Path::new("/build/sub/x-reports")));
        assert!(s.is_report_dir(Path::new("x-reports")));
        assert!(!s.is_report_dir(Path::new("/build/my-x-reports")));
        assert!(!s.is_report_dir(Path::new("/build/x-reports/inner")));
    }

    #[test]
    fn test_multi_segment_target() {
        let s = DirectoryScanner::new(&["nested/surefire-reports"]);
        assert!(s.is_report_dir(Path::new("/m/target/nested/surefire-reports")));
        assert!(!s.is_report_dir(Path::new("/m/target/surefire-reports")));
        assert!(!s.is_report_dir(Path::new("/m/target/unnested/surefire-reports")));
    }

    #[test]
    fn test_empty_target_names_are_dropped() {
        let s = DirectoryScanner::new(&["", "surefire-reports"]);
        assert!(!s.is_report_dir(Path::new("/anything")));
        assert!(s.is_report_dir(Path::new("/m/surefire-reports")));
    }

    #[test]
    fn test_missing_root_is_silent() {
        let mut run = AggregationRun::start();
        let mut reporter = CollectingReporter::new();
        scanner().scan(Path::new("/no/such/build/root"), &mut run, &mut reporter);
        run.finish();

        assert!(run.records().is_empty());
        assert_eq!(run.directories_visited(), 0);
        assert!(reporter.failures().is_empty());
    }

    #[test]
    fn test_scan_finds_nested_reports() {
        let tmp = TempDir::new().unwrap();
        let reports = tmp.path().join("module-a/target/surefire-reports");
        fs::create_dir_all(&reports).unwrap();
        fs::write(reports.join("TEST-pkg.FooTest.xml"), SUITE).unwrap();
        fs::write(reports.join("pkg.FooTest.txt"), "Tests run: 1").unwrap();
        fs::create_dir_all(tmp.path().join("module-a/target/failsafe-reports")).unwrap();
        fs::create_dir_all(tmp.path().join("module-a/target/my-surefire-reports")).unwrap();
        fs::write(
            tmp.path().join("module-a/target/my-surefire-reports/TEST-x.xml"),
            SUITE,
        )
        .unwrap();

        let mut run = AggregationRun::start();
        let mut reporter = CollectingReporter::new();
        scanner().scan(tmp.path(), &mut run, &mut reporter);
        run.finish();

        assert_eq!(run.directories_visited(), 2);
        assert_eq!(run.files_scanned(), 1);
        assert_eq!(run.records().len(), 2);
        assert!(reporter.failures().is_empty());
    }

    #[test]
    fn test_report_files_are_not_searched_recursively() {
        let tmp = TempDir::new().unwrap();
        let reports = tmp.path().join("surefire-reports");
        fs::create_dir_all(reports.join("old")).unwrap();
        fs::write(reports.join("old/TEST-old.xml"), SUITE).unwrap();

        let mut run = AggregationRun::start();
        let mut reporter = CollectingReporter::new();
        scanner().scan(tmp.path(), &mut run, &mut reporter);
        run.finish();

        assert_eq!(run.directories_visited(), 1);
        assert_eq!(run.files_scanned(), 0);
    }

    #[test]
    fn test_root_itself_can_be_a_report_dir() {
        let tmp = TempDir::new().unwrap();
        let reports = tmp.path().join("surefire-reports");
        fs::create_dir_all(&reports).unwrap();
        fs::write(reports.join("TEST-a.xml"), SUITE).unwrap();

        let mut run = AggregationRun::start();
        let mut reporter = CollectingReporter::new();
        scanner().scan(&reports, &mut run, &mut reporter);
        run.finish();

        assert_eq!(run.directories_visited(), 1);
        assert_eq!(run.files_scanned(), 1);
    }

    #[test]
    fn test_file_without_timings_still_counts() {
        let tmp = TempDir::new().unwrap();
        let reports = tmp.path().join("failsafe-reports");
        fs::create_dir_all(&reports).unwrap();
        fs::write(reports.join("failsafe-summary.xml"), "<failsafe-summary/>").unwrap();

        let mut run = AggregationRun::start();
        let mut reporter = CollectingReporter::new();
        scanner().scan(tmp.path(), &mut run, &mut reporter);
        run.finish();

        assert_eq!(run.files_scanned(), 1);
        assert!(run.records().is_empty());
    }

    #[test]
    fn test_unlistable_report_dir_is_reported_and_counted() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("surefire-reports");

        let mut run = AggregationRun::start();
        let mut reporter = CollectingReporter::new();
        scanner().scan_report_dir(&gone, &mut run, &mut reporter);
        run.finish();

        assert_eq!(run.directories_visited(), 1);
        assert_eq!(run.files_scanned(), 0);
        assert_eq!(reporter.failures().len(), 1);
        assert!(reporter.failures()[0].starts_with("Could not list"));
    }
}
