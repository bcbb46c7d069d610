//! testtime - ranked test timings across a multi-module build
//!
//! Scans build output roots for JUnit-style report directories (by default
//! `surefire-reports` and `failsafe-reports`), pulls suite and case timings
//! out of every `*.xml` report and writes the slowest ones to the console and
//! to a `testtimes.txt` file.
//!
//! ```no_run
//! use std::path::Path;
//! use testtime::aggregator::Aggregator;
//! use testtime::config::TestTimeConfig;
//! use testtime::reporter::ConsoleReporter;
//!
//! let aggregator = Aggregator::new(TestTimeConfig::all_modules());
//! let mut reporter = ConsoleReporter::new(std::io::stdout());
//! let run = aggregator.run(Path::new("target"), &["core/target", "app/target"], &mut reporter);
//! println!("{} report files", run.files_scanned());
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod record;
pub mod render;
pub mod reporter;
pub mod scanner;
