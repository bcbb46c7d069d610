//! Recoverable failures raised while aggregating test times
//!
//! None of these abort a run. Each one is handed to a [`Reporter`] and the
//! unit of work it belongs to (a line, a file, a root or the file sink) is
//! dropped.
//!
//! [`Reporter`]: crate::reporter::Reporter

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestTimeError {
    #[error("Could not parse duration \"{token}\" for {name} in {}", file.display())]
    MalformedDuration {
        token: String,
        name: String,
        file: PathBuf,
    },

    #[error("Could not process {}", path.display())]
    ReadReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not list {}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not process {}", root.display())]
    WalkRoot {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Could not create output directory {}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write to {}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not parse limit {key}={value}. Using default {default}.")]
    InvalidLimit {
        key: String,
        value: String,
        default: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
