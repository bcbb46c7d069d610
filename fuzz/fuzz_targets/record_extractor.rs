#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;
use testtime::extract::extract_str;
use testtime::reporter::CollectingReporter;

fuzz_target!(|data: &[u8]| {
    // Reports are decoded lossily, so every byte sequence is a valid input
    let content = String::from_utf8_lossy(data);
    let mut reporter = CollectingReporter::new();
    for record in extract_str(&content, Path::new("fuzz.xml"), &mut reporter) {
        assert!(record.duration().is_finite() && record.duration() >= 0.0);
    }
});
