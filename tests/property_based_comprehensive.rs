//! Property-based tests for ranking and rendering invariants
//!
//! Properties covered:
//! 1. Section totals equal the sum of every record of that kind, zeros included
//! 2. Ranked lists never show a zero-duration record
//! 3. Ranked lists are ordered by descending duration and respect the limit
//! 4. A limit of zero renders nothing
//! 5. The line matcher never panics on arbitrary input

use proptest::prelude::*;
use std::time::Duration;
use testtime::extract::{match_line, LineMatch};
use testtime::record::{TimingKind, TimingRecord};
use testtime::render::{ProcessingSummary, RankedView, ReportRenderer};

fn summary() -> ProcessingSummary {
    ProcessingSummary {
        directories: 0,
        files: 0,
        elapsed: Duration::ZERO,
    }
}

/// Durations in milliseconds so some of them are exactly zero
fn arb_records() -> impl Strategy<Value = Vec<TimingRecord>> {
    prop::collection::vec((any::<bool>(), "[a-z]{1,8}", 0u32..5_000), 0..40).prop_map(|raw| {
        raw.into_iter()
            .map(|(is_suite, name, millis)| {
                let kind = if is_suite {
                    TimingKind::Suite
                } else {
                    TimingKind::Case
                };
                TimingRecord::new(kind, name, millis as f64 / 1000.0)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_total_includes_every_record(records in arb_records(), limit in 0usize..10) {
        for kind in [TimingKind::Suite, TimingKind::Case] {
            let view = RankedView::new(&records, kind, limit);
            let expected: f64 = records
                .iter()
                .filter(|r| r.kind() == kind)
                .map(|r| r.duration())
                .sum();
            prop_assert!((view.total() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_ranked_list_has_no_zero_durations(records in arb_records(), limit in 0usize..50) {
        for kind in [TimingKind::Suite, TimingKind::Case] {
            let view = RankedView::new(&records, kind, limit);
            prop_assert!(view.entries().iter().all(|r| r.duration() != 0.0));
            prop_assert!(view.entries().iter().all(|r| r.kind() == kind));
        }
    }

    #[test]
    fn prop_ranked_list_is_descending_and_limited(records in arb_records(), limit in 0usize..50) {
        for kind in [TimingKind::Suite, TimingKind::Case] {
            let view = RankedView::new(&records, kind, limit);
            let nonzero = records
                .iter()
                .filter(|r| r.kind() == kind && r.duration() != 0.0)
                .count();
            prop_assert_eq!(view.entries().len(), nonzero.min(limit));
            prop_assert!(view
                .entries()
                .windows(2)
                .all(|pair| pair[0].duration() >= pair[1].duration()));
        }
    }

    #[test]
    fn prop_zero_limit_renders_nothing(records in arb_records()) {
        let renderer = ReportRenderer::from_parts(&records, summary());
        prop_assert!(renderer.ranking_lines(0).is_empty());
    }

    #[test]
    fn prop_nonzero_limit_renders_both_sections(records in arb_records(), limit in 1usize..10) {
        let renderer = ReportRenderer::from_parts(&records, summary());
        let lines = renderer.ranking_lines(limit);
        prop_assert_eq!(lines.iter().filter(|l| l.ends_with("  Total")).count(), 2);
        prop_assert_eq!(lines.iter().filter(|l| l.as_str() == "--------").count(), 2);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_match_line_never_panics(line in ".*") {
        let _ = match_line(&line);
    }

    #[test]
    fn prop_well_formed_case_lines_round_trip(
        name in "[A-Za-z_][A-Za-z0-9_]{0,12}",
        classname in "[a-z]{1,6}(\\.[A-Z][a-z]{1,6}){0,2}",
        millis in 0u32..100_000,
    ) {
        let line = format!(
            r#"    <testcase name="{}" classname="{}" time="{}.{:03}"/>"#,
            name,
            classname,
            millis / 1000,
            millis % 1000
        );
        match match_line(&line) {
            Some(LineMatch::Record(record)) => {
                prop_assert_eq!(record.kind(), TimingKind::Case);
                prop_assert_eq!(record.name(), format!("{}.{}", classname, name));
                prop_assert!((record.duration() - millis as f64 / 1000.0).abs() < 1e-9);
            }
            other => prop_assert!(false, "unexpected match {:?}", other),
        }
    }
}
