//! Shared testing utilities for the Metabolab workspace.

use chrono::{DateTime, TimeZone, Utc};
use metabolab_feed::{Category, SamplePoint};

pub use pretty_assertions::{assert_eq, assert_ne};
pub use metabolab_feed::{FixedClock, ScriptedUniform};

/// A fixed instant used wherever tests need a reproducible wall clock.
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Assert two floats agree within `tolerance`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Assert a series never decreases by more than `slack`.
#[track_caller]
pub fn assert_non_decreasing(series: &[f64], slack: f64) {
    for (i, pair) in series.windows(2).enumerate() {
        assert!(
            pair[1] >= pair[0] - slack,
            "series decreased at index {}: {} -> {}",
            i + 1,
            pair[0],
            pair[1]
        );
    }
}

/// A hand-built point for response-shape tests.
pub fn sample_fixture(sequence: u64) -> SamplePoint {
    SamplePoint {
        timestamp: "2024-05-14T09:30:00.000Z".to_string(),
        sequence,
        value: 100.0,
        metabolite_count: 42,
        confidence: 0.85,
        category: Category::Lipids,
    }
}

/// Sequence numbers of a run of points, for order assertions.
pub fn sequences(points: &[SamplePoint]) -> Vec<u64> {
    points.iter().map(|p| p.sequence).collect()
}
