//! Property tests for duration formatting, percent clamping, and cadence.

use progress_printer::{format_duration, CompletionEstimator, ProgressConfig, ProgressTracker};
use proptest::prelude::*;

/// Parse `14288d23h31m30s` back into seconds.
fn parse_duration(text: &str) -> u64 {
    let mut total = 0;
    let mut digits = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let value: u64 = digits.parse().unwrap();
        digits.clear();
        total += value
            * match c {
                'd' => 86_400,
                'h' => 3_600,
                'm' => 60,
                's' => 1,
                other => panic!("unexpected unit {other}"),
            };
    }
    total
}

proptest! {
    /// Formatting then parsing yields the truncated input.
    #[test]
    fn test_format_duration_round_trips(seconds in 0u64..10_000_000_000, frac in 0.0f64..1.0) {
        let formatted = format_duration(seconds as f64 + frac * 0.5);
        prop_assert_eq!(parse_duration(&formatted), seconds);
    }

    /// Units appear largest first, each at most once, never zero-valued.
    #[test]
    fn test_format_duration_shape(seconds in 1u64..10_000_000_000) {
        let formatted = format_duration(seconds as f64);
        let units: String = formatted.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        let order = "dhms";
        let mut last = None;
        for unit in units.chars() {
            let index = order.find(unit).unwrap();
            prop_assert!(last.map_or(true, |prev| index > prev));
            last = Some(index);
        }
        for part in formatted.split(|c: char| c.is_ascii_alphabetic()).filter(|p| !p.is_empty()) {
            prop_assert_ne!(part, "0");
        }
    }

    /// Percent complete stays within [0, 1] and saturates at the total.
    #[test]
    fn test_percent_clamps(current in 0u64..1_000_000, total in 0u64..1_000_000) {
        let estimator = CompletionEstimator::new(current, total);
        let done = estimator.percent_complete();
        prop_assert!((0.0..=1.0).contains(&done));
        if current >= total {
            prop_assert_eq!(done, 1.0);
            prop_assert_eq!(estimator.percent_remaining(), 0.0);
            prop_assert_eq!(estimator.seconds_remaining(Some(5.0)), Some(0.0));
        }
    }

    /// Fewer than `every` single increments print nothing; landing on it prints once.
    #[test]
    fn test_cadence(every in 1u64..200) {
        let config = ProgressConfig::default().with_every(every);
        let mut tracker = ProgressTracker::with_sink(config, Vec::new()).unwrap();
        for _ in 0..every - 1 {
            tracker.increment(1).unwrap();
        }
        prop_assert!(tracker.sink().unwrap().is_empty());

        tracker.increment(1).unwrap();
        let out = String::from_utf8(tracker.into_sink().unwrap()).unwrap();
        prop_assert_eq!(out, format!("{every}\n"));
    }
}
