//! Completion and remaining-time estimation.

use chrono::{DateTime, Utc};

/// Linear completion estimator for a counter measured against a known total.
///
/// A `current` past `total` is clamped, so the estimate never exceeds 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionEstimator {
    current: u64,
    total: u64,
}

impl CompletionEstimator {
    /// Create an estimator for `current` units out of `total`.
    pub fn new(current: u64, total: u64) -> Self {
        Self { current, total }
    }

    /// Completed fraction in `[0, 1]`. A zero total counts as done.
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 || self.current >= self.total {
            return 1.0;
        }
        self.current as f64 / self.total as f64
    }

    /// Remaining fraction in `[0, 1]`.
    pub fn percent_remaining(&self) -> f64 {
        1.0 - self.percent_complete()
    }

    /// Whole percent, truncated, e.g. `40%`.
    pub fn percent_string(&self) -> String {
        format!("{}%", (self.percent_complete() * 100.0) as u64)
    }

    /// Seconds left by linear extrapolation of `elapsed` seconds so far.
    ///
    /// `None` while nothing is done (no basis for a rate) or when no elapsed
    /// time is known; `Some(0.0)` once complete.
    pub fn seconds_remaining(&self, elapsed: Option<f64>) -> Option<f64> {
        let remaining = self.percent_remaining();
        if remaining == 1.0 {
            return None;
        }
        if remaining == 0.0 {
            return Some(0.0);
        }

        let elapsed = elapsed?;
        Some(elapsed / self.percent_complete() * remaining)
    }
}

/// Seconds between `start` and `now`, never negative.
pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let delta = now - start;
    let seconds = match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1_000_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    };
    seconds.max(0.0)
}
