//! Progress tracking and line rendering.

use crate::config::{ProgressConfig, TrackerFactory};
use crate::duration::format_duration;
use crate::error::{ProgressError, Result};
use crate::estimator::{self, CompletionEstimator};
use chrono::{DateTime, Utc};
use std::io::{Stdout, Write};
use tracing::{debug, trace};

/// Default print cadence, in units of progress.
pub const DEFAULT_EVERY: u64 = 100;

/// Printed in place of an ETA until there is a rate to extrapolate from.
const CALCULATING: &str = "calculating...";

/// Width of the percent column, wide enough for `100%`.
const PERCENT_WIDTH: usize = 4;

/// Where rendered lines go.
#[derive(Debug)]
pub(crate) enum Output<W> {
    /// Write every line to the sink
    Sink(W),
    /// Drop every line
    Discard,
}

/// Which trailing segment a line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineMode {
    /// Estimated time remaining
    Running,
    /// Total elapsed time
    Final,
}

/// Single-stream progress reporter.
///
/// Counts units of work and writes one status line to its sink on `start`,
/// on every milestone (a count divisible by `every`), and on `finish`.
///
/// ```text
/// Counting:   0/250   0% calculating...
/// Counting: 100/250  40% ~1m30s
/// Counting: 200/250  80% ~30s
/// Counting: 250/250 100% 2m30s total
/// ```
#[derive(Debug)]
pub struct ProgressTracker<W: Write = Stdout> {
    total: Option<u64>,
    name: Option<String>,
    every: u64,
    current: u64,
    start_time: Option<DateTime<Utc>>,
    out: Output<W>,
}

impl ProgressTracker<Stdout> {
    /// Create a tracker that writes to standard output.
    ///
    /// Output is discarded when `PROGRESS_PRINTER_SILENT` is set, see
    /// [`TrackerFactory::from_env`].
    pub fn new(config: ProgressConfig) -> Result<Self> {
        TrackerFactory::from_env().build(config)
    }
}

impl<W: Write> ProgressTracker<W> {
    /// Create a tracker that writes to `sink`.
    pub fn with_sink(config: ProgressConfig, sink: W) -> Result<Self> {
        Self::from_output(config, Output::Sink(sink))
    }

    pub(crate) fn from_output(config: ProgressConfig, out: Output<W>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            total: config.total,
            name: config.name,
            every: config.every,
            current: 0,
            start_time: None,
            out,
        })
    }

    // ==================== Lifecycle ====================

    /// Record the start time and print the opening line.
    pub fn start(&mut self) -> Result<()> {
        self.start_at(Utc::now())
    }

    /// Like [`start`](Self::start), with an explicit clock reading.
    pub fn start_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.start_time = Some(now);
        debug!(name = ?self.name, total = ?self.total, "progress started");
        self.emit(now, LineMode::Running)
    }

    /// Advance by `count` and print a line if the new count is a milestone.
    ///
    /// Only the resulting count is checked, so a large `count` that sweeps
    /// past a multiple of `every` without landing on one prints nothing.
    pub fn increment(&mut self, count: u64) -> Result<()> {
        self.increment_at(count, Utc::now())
    }

    /// Like [`increment`](Self::increment), with an explicit clock reading.
    pub fn increment_at(&mut self, count: u64, now: DateTime<Utc>) -> Result<()> {
        if count == 0 {
            return Err(ProgressError::ZeroIncrement);
        }

        self.current = self.current.saturating_add(count);
        if self.at_milestone() {
            trace!(current = self.current, "progress milestone");
            self.emit(now, LineMode::Running)?;
        }
        Ok(())
    }

    /// Print the closing line. Always writes, even if the current count was
    /// just printed as a milestone.
    pub fn finish(&mut self) -> Result<()> {
        self.finish_at(Utc::now())
    }

    /// Like [`finish`](Self::finish), with an explicit clock reading.
    pub fn finish_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        debug!(
            name = ?self.name,
            current = self.current,
            elapsed = ?self.elapsed_seconds(now),
            "progress finished"
        );
        self.emit(now, LineMode::Final)
    }

    // ==================== Accessors ====================

    /// Units of progress counted so far.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Expected total, if known.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Line prefix, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Print cadence.
    pub fn every(&self) -> u64 {
        self.every
    }

    /// When `start` was last called.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Override the start timestamp without printing.
    pub fn set_start_time(&mut self, start_time: DateTime<Utc>) {
        self.start_time = Some(start_time);
    }

    /// Whether lines are being discarded.
    pub fn is_silent(&self) -> bool {
        matches!(self.out, Output::Discard)
    }

    /// The sink, or `None` when silenced.
    pub fn sink(&self) -> Option<&W> {
        match &self.out {
            Output::Sink(sink) => Some(sink),
            Output::Discard => None,
        }
    }

    /// Consume the tracker and return its sink, or `None` when silenced.
    pub fn into_sink(self) -> Option<W> {
        match self.out {
            Output::Sink(sink) => Some(sink),
            Output::Discard => None,
        }
    }

    // ==================== Estimates ====================

    /// Completed fraction in `[0, 1]`; `None` without a total.
    pub fn percent_complete(&self) -> Option<f64> {
        self.estimator().map(|e| e.percent_complete())
    }

    /// Completed percent, truncated, e.g. `40%`; `None` without a total.
    pub fn percent_complete_string(&self) -> Option<String> {
        self.estimator().map(|e| e.percent_string())
    }

    /// Remaining fraction in `[0, 1]`; `None` without a total.
    pub fn percent_remaining(&self) -> Option<f64> {
        self.estimator().map(|e| e.percent_remaining())
    }

    /// Human ETA such as `~1m30s`, or `calculating...` before any progress.
    pub fn estimated_time_remaining(&self, now: DateTime<Utc>) -> Option<String> {
        self.total?;
        if self.current == 0 {
            return Some(CALCULATING.to_string());
        }

        let eta = match self.seconds_remaining(now) {
            Some(seconds) => format!("~{}", format_duration(seconds)),
            None => CALCULATING.to_string(),
        };
        Some(eta)
    }

    /// Linearly extrapolated seconds left.
    ///
    /// `None` without a total, before any progress, or before `start` on an
    /// unfinished run. `Some(0.0)` once the total is reached.
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> Option<f64> {
        self.estimator()?
            .seconds_remaining(self.elapsed_seconds(now))
    }

    /// Seconds since `start`; `None` if never started.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<f64> {
        self.start_time
            .map(|start| estimator::elapsed_seconds(start, now))
    }

    fn estimator(&self) -> Option<CompletionEstimator> {
        self.total
            .map(|total| CompletionEstimator::new(self.current, total))
    }

    fn at_milestone(&self) -> bool {
        self.current % self.every == 0
    }

    // ==================== Rendering ====================

    fn render_line(&self, now: DateTime<Utc>, mode: LineMode) -> String {
        let mut line = String::new();

        if let Some(name) = &self.name {
            line.push_str(name);
            line.push_str(": ");
        }

        match self.total {
            Some(total) => {
                let width = total.to_string().len();
                let percent = self.percent_complete_string().unwrap_or_default();
                line.push_str(&format!(
                    "{:>width$}/{total} {:>pw$}",
                    self.current,
                    percent,
                    width = width,
                    pw = PERCENT_WIDTH,
                ));
            }
            None => line.push_str(&self.current.to_string()),
        }

        match mode {
            LineMode::Final => {
                if let Some(elapsed) = self.elapsed_seconds(now) {
                    line.push(' ');
                    line.push_str(&format_duration(elapsed));
                    line.push_str(" total");
                }
            }
            LineMode::Running => {
                if let Some(eta) = self.estimated_time_remaining(now) {
                    line.push(' ');
                    line.push_str(&eta);
                }
            }
        }

        line
    }

    fn emit(&mut self, now: DateTime<Utc>, mode: LineMode) -> Result<()> {
        let mut line = self.render_line(now, mode);
        line.push('\n');

        if let Output::Sink(sink) = &mut self.out {
            sink.write_all(line.as_bytes())?;
            sink.flush()?;
        }
        Ok(())
    }
}
