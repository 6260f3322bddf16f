//! Console progress reporting.
//!
//! Counts units of work and periodically prints a one-line status with the
//! count, percent complete, and estimated time remaining, then a summary
//! line with the total elapsed time.
//!
//! ```no_run
//! use progress_printer::{ProgressConfig, ProgressTracker};
//!
//! # fn main() -> progress_printer::Result<()> {
//! let config = ProgressConfig::default().with_name("Counting").with_total(250);
//! let mut progress = ProgressTracker::new(config)?;
//! progress.start()?;
//! for _ in 0..250 {
//!     progress.increment(1)?;
//! }
//! progress.finish()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod duration;
pub mod error;
pub mod estimator;
pub mod tracker;
pub mod wrap;

pub use config::{ProgressConfig, TrackerFactory, SILENT_ENV_VAR};
pub use duration::format_duration;
pub use error::{ProgressError, Result};
pub use estimator::CompletionEstimator;
pub use tracker::{ProgressTracker, DEFAULT_EVERY};
pub use wrap::{wrap, FinishGuard};
