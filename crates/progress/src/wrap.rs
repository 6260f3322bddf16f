//! Start/finish-guaranteed execution of a unit of work.

use crate::config::{ProgressConfig, TrackerFactory};
use crate::error::{ProgressError, Result};
use crate::tracker::ProgressTracker;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use tracing::warn;

/// Started tracker that prints its closing line when dropped.
///
/// Call [`finish`](Self::finish) to close it and observe write errors;
/// otherwise the drop (including an unwind) finishes it and only logs a
/// failure.
pub struct FinishGuard<'a, W: Write> {
    tracker: &'a mut ProgressTracker<W>,
    armed: bool,
}

impl<'a, W: Write> FinishGuard<'a, W> {
    /// Start `tracker` and guard its finish.
    ///
    /// The guard is armed before the opening line is written, so a failed
    /// start still attempts the closing line before returning the error.
    pub fn start(tracker: &'a mut ProgressTracker<W>) -> Result<Self> {
        let mut guard = Self {
            tracker,
            armed: true,
        };
        guard.tracker.start()?;
        Ok(guard)
    }

    /// Finish the tracker now.
    pub fn finish(mut self) -> Result<()> {
        self.armed = false;
        self.tracker.finish()
    }
}

impl<W: Write> Deref for FinishGuard<'_, W> {
    type Target = ProgressTracker<W>;

    fn deref(&self) -> &Self::Target {
        self.tracker
    }
}

impl<W: Write> DerefMut for FinishGuard<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tracker
    }
}

impl<W: Write> Drop for FinishGuard<'_, W> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        if let Err(err) = self.tracker.finish() {
            warn!(error = %err, "failed to print final progress line");
        }
    }
}

impl<W: Write> ProgressTracker<W> {
    /// Run `work` between `start` and `finish`.
    ///
    /// `finish` runs whether `work` returns or fails. An error from `work`
    /// wins over an error from `finish`.
    pub fn wrap<T, E, F>(&mut self, work: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Self) -> std::result::Result<T, E>,
        E: From<ProgressError>,
    {
        let mut guard = FinishGuard::start(self)?;
        let outcome = work(&mut guard);
        let finished = guard.finish();

        let value = outcome?;
        finished?;
        Ok(value)
    }
}

impl TrackerFactory {
    /// Build a tracker on `sink` and run `work` inside [`ProgressTracker::wrap`].
    pub fn wrap<W, T, E, F>(
        &self,
        config: ProgressConfig,
        sink: W,
        work: F,
    ) -> std::result::Result<T, E>
    where
        W: Write,
        F: FnOnce(&mut ProgressTracker<W>) -> std::result::Result<T, E>,
        E: From<ProgressError>,
    {
        let mut tracker = self.build_with_sink(config, sink)?;
        tracker.wrap(work)
    }
}

/// [`TrackerFactory::wrap`] with the factory from [`TrackerFactory::from_env`].
pub fn wrap<W, T, E, F>(config: ProgressConfig, sink: W, work: F) -> std::result::Result<T, E>
where
    W: Write,
    F: FnOnce(&mut ProgressTracker<W>) -> std::result::Result<T, E>,
    E: From<ProgressError>,
{
    TrackerFactory::from_env().wrap(config, sink, work)
}
