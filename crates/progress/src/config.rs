//! Tracker configuration and construction.

use crate::error::{ProgressError, Result};
use crate::tracker::{Output, ProgressTracker, DEFAULT_EVERY};
use serde::Deserialize;
use std::io::{Stdout, Write};
use std::path::Path;

/// Environment variable that silences trackers built by [`TrackerFactory::from_env`].
pub const SILENT_ENV_VAR: &str = "PROGRESS_PRINTER_SILENT";

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Expected number of units; enables percent and ETA
    pub total: Option<u64>,

    /// Prefix for every line
    pub name: Option<String>,

    /// Print whenever the count is a multiple of this
    pub every: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            total: None,
            name: None,
            every: DEFAULT_EVERY,
        }
    }
}

impl ProgressConfig {
    /// Set the expected total.
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the line prefix.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the print cadence.
    pub fn with_every(mut self, every: u64) -> Self {
        self.every = every;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.every == 0 {
            return Err(ProgressError::InvalidEvery(self.every));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Builds trackers with a shared output policy.
///
/// A silenced factory hands out trackers that discard every line, which
/// keeps test runs quiet without touching call sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerFactory {
    silent: bool,
}

impl TrackerFactory {
    /// Factory whose trackers print.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose trackers discard their output.
    pub fn silenced() -> Self {
        Self { silent: true }
    }

    /// Silenced when `PROGRESS_PRINTER_SILENT` is `1` or `true` (any case).
    pub fn from_env() -> Self {
        let silent = std::env::var(SILENT_ENV_VAR)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        Self { silent }
    }

    /// Whether trackers from this factory discard output.
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Build a tracker on standard output.
    pub fn build(&self, config: ProgressConfig) -> Result<ProgressTracker<Stdout>> {
        self.build_with_sink(config, std::io::stdout())
    }

    /// Build a tracker on `sink`. The sink is dropped if the factory is silenced.
    pub fn build_with_sink<W: Write>(
        &self,
        config: ProgressConfig,
        sink: W,
    ) -> Result<ProgressTracker<W>> {
        let out = if self.silent {
            Output::Discard
        } else {
            Output::Sink(sink)
        };
        ProgressTracker::from_output(config, out)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true"
    )
}
