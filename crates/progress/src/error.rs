//! Error types for progress reporting.

/// Result alias for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors that can occur while reporting progress.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Writing a line to the sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config document could not be parsed
    #[error("JSON error: {0}")]
    Config(#[from] serde_json::Error),

    /// Increment by zero
    #[error("increment count must be at least 1")]
    ZeroIncrement,

    /// Cadence of zero
    #[error("invalid cadence {0}: every must be at least 1")]
    InvalidEvery(u64),
}
