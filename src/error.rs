use thiserror::Error;

/// Failure taxonomy for one fetch-and-render cycle.
///
/// Every variant collapses to the same user-facing status line; the
/// distinction exists for diagnostics and for tests.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Caller error, e.g. a zero-day lookback window.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport failure or non-2xx status from the upstream API.
    #[error("history request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body lacks the expected daily arrays.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}
