//! Quote source error types
//!
//! Every way a single source can fail to produce a quote is folded into
//! `SourceError`. The fetcher records these per source and keeps going,
//! so none of them is fatal to a polling round.

use thiserror::Error;

/// Per-source fetch failure (network, timeout, malformed payload)
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Venue answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Fetch exceeded the per-source bound
    #[error("Source timed out after {0}ms")]
    Timeout(u64),

    /// Payload parsed but did not contain a usable quote
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The fetch task panicked or was aborted
    #[error("Fetch task failed: {0}")]
    TaskFailed(String),
}

/// Result type alias for quote source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;
