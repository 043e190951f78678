//! Error types for ghsearch.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`FetchError`] - Search API failures (network, rate limit, malformed body)
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Error Recovery Strategy
//!
//! Fetch errors are **non-fatal** and never retried automatically: they surface as
//! the Error presentation state and the user re-issues the request with the retry
//! key. Terminal errors are fatal and propagate to `main`.

use thiserror::Error;

/// HTTP status the search API uses to signal rate-limit exhaustion.
pub const RATE_LIMIT_STATUS: u16 = 403;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// A search API call failed outside the interactive UI (e.g. `--health-check`).
    #[error("GitHub API request failed: {0}")]
    Fetch(#[from] FetchError),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer such as broken pipes or resize
    /// failures. Fatal: the terminal is restored and the process exits.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure of a single fetch attempt against the search API.
///
/// Every variant is terminal for the attempt. A page either fully succeeds or
/// the whole attempt fails; there are no partial-page errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout or similar transport failure.
    #[error("Network error: {message}")]
    Network {
        /// Transport error description.
        message: String,
    },

    /// The API rejected the request because the rate limit is exhausted.
    #[error("Rate limit exceeded (HTTP {status}): {message}")]
    RateLimited {
        /// Always [`RATE_LIMIT_STATUS`] for the GitHub API.
        status: u16,
        /// Message from the response body, or the status reason.
        message: String,
    },

    /// Any other non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Response status code.
        status: u16,
        /// Message from the response body, or the status reason.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Malformed response: {message}")]
    Malformed {
        /// Decoder error description.
        message: String,
    },

    /// Anything else.
    #[error("Unexpected error: {message}")]
    Unknown {
        /// Error description.
        message: String,
    },
}

impl FetchError {
    /// Build the error for a non-2xx response status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == RATE_LIMIT_STATUS {
            FetchError::RateLimited { status, message }
        } else {
            FetchError::Http { status, message }
        }
    }

    /// HTTP status code, where the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::RateLimited { status, .. } | FetchError::Http { status, .. } => {
                Some(*status)
            }
            FetchError::Network { .. } | FetchError::Malformed { .. } | FetchError::Unknown { .. } => {
                None
            }
        }
    }

    /// True for rate-limit exhaustion.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }

    /// Short human-readable message for the Error state and alerts.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::RateLimited { .. } => {
                "GitHub API rate limit exceeded. Wait a moment and try again.".to_string()
            }
            FetchError::Network { .. } => {
                "Could not reach the GitHub API. Check your connection.".to_string()
            }
            FetchError::Http { status, .. } => {
                format!("The GitHub API returned HTTP {status}.")
            }
            FetchError::Malformed { .. } => {
                "The GitHub API returned a response that could not be read.".to_string()
            }
            FetchError::Unknown { message } => message.clone(),
        }
    }
}
