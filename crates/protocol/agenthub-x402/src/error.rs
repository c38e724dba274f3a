//! Error types for x402 requests.
//!
//! These never escape [`X402Client`](crate::X402Client): the executor turns
//! every per-call error into a [`RequestFailure`](crate::RequestFailure)
//! inside the returned [`RequestResult`](crate::RequestResult). They are
//! public for callers that build claims and envelopes directly.

use agenthub_crypto::CryptoError;
use thiserror::Error;

/// Result type for x402 operations.
pub type X402Result<T> = Result<T, X402Error>;

/// Errors that can occur while building or sending a paid request.
#[derive(Debug, Error)]
pub enum X402Error {
    /// The signing primitive rejected the canonical message.
    #[error("payment claim signing failed: {0}")]
    Signing(#[from] CryptoError),

    /// The claim or body could not be serialized.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Connection, DNS or body-read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The exchange did not complete within the request timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
}

impl X402Error {
    /// Returns a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::Signing(_) => "Check the agent private key",
            Self::Encoding(_) => "Check that the request payload is valid JSON",
            Self::Transport(_) => "Check network connectivity to the service",
            Self::Timeout(_) => "Retry later or raise the request timeout",
        }
    }

    /// Returns true if the same call may succeed on retry.
    ///
    /// Retrying is the caller's decision; the executor never retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}

impl From<serde_json::Error> for X402Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

impl From<reqwest::Error> for X402Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
