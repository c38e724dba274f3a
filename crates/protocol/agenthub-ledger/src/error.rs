//! Error types for the ledger module.

use agenthub_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors that can occur during stake registration.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message from the node
        message: String,
    },

    /// Network error (retryable).
    #[error("network error: {0}")]
    Network(String),

    /// Timeout error (retryable).
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// No registry contract address is configured.
    #[error("no registry contract configured for network {0}")]
    NotConfigured(String),

    /// Stake amount could not be parsed or is below the minimum.
    #[error("invalid stake amount: {0}")]
    InvalidAmount(String),

    /// No registration encoder was supplied, so no calldata can be built.
    #[error("registration call encoding is not available")]
    CallEncodingUnavailable,

    /// The transaction could not be signed.
    #[error("transaction signing failed: {0}")]
    Signing(#[from] CryptoError),

    /// Internal error (malformed node response, unexpected state).
    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Create a new Rpc error.
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Create a new Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new Network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new InvalidAmount error.
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::rpc(-32000, "nonce too low");
        assert_eq!(err.to_string(), "RPC error -32000: nonce too low");

        let err = LedgerError::NotConfigured("mainnet".into());
        assert!(err.to_string().contains("mainnet"));
    }

    #[test]
    fn test_retryable() {
        assert!(LedgerError::network("refused").is_retryable());
        assert!(LedgerError::Timeout("30s".into()).is_retryable());
        assert!(!LedgerError::rpc(-32000, "reverted").is_retryable());
        assert!(!LedgerError::CallEncodingUnavailable.is_retryable());
        assert!(!LedgerError::invalid_amount("0.5").is_retryable());
    }
}
