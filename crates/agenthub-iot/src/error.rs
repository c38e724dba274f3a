//! SDK error types.

use agenthub_crypto::CryptoError;
use agenthub_ledger::LedgerError;
use agenthub_x402::X402Error;
use thiserror::Error;

/// SDK result type.
pub type SdkResult<T> = Result<T, SdkError>;

/// Errors raised while configuring or constructing an agent.
///
/// Request-time failures never appear here; they are reported inside
/// [`RequestResult`](agenthub_x402::RequestResult) and
/// [`StakeOutcome`](crate::StakeOutcome).
#[derive(Debug, Error)]
pub enum SdkError {
    /// Invalid private key.
    #[error("{0}")]
    Crypto(#[from] CryptoError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Ledger client could not be constructed.
    #[error("{0}")]
    Ledger(#[from] LedgerError),

    /// HTTP client could not be constructed.
    #[error("{0}")]
    Client(#[from] X402Error),
}

impl SdkError {
    /// Create a new Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
