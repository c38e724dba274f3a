//! Error types for agenthub-crypto

use thiserror::Error;

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The private key is not 32 bytes of hex, or is not a valid secp256k1 scalar
    #[error("Invalid private key format: {0}")]
    InvalidKeyFormat(String),

    /// The signing primitive rejected the message or transaction
    #[error("Signing failed: {0}")]
    SigningFailure(String),

    /// A signature could not be decoded or recovered
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}
