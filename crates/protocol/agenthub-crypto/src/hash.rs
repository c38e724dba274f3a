//! Opaque identifier hashing
//!
//! Agent identifiers are hashed with SHA3-256 (NIST FIPS 202, not the
//! pre-standard Keccak-256 used for EVM addresses):
//! ```text
//! hash(text) = "0x" || hex(SHA3-256(utf8(text)))
//! ```

use sha3::{Digest, Sha3_256};

/// Length of a hashed identifier string: `0x` plus 64 hex characters.
pub const HASH_HEX_LEN: usize = 66;

/// Hash a UTF-8 string.
///
/// # Example
/// ```
/// use agenthub_crypto::hash_text;
///
/// let hashed = hash_text("motion-detector-001");
/// assert!(hashed.starts_with("0x"));
/// assert_eq!(hashed.len(), 66);
/// ```
pub fn hash_text(text: &str) -> String {
    hash_bytes(text.as_bytes())
}

/// Hash raw bytes, returning the `0x`-prefixed hex digest.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let digest = Sha3_256::digest(bytes);
    format!("0x{}", hex::encode(digest))
}
