//! Personal-message signatures (EIP-191)
//!
//! Messages are signed over the standard wallet prefix:
//! ```text
//! digest = keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)
//! signature = r || s || v   (65 bytes, v in {27, 28})
//! ```
//!
//! Any verifier that implements `personal_sign` recovery accepts these
//! signatures.

use ethers::types::{Signature, H256};
use ethers::utils::{hash_message, to_checksum};

use crate::error::{CryptoError, CryptoResult};

/// Length of an encoded signature: `0x` plus 130 hex characters.
pub const SIGNATURE_HEX_LEN: usize = 132;

/// Compute the EIP-191 digest of a message.
pub fn personal_message_hash(message: &[u8]) -> H256 {
    hash_message(message)
}

/// Encode a signature as `0x`-prefixed hex of `r || s || v`.
pub(crate) fn signature_to_hex(signature: &Signature) -> String {
    format!("0x{}", hex::encode(signature.to_vec()))
}

/// Decode a `0x`-prefixed (or bare) 65-byte hex signature.
pub fn parse_signature(signature_hex: &str) -> CryptoResult<Signature> {
    let trimmed = signature_hex.trim();
    let hex_part = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(hex_part)
        .map_err(|e| CryptoError::InvalidSignature(format!("not hex: {}", e)))?;

    Signature::try_from(bytes.as_slice())
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))
}

/// Recover the checksummed address that produced `signature_hex` over `message`.
///
/// # Example
/// ```
/// use agenthub_crypto::{recover_signer, Identity};
///
/// let identity = Identity::from_private_key(
///     "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
/// ).unwrap();
/// let signature = identity.sign(b"hello").unwrap();
/// assert_eq!(recover_signer(b"hello", &signature).unwrap(), identity.address());
/// ```
pub fn recover_signer(message: &[u8], signature_hex: &str) -> CryptoResult<String> {
    let signature = parse_signature(signature_hex)?;
    let address = signature
        .recover(personal_message_hash(message))
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;

    Ok(to_checksum(&address, None))
}

/// Check that `signature_hex` over `message` was produced by `address`.
///
/// Address comparison ignores checksum casing.
pub fn verify_signature(message: &[u8], signature_hex: &str, address: &str) -> bool {
    match recover_signer(message, signature_hex) {
        Ok(recovered) => recovered.eq_ignore_ascii_case(address.trim()),
        Err(_) => false,
    }
}
