//! Agent identity
//!
//! An identity is a secp256k1 signing key plus the 20-byte address derived
//! from it:
//! ```text
//! address = keccak256(uncompressed_public_key[1..])[12..32]
//! ```
//!
//! The address is rendered in EIP-55 checksummed form and cached at
//! construction. The same key always yields the same address, whether or not
//! the caller supplied the `0x` prefix.

use std::fmt;

use ethers::core::k256::ecdsa::SigningKey;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes};
use ethers::utils::to_checksum;
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};
use crate::hash::hash_text;
use crate::signature::{personal_message_hash, signature_to_hex};

/// Number of hex characters in a private key.
const PRIVATE_KEY_HEX_LEN: usize = 64;

/// Normalize a private key to lowercase `0x`-prefixed hex.
///
/// Accepts keys with or without a `0x`/`0X` prefix and surrounding
/// whitespace. Does not check that the key is a valid curve scalar; that
/// happens in [`Identity::from_private_key`].
///
/// # Example
/// ```
/// use agenthub_crypto::normalize_private_key;
///
/// let key = "AC0974BEC39A17E36BA4A6B4D238FF944BACB478CBED5EFCAE784D7BF4F2FF80";
/// let normalized = normalize_private_key(key).unwrap();
/// assert_eq!(
///     normalized,
///     "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
/// );
/// ```
pub fn normalize_private_key(secret: &str) -> CryptoResult<String> {
    let trimmed = secret.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex_part.len() != PRIVATE_KEY_HEX_LEN {
        return Err(CryptoError::InvalidKeyFormat(format!(
            "expected {} hex characters, got {}",
            PRIVATE_KEY_HEX_LEN,
            hex_part.len()
        )));
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CryptoError::InvalidKeyFormat(
            "key contains non-hex characters".to_string(),
        ));
    }

    Ok(format!("0x{}", hex_part.to_ascii_lowercase()))
}

/// A device identity: signing key plus cached address.
///
/// Cheap to clone; the key material lives inside the wallet and is never
/// exposed through `Debug`.
#[derive(Clone)]
pub struct Identity {
    wallet: LocalWallet,
    address: Address,
    address_hex: String,
}

impl Identity {
    /// Build an identity from a hex private key.
    ///
    /// # Errors
    /// `InvalidKeyFormat` if the key is not 32 bytes of hex or is not a valid
    /// secp256k1 scalar (zero, or at least the curve order).
    pub fn from_private_key(secret: &str) -> CryptoResult<Self> {
        let normalized = Zeroizing::new(normalize_private_key(secret)?);
        let key_bytes = Zeroizing::new(
            hex::decode(&normalized[2..])
                .map_err(|e| CryptoError::InvalidKeyFormat(e.to_string()))?,
        );

        let signing_key = SigningKey::from_bytes(key_bytes.as_slice().into())
            .map_err(|e| CryptoError::InvalidKeyFormat(e.to_string()))?;

        let wallet = LocalWallet::from(signing_key);
        let address = wallet.address();

        Ok(Self {
            wallet,
            address,
            address_hex: to_checksum(&address, None),
        })
    }

    /// The EIP-55 checksummed address (`0x` + 40 hex characters).
    pub fn address(&self) -> &str {
        &self.address_hex
    }

    /// The raw 20-byte address.
    pub fn raw_address(&self) -> Address {
        self.address
    }

    /// Sign a message with the EIP-191 personal-message scheme.
    ///
    /// Signing is deterministic (RFC 6979): the same key and message always
    /// produce the same signature.
    ///
    /// # Errors
    /// `SigningFailure` if the signing primitive rejects the digest.
    pub fn sign(&self, message: &[u8]) -> CryptoResult<String> {
        let digest = personal_message_hash(message);
        let signature = self
            .wallet
            .sign_hash(digest)
            .map_err(|e| CryptoError::SigningFailure(e.to_string()))?;

        Ok(signature_to_hex(&signature))
    }

    /// Hash an opaque identifier with SHA3-256. See [`hash_text`].
    pub fn hash(&self, text: &str) -> String {
        hash_text(text)
    }

    /// Sign an EVM transaction (EIP-155) and return its RLP encoding.
    ///
    /// The transaction must carry a chain id so that the replay-protected
    /// `v` value matches the encoded payload.
    pub fn sign_raw_transaction(&self, tx: &TypedTransaction) -> CryptoResult<Bytes> {
        if tx.chain_id().is_none() {
            return Err(CryptoError::SigningFailure(
                "transaction has no chain id".to_string(),
            ));
        }

        let signature = self
            .wallet
            .sign_transaction_sync(tx)
            .map_err(|e| CryptoError::SigningFailure(e.to_string()))?;

        Ok(tx.rlp_signed(&signature))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("address", &self.address_hex)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_known_address() {
        let identity = Identity::from_private_key(KEY).unwrap();
        assert_eq!(identity.address(), ADDRESS);
    }

    #[test]
    fn test_prefix_is_optional() {
        let with = Identity::from_private_key(KEY).unwrap();
        let without = Identity::from_private_key(&KEY[2..]).unwrap();
        assert_eq!(with.address(), without.address());
    }

    #[test]
    fn test_invalid_length() {
        let result = Identity::from_private_key("0x1234");
        assert!(matches!(result, Err(CryptoError::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_non_hex() {
        let key = format!("0x{}", "g".repeat(64));
        let result = Identity::from_private_key(&key);
        assert!(matches!(result, Err(CryptoError::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let key = "0".repeat(64);
        let result = Identity::from_private_key(&key);
        assert!(matches!(result, Err(CryptoError::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let identity = Identity::from_private_key(KEY).unwrap();
        let debug = format!("{:?}", identity);
        assert!(debug.contains(ADDRESS));
        assert!(!debug.contains(&KEY[2..]));
    }

    #[test]
    fn test_sign_deterministic() {
        let identity = Identity::from_private_key(KEY).unwrap();
        let first = identity.sign(b"message").unwrap();
        let second = identity.sign(b"message").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), crate::SIGNATURE_HEX_LEN);
    }

    #[test]
    fn test_unsigned_chain_id_required() {
        use ethers::types::TransactionRequest;

        let identity = Identity::from_private_key(KEY).unwrap();
        let tx: TypedTransaction = TransactionRequest::new().nonce(0u64).into();
        assert!(matches!(
            identity.sign_raw_transaction(&tx),
            Err(CryptoError::SigningFailure(_))
        ));
    }
}
