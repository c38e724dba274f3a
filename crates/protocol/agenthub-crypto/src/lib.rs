//! Cryptographic primitives for AgentHub devices.
//!
//! This crate provides everything an agent needs to prove who it is:
//!
//! - **Identity**: secp256k1 key loading and EIP-55 address derivation
//! - **Signatures**: EIP-191 personal-message signing and recovery
//! - **Hashing**: SHA3-256 digests of opaque agent identifiers
//! - **Transactions**: EIP-155 signing of ledger transactions with the same key
//!
//! # Example
//!
//! ```
//! use agenthub_crypto::{hash_text, recover_signer, Identity};
//!
//! let identity = Identity::from_private_key(
//!     "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
//! ).unwrap();
//! println!("Agent address: {}", identity.address());
//!
//! // Sign a message and recover the signer
//! let signature = identity.sign(b"https://svc/alerts0.00011700000000000").unwrap();
//! let signer = recover_signer(b"https://svc/alerts0.00011700000000000", &signature).unwrap();
//! assert_eq!(signer, identity.address());
//!
//! // Hash an agent identifier
//! assert_eq!(hash_text("motion-detector-001").len(), 66);
//! ```

mod error;
mod hash;
mod identity;
mod signature;

pub use error::{CryptoError, CryptoResult};
pub use hash::{hash_bytes, hash_text, HASH_HEX_LEN};
pub use identity::{normalize_private_key, Identity};
pub use signature::{
    parse_signature, personal_message_hash, recover_signer, verify_signature, SIGNATURE_HEX_LEN,
};
