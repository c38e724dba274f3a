//! Fixture keys and identities.
//!
//! The keys are the well-known Hardhat/Anvil development accounts. They
//! hold no value on any real network.

use agenthub_crypto::Identity;
use std::sync::Arc;

/// Development account #0.
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address of [`TEST_PRIVATE_KEY`].
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Development account #1.
pub const TEST_PRIVATE_KEY_2: &str =
    "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

/// Address of [`TEST_PRIVATE_KEY_2`].
pub const TEST_ADDRESS_2: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Agent id used across tests.
pub const TEST_AGENT_ID: &str = "motion-detector-001";

/// Identity for development account #0.
pub fn test_identity() -> Identity {
    Identity::from_private_key(TEST_PRIVATE_KEY).unwrap()
}

/// Shared identity for development account #0.
pub fn shared_test_identity() -> Arc<Identity> {
    Arc::new(test_identity())
}
