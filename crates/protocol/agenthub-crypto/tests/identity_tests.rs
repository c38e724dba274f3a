//! Identity tests for agenthub-crypto

use agenthub_crypto::{hash_text, normalize_private_key, CryptoError, Identity, HASH_HEX_LEN};

/// Well-known development keys (never fund these).
const KEYS: [&str; 3] = [
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "1111111111111111111111111111111111111111111111111111111111111111",
];

/// Prefix presence does not change the derived address
#[test]
fn prefix_normalization_is_idempotent() {
    for key in KEYS {
        let bare = Identity::from_private_key(key).unwrap();
        let prefixed = Identity::from_private_key(&format!("0x{}", key)).unwrap();
        let upper = Identity::from_private_key(&format!("0X{}", key.to_uppercase())).unwrap();

        assert_eq!(bare.address(), prefixed.address());
        assert_eq!(bare.address(), upper.address());
    }
}

/// Normalizing an already-normalized key is a no-op
#[test]
fn normalize_twice_is_stable() {
    for key in KEYS {
        let once = normalize_private_key(key).unwrap();
        let twice = normalize_private_key(&once).unwrap();
        assert_eq!(once, twice);
        assert!(once.starts_with("0x"));
        assert_eq!(once.len(), 66);
    }
}

/// Different keys give different addresses
#[test]
fn distinct_keys_distinct_addresses() {
    let a = Identity::from_private_key(KEYS[0]).unwrap();
    let b = Identity::from_private_key(KEYS[1]).unwrap();
    assert_ne!(a.address(), b.address());
}

/// Address is 0x + 40 hex characters
#[test]
fn address_format() {
    for key in KEYS {
        let identity = Identity::from_private_key(key).unwrap();
        let address = identity.address();
        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0x"));
        assert!(address[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}

/// Second Hardhat development account resolves to its published address
#[test]
fn second_dev_account_address() {
    let identity = Identity::from_private_key(KEYS[1]).unwrap();
    assert_eq!(
        identity.address().to_lowercase(),
        "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
    );
}

/// Malformed keys fail at construction
#[test]
fn malformed_keys_rejected() {
    let cases = [
        "",
        "0x",
        "not-a-key",
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff",
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff8000",
        // secp256k1 order n is not a valid scalar
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    ];

    for case in cases {
        let result = Identity::from_private_key(case);
        assert!(
            matches!(result, Err(CryptoError::InvalidKeyFormat(_))),
            "expected InvalidKeyFormat for {:?}",
            case
        );
    }
}

/// Identity::hash matches the free function and has the fixed output length
#[test]
fn identity_hash_matches_hash_text() {
    let identity = Identity::from_private_key(KEYS[0]).unwrap();
    let hashed = identity.hash("temperature-sensor-042");

    assert_eq!(hashed, hash_text("temperature-sensor-042"));
    assert_eq!(hashed.len(), HASH_HEX_LEN);
    assert!(hashed.starts_with("0x"));
}
