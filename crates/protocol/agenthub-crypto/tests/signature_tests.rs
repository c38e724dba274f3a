//! Signature tests for agenthub-crypto

use agenthub_crypto::{recover_signer, verify_signature, Identity, SIGNATURE_HEX_LEN};

const KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
const OTHER_KEY: &str = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";

/// Signatures recover to the signer's address
#[test]
fn signature_recovers_to_address() {
    let identity = Identity::from_private_key(KEY).unwrap();
    let message = b"https://svc/alerts0.00011700000000000";

    let signature = identity.sign(message).unwrap();
    assert_eq!(recover_signer(message, &signature).unwrap(), identity.address());
    assert!(verify_signature(message, &signature, identity.address()));
}

/// Same key and message always sign identically
#[test]
fn signing_is_deterministic() {
    let identity = Identity::from_private_key(KEY).unwrap();
    let a = identity.sign(b"reading=21.5").unwrap();
    let b = identity.sign(b"reading=21.5").unwrap();
    assert_eq!(a, b);
}

/// Encoding is 0x + r || s || v with v in {27, 28}
#[test]
fn signature_encoding() {
    let identity = Identity::from_private_key(KEY).unwrap();
    let signature = identity.sign(b"any").unwrap();

    assert_eq!(signature.len(), SIGNATURE_HEX_LEN);
    assert!(signature.starts_with("0x"));
    let v = u8::from_str_radix(&signature[130..], 16).unwrap();
    assert!(v == 27 || v == 28, "unexpected v: {}", v);
}

/// A different key does not verify
#[test]
fn wrong_address_fails_verification() {
    let signer = Identity::from_private_key(KEY).unwrap();
    let other = Identity::from_private_key(OTHER_KEY).unwrap();

    let signature = signer.sign(b"payload").unwrap();
    assert!(!verify_signature(b"payload", &signature, other.address()));
}

/// Different messages produce different signatures
#[test]
fn different_messages_different_signatures() {
    let identity = Identity::from_private_key(KEY).unwrap();
    let a = identity.sign(b"https://svc/a0.0011700000000000").unwrap();
    let b = identity.sign(b"https://svc/a0.0011700000000001").unwrap();
    assert_ne!(a, b);
}

/// Empty messages are signable
#[test]
fn empty_message_signs() {
    let identity = Identity::from_private_key(KEY).unwrap();
    let signature = identity.sign(b"").unwrap();
    assert!(verify_signature(b"", &signature, identity.address()));
}

/// Malformed signatures never verify
#[test]
fn malformed_signature_does_not_verify() {
    let identity = Identity::from_private_key(KEY).unwrap();
    assert!(!verify_signature(b"x", "0x", identity.address()));
    assert!(!verify_signature(b"x", "nothex", identity.address()));
    assert!(recover_signer(b"x", "0x1234").is_err());
}

/// Hardhat account #0, as used by wallet tooling fixtures
const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const HARDHAT_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// personal_sign("hello") matches the signature wallets produce
#[test]
fn personal_sign_known_vector() {
    let identity = Identity::from_private_key(HARDHAT_KEY).unwrap();
    let expected = "0xf16ea9a3478698f695fd1401bfe27e9e4a7e8e3da94aa72b021125e31fa899cc\
                    573c48ea3fe1d4ab61a9db10c19032026e3ed2dbccba5a178235ac27f94504311c";

    assert_eq!(identity.sign(b"hello").unwrap(), expected);
    assert_eq!(recover_signer(b"hello", expected).unwrap(), HARDHAT_ADDRESS);
}

/// A canonical claim message signs to a fixed value
#[test]
fn claim_message_known_vector() {
    let identity = Identity::from_private_key(HARDHAT_KEY).unwrap();
    let message = b"https://hub.example/api/iot/alerts0.0001USDC1700000000000";
    let expected = "0x73cd342c2c1892e5b23ad9ceb6ac09c4c606a2dac8a2fde25686e2cd2d56fe82\
                    210f57bf83fc2aa23f1e6315bf1e9d1d558d187592e7311a314835956cd654271b";

    assert_eq!(identity.sign(message).unwrap(), expected);
    assert!(verify_signature(message, expected, HARDHAT_ADDRESS));
}
