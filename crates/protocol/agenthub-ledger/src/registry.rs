//! Registration call inputs and the calldata encoding seam.
//!
//! The registry contract ABI is not part of this crate. Callers that know
//! it supply a [`RegistrationEncoder`]; without one, staking stops before
//! any transaction is built.

use ethers::types::{Bytes, H256, U256};
use ethers::utils::parse_ether;

use agenthub_crypto::hash_text;

use crate::error::{LedgerError, LedgerResult};

/// Minimum stake, in whole native tokens.
pub const MIN_STAKE: &str = "1.0";

/// Inputs of a registry `register` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationCall {
    /// SHA3-256 of the agent id.
    pub agent_id_hash: H256,
    /// Metadata URI describing the agent.
    pub metadata_uri: String,
    /// Stake in wei, also sent as the transaction value.
    pub stake_wei: U256,
}

/// Encodes a registration call into contract calldata.
pub trait RegistrationEncoder: Send + Sync {
    /// Build the calldata for `call`.
    fn encode_register(&self, call: &RegistrationCall) -> LedgerResult<Bytes>;
}

/// Parse a decimal stake in native units into wei.
///
/// Rejects negative, malformed and below-minimum amounts.
pub fn parse_stake_amount(amount: &str) -> LedgerResult<U256> {
    let amount = amount.trim();
    if amount.is_empty() || amount.starts_with('-') {
        return Err(LedgerError::invalid_amount(format!("'{}'", amount)));
    }

    let wei = parse_ether(amount)
        .map_err(|e| LedgerError::invalid_amount(format!("'{}': {}", amount, e)))?;
    let minimum = parse_ether(MIN_STAKE)
        .map_err(|e| LedgerError::internal(format!("invalid minimum stake: {}", e)))?;

    if wei < minimum {
        return Err(LedgerError::invalid_amount(format!(
            "{} is below the minimum stake of {}",
            amount, MIN_STAKE
        )));
    }

    Ok(wei)
}

/// SHA3-256 of an agent id as a 32-byte word.
pub fn agent_id_hash(agent_id: &str) -> LedgerResult<H256> {
    let digest = hash_text(agent_id);
    let bytes = hex::decode(digest.trim_start_matches("0x"))
        .map_err(|e| LedgerError::internal(format!("invalid agent id digest: {}", e)))?;

    if bytes.len() != 32 {
        return Err(LedgerError::internal(format!(
            "agent id digest has {} bytes",
            bytes.len()
        )));
    }
    Ok(H256::from_slice(&bytes))
}

impl RegistrationCall {
    /// Validate inputs and assemble a registration call.
    pub fn new(agent_id: &str, metadata_uri: &str, stake_amount: &str) -> LedgerResult<Self> {
        Ok(Self {
            agent_id_hash: agent_id_hash(agent_id)?,
            metadata_uri: metadata_uri.to_string(),
            stake_wei: parse_stake_amount(stake_amount)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stake_amount() {
        assert_eq!(
            parse_stake_amount("1").unwrap(),
            U256::exp10(18)
        );
        assert_eq!(
            parse_stake_amount("2.5").unwrap(),
            U256::from(25u64) * U256::exp10(17)
        );
    }

    #[test]
    fn test_stake_below_minimum() {
        assert!(matches!(
            parse_stake_amount("0.99"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_stake_amount("0"),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_stake_malformed() {
        for amount in ["", "  ", "-1", "abc", "1.2.3"] {
            assert!(
                matches!(parse_stake_amount(amount), Err(LedgerError::InvalidAmount(_))),
                "amount {:?} must be rejected",
                amount
            );
        }
    }

    #[test]
    fn test_agent_id_hash_matches_text_hash() {
        let hash = agent_id_hash("motion-detector-001").unwrap();
        assert_eq!(
            format!("0x{}", hex::encode(hash.as_bytes())),
            hash_text("motion-detector-001")
        );
    }

    #[test]
    fn test_registration_call() {
        let call = RegistrationCall::new("agent", "ipfs://meta", "1.0").unwrap();
        assert_eq!(call.metadata_uri, "ipfs://meta");
        assert_eq!(call.stake_wei, U256::exp10(18));
    }
}
