//! Ledger trait definition.
//!
//! This module defines the trait the agent facade stakes through. Real
//! deployments use [`RpcLedger`](crate::RpcLedger); tests substitute an
//! in-memory mock.

use agenthub_crypto::Identity;
use async_trait::async_trait;

use crate::error::LedgerResult;

/// Hash of a broadcast transaction (`0x` + 64 hex).
pub type TransactionHash = String;

/// One-time stake registration of an agent.
///
/// The transaction is signed with the same key that signs payment claims.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Register `agent_id` with a stake of `stake_amount` native tokens.
    ///
    /// # Arguments
    /// * `identity` - Signing key of the agent
    /// * `agent_id` - Opaque agent identifier (hashed before submission)
    /// * `metadata_uri` - URI describing the agent
    /// * `stake_amount` - Decimal amount in native units (e.g. "1.5")
    ///
    /// # Returns
    /// The hash of the broadcast transaction. Inclusion is not awaited.
    async fn stake(
        &self,
        identity: &Identity,
        agent_id: &str,
        metadata_uri: &str,
        stake_amount: &str,
    ) -> LedgerResult<TransactionHash>;
}
