//! Mock implementation of the `Ledger` trait for testing.
//!
//! Records every stake in memory and returns sequential fake
//! transaction hashes.

use agenthub_crypto::Identity;
use agenthub_ledger::{parse_stake_amount, Ledger, LedgerError, LedgerResult, TransactionHash};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// A stake accepted by [`MockLedger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeRecord {
    /// Checksummed address of the signing identity.
    pub address: String,
    pub agent_id: String,
    pub metadata_uri: String,
    pub stake_amount: String,
    pub tx_hash: TransactionHash,
}

struct MockLedgerInner {
    stakes: Vec<StakeRecord>,
    /// When true, every stake returns an RPC error.
    should_fail: bool,
    tx_counter: u64,
}

/// A mock implementation of the `Ledger` trait for testing.
///
/// Uses `Arc<RwLock<...>>` internally, so it is cheap to clone and
/// all clones share the same state.
#[derive(Clone)]
pub struct MockLedger {
    inner: Arc<RwLock<MockLedgerInner>>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockLedgerInner {
                stakes: Vec::new(),
                should_fail: false,
                tx_counter: 0,
            })),
        }
    }

    /// Configure the mock to fail all stakes.
    pub fn with_failure(self) -> Self {
        self.inner.write().unwrap().should_fail = true;
        self
    }

    /// Set the failure mode at runtime.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.inner.write().unwrap().should_fail = should_fail;
    }

    /// All stakes accepted so far.
    pub fn stakes(&self) -> Vec<StakeRecord> {
        self.inner.read().unwrap().stakes.clone()
    }

    pub fn stake_count(&self) -> usize {
        self.inner.read().unwrap().stakes.len()
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn stake(
        &self,
        identity: &Identity,
        agent_id: &str,
        metadata_uri: &str,
        stake_amount: &str,
    ) -> LedgerResult<TransactionHash> {
        let mut inner = self.inner.write().unwrap();
        if inner.should_fail {
            return Err(LedgerError::rpc(-32000, "mock: configured to fail"));
        }
        parse_stake_amount(stake_amount)?;

        inner.tx_counter += 1;
        let tx_hash = format!("0x{:064x}", inner.tx_counter);
        inner.stakes.push(StakeRecord {
            address: identity.address().to_string(),
            agent_id: agent_id.to_string(),
            metadata_uri: metadata_uri.to_string(),
            stake_amount: stake_amount.to_string(),
            tx_hash: tx_hash.clone(),
        });
        Ok(tx_hash)
    }
}
