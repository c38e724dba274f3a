//! RPC-backed ledger client.
//!
//! Builds a legacy EIP-155 transaction to the registry contract, signs it
//! with the agent identity and broadcasts it with `eth_sendRawTransaction`.
//! The transaction hash is returned as soon as the node accepts it.

use std::sync::Arc;

use agenthub_crypto::Identity;
use async_trait::async_trait;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::TransactionRequest;
use tracing::{debug, info};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::registry::{RegistrationCall, RegistrationEncoder};
use crate::rpc::RpcClient;
use crate::traits::{Ledger, TransactionHash};

/// Ledger client that talks to an EVM node over JSON-RPC.
#[derive(Clone)]
pub struct RpcLedger {
    config: LedgerConfig,
    rpc: RpcClient,
    encoder: Option<Arc<dyn RegistrationEncoder>>,
}

impl RpcLedger {
    /// Create a client from a validated configuration.
    pub fn new(config: LedgerConfig) -> LedgerResult<Self> {
        config.validate()?;
        let rpc = RpcClient::new(&config.rpc_url, config.timeout)?;

        Ok(Self {
            config,
            rpc,
            encoder: None,
        })
    }

    /// Supply the registry calldata encoder.
    pub fn with_encoder(mut self, encoder: Arc<dyn RegistrationEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The underlying RPC client.
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Build and sign the registration transaction without broadcasting it.
    pub async fn build_stake_transaction(
        &self,
        identity: &Identity,
        agent_id: &str,
        metadata_uri: &str,
        stake_amount: &str,
    ) -> LedgerResult<ethers::types::Bytes> {
        let registry = self.config.registry()?;
        let call = RegistrationCall::new(agent_id, metadata_uri, stake_amount)?;
        let encoder = self
            .encoder
            .as_ref()
            .ok_or(LedgerError::CallEncodingUnavailable)?;
        let data = encoder.encode_register(&call)?;

        let from = identity.raw_address();
        let chain_id = self.rpc.chain_id().await?;
        if chain_id != self.config.network.chain_id() {
            debug!(
                expected = self.config.network.chain_id(),
                actual = chain_id,
                "RPC endpoint chain id differs from network preset"
            );
        }
        let nonce = self.rpc.transaction_count(from).await?;
        let gas_price = match self.config.gas_price {
            Some(gas_price) => gas_price,
            None => self.rpc.gas_price().await?,
        };

        let tx: TypedTransaction = TransactionRequest::new()
            .from(from)
            .to(registry)
            .value(call.stake_wei)
            .gas(self.config.gas_limit)
            .gas_price(gas_price)
            .nonce(nonce)
            .data(data)
            .chain_id(chain_id)
            .into();

        debug!(
            from = %identity.address(),
            nonce = %nonce,
            gas_price = %gas_price,
            chain_id,
            "Signing registration transaction"
        );

        Ok(identity.sign_raw_transaction(&tx)?)
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn stake(
        &self,
        identity: &Identity,
        agent_id: &str,
        metadata_uri: &str,
        stake_amount: &str,
    ) -> LedgerResult<TransactionHash> {
        let raw = self
            .build_stake_transaction(identity, agent_id, metadata_uri, stake_amount)
            .await?;
        let tx_hash = self.rpc.send_raw_transaction(&raw).await?;

        info!(
            network = %self.config.network,
            agent_id = %agent_id,
            tx_hash = %tx_hash,
            "Stake registration broadcast"
        );
        Ok(tx_hash)
    }
}

impl std::fmt::Debug for RpcLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcLedger")
            .field("config", &self.config)
            .field("encoder", &self.encoder.is_some())
            .finish()
    }
}
