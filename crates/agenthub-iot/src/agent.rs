//! The agent facade.
//!
//! An [`Agent`] owns one identity and exposes everything a device does:
//! paid requests, telemetry pushes and one-time stake registration.

use std::sync::Arc;

use agenthub_crypto::Identity;
use agenthub_ledger::{Ledger, RpcLedger};
use agenthub_x402::{FailureKind, PaymentOptions, RequestResult, X402Client};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::{AgentConfig, ApiEndpoints};
use crate::error::SdkResult;

/// Outcome of a stake registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakeOutcome {
    /// The node accepted the transaction.
    Staked {
        /// Hash of the broadcast transaction.
        tx_hash: String,
    },
    /// Registration did not reach the ledger or was refused.
    Failed {
        /// Cause of the failure.
        error: String,
    },
}

impl StakeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Staked { .. })
    }

    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            Self::Staked { tx_hash } => Some(tx_hash),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Staked { .. } => None,
            Self::Failed { error } => Some(error),
        }
    }

    /// `{success: true, txHash}` or `{success: false, error}`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Staked { tx_hash } => json!({"success": true, "txHash": tx_hash}),
            Self::Failed { error } => json!({"success": false, "error": error}),
        }
    }
}

/// An IoT agent.
///
/// Cheap to clone; clones share the identity, HTTP pool and ledger.
#[derive(Clone)]
pub struct Agent {
    config: AgentConfig,
    client: X402Client,
    ledger: Arc<dyn Ledger>,
}

impl Agent {
    /// Create an agent that stakes through the configured RPC endpoint.
    pub fn new(config: AgentConfig) -> SdkResult<Self> {
        let ledger = RpcLedger::new(config.ledger().clone())?;
        Self::with_ledger(config, Arc::new(ledger))
    }

    /// Create an agent with a custom ledger client.
    pub fn with_ledger(config: AgentConfig, ledger: Arc<dyn Ledger>) -> SdkResult<Self> {
        let client = X402Client::new(
            Arc::clone(config.identity()),
            config.agent_id(),
            *config.executor(),
        )?;

        info!(
            agent_id = %config.agent_id(),
            address = %config.identity().address(),
            network = %config.ledger().network,
            "Agent initialized"
        );

        Ok(Self {
            config,
            client,
            ledger,
        })
    }

    pub fn agent_id(&self) -> &str {
        self.config.agent_id()
    }

    /// Checksummed address of the agent key.
    pub fn address(&self) -> &str {
        self.identity().address()
    }

    /// SHA3-256 of the agent id, as registered on the ledger.
    pub fn hashed_agent_id(&self) -> String {
        self.identity().hash(self.agent_id())
    }

    pub fn identity(&self) -> &Identity {
        self.config.identity()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        self.config.endpoints()
    }

    /// Paid request with the default token and tier.
    pub async fn pay_and_request(
        &self,
        url: &str,
        amount: &str,
        data: Option<&Value>,
    ) -> RequestResult {
        self.client
            .pay_and_request(url, amount, data, &PaymentOptions::default())
            .await
    }

    /// Paid request with explicit token and tier.
    pub async fn pay_and_request_with(
        &self,
        url: &str,
        amount: &str,
        data: Option<&Value>,
        options: &PaymentOptions,
    ) -> RequestResult {
        self.client.pay_and_request(url, amount, data, options).await
    }

    /// Unpaid telemetry push to an arbitrary endpoint.
    pub async fn send_telemetry(&self, endpoint: &str, data: &Value) -> RequestResult {
        self.client.send_telemetry(endpoint, data).await
    }

    /// Telemetry push to the service's sensor endpoint.
    pub async fn send_sensor_data(&self, data: &Value) -> RequestResult {
        self.client
            .send_telemetry(&self.endpoints().sensors_url, data)
            .await
    }

    /// Paid request to the service's alert endpoint.
    pub async fn send_alert(&self, amount: &str, data: Option<&Value>) -> RequestResult {
        self.pay_and_request(&self.endpoints().alerts_url, amount, data)
            .await
    }

    /// Paid request to the service's generic x402 endpoint.
    pub async fn pay_api(&self, amount: &str, data: Option<&Value>) -> RequestResult {
        self.pay_and_request(&self.endpoints().pay_url, amount, data)
            .await
    }

    /// Paid request to the generic x402 endpoint at the tier's reference price.
    ///
    /// A tier without a reference price fails without sending anything.
    pub async fn pay_api_tier(
        &self,
        options: &PaymentOptions,
        data: Option<&Value>,
    ) -> RequestResult {
        let Some(amount) = options.reference_price() else {
            return RequestResult::failed(
                FailureKind::Encoding,
                format!("no reference price for tier '{}'", options.tier),
            );
        };
        self.pay_and_request_with(&self.endpoints().pay_url, amount, data, options)
            .await
    }

    /// Register this agent on the ledger with `stake_amount` native tokens.
    ///
    /// Never fails; errors are reported in the outcome.
    pub async fn stake(&self, metadata_uri: &str, stake_amount: &str) -> StakeOutcome {
        match self
            .ledger
            .stake(self.identity(), self.agent_id(), metadata_uri, stake_amount)
            .await
        {
            Ok(tx_hash) => {
                info!(agent_id = %self.agent_id(), tx_hash = %tx_hash, "Agent staked");
                StakeOutcome::Staked { tx_hash }
            }
            Err(e) => {
                warn!(
                    agent_id = %self.agent_id(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "Stake registration failed"
                );
                StakeOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stake_outcome_json() {
        let staked = StakeOutcome::Staked {
            tx_hash: "0xabc".into(),
        };
        assert!(staked.is_success());
        assert_eq!(staked.tx_hash(), Some("0xabc"));
        assert_eq!(staked.to_json(), json!({"success": true, "txHash": "0xabc"}));

        let failed = StakeOutcome::Failed {
            error: "no registry".into(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some("no registry"));
        assert_eq!(
            failed.to_json(),
            json!({"success": false, "error": "no registry"})
        );
    }
}
