//! Stake registration for AgentHub agents.
//!
//! An agent registers once by sending a staking transaction to the registry
//! contract, signed with the same key that signs its payment claims. Per-request
//! payments never touch the ledger.
//!
//! # Components
//!
//! - [`Ledger`]: the trait the agent facade stakes through
//! - [`RpcLedger`]: JSON-RPC implementation (legacy EIP-155 transaction)
//! - [`RpcClient`]: minimal JSON-RPC 2.0 client
//! - [`RegistrationEncoder`]: caller-supplied calldata encoding
//! - [`LedgerConfig`] / [`LedgerNetwork`]: network presets (Fuji, mainnet)
//!
//! # Example
//!
//! ```no_run
//! use agenthub_crypto::Identity;
//! use agenthub_ledger::{Ledger, LedgerConfig, RpcLedger};
//!
//! # async fn run() -> agenthub_ledger::LedgerResult<()> {
//! let identity = Identity::from_private_key(
//!     "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
//! )?;
//! let ledger = RpcLedger::new(LedgerConfig::fuji())?;
//!
//! // Without a RegistrationEncoder this fails with CallEncodingUnavailable
//! let tx_hash = ledger.stake(&identity, "motion-detector-001", "ipfs://meta", "1.0").await?;
//! println!("broadcast {}", tx_hash);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod evm;
mod registry;
mod rpc;
mod traits;

pub use config::{LedgerConfig, LedgerNetwork, DEFAULT_GAS_LIMIT, DEFAULT_RPC_TIMEOUT};
pub use error::{LedgerError, LedgerResult};
pub use evm::RpcLedger;
pub use registry::{
    agent_id_hash, parse_stake_amount, RegistrationCall, RegistrationEncoder, MIN_STAKE,
};
pub use rpc::{parse_quantity, RpcClient};
pub use traits::{Ledger, TransactionHash};
