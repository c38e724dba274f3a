//! Configuration for stake registration.

use std::str::FromStr;
use std::time::Duration;

use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Gas limit of a registration transaction.
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// HTTP timeout for RPC calls.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Ledger network selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LedgerNetwork {
    /// Avalanche Fuji testnet (default for development)
    #[default]
    Fuji,
    /// Avalanche C-Chain mainnet
    Mainnet,
}

impl LedgerNetwork {
    /// Get the network name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuji => "fuji",
            Self::Mainnet => "mainnet",
        }
    }

    /// Public RPC endpoint of the network.
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Fuji => "https://api.avax-test.network/ext/bc/C/rpc",
            Self::Mainnet => "https://api.avax.network/ext/bc/C/rpc",
        }
    }

    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Fuji => 43113,
            Self::Mainnet => 43114,
        }
    }

    /// Registry contract deployed on this network, if any.
    pub fn default_registry(&self) -> Option<&'static str> {
        match self {
            Self::Fuji => Some("0x6750Ed798186b4B5a7441D0f46Dd36F372441306"),
            Self::Mainnet => None,
        }
    }
}

impl std::fmt::Display for LedgerNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LedgerNetwork {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fuji" => Ok(Self::Fuji),
            "mainnet" => Ok(Self::Mainnet),
            other => Err(LedgerError::config(format!(
                "unknown network '{}' (expected 'fuji' or 'mainnet')",
                other
            ))),
        }
    }
}

/// Configuration for the RPC-backed ledger client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Which network to register on
    pub network: LedgerNetwork,

    /// RPC endpoint (the network preset unless overridden)
    pub rpc_url: String,

    /// Registry contract address
    pub registry_address: Option<String>,

    /// Gas limit of the registration transaction
    pub gas_limit: u64,

    /// Fixed gas price in wei; queried from the node when unset
    pub gas_price: Option<U256>,

    /// HTTP timeout for each RPC call
    pub timeout: Duration,
}

impl LedgerConfig {
    /// Preset configuration for a network.
    pub fn for_network(network: LedgerNetwork) -> Self {
        Self {
            network,
            rpc_url: network.rpc_url().to_string(),
            registry_address: network.default_registry().map(str::to_string),
            gas_limit: DEFAULT_GAS_LIMIT,
            gas_price: None,
            timeout: DEFAULT_RPC_TIMEOUT,
        }
    }

    /// Preset configuration for Fuji.
    pub fn fuji() -> Self {
        Self::for_network(LedgerNetwork::Fuji)
    }

    /// Preset configuration for mainnet (no registry).
    pub fn mainnet() -> Self {
        Self::for_network(LedgerNetwork::Mainnet)
    }

    /// Override the RPC endpoint.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Set the registry contract address.
    pub fn with_registry_address(mut self, address: impl Into<String>) -> Self {
        self.registry_address = Some(address.into());
        self
    }

    /// Use a fixed gas price instead of `eth_gasPrice`.
    pub fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Override the RPC timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The parsed registry address.
    ///
    /// # Errors
    /// `NotConfigured` if no address is set, `Config` if it is malformed.
    pub fn registry(&self) -> LedgerResult<Address> {
        let address = self
            .registry_address
            .as_deref()
            .ok_or_else(|| LedgerError::NotConfigured(self.network.to_string()))?;

        Address::from_str(address.trim()).map_err(|e| {
            LedgerError::config(format!("invalid registry address '{}': {}", address, e))
        })
    }

    /// Validate the configuration.
    pub fn validate(&self) -> LedgerResult<()> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(LedgerError::config(format!(
                "RPC URL must be http(s): '{}'",
                self.rpc_url
            )));
        }

        if self.registry_address.is_some() {
            self.registry()?;
        }

        if self.gas_limit == 0 {
            return Err(LedgerError::config("gas limit must be non-zero"));
        }

        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::fuji()
    }
}
