//! Agent configuration.
//!
//! [`AgentConfig`] is the immutable, validated configuration an [`Agent`](crate::Agent)
//! is built from. [`AgentSettings`] is its serializable counterpart, loaded
//! from TOML and/or `AGENTHUB_*` environment variables:
//!
//! ```toml
//! agent_id = "motion-detector-001"
//! private_key = "${DEVICE_KEY}"
//! network = "fuji"
//! base_api_url = "https://agenthub.example"
//!
//! [timeouts]
//! payment_secs = 30
//! telemetry_secs = 10
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use agenthub_crypto::Identity;
use agenthub_ledger::{LedgerConfig, LedgerNetwork, DEFAULT_RPC_TIMEOUT};
use agenthub_x402::{ExecutorConfig, DEFAULT_PAYMENT_TIMEOUT, DEFAULT_TELEMETRY_TIMEOUT};
use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{SdkError, SdkResult};

/// Base URL of a locally running AgentHub service.
pub const DEFAULT_BASE_API_URL: &str = "http://localhost:3000";

/// Path of the generic x402 payment endpoint.
pub const PAY_PATH: &str = "/api/x402/pay";

/// Path of the sensor telemetry endpoint.
pub const SENSORS_PATH: &str = "/api/iot/sensors";

/// Path of the paid alert endpoint.
pub const ALERTS_PATH: &str = "/api/iot/alerts";

/// Longest accepted agent id, in characters.
pub const MAX_AGENT_ID_LEN: usize = 64;

/// Environment variable overriding the agent id.
pub const ENV_AGENT_ID: &str = "AGENTHUB_AGENT_ID";
/// Environment variable overriding the private key.
pub const ENV_PRIVATE_KEY: &str = "AGENTHUB_PRIVATE_KEY";
/// Environment variable overriding the network (`fuji` or `mainnet`).
pub const ENV_NETWORK: &str = "AGENTHUB_NETWORK";
/// Environment variable overriding the RPC endpoint.
pub const ENV_RPC_URL: &str = "AGENTHUB_RPC_URL";
/// Environment variable overriding the registry address.
pub const ENV_REGISTRY_ADDRESS: &str = "AGENTHUB_REGISTRY_ADDRESS";
/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "AGENTHUB_API_URL";

/// Expand `${VAR_NAME}` references using `lookup`.
/// Unknown variables are left as written.
fn expand_vars<F>(input: &str, lookup: &F) -> SdkResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| SdkError::config(format!("invalid expansion pattern: {}", e)))?;
    Ok(re
        .replace_all(input, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .to_string())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// =============================================================================
// API Endpoints
// =============================================================================

/// Service endpoints derived from one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// `<base>/api/x402/pay`
    pub pay_url: String,
    /// `<base>/api/iot/sensors`
    pub sensors_url: String,
    /// `<base>/api/iot/alerts`
    pub alerts_url: String,
}

impl ApiEndpoints {
    /// Derive all endpoints from `base_url`.
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim().trim_end_matches('/');
        Self {
            base_url: base.to_string(),
            pay_url: format!("{}{}", base, PAY_PATH),
            sensors_url: format!("{}{}", base, SENSORS_PATH),
            alerts_url: format!("{}{}", base, ALERTS_PATH),
        }
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::from_base_url(DEFAULT_BASE_API_URL)
    }
}

// =============================================================================
// Agent Config
// =============================================================================

/// Validated agent configuration.
///
/// Holds the identity, so constructing one is where a bad private key is
/// reported.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    agent_id: String,
    identity: Arc<Identity>,
    ledger: LedgerConfig,
    endpoints: ApiEndpoints,
    executor: ExecutorConfig,
}

impl AgentConfig {
    /// Create a configuration on Fuji with the local API base URL.
    ///
    /// # Errors
    /// `SdkError::Crypto` if the private key is malformed.
    pub fn new(agent_id: impl Into<String>, private_key: &str) -> SdkResult<Self> {
        let identity = Identity::from_private_key(private_key)?;

        Ok(Self {
            agent_id: agent_id.into(),
            identity: Arc::new(identity),
            ledger: LedgerConfig::fuji(),
            endpoints: ApiEndpoints::default(),
            executor: ExecutorConfig::default(),
        })
    }

    /// Switch to a network preset.
    ///
    /// Resets the RPC URL and registry to the preset, so apply overrides
    /// afterwards.
    pub fn with_network(mut self, network: LedgerNetwork) -> Self {
        let timeout = self.ledger.timeout;
        self.ledger = LedgerConfig::for_network(network).with_timeout(timeout);
        self
    }

    /// Override the RPC endpoint.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.ledger = self.ledger.with_rpc_url(rpc_url);
        self
    }

    /// Set the registry contract address.
    pub fn with_registry_address(mut self, address: impl Into<String>) -> Self {
        self.ledger = self.ledger.with_registry_address(address);
        self
    }

    /// Replace the whole ledger configuration.
    pub fn with_ledger_config(mut self, ledger: LedgerConfig) -> Self {
        self.ledger = ledger;
        self
    }

    /// Point all API endpoints at `base_url`.
    pub fn with_base_api_url(mut self, base_url: &str) -> Self {
        self.endpoints = ApiEndpoints::from_base_url(base_url);
        self
    }

    /// Override the request timeouts.
    pub fn with_executor_config(mut self, executor: ExecutorConfig) -> Self {
        self.executor = executor;
        self
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn identity(&self) -> &Arc<Identity> {
        &self.identity
    }

    pub fn ledger(&self) -> &LedgerConfig {
        &self.ledger
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    pub fn executor(&self) -> &ExecutorConfig {
        &self.executor
    }
}

// =============================================================================
// Agent Settings (file + environment)
// =============================================================================

/// Request timeouts, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    /// Paid request timeout.
    pub payment_secs: u64,
    /// Telemetry timeout.
    pub telemetry_secs: u64,
    /// Ledger RPC timeout.
    pub rpc_secs: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            payment_secs: DEFAULT_PAYMENT_TIMEOUT.as_secs(),
            telemetry_secs: DEFAULT_TELEMETRY_TIMEOUT.as_secs(),
            rpc_secs: DEFAULT_RPC_TIMEOUT.as_secs(),
        }
    }
}

/// Agent settings as written in a config file or the environment.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Opaque agent identifier.
    pub agent_id: String,
    /// Hex private key, with or without `0x`. Wiped on drop.
    pub private_key: Zeroizing<String>,
    /// Ledger network preset.
    pub network: LedgerNetwork,
    /// RPC endpoint override.
    pub rpc_url: Option<String>,
    /// Registry contract address override.
    pub registry_address: Option<String>,
    /// API base URL override.
    pub base_api_url: Option<String>,
    /// Request timeouts.
    pub timeouts: TimeoutSettings,
}

impl std::fmt::Debug for AgentSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSettings")
            .field("agent_id", &self.agent_id)
            .field("private_key", &"<redacted>")
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url)
            .field("registry_address", &self.registry_address)
            .field("base_api_url", &self.base_api_url)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl AgentSettings {
    /// Load settings from a TOML file.
    /// `${VAR}` references are expanded from the process environment.
    ///
    /// `AGENTHUB_*` overrides are not applied; use [`load_with_env`](Self::load_with_env)
    /// for file settings that the environment can override.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load settings from a TOML file, then apply `AGENTHUB_*` overrides
    /// from the process environment.
    pub fn load_with_env(path: &Path) -> SdkResult<Self> {
        Self::load_with(path, env_lookup)
    }

    /// Load settings from a TOML file, resolving `${VAR}` references and
    /// `AGENTHUB_*` overrides through `lookup`.
    pub fn load_with<F>(path: &Path, lookup: F) -> SdkResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let contents = std::fs::read_to_string(path)?;
        let mut settings = Self::from_toml_str_with(&contents, &lookup)?;
        settings.apply_overrides(&lookup)?;
        Ok(settings)
    }

    /// Parse settings from TOML, expanding `${VAR}` from the environment.
    pub fn from_toml_str(contents: &str) -> SdkResult<Self> {
        Self::from_toml_str_with(contents, env_lookup)
    }

    /// Parse settings from TOML, expanding `${VAR}` through `lookup`.
    pub fn from_toml_str_with<F>(contents: &str, lookup: F) -> SdkResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings: Self = toml::from_str(contents)?;
        settings.expand_vars(&lookup)?;
        Ok(settings)
    }

    /// Settings taken only from `AGENTHUB_*` environment variables.
    pub fn from_env() -> SdkResult<Self> {
        let mut settings = Self::default();
        settings.apply_overrides(env_lookup)?;
        Ok(settings)
    }

    /// Apply `AGENTHUB_*` overrides read through `lookup`.
    /// Unset and empty variables leave the current value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> SdkResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(agent_id) = get(ENV_AGENT_ID) {
            self.agent_id = agent_id;
        }
        if let Some(private_key) = get(ENV_PRIVATE_KEY) {
            self.private_key = Zeroizing::new(private_key);
        }
        if let Some(network) = get(ENV_NETWORK) {
            self.network = network
                .parse()
                .map_err(|e: agenthub_ledger::LedgerError| SdkError::config(e.to_string()))?;
        }
        if let Some(rpc_url) = get(ENV_RPC_URL) {
            self.rpc_url = Some(rpc_url);
        }
        if let Some(registry_address) = get(ENV_REGISTRY_ADDRESS) {
            self.registry_address = Some(registry_address);
        }
        if let Some(base_api_url) = get(ENV_API_URL) {
            self.base_api_url = Some(base_api_url);
        }
        Ok(())
    }

    fn expand_vars<F>(&mut self, lookup: &F) -> SdkResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.agent_id = expand_vars(&self.agent_id, lookup)?;
        self.private_key = Zeroizing::new(expand_vars(&self.private_key, lookup)?);
        for value in [
            &mut self.rpc_url,
            &mut self.registry_address,
            &mut self.base_api_url,
        ]
        .into_iter()
        .flatten()
        {
            *value = expand_vars(value, lookup)?;
        }
        Ok(())
    }

    /// Validate the settings.
    pub fn validate(&self) -> SdkResult<()> {
        let agent_id_len = self.agent_id.chars().count();
        if self.agent_id.trim().is_empty() || agent_id_len > MAX_AGENT_ID_LEN {
            return Err(SdkError::config(format!(
                "agent_id must be 1 to {} characters (got {})",
                MAX_AGENT_ID_LEN, agent_id_len
            )));
        }

        if self.private_key.trim().is_empty() {
            return Err(SdkError::config("private_key is required"));
        }

        let fields = [
            ("agent_id", Some(&self.agent_id)),
            ("private_key", Some(&*self.private_key)),
            ("rpc_url", self.rpc_url.as_ref()),
            ("registry_address", self.registry_address.as_ref()),
            ("base_api_url", self.base_api_url.as_ref()),
        ];
        for (name, value) in fields {
            if value.map(|v| v.contains("${")).unwrap_or(false) {
                return Err(SdkError::config(format!(
                    "{} references an unset environment variable",
                    name
                )));
            }
        }

        if self.timeouts.payment_secs == 0
            || self.timeouts.telemetry_secs == 0
            || self.timeouts.rpc_secs == 0
        {
            return Err(SdkError::config("timeouts must be non-zero"));
        }

        Ok(())
    }

    /// Validate and convert into an [`AgentConfig`].
    pub fn into_config(self) -> SdkResult<AgentConfig> {
        self.validate()?;

        let mut ledger = LedgerConfig::for_network(self.network)
            .with_timeout(Duration::from_secs(self.timeouts.rpc_secs));
        if let Some(rpc_url) = self.rpc_url {
            ledger = ledger.with_rpc_url(rpc_url);
        }
        if let Some(registry_address) = self.registry_address {
            ledger = ledger.with_registry_address(registry_address);
        }

        let executor = ExecutorConfig::default()
            .with_payment_timeout(Duration::from_secs(self.timeouts.payment_secs))
            .with_telemetry_timeout(Duration::from_secs(self.timeouts.telemetry_secs));

        let mut config = AgentConfig::new(self.agent_id, &self.private_key)?
            .with_ledger_config(ledger)
            .with_executor_config(executor);
        if let Some(base_api_url) = self.base_api_url {
            config = config.with_base_api_url(&base_api_url);
        }
        Ok(config)
    }
}
