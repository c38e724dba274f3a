//! AgentHub IoT agent SDK.
//!
//! Lets a device pay for each request it makes to an AgentHub service with
//! a signed x402 claim instead of an API key, push telemetry, and register
//! itself on the ledger with a one-time stake.
//!
//! # Example
//!
//! ```no_run
//! use agenthub_iot::{Agent, AgentSettings};
//! use serde_json::json;
//!
//! # async fn run() -> agenthub_iot::SdkResult<()> {
//! agenthub_iot::init_logging(agenthub_iot::DEFAULT_LOG_FILTER)?;
//!
//! let config = AgentSettings::from_env()?.into_config()?;
//! let agent = Agent::new(config)?;
//!
//! let result = agent.send_alert("0.0001", Some(&json!({"motion": true}))).await;
//! if !result.is_success() {
//!     eprintln!("alert not accepted: {}", result.to_json());
//! }
//!
//! agent.send_sensor_data(&json!({"temperature": 21.5})).await;
//! # Ok(())
//! # }
//! ```

mod agent;
pub mod config;
mod error;
pub mod logging;

pub use agent::{Agent, StakeOutcome};
pub use config::{AgentConfig, AgentSettings, ApiEndpoints, TimeoutSettings, DEFAULT_BASE_API_URL};
pub use error::{SdkError, SdkResult};
pub use logging::{init_logging, DEFAULT_LOG_FILTER};

// Re-exports so devices depend on one crate
pub use agenthub_crypto::Identity;
pub use agenthub_ledger::{Ledger, LedgerConfig, LedgerNetwork};
pub use agenthub_x402::{
    ExecutorConfig, FailureKind, Payload, PaymentOptions, RequestResult, TIER_BASIC, TIER_PREMIUM,
};
