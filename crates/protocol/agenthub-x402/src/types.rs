//! x402 claim types and protocol constants.
//!
//! The claim shape and header names are fixed by the AgentHub service; field
//! names on the wire are camelCase and the timestamp is serialized as
//! `timestamp` (integer milliseconds since the Unix epoch).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP header carrying the JSON-encoded payment claim (client → server).
pub const HEADER_PAYMENT: &str = "x-payment";

/// HTTP header identifying the agent on unpaid telemetry requests.
pub const HEADER_AGENT_ID: &str = "X-Agent-ID";

/// Content type of every request body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Default payment token.
pub const DEFAULT_TOKEN: &str = "USDC";

/// Basic service tier (the default).
pub const TIER_BASIC: &str = "basic";

/// Premium service tier.
pub const TIER_PREMIUM: &str = "premium";

/// Timeout for a paid request.
pub const DEFAULT_PAYMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for a telemetry push.
pub const DEFAULT_TELEMETRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Reference USDC price of a service tier, as published by the AgentHub
/// service. Unknown tiers have no reference price.
pub fn tier_price(tier: &str) -> Option<&'static str> {
    match tier {
        TIER_BASIC => Some("0.01"),
        TIER_PREMIUM => Some("0.15"),
        _ => None,
    }
}

// =============================================================================
// Payment Claim (Client → Server)
// =============================================================================

/// A signed, single-use payment claim sent in the `x-payment` header.
///
/// Built fresh for every request by [`PaymentClaim::build`](crate::PaymentClaim::build).
/// The signature covers the canonical message
/// `resource_url || amount || timestamp` only; `token`, `tier` and
/// `agent_id` travel unsigned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentClaim {
    /// URL of the resource being paid for.
    pub resource_url: String,

    /// Amount as a decimal string (e.g. "0.0001").
    pub amount: String,

    /// Payment token (e.g. "USDC").
    pub token: String,

    /// Service tier (e.g. "basic").
    pub tier: String,

    /// Claim creation time, milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,

    /// EIP-191 signature over the canonical message (hex).
    pub signature: String,

    /// Caller-supplied agent identifier.
    pub agent_id: String,
}

/// Token and tier for a paid request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOptions {
    /// Payment token.
    pub token: String,
    /// Service tier.
    pub tier: String,
}

impl Default for PaymentOptions {
    fn default() -> Self {
        Self {
            token: DEFAULT_TOKEN.to_string(),
            tier: TIER_BASIC.to_string(),
        }
    }
}

impl PaymentOptions {
    /// Options for the premium tier, paid in the default token.
    pub fn premium() -> Self {
        Self {
            tier: TIER_PREMIUM.to_string(),
            ..Self::default()
        }
    }

    /// Override the payment token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Override the service tier.
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = tier.into();
        self
    }

    /// Reference price of the selected tier, if the tier is known.
    pub fn reference_price(&self) -> Option<&'static str> {
        tier_price(&self.tier)
    }
}
