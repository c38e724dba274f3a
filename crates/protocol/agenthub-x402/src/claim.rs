//! Payment claim construction.
//!
//! A claim is signed over the canonical message
//! ```text
//! resource_url || amount || timestamp_millis
//! ```
//! with no separators and the timestamp in base 10. The reference server
//! rebuilds exactly this string, so reordering the parts or inserting a
//! delimiter produces signatures it rejects.
//!
//! The signed message does not include the agent id or a nonce, so the
//! signature does not bind a claim to the agent it names. Replay protection
//! relies on the server checking timestamp freshness.

use agenthub_crypto::{recover_signer, Identity};
use chrono::Utc;

use crate::error::X402Result;
use crate::types::{PaymentClaim, PaymentOptions};

/// Build the exact byte string that is signed for a claim.
///
/// # Example
/// ```
/// use agenthub_x402::canonical_message;
///
/// assert_eq!(
///     canonical_message("https://svc/alerts", "0.0001", 1700000000000),
///     "https://svc/alerts0.00011700000000000"
/// );
/// ```
pub fn canonical_message(resource_url: &str, amount: &str, timestamp_millis: i64) -> String {
    format!("{}{}{}", resource_url, amount, timestamp_millis)
}

impl PaymentClaim {
    /// Build and sign a claim stamped with the current wall-clock time.
    ///
    /// The timestamp is read here, so every call (including a caller's
    /// retry) gets a fresh one.
    pub fn build(
        resource_url: &str,
        amount: &str,
        options: &PaymentOptions,
        agent_id: &str,
        identity: &Identity,
    ) -> X402Result<Self> {
        let now = Utc::now().timestamp_millis();
        Self::build_at(resource_url, amount, options, agent_id, identity, now)
    }

    /// Build and sign a claim with an explicit timestamp.
    ///
    /// # Errors
    /// `X402Error::Signing` if the identity fails to sign.
    pub fn build_at(
        resource_url: &str,
        amount: &str,
        options: &PaymentOptions,
        agent_id: &str,
        identity: &Identity,
        timestamp_millis: i64,
    ) -> X402Result<Self> {
        let message = canonical_message(resource_url, amount, timestamp_millis);
        let signature = identity.sign(message.as_bytes())?;

        Ok(Self {
            resource_url: resource_url.to_string(),
            amount: amount.to_string(),
            token: options.token.clone(),
            tier: options.tier.clone(),
            timestamp_millis,
            signature,
            agent_id: agent_id.to_string(),
        })
    }

    /// The canonical message this claim's signature covers.
    pub fn canonical_message(&self) -> String {
        canonical_message(&self.resource_url, &self.amount, self.timestamp_millis)
    }

    /// Recover the checksummed address that signed this claim.
    pub fn recover_signer(&self) -> X402Result<String> {
        Ok(recover_signer(
            self.canonical_message().as_bytes(),
            &self.signature,
        )?)
    }
}
