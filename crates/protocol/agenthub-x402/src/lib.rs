//! x402 pay-per-request protocol for AgentHub devices.
//!
//! An agent pays for each request by attaching a signed, single-use claim
//! to it. This crate covers the whole client side of that exchange:
//!
//! - **Claims**: [`PaymentClaim::build`] signs
//!   `resource_url || amount || timestamp` with the agent [`Identity`](agenthub_crypto::Identity)
//! - **Envelope**: [`encode_header`], [`encode_body`] and [`decode_response`]
//! - **Executor**: [`X402Client`] sends paid requests and telemetry and
//!   reports every outcome as a [`RequestResult`]
//!
//! # Protocol Flow
//!
//! 1. Agent builds a claim with a fresh millisecond timestamp
//! 2. Claim is serialized into the `x-payment` header
//! 3. Service verifies the signature and timestamp freshness
//! 4. Service answers 200 (success) or another status such as 402 (rejected)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use agenthub_crypto::Identity;
//! use agenthub_x402::{ExecutorConfig, PaymentOptions, X402Client};
//! use serde_json::json;
//!
//! # async fn run() {
//! let identity = Identity::from_private_key(
//!     "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
//! ).unwrap();
//! let client = X402Client::new(Arc::new(identity), "motion-detector-001", ExecutorConfig::default())
//!     .unwrap();
//!
//! let result = client
//!     .pay_and_request(
//!         "http://localhost:3000/api/iot/alerts",
//!         "0.0001",
//!         Some(&json!({"motion": true})),
//!         &PaymentOptions::default(),
//!     )
//!     .await;
//! println!("{}", result.to_json());
//! # }
//! ```

mod claim;
mod client;
mod codec;
mod error;
mod result;
mod types;

pub use claim::canonical_message;
pub use client::{ExecutorConfig, X402Client};
pub use codec::{decode_response, encode_body, encode_header, EMPTY_BODY};
pub use error::{X402Error, X402Result};
pub use result::{FailureKind, HttpResponse, Payload, RequestFailure, RequestResult, ResponseHeaders};
pub use types::{
    tier_price, PaymentClaim, PaymentOptions, CONTENT_TYPE_JSON, DEFAULT_PAYMENT_TIMEOUT,
    DEFAULT_TELEMETRY_TIMEOUT, DEFAULT_TOKEN, HEADER_AGENT_ID, HEADER_PAYMENT, TIER_BASIC,
    TIER_PREMIUM,
};
