//! Request executor.
//!
//! [`X402Client`] performs the two network operations an agent needs:
//! a paid request carrying a fresh signed claim, and an unpaid telemetry
//! push identified only by the agent id. Neither ever returns an error;
//! every outcome is a [`RequestResult`].

use std::sync::Arc;
use std::time::Duration;

use agenthub_crypto::Identity;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::codec::{decode_response, encode_body, encode_header};
use crate::error::{X402Error, X402Result};
use crate::result::{RequestResult, ResponseHeaders};
use crate::types::{
    PaymentClaim, PaymentOptions, CONTENT_TYPE_JSON, DEFAULT_PAYMENT_TIMEOUT,
    DEFAULT_TELEMETRY_TIMEOUT, HEADER_AGENT_ID, HEADER_PAYMENT,
};

/// Per-operation timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Timeout for a paid request.
    pub payment_timeout: Duration,
    /// Timeout for a telemetry push.
    pub telemetry_timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            payment_timeout: DEFAULT_PAYMENT_TIMEOUT,
            telemetry_timeout: DEFAULT_TELEMETRY_TIMEOUT,
        }
    }
}

impl ExecutorConfig {
    /// Override the paid-request timeout.
    pub fn with_payment_timeout(mut self, timeout: Duration) -> Self {
        self.payment_timeout = timeout;
        self
    }

    /// Override the telemetry timeout.
    pub fn with_telemetry_timeout(mut self, timeout: Duration) -> Self {
        self.telemetry_timeout = timeout;
        self
    }
}

/// HTTP executor for paid requests and telemetry.
///
/// Cheap to clone; clones share the connection pool and identity.
#[derive(Clone)]
pub struct X402Client {
    http: Client,
    identity: Arc<Identity>,
    agent_id: String,
    config: ExecutorConfig,
}

impl X402Client {
    /// Create an executor for one agent.
    pub fn new(
        identity: Arc<Identity>,
        agent_id: impl Into<String>,
        config: ExecutorConfig,
    ) -> X402Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| X402Error::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            identity,
            agent_id: agent_id.into(),
            config,
        })
    }

    /// The agent id sent with every request.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// The signing identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Configured timeouts.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Send a paid request to `url`.
    ///
    /// A new claim is built and signed for every call. The request is a
    /// single POST with the claim in the `x-payment` header and `data` (or
    /// `{}`) as the JSON body. It is never retried.
    pub async fn pay_and_request(
        &self,
        url: &str,
        amount: &str,
        data: Option<&Value>,
        options: &PaymentOptions,
    ) -> RequestResult {
        debug!(url = %url, amount = %amount, tier = %options.tier, "Sending paid request");

        let result = match self.paid_request(url, amount, data, options) {
            Ok(request) => self.execute(request).await,
            Err(e) => Err(e),
        };
        self.finish("paid request", url, result)
    }

    /// Push unpaid telemetry to `endpoint`.
    ///
    /// The agent is identified by the `X-Agent-ID` header; no claim is built.
    pub async fn send_telemetry(&self, endpoint: &str, data: &Value) -> RequestResult {
        debug!(endpoint = %endpoint, "Sending telemetry");

        let result = match self.telemetry_request(endpoint, data) {
            Ok(request) => self.execute(request).await,
            Err(e) => Err(e),
        };
        self.finish("telemetry", endpoint, result)
    }

    fn paid_request(
        &self,
        url: &str,
        amount: &str,
        data: Option<&Value>,
        options: &PaymentOptions,
    ) -> X402Result<RequestBuilder> {
        let claim = PaymentClaim::build(url, amount, options, &self.agent_id, &self.identity)?;
        let header = header_value(&encode_header(&claim)?)?;
        let body = encode_body(data)?;

        Ok(self
            .http
            .post(url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(HEADER_PAYMENT, header)
            .body(body)
            .timeout(self.config.payment_timeout))
    }

    fn telemetry_request(&self, endpoint: &str, data: &Value) -> X402Result<RequestBuilder> {
        let agent_id = header_value(&self.agent_id)?;
        let body = encode_body(Some(data))?;

        Ok(self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(HEADER_AGENT_ID, agent_id)
            .body(body)
            .timeout(self.config.telemetry_timeout))
    }

    async fn execute(&self, request: RequestBuilder) -> X402Result<RequestResult> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let raw_body = response.text().await?;

        Ok(decode_response(status, headers, raw_body))
    }

    fn finish(&self, operation: &str, url: &str, result: X402Result<RequestResult>) -> RequestResult {
        match result {
            Ok(result) => {
                match result.status_code() {
                    Some(200) => info!(url = %url, agent_id = %self.agent_id, "{} succeeded", operation),
                    Some(status) => warn!(url = %url, status, "{} rejected", operation),
                    None => {}
                }
                result
            }
            Err(e) => {
                warn!(
                    url = %url,
                    error = %e,
                    suggestion = e.suggestion(),
                    "{} failed",
                    operation
                );
                RequestResult::Failed(e.into())
            }
        }
    }
}

impl std::fmt::Debug for X402Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("X402Client")
            .field("agent_id", &self.agent_id)
            .field("address", &self.identity.address())
            .field("config", &self.config)
            .finish()
    }
}

/// Convert a string into a header value; only visible ASCII is allowed.
fn header_value(value: &str) -> X402Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| X402Error::Encoding(format!("invalid header value: {}", e)))
}

/// Copy response headers, joining repeated names with ", ".
fn collect_headers(headers: &HeaderMap) -> ResponseHeaders {
    let mut collected = ResponseHeaders::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}
