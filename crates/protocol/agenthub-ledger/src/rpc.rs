//! Minimal EVM JSON-RPC 2.0 client.
//!
//! Requests are `{"jsonrpc":"2.0","method":...,"params":[...],"id":1}`
//! sent as a single HTTP POST. Node-side failures arrive as an `error`
//! object and surface as [`LedgerError::Rpc`].

use std::time::Duration;

use ethers::types::{Address, Bytes, U256};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC client for a single endpoint.
#[derive(Clone)]
pub struct RpcClient {
    http: Client,
    url: String,
}

impl RpcClient {
    /// Create a client for `url`.
    pub fn new(url: &str, timeout: Duration) -> LedgerResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Invoke `method` with `params` and decode the `result` field.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> LedgerResult<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };
        debug!(url = %self.url, method, "RPC call");

        let response = self.http.post(&self.url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<RpcResponse<T>>(&body) {
            Ok(RpcResponse {
                error: Some(error), ..
            }) => Err(LedgerError::rpc(error.code, error.message)),
            Ok(RpcResponse {
                result: Some(result),
                ..
            }) => Ok(result),
            Ok(_) => Err(LedgerError::internal(format!(
                "{} returned neither result nor error",
                method
            ))),
            Err(_) if !status.is_success() => Err(LedgerError::network(format!(
                "RPC endpoint returned {}: {}",
                status, body
            ))),
            Err(e) => Err(LedgerError::internal(format!(
                "invalid {} response: {}",
                method, e
            ))),
        }
    }

    /// `eth_chainId`
    pub async fn chain_id(&self) -> LedgerResult<u64> {
        let quantity: String = self.call("eth_chainId", json!([])).await?;
        let digits = strip_hex_prefix(&quantity);
        u64::from_str_radix(digits, 16)
            .map_err(|e| LedgerError::internal(format!("invalid chain id '{}': {}", quantity, e)))
    }

    /// `eth_getTransactionCount` at the pending block.
    pub async fn transaction_count(&self, address: Address) -> LedgerResult<U256> {
        let address = format!("0x{}", hex::encode(address.as_bytes()));
        let quantity: String = self
            .call("eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        parse_quantity(&quantity)
    }

    /// `eth_gasPrice`
    pub async fn gas_price(&self) -> LedgerResult<U256> {
        let quantity: String = self.call("eth_gasPrice", json!([])).await?;
        parse_quantity(&quantity)
    }

    /// `eth_sendRawTransaction`, returning the transaction hash.
    pub async fn send_raw_transaction(&self, raw: &Bytes) -> LedgerResult<String> {
        let encoded = format!("0x{}", hex::encode(raw.as_ref()));
        self.call("eth_sendRawTransaction", json!([encoded])).await
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient").field("url", &self.url).finish()
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parse a JSON-RPC hex quantity such as `"0x1a"`.
pub fn parse_quantity(quantity: &str) -> LedgerResult<U256> {
    let digits = strip_hex_prefix(quantity.trim());
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| LedgerError::internal(format!("invalid quantity '{}': {}", quantity, e)))
}
