//! RpcLedger tests against a mock JSON-RPC endpoint.

use std::sync::Arc;

use agenthub_ledger::{
    agent_id_hash, Ledger, LedgerConfig, LedgerError, LedgerResult, RegistrationCall,
    RegistrationEncoder, RpcClient, RpcLedger, DEFAULT_RPC_TIMEOUT,
};
use agenthub_test_utils::{
    test_identity, unreachable_url, MockResponse, MockServer, RecordedRequest, TEST_ADDRESS,
    TEST_AGENT_ID,
};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, NameOrAddress, U256};
use ethers::utils::rlp::Rlp;
use serde_json::{json, Value};

const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";
const SELECTOR: [u8; 4] = [0x4a, 0x1f, 0x0b, 0x8e];

/// Encodes `selector || agent_id_hash`; enough to check the calldata path.
struct SelectorEncoder;

impl RegistrationEncoder for SelectorEncoder {
    fn encode_register(&self, call: &RegistrationCall) -> LedgerResult<Bytes> {
        let mut data = SELECTOR.to_vec();
        data.extend_from_slice(call.agent_id_hash.as_bytes());
        Ok(Bytes::from(data))
    }
}

fn rpc_method(request: &RecordedRequest) -> String {
    request
        .json()
        .and_then(|body| body["method"].as_str().map(str::to_string))
        .unwrap_or_default()
}

fn rpc_result(result: Value) -> MockResponse {
    MockResponse::json(200, &json!({"jsonrpc": "2.0", "id": 1, "result": result}))
}

fn fuji_node(request: &RecordedRequest) -> MockResponse {
    match rpc_method(request).as_str() {
        "eth_chainId" => rpc_result(json!("0xa869")),
        "eth_getTransactionCount" => rpc_result(json!("0x7")),
        "eth_gasPrice" => rpc_result(json!("0x5d21dba00")),
        "eth_sendRawTransaction" => rpc_result(json!(TX_HASH)),
        _ => MockResponse::json(
            200,
            &json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32601, "message": "method not found"}}),
        ),
    }
}

fn ledger_for(server: &MockServer) -> RpcLedger {
    RpcLedger::new(LedgerConfig::fuji().with_rpc_url(server.base_url()))
        .unwrap()
        .with_encoder(Arc::new(SelectorEncoder))
}

fn broadcast_raw(server: &MockServer) -> Vec<u8> {
    let request = server
        .requests()
        .into_iter()
        .find(|r| rpc_method(r) == "eth_sendRawTransaction")
        .expect("no eth_sendRawTransaction call");
    let body = request.json().unwrap();
    let raw = body["params"][0].as_str().unwrap();
    hex::decode(raw.trim_start_matches("0x")).unwrap()
}

#[tokio::test]
async fn test_stake_broadcasts_signed_transaction() {
    let server = MockServer::start_with(fuji_node).await;
    let ledger = ledger_for(&server);
    let identity = test_identity();

    let tx_hash = ledger
        .stake(&identity, TEST_AGENT_ID, "ipfs://agent-metadata", "1.5")
        .await
        .unwrap();
    assert_eq!(tx_hash, TX_HASH);

    let raw = broadcast_raw(&server);
    let (tx, signature) = TypedTransaction::decode_signed(&Rlp::new(&raw)).unwrap();

    let signer = signature.recover(tx.sighash()).unwrap();
    assert_eq!(signer, identity.raw_address());
    assert_eq!(ethers::utils::to_checksum(&signer, None), TEST_ADDRESS);

    let registry: Address = "0x6750Ed798186b4B5a7441D0f46Dd36F372441306".parse().unwrap();
    assert_eq!(tx.to(), Some(&NameOrAddress::Address(registry)));
    assert_eq!(tx.value(), Some(&(U256::from(15u64) * U256::exp10(17))));
    assert_eq!(tx.nonce(), Some(&U256::from(7u64)));
    assert_eq!(tx.gas(), Some(&U256::from(200_000u64)));
    assert_eq!(tx.chain_id(), Some(43113u64.into()));

    let data = tx.data().unwrap();
    assert_eq!(&data[..4], &SELECTOR);
    assert_eq!(&data[4..], agent_id_hash(TEST_AGENT_ID).unwrap().as_bytes());
}

#[tokio::test]
async fn test_stake_queries_pending_nonce_for_agent() {
    let server = MockServer::start_with(fuji_node).await;
    ledger_for(&server)
        .stake(&test_identity(), TEST_AGENT_ID, "ipfs://meta", "1.0")
        .await
        .unwrap();

    let request = server
        .requests()
        .into_iter()
        .find(|r| rpc_method(r) == "eth_getTransactionCount")
        .unwrap();
    let body = request.json().unwrap();
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);
    assert_eq!(
        body["params"][0].as_str().unwrap(),
        TEST_ADDRESS.to_lowercase()
    );
    assert_eq!(body["params"][1], "pending");
}

#[tokio::test]
async fn test_stake_without_registry() {
    let server = MockServer::start_with(fuji_node).await;
    let ledger = RpcLedger::new(LedgerConfig::mainnet().with_rpc_url(server.base_url()))
        .unwrap()
        .with_encoder(Arc::new(SelectorEncoder));

    let err = ledger
        .stake(&test_identity(), TEST_AGENT_ID, "ipfs://meta", "1.0")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::NotConfigured(_)));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_stake_without_encoder() {
    let server = MockServer::start_with(fuji_node).await;
    let ledger = RpcLedger::new(LedgerConfig::fuji().with_rpc_url(server.base_url())).unwrap();

    let err = ledger
        .stake(&test_identity(), TEST_AGENT_ID, "ipfs://meta", "1.0")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::CallEncodingUnavailable));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_stake_below_minimum() {
    let server = MockServer::start_with(fuji_node).await;

    let err = ledger_for(&server)
        .stake(&test_identity(), TEST_AGENT_ID, "ipfs://meta", "0.5")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_stake_rpc_rejection() {
    let server = MockServer::start_with(|request: &RecordedRequest| {
        if rpc_method(request) == "eth_sendRawTransaction" {
            MockResponse::json(
                200,
                &json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32000, "message": "insufficient funds for gas * price + value"}}),
            )
        } else {
            fuji_node(request)
        }
    })
    .await;

    let err = ledger_for(&server)
        .stake(&test_identity(), TEST_AGENT_ID, "ipfs://meta", "1.0")
        .await
        .unwrap_err();

    match err {
        LedgerError::Rpc { code, message } => {
            assert_eq!(code, -32000);
            assert!(message.contains("insufficient funds"));
        }
        other => panic!("expected Rpc error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stake_unreachable_node() {
    let config = LedgerConfig::fuji().with_rpc_url(unreachable_url(""));
    let ledger = RpcLedger::new(config)
        .unwrap()
        .with_encoder(Arc::new(SelectorEncoder));

    let err = ledger
        .stake(&test_identity(), TEST_AGENT_ID, "ipfs://meta", "1.0")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Network(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_rpc_client_helpers() {
    let server = MockServer::start_with(fuji_node).await;
    let rpc = RpcClient::new(&server.base_url(), DEFAULT_RPC_TIMEOUT).unwrap();

    assert_eq!(rpc.chain_id().await.unwrap(), 43113);
    assert_eq!(rpc.gas_price().await.unwrap(), U256::from(25_000_000_000u64));
    assert_eq!(
        rpc.transaction_count(test_identity().raw_address())
            .await
            .unwrap(),
        U256::from(7u64)
    );
    assert_eq!(
        rpc.send_raw_transaction(&Bytes::from(vec![0x01, 0x02]))
            .await
            .unwrap(),
        TX_HASH
    );

    let err = rpc.call::<String>("eth_unknown", json!([])).await.unwrap_err();
    assert!(matches!(err, LedgerError::Rpc { code: -32601, .. }));
}

#[tokio::test]
async fn test_rpc_http_error_without_json() {
    let server = MockServer::start(MockResponse::text(503, "upstream unavailable")).await;
    let rpc = RpcClient::new(&server.base_url(), DEFAULT_RPC_TIMEOUT).unwrap();

    let err = rpc.chain_id().await.unwrap_err();
    assert!(matches!(err, LedgerError::Network(_)));
}

#[tokio::test]
async fn test_fixed_gas_price_skips_query() {
    let server = MockServer::start_with(fuji_node).await;
    let config = LedgerConfig::fuji()
        .with_rpc_url(server.base_url())
        .with_gas_price(U256::from(30_000_000_000u64));
    let ledger = RpcLedger::new(config)
        .unwrap()
        .with_encoder(Arc::new(SelectorEncoder));

    ledger
        .stake(&test_identity(), TEST_AGENT_ID, "ipfs://meta", "1.0")
        .await
        .unwrap();

    assert!(server
        .requests()
        .iter()
        .all(|r| rpc_method(r) != "eth_gasPrice"));
    let raw = broadcast_raw(&server);
    let (tx, _) = TypedTransaction::decode_signed(&Rlp::new(&raw)).unwrap();
    assert_eq!(tx.gas_price(), Some(U256::from(30_000_000_000u64)));
}
