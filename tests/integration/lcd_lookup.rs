//! LCD lookup end to end
//!
//! Runs `Session::lookup` against a wiremock server that answers like a
//! Secret Network LCD node.

use anyhow::Result;
use prost::Message;
use secret_tx_decoder::config::AppConfig;
use secret_tx_decoder::errors::{AppError, RpcError};
use secret_tx_decoder::rpc::proto::{Any, TxMsgData};
use secret_tx_decoder::rpc::{LcdClient, NetworkClient};
use secret_tx_decoder::session::Session;
use secret_tx_decoder::types::{Network, EXECUTE_CONTRACT_TYPE_URL};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{response_envelope, TEST_TX_HASH};

const COUNTER: &str = "secret1counter000000000000000000000000000000";

fn tx_path() -> String {
    format!("/cosmos/tx/v1beta1/txs/{}", TEST_TX_HASH)
}

fn contract_path() -> String {
    format!("/compute/v1beta1/info/{}", COUNTER)
}

fn execute_body(msg: Value) -> Value {
    json!({
        "@type": EXECUTE_CONTRACT_TYPE_URL,
        "sender": "secret1sender000000000000000000000000000000",
        "contract": COUNTER,
        "msg": msg,
        "callback_code_hash": "",
        "sent_funds": [{"denom": "uscrt", "amount": "1000"}],
        "callback_sig": null
    })
}

/// Hex `TxMsgData` with one response envelope per JSON body
fn result_data(responses: &[&str]) -> String {
    let data = TxMsgData {
        data: Vec::new(),
        msg_responses: responses
            .iter()
            .map(|body| Any {
                type_url: "/secret.compute.v1beta1.MsgExecuteContractResponse".to_string(),
                value: response_envelope(body.as_bytes()),
            })
            .collect(),
    };
    hex::encode_upper(data.encode_to_vec())
}

fn message_event(msg_index: Option<usize>) -> Value {
    let mut attributes = vec![
        json!({"key": "action", "value": "/secret.compute.v1beta1.MsgExecuteContract"}),
        json!({"key": "contract_address", "value": COUNTER}),
    ];
    if let Some(index) = msg_index {
        attributes.push(json!({"key": "msg_index", "value": index.to_string()}));
    }
    json!({"type": "message", "attributes": attributes})
}

fn tx_response(messages: Vec<Value>, code: u32, logs: Value, events: Value, data: String) -> Value {
    json!({
        "tx": {"body": {"messages": messages, "memo": ""}},
        "tx_response": {
            "height": "12345678",
            "txhash": TEST_TX_HASH,
            "codespace": if code == 0 { "" } else { "compute" },
            "code": code,
            "data": data,
            "raw_log": if code == 0 { "" } else { "failed to execute message; message index: 0" },
            "logs": logs,
            "gas_wanted": "200000",
            "gas_used": "150000",
            "timestamp": "2024-03-01T12:00:00Z",
            "events": events
        }
    })
}

fn contract_info_body() -> Value {
    json!({
        "contract_address": COUNTER,
        "contract_info": {
            "code_id": "7",
            "creator": "secret1creator0000000000000000000000000000",
            "label": "counter",
            "created": {"block_height": "100", "tx_index": "0"}
        }
    })
}

fn session_for(server: &MockServer) -> Session {
    let mut config = AppConfig::default();
    config.mainnet.lcd_url = server.uri();
    config.rpc.initial_backoff_ms = 10;
    config.rpc.max_backoff_seconds = 1;
    config.rpc.timeout_seconds = 5;
    Session::new(config)
}

#[tokio::test]
async fn test_lookup_decodes_response_data() -> Result<()> {
    let server = MockServer::start().await;

    let body = tx_response(
        vec![execute_body(json!({"increment": {}}))],
        0,
        json!([{"msg_index": 0, "log": "", "events": [message_event(None)]}]),
        json!([]),
        result_data(&[r#"{"count":5}"#]),
    );
    Mock::given(method("GET"))
        .and(path(tx_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(contract_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract_info_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let lookup = session
        .lookup(Network::Mainnet, &TEST_TX_HASH.to_lowercase())
        .await?;
    let messages = lookup.messages?;

    assert_eq!(lookup.transaction.height, 12_345_678);
    assert_eq!(lookup.transaction.gas_used, 150_000);
    assert!(lookup.transaction.timestamp.is_some());
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].contract(), Some(COUNTER));
    assert_eq!(messages[0].label(), Some("counter"));
    assert_eq!(messages[0].contract_info().map(|info| info.code_id), Some(7));
    assert_eq!(messages[0].data_response(), Some(&json!({"count": 5})));
    assert_eq!(messages[0].sent_funds, json!([{"denom": "uscrt", "amount": "1000"}]));
    Ok(())
}

#[tokio::test]
async fn test_contract_address_from_indexed_events() -> Result<()> {
    let server = MockServer::start().await;

    // Newer nodes leave `logs` empty and tag events with msg_index instead
    let body = tx_response(
        vec![execute_body(json!("Aq8cZW5jcnlwdGVkIHBheWxvYWQ="))],
        0,
        json!([]),
        json!([
            {"type": "tx", "attributes": [{"key": "fee", "value": "5000uscrt"}]},
            message_event(Some(0))
        ]),
        String::new(),
    );
    Mock::given(method("GET"))
        .and(path(tx_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(contract_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract_info_body()))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let messages = session.lookup(Network::Mainnet, TEST_TX_HASH).await?.messages?;

    assert!(!messages[0].is_decrypted);
    assert_eq!(messages[0].contract(), Some(COUNTER));
    assert!(messages[0].data_response().is_none());
    Ok(())
}

#[tokio::test]
async fn test_failed_transaction_skips_contract_query() -> Result<()> {
    let server = MockServer::start().await;

    let body = tx_response(
        vec![execute_body(json!({"increment": {}}))],
        5,
        json!([]),
        json!([]),
        String::new(),
    );
    Mock::given(method("GET"))
        .and(path(tx_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(contract_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract_info_body()))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let lookup = session.lookup(Network::Mainnet, TEST_TX_HASH).await?;

    assert_eq!(lookup.transaction.code, 5);
    assert!(lookup.transaction.json_log.is_none());
    assert!(lookup.messages?[0].execution.is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_transaction_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(tx_path()))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 5,
            "message": format!("tx not found: {}", TEST_TX_HASH),
            "details": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let result = session.lookup(Network::Mainnet, TEST_TX_HASH).await;

    assert!(matches!(
        result,
        Err(AppError::Rpc(RpcError::TransactionNotFound { .. }))
    ));
}

#[tokio::test]
async fn test_server_errors_are_retried() -> Result<()> {
    let server = MockServer::start().await;

    let body = tx_response(
        vec![execute_body(json!({"increment": {}}))],
        5,
        json!([]),
        json!([]),
        String::new(),
    );
    Mock::given(method("GET"))
        .and(path(tx_path()))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(tx_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let lookup = session.lookup(Network::Mainnet, TEST_TX_HASH).await?;

    assert_eq!(lookup.transaction.hash, TEST_TX_HASH);
    Ok(())
}

#[tokio::test]
async fn test_retries_give_up_after_max_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(tx_path()))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let result = session.lookup(Network::Mainnet, TEST_TX_HASH).await;

    assert!(matches!(
        result,
        Err(AppError::Rpc(RpcError::MaxRetriesExceeded { .. }))
    ));
}

#[tokio::test]
async fn test_contract_info_is_cached_per_client() -> Result<()> {
    let server = MockServer::start().await;

    let body = tx_response(
        vec![
            execute_body(json!({"increment": {}})),
            execute_body(json!({"increment": {}})),
        ],
        0,
        json!([
            {"msg_index": 0, "log": "", "events": [message_event(None)]},
            {"msg_index": 1, "log": "", "events": [message_event(None)]}
        ]),
        json!([]),
        result_data(&[r#"{"count":1}"#, r#"{"count":2}"#]),
    );
    Mock::given(method("GET"))
        .and(path(tx_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(contract_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(contract_info_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let first = session.lookup(Network::Mainnet, TEST_TX_HASH).await?.messages?;
    let second = session.lookup(Network::Mainnet, TEST_TX_HASH).await?.messages?;

    assert_eq!(first, second);
    assert_eq!(first[1].data_response(), Some(&json!({"count": 2})));
    Ok(())
}

#[tokio::test]
async fn test_contract_query_rejection() {
    let server = MockServer::start().await;

    let client = LcdClient::new(
        &secret_tx_decoder::config::NetworkConfig {
            chain_id: "secret-4".to_string(),
            lcd_url: server.uri(),
        },
        AppConfig::default().rpc,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path(contract_path()))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid address"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.query_contract_info(COUNTER).await;

    assert!(matches!(
        result,
        Err(RpcError::ContractQueryFailed { ref message, .. }) if message == "invalid address"
    ));
    assert_eq!(client.get_error_count(), 1);
}

#[tokio::test]
async fn test_connection_reports_chain_id() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cosmos/base/tendermint/v1beta1/node_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "default_node_info": {
                "network": "secret-4",
                "moniker": "test-node",
                "version": "0.38.6"
            },
            "application_version": {"name": "SecretNetwork"}
        })))
        .mount(&server)
        .await;

    let client = LcdClient::new(
        &secret_tx_decoder::config::NetworkConfig {
            chain_id: "secret-4".to_string(),
            lcd_url: format!("{}/", server.uri()),
        },
        AppConfig::default().rpc,
    )?;
    let node = client.test_connection().await?;

    assert_eq!(node.network, "secret-4");
    assert_eq!(node.moniker, "test-node");
    Ok(())
}
