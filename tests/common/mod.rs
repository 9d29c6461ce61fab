//! Common Test Utilities
//!
//! Fixture builders for transaction records and an in-memory network client,
//! so decoder and session tests run without a node.

#![allow(dead_code)]

use async_trait::async_trait;
use prost::Message;
use secret_tx_decoder::decoder::MsgExecuteContractResponse;
use secret_tx_decoder::errors::{RpcError, RpcResult};
use secret_tx_decoder::rpc::NetworkClient;
use secret_tx_decoder::types::{
    ContractInfo, EventAttribute, LogEvent, TransactionRecord, TxLog, TxMessage,
    CONTRACT_ADDRESS_KEY, EXECUTE_CONTRACT_TYPE_URL, MESSAGE_EVENT_TYPE,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_TX_HASH: &str = "9F2C8A7D61B04E3F5A6C7D8E9F0A1B2C3D4E5F60718293A4B5C6D7E8F9A0B1C2";

/// In-memory `NetworkClient` with call counting
#[derive(Default)]
pub struct FakeClient {
    transactions: HashMap<String, TransactionRecord>,
    contracts: HashMap<String, ContractInfo>,
    transaction_fetches: AtomicUsize,
    contract_queries: AtomicUsize,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction(mut self, transaction: TransactionRecord) -> Self {
        self.transactions
            .insert(transaction.hash.clone(), transaction);
        self
    }

    pub fn with_contract(mut self, address: &str, label: &str, code_id: u64) -> Self {
        self.contracts
            .insert(address.to_string(), contract_info(label, code_id));
        self
    }

    pub fn transaction_fetches(&self) -> usize {
        self.transaction_fetches.load(Ordering::SeqCst)
    }

    pub fn contract_queries(&self) -> usize {
        self.contract_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkClient for FakeClient {
    async fn fetch_transaction(&self, hash: &str) -> RpcResult<TransactionRecord> {
        self.transaction_fetches.fetch_add(1, Ordering::SeqCst);
        self.transactions
            .get(&hash.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| RpcError::TransactionNotFound {
                hash: hash.to_string(),
            })
    }

    async fn query_contract_info(&self, address: &str) -> RpcResult<ContractInfo> {
        self.contract_queries.fetch_add(1, Ordering::SeqCst);
        self.contracts
            .get(address)
            .cloned()
            .ok_or_else(|| RpcError::ContractQueryFailed {
                address: address.to_string(),
                message: "contract not found".to_string(),
            })
    }
}

pub fn contract_info(label: &str, code_id: u64) -> ContractInfo {
    ContractInfo {
        code_id,
        creator: "secret1creator0000000000000000000000000000".to_string(),
        label: label.to_string(),
        admin: None,
        ibc_port_id: None,
        extra: Map::new(),
    }
}

/// `MsgExecuteContract` with the given call body and no funds
pub fn execute_message(msg: Value) -> TxMessage {
    TxMessage::new(
        EXECUTE_CONTRACT_TYPE_URL,
        json!({
            "sender": "secret1sender000000000000000000000000000000",
            "contract": "secret1contract0000000000000000000000000000",
            "msg": msg,
            "sent_funds": []
        }),
    )
}

pub fn bank_send() -> TxMessage {
    TxMessage::new(
        "/cosmos.bank.v1beta1.MsgSend",
        json!({
            "from_address": "secret1sender000000000000000000000000000000",
            "to_address": "secret1receiver0000000000000000000000000000",
            "amount": [{"denom": "uscrt", "amount": "1000000"}]
        }),
    )
}

/// Log entry whose `message` event names `contract` (or names nothing)
pub fn message_log(msg_index: u32, contract: Option<&str>) -> TxLog {
    let mut attributes = vec![EventAttribute {
        key: "action".to_string(),
        value: "execute".to_string(),
    }];
    if let Some(address) = contract {
        attributes.push(EventAttribute {
            key: CONTRACT_ADDRESS_KEY.to_string(),
            value: address.to_string(),
        });
    }

    TxLog {
        msg_index,
        log: String::new(),
        events: vec![LogEvent {
            event_type: MESSAGE_EVENT_TYPE.to_string(),
            attributes,
        }],
    }
}

/// Protobuf response envelope around `data`
pub fn response_envelope(data: &[u8]) -> Vec<u8> {
    MsgExecuteContractResponse {
        data: data.to_vec(),
    }
    .encode_to_vec()
}

/// Successful transaction with no logs or response data yet
pub fn successful_tx(messages: Vec<TxMessage>) -> TransactionRecord {
    TransactionRecord {
        hash: TEST_TX_HASH.to_string(),
        height: 12_345_678,
        code: 0,
        codespace: String::new(),
        messages,
        json_log: Some(Vec::new()),
        raw_log: String::new(),
        data: Vec::new(),
        gas_wanted: 200_000,
        gas_used: 150_000,
        timestamp: None,
    }
}

pub fn failed_tx(messages: Vec<TxMessage>) -> TransactionRecord {
    TransactionRecord {
        code: 5,
        codespace: "compute".to_string(),
        json_log: None,
        raw_log: "failed to execute message; message index: 0: insufficient funds".to_string(),
        ..successful_tx(messages)
    }
}
