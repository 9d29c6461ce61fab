//! LCD JSON shapes and their mapping onto domain types

use super::proto::split_response_blobs;
use crate::errors::{RpcError, RpcResult};
use crate::types::serde_helpers::u64_from_str_or_num;
use crate::types::{ContractInfo, LogEvent, TransactionRecord, TxLog, TxMessage};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Attribute newer SDKs attach to tx events instead of filling `logs`
const MSG_INDEX_ATTRIBUTE: &str = "msg_index";

/// `GET /cosmos/tx/v1beta1/txs/{hash}`
#[derive(Debug, Deserialize)]
pub struct GetTxResponse {
    #[serde(default)]
    pub tx: Option<WireTx>,
    pub tx_response: WireTxResponse,
}

#[derive(Debug, Deserialize)]
pub struct WireTx {
    pub body: WireTxBody,
}

#[derive(Debug, Deserialize)]
pub struct WireTxBody {
    #[serde(default)]
    pub messages: Vec<Map<String, Value>>,
    #[serde(default)]
    pub memo: String,
}

#[derive(Debug, Deserialize)]
pub struct WireTxResponse {
    #[serde(deserialize_with = "u64_from_str_or_num", default)]
    pub height: u64,
    pub txhash: String,
    #[serde(default)]
    pub codespace: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub logs: Vec<TxLog>,
    #[serde(deserialize_with = "u64_from_str_or_num", default)]
    pub gas_wanted: u64,
    #[serde(deserialize_with = "u64_from_str_or_num", default)]
    pub gas_used: u64,
    #[serde(default)]
    pub tx: Option<WireTx>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub events: Vec<LogEvent>,
}

impl GetTxResponse {
    pub fn into_record(self) -> RpcResult<TransactionRecord> {
        let GetTxResponse { tx, tx_response } = self;
        let hash = tx_response.txhash.clone();

        let body = tx
            .or(tx_response.tx)
            .map(|tx| tx.body)
            .ok_or_else(|| RpcError::InvalidResponse(format!("transaction {} has no body", hash)))?;

        let messages = body
            .messages
            .into_iter()
            .enumerate()
            .map(|(index, mut fields)| match fields.remove("@type") {
                Some(Value::String(type_url)) => Ok(TxMessage::new(type_url, Value::Object(fields))),
                _ => Err(RpcError::InvalidResponse(format!(
                    "message #{} of {} has no @type",
                    index, hash
                ))),
            })
            .collect::<RpcResult<Vec<_>>>()?;

        let data = decode_result_data(&tx_response.data)?;

        let json_log = if tx_response.code == 0 {
            success_logs(
                tx_response.logs,
                &tx_response.raw_log,
                &tx_response.events,
                messages.len(),
            )
        } else {
            None
        };

        // Unparseable timestamps only lose display information
        let timestamp = DateTime::parse_from_rfc3339(&tx_response.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc));

        Ok(TransactionRecord {
            hash,
            height: tx_response.height,
            code: tx_response.code,
            codespace: tx_response.codespace,
            messages,
            json_log,
            raw_log: tx_response.raw_log,
            data,
            gas_wanted: tx_response.gas_wanted,
            gas_used: tx_response.gas_used,
            timestamp,
        })
    }
}

/// `tx_response.data` is hex of a protobuf `TxMsgData`
fn decode_result_data(hex_data: &str) -> RpcResult<Vec<Vec<u8>>> {
    let trimmed = hex_data.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let bytes = hex::decode(trimmed)
        .map_err(|e| RpcError::InvalidResponse(format!("tx result data is not hex: {}", e)))?;
    split_response_blobs(&bytes)
        .map_err(|e| RpcError::InvalidResponse(format!("tx result data is not TxMsgData: {}", e)))
}

/// Per-message logs of a successful transaction, from whichever source the
/// node filled in
fn success_logs(
    logs: Vec<TxLog>,
    raw_log: &str,
    events: &[LogEvent],
    message_count: usize,
) -> Option<Vec<TxLog>> {
    if !logs.is_empty() {
        return Some(logs);
    }
    if let Ok(parsed) = serde_json::from_str::<Vec<TxLog>>(raw_log) {
        if !parsed.is_empty() {
            return Some(parsed);
        }
    }
    logs_from_indexed_events(events, message_count)
}

/// Group `msg_index`-tagged tx events into per-message logs
///
/// Events pointing past the last of `message_count` messages are dropped.
fn logs_from_indexed_events(events: &[LogEvent], message_count: usize) -> Option<Vec<TxLog>> {
    let mut logs: Vec<TxLog> = Vec::new();

    for event in events {
        let Some(index) = event
            .attribute(MSG_INDEX_ATTRIBUTE)
            .and_then(|raw| raw.parse::<usize>().ok())
        else {
            continue;
        };
        if index >= message_count {
            warn!(
                "Ignoring {} event for message #{} of a {}-message transaction",
                event.event_type, index, message_count
            );
            continue;
        }

        while logs.len() <= index {
            logs.push(TxLog {
                msg_index: logs.len() as u32,
                log: String::new(),
                events: Vec::new(),
            });
        }
        logs[index].events.push(event.clone());
    }

    (!logs.is_empty()).then_some(logs)
}

/// `GET /compute/v1beta1/info/{address}`
#[derive(Debug, Deserialize)]
pub struct ContractInfoResponse {
    #[serde(default)]
    pub contract_address: String,
    #[serde(alias = "ContractInfo")]
    pub contract_info: ContractInfo,
}

/// `GET /cosmos/base/tendermint/v1beta1/node_info`
#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfoResponse {
    pub default_node_info: NodeInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfo {
    /// Chain id the node is running
    pub network: String,
    #[serde(default)]
    pub moniker: String,
    #[serde(default)]
    pub version: String,
}
