use super::serde_helpers::hex_blobs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag of a Secret contract execution message
pub const EXECUTE_CONTRACT_TYPE_URL: &str = "/secret.compute.v1beta1.MsgExecuteContract";

/// Event type that carries the executing contract's address
pub const MESSAGE_EVENT_TYPE: &str = "message";

/// Attribute key of the executing contract's address
pub const CONTRACT_ADDRESS_KEY: &str = "contract_address";

/// A transaction as returned by the network client
///
/// `data` is index-aligned with `messages`: `data[i]` is the raw response
/// envelope produced by `messages[i]` (possibly empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: String,
    pub height: u64,
    pub code: u32,
    #[serde(default)]
    pub codespace: String,
    pub messages: Vec<TxMessage>,
    #[serde(rename = "jsonLog", default, skip_serializing_if = "Option::is_none")]
    pub json_log: Option<Vec<TxLog>>,
    #[serde(default)]
    pub raw_log: String,
    #[serde(with = "hex_blobs", default)]
    pub data: Vec<Vec<u8>>,
    #[serde(default)]
    pub gas_wanted: u64,
    #[serde(default)]
    pub gas_used: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Response blob for the message at `index`, if one was produced
    pub fn response_blob(&self, index: usize) -> Option<&[u8]> {
        self.data
            .get(index)
            .map(Vec::as_slice)
            .filter(|blob| !blob.is_empty())
    }

    /// Number of contract execution messages
    pub fn execute_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_execute_contract()).count()
    }
}

/// One entry of the transaction body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxMessage {
    #[serde(rename = "typeUrl")]
    pub type_url: String,
    pub value: Value,
}

impl TxMessage {
    pub fn new(type_url: impl Into<String>, value: Value) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    pub fn is_execute_contract(&self) -> bool {
        self.type_url == EXECUTE_CONTRACT_TYPE_URL
    }

    /// View of the execution payload, `None` for any other message type
    pub fn execute_payload(&self) -> Option<ExecuteContractPayload> {
        if !self.is_execute_contract() {
            return None;
        }

        let field = |name: &str| self.value.get(name).cloned();
        Some(ExecuteContractPayload {
            msg: field("msg").unwrap_or(Value::Null),
            sent_funds: field("sent_funds")
                .or_else(|| field("sentFunds"))
                .unwrap_or(Value::Null),
        })
    }
}

/// The parts of a `MsgExecuteContract` the decoder cares about
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteContractPayload {
    /// Contract call body: ciphertext as delivered, or JSON if already decrypted
    pub msg: Value,
    /// Attached funds, passed through untouched
    pub sent_funds: Value,
}

/// Per-message event log (present for successful transactions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxLog {
    #[serde(default)]
    pub msg_index: u32,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    pub events: Vec<LogEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

impl LogEvent {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// A single token amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    /// Parse a sent-funds value; anything that is not a coin list yields `None`
    pub fn list_from_value(value: &Value) -> Option<Vec<Coin>> {
        serde_json::from_value(value.clone()).ok()
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
