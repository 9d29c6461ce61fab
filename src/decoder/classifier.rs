//! Payload classification
//!
//! Decides whether a call payload is still opaque or has already been
//! decrypted upstream, and finds the executing contract in the event log.
//! Classification is structural only; nothing here decrypts.

use super::error::{DecoderError, DecoderResult};
use crate::shared::BASE64_LENIENT;
use crate::types::{TxLog, CONTRACT_ADDRESS_KEY, MESSAGE_EVENT_TYPE};
use base64::Engine;
use serde_json::Value;

/// A call payload after classification
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Ciphertext or any other blob that is not structured data
    Encrypted(Vec<u8>),
    /// Structured call body, decrypted by the network client
    Decrypted(Value),
}

impl Payload {
    pub fn classify(value: &Value) -> Self {
        if is_decrypted(value) {
            return Payload::Decrypted(value.clone());
        }

        let bytes = match value {
            Value::String(text) => BASE64_LENIENT
                .decode(text)
                .unwrap_or_else(|_| text.as_bytes().to_vec()),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect(),
            Value::Null => Vec::new(),
            other => other.to_string().into_bytes(),
        };
        Payload::Encrypted(bytes)
    }

    pub fn is_decrypted(&self) -> bool {
        matches!(self, Payload::Decrypted(_))
    }
}

/// True iff `value` is structured data rather than an opaque blob
///
/// Objects are structured. Arrays are structured unless they are a byte
/// buffer (empty, or every element an integer in `0..=255`). Strings,
/// numbers, booleans and null are opaque.
pub fn is_decrypted(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => !is_byte_buffer(items),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}

fn is_byte_buffer(items: &[Value]) -> bool {
    items
        .iter()
        .all(|item| matches!(item.as_u64(), Some(n) if n <= u8::MAX as u64))
}

/// Find the executing contract for the message at `message_index`
///
/// Looks only at events of type `message` in the log entry at the same index
/// and returns the first non-empty `contract_address` attribute.
pub fn resolve_contract_address(
    json_log: Option<&[TxLog]>,
    message_index: usize,
) -> DecoderResult<String> {
    json_log
        .and_then(|logs| logs.get(message_index))
        .and_then(|log| {
            log.events
                .iter()
                .filter(|event| event.event_type == MESSAGE_EVENT_TYPE)
                .filter_map(|event| event.attribute(CONTRACT_ADDRESS_KEY))
                .find(|address| !address.is_empty())
        })
        .map(str::to_string)
        .ok_or(DecoderError::ContractAddressNotFound { message_index })
}
