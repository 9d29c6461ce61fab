//! Nested call unwrapping
//!
//! Relay and proxy contracts take the real call as a base64 JSON string in a
//! `msg` sub-field, e.g. `{"send": {"recipient": "...", "msg": "eyJ..."}}`.
//! The decoded call is stored under `decoded_msg` in place of `msg`.

use crate::shared::BASE64_LENIENT;
use base64::Engine;
use serde_json::Value;

pub const NESTED_MSG_KEY: &str = "msg";
pub const DECODED_MSG_KEY: &str = "decoded_msg";

#[derive(Debug, thiserror::Error)]
pub enum NestedMsgError {
    #[error("nested msg under '{key}' is not a string")]
    NotAString { key: String },

    #[error("nested msg under '{key}' is not base64: {source}")]
    Base64 {
        key: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("nested msg under '{key}' is not JSON: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode the nested `msg` of a call body, if it has exactly one
///
/// Returns the top-level key whose sub-field was replaced, or `None` when the
/// call has no (or more than one) nested `msg`. A nested `msg` that is not a
/// base64 JSON string is an error. On error `call` is left untouched.
pub fn unwrap_nested_msg(call: &mut Value) -> Result<Option<String>, NestedMsgError> {
    let Some(map) = call.as_object_mut() else {
        return Ok(None);
    };

    let mut candidates = map
        .iter()
        .filter(|(_, inner)| inner.get(NESTED_MSG_KEY).is_some())
        .map(|(key, _)| key.clone());
    let key = match (candidates.next(), candidates.next()) {
        (Some(key), None) => key,
        _ => return Ok(None),
    };

    let Some(inner) = map.get_mut(&key).and_then(Value::as_object_mut) else {
        return Ok(None);
    };
    let Some(encoded) = inner.get(NESTED_MSG_KEY).and_then(Value::as_str) else {
        return Err(NestedMsgError::NotAString { key });
    };

    let bytes = BASE64_LENIENT
        .decode(encoded)
        .map_err(|source| NestedMsgError::Base64 {
            key: key.clone(),
            source,
        })?;
    let decoded: Value =
        serde_json::from_slice(&bytes).map_err(|source| NestedMsgError::Json {
            key: key.clone(),
            source,
        })?;

    inner.remove(NESTED_MSG_KEY);
    inner.insert(DECODED_MSG_KEY.to_string(), decoded);
    Ok(Some(key))
}
