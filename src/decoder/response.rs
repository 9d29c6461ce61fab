//! Contract response envelope decoding

use prost::Message;
use serde_json::Value;

/// Response of `/secret.compute.v1beta1.MsgExecuteContract`
#[derive(Clone, PartialEq, Message)]
pub struct MsgExecuteContractResponse {
    /// Raw bytes the contract returned from `execute`
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("protobuf decode failed: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("response data is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("response data is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a response envelope into the JSON the contract returned
///
/// An envelope with an empty `data` field carries no response and yields
/// `None`.
pub fn decode_data_response(blob: &[u8]) -> Result<Option<Value>, ResponseError> {
    let envelope = MsgExecuteContractResponse::decode(blob)?;
    if envelope.data.is_empty() {
        return Ok(None);
    }

    let text = String::from_utf8(envelope.data)?;
    Ok(Some(serde_json::from_str(&text)?))
}
