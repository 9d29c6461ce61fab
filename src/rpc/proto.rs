//! Protobuf envelopes carried in `tx_response.data`
//!
//! Only the fields needed to split a transaction result into per-message
//! response blobs are declared.

use prost::Message;

/// `google.protobuf.Any`
#[derive(Clone, PartialEq, Message)]
pub struct Any {
    #[prost(string, tag = "1")]
    pub type_url: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

/// `cosmos.base.abci.v1beta1.MsgData` (pre SDK 0.46 result layout)
#[derive(Clone, PartialEq, Message)]
pub struct MsgData {
    #[prost(string, tag = "1")]
    pub msg_type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

/// `cosmos.base.abci.v1beta1.TxMsgData`
#[derive(Clone, PartialEq, Message)]
pub struct TxMsgData {
    #[prost(message, repeated, tag = "1")]
    pub data: Vec<MsgData>,
    #[prost(message, repeated, tag = "2")]
    pub msg_responses: Vec<Any>,
}

impl TxMsgData {
    /// Per-message response blobs, index-aligned with the transaction body
    pub fn into_response_blobs(self) -> Vec<Vec<u8>> {
        if !self.msg_responses.is_empty() {
            self.msg_responses.into_iter().map(|any| any.value).collect()
        } else {
            self.data.into_iter().map(|entry| entry.data).collect()
        }
    }
}

/// Split raw `TxMsgData` bytes into per-message response blobs
pub fn split_response_blobs(bytes: &[u8]) -> Result<Vec<Vec<u8>>, prost::DecodeError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    Ok(TxMsgData::decode(bytes)?.into_response_blobs())
}
