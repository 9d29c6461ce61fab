//! Decoder-specific error types

use super::response::ResponseError;
use crate::errors::RpcError;

/// Result type for decoder operations
pub type DecoderResult<T> = Result<T, DecoderError>;

/// Fatal decode failures; any of these aborts the whole lookup
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("No contract_address attribute in the message event log for message #{message_index}")]
    ContractAddressNotFound { message_index: usize },

    #[error("Contract info query failed for message #{message_index}: {source}")]
    ContractInfo {
        message_index: usize,
        #[source]
        source: RpcError,
    },

    #[error("Malformed response envelope for message #{message_index}: {source}")]
    MalformedResponse {
        message_index: usize,
        #[source]
        source: ResponseError,
    },
}
