//! Contract execution message decoder
//!
//! Turns a fetched transaction into one [`DecodedMessage`] per contract
//! execution message:
//! - Non-execution messages are skipped
//! - Nested base64 `msg` sub-fields of decrypted calls are unwrapped
//! - Each payload is classified as encrypted or decrypted
//! - For successful transactions the executing contract is resolved from the
//!   event log, its metadata queried, and the response envelope decoded
//!
//! Messages are processed strictly in order and one at a time. Any fatal
//! error aborts the whole run; no partial output is returned.

pub mod classifier;
pub mod error;
pub mod nested;
pub mod response;

pub use classifier::{is_decrypted, resolve_contract_address, Payload};
pub use error::{DecoderError, DecoderResult};
pub use nested::{unwrap_nested_msg, NestedMsgError};
pub use response::{decode_data_response, MsgExecuteContractResponse, ResponseError};

use crate::rpc::NetworkClient;
use crate::types::{DecodedMessage, ExecuteContractPayload, ExecutionDetails, TransactionRecord};
use tracing::{debug, warn};

/// Decode every contract execution message of `transaction`
///
/// Output order follows the transaction body; its length is the number of
/// execution messages.
pub async fn decode_transaction_messages<C>(
    transaction: &TransactionRecord,
    client: &C,
) -> DecoderResult<Vec<DecodedMessage>>
where
    C: NetworkClient + ?Sized,
{
    let mut decoded = Vec::new();

    for (index, message) in transaction.messages.iter().enumerate() {
        let Some(ExecuteContractPayload { msg, sent_funds }) = message.execute_payload() else {
            debug!("Skipping message #{} of type {}", index, message.type_url);
            continue;
        };

        let (msg, is_decrypted) = match Payload::classify(&msg) {
            Payload::Decrypted(mut call) => {
                match unwrap_nested_msg(&mut call) {
                    Ok(Some(key)) => debug!("Decoded nested msg under '{}' in message #{}", key, index),
                    Ok(None) => {}
                    Err(e) => warn!("Keeping nested msg of message #{} as is: {}", index, e),
                }
                (call, true)
            }
            Payload::Encrypted(bytes) => {
                debug!(
                    "Message #{} is still encrypted ({} bytes)",
                    index,
                    bytes.len()
                );
                (msg, false)
            }
        };

        if !transaction.is_success() {
            decoded.push(DecodedMessage {
                message_index: index,
                msg,
                sent_funds,
                is_decrypted,
                execution: None,
            });
            continue;
        }

        let contract = resolve_contract_address(transaction.json_log.as_deref(), index)?;
        let contract_info = client
            .query_contract_info(&contract)
            .await
            .map_err(|source| DecoderError::ContractInfo {
                message_index: index,
                source,
            })?;

        let data_response = match transaction.response_blob(index) {
            Some(blob) if is_decrypted => {
                decode_data_response(blob).map_err(|source| DecoderError::MalformedResponse {
                    message_index: index,
                    source,
                })?
            }
            _ => None,
        };

        debug!(
            "Message #{} executed {} ({}), response {}",
            index,
            contract,
            contract_info.label,
            if data_response.is_some() { "decoded" } else { "absent" }
        );

        decoded.push(DecodedMessage {
            message_index: index,
            msg,
            sent_funds,
            is_decrypted,
            execution: Some(ExecutionDetails {
                contract,
                contract_info,
                data_response,
            }),
        });
    }

    Ok(decoded)
}
