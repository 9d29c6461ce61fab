use super::ContractInfo;
use serde::Serialize;
use serde_json::Value;

/// Decode result for one contract execution message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedMessage {
    /// Position of the message in the transaction body
    pub message_index: usize,
    /// Call payload, with any nested `msg` sub-field decoded
    pub msg: Value,
    pub sent_funds: Value,
    #[serde(rename = "isDecrypted")]
    pub is_decrypted: bool,
    /// Only present for successful transactions
    #[serde(flatten)]
    pub execution: Option<ExecutionDetails>,
}

/// Everything that can only be known once the transaction succeeded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionDetails {
    pub contract: String,
    pub contract_info: ContractInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_response: Option<Value>,
}

impl DecodedMessage {
    pub fn contract(&self) -> Option<&str> {
        self.execution.as_ref().map(|e| e.contract.as_str())
    }

    pub fn contract_info(&self) -> Option<&ContractInfo> {
        self.execution.as_ref().map(|e| &e.contract_info)
    }

    pub fn data_response(&self) -> Option<&Value> {
        self.execution.as_ref().and_then(|e| e.data_response.as_ref())
    }

    /// Contract label when known and non-empty
    pub fn label(&self) -> Option<&str> {
        self.contract_info()
            .map(|info| info.label.as_str())
            .filter(|label| !label.is_empty())
    }
}
