use super::serde_helpers::u64_from_str_or_num;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata of a deployed contract, as reported by the contract-info query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractInfo {
    #[serde(deserialize_with = "u64_from_str_or_num", default)]
    pub code_id: u64,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibc_port_id: Option<String>,
    /// Fields newer nodes add that we only pass through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
