use crate::errors::RpcResult;
use crate::types::{ContractInfo, TransactionRecord};
use async_trait::async_trait;

/// Node access the decode pipeline needs
///
/// Implementations own any wallet-based decryption: payloads the caller can
/// decrypt come back already as structured JSON.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Fetch a committed transaction by hash
    async fn fetch_transaction(&self, hash: &str) -> RpcResult<TransactionRecord>;

    /// Look up label, code id and creator of a deployed contract
    async fn query_contract_info(&self, address: &str) -> RpcResult<ContractInfo>;
}
