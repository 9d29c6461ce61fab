use crate::config::{NetworkConfig, RpcConfig};
use crate::errors::{RpcError, RpcResult};
use crate::rpc::wire::{ContractInfoResponse, GetTxResponse, NodeInfo, NodeInfoResponse};
use crate::rpc::{calculate_next_backoff, execute_with_timeout, CacheStats, NetworkClient, ResponseCache};
use crate::types::{ContractInfo, TransactionRecord};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Longest error body kept in an `RpcError`
const MAX_ERROR_BODY: usize = 512;

/// Validate a transaction hash and bring it into the form LCD paths expect
///
/// Accepts 64 hex characters with an optional `0x` prefix and returns them in
/// upper case.
pub fn normalize_tx_hash(hash: &str) -> RpcResult<String> {
    let trimmed = hash.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != 64 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RpcError::InvalidTxHash {
            hash: hash.to_string(),
        });
    }
    Ok(digits.to_ascii_uppercase())
}

/// Secret Network LCD (REST) client with retry logic and caching
pub struct LcdClient {
    http: reqwest::Client,
    base_url: String,
    chain_id: String,
    config: RpcConfig,
    error_count: Arc<AtomicU64>,
    transactions: ResponseCache<TransactionRecord>,
    contracts: ResponseCache<ContractInfo>,
}

impl LcdClient {
    /// Create a client for one network; no request is made until first use
    pub fn new(network: &NetworkConfig, config: RpcConfig) -> RpcResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("secret-tx-decoder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RpcError::ConnectionFailed(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            "LCD client for {} using endpoint {}",
            network.chain_id, network.lcd_url
        );

        Ok(Self {
            http,
            base_url: network.lcd_url.trim().trim_end_matches('/').to_string(),
            chain_id: network.chain_id.clone(),
            config,
            error_count: Arc::new(AtomicU64::new(0)),
            transactions: ResponseCache::new("transaction"),
            contracts: ResponseCache::new("contract_info"),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chain id this client was configured for
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Get the number of failed requests (including retried ones)
    pub fn get_error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Get combined cache statistics
    pub fn get_cache_stats(&self) -> CacheStats {
        self.transactions
            .get_stats()
            .merge(self.contracts.get_stats())
    }

    /// Ask the node who it is
    pub async fn test_connection(&self) -> RpcResult<NodeInfo> {
        let response: NodeInfoResponse = self
            .get_json("/cosmos/base/tendermint/v1beta1/node_info", "node_info")
            .await?;
        debug!(
            "LCD connection test successful - network: {}, version: {}",
            response.default_node_info.network, response.default_node_info.version
        );
        Ok(response.default_node_info)
    }

    /// GET `path` and decode the JSON body, retrying transient failures
    async fn get_json<T: DeserializeOwned>(&self, path: &str, operation: &str) -> RpcResult<T> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut backoff = Duration::from_millis(self.config.initial_backoff_ms);

        loop {
            match execute_with_timeout(
                self.config.timeout_seconds,
                operation,
                self.get_once(path),
            )
            .await
            {
                Ok(value) => {
                    if attempts > 0 {
                        debug!("{} succeeded after {} attempts", operation, attempts + 1);
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => {
                    self.error_count.fetch_add(1, Ordering::Relaxed);
                    debug!("{} failed (non-retryable): {}", operation, e);
                    return Err(e);
                }
                Err(e) => {
                    attempts += 1;
                    self.error_count.fetch_add(1, Ordering::Relaxed);

                    if attempts >= max_attempts {
                        error!("{} failed after {} attempts: {}", operation, attempts, e);
                        return Err(match e {
                            RpcError::Timeout { .. } => e,
                            _ => RpcError::MaxRetriesExceeded {
                                operation: format!("{} ({})", operation, e),
                            },
                        });
                    }

                    warn!(
                        "{} attempt {} failed, retrying in {:?}: {}",
                        operation, attempts, backoff, e
                    );
                    sleep(backoff).await;

                    backoff = calculate_next_backoff(
                        backoff,
                        self.config.backoff_multiplier,
                        self.config.max_backoff_seconds,
                    );
                }
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, path: &str) -> RpcResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RpcError::RequestFailed {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RpcError::RequestFailed {
            endpoint: path.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(RpcError::HttpStatus {
                status: status.as_u16(),
                endpoint: path.to_string(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            RpcError::InvalidResponse(format!("{} returned unexpected JSON: {}", path, e))
        })
    }
}

#[async_trait]
impl NetworkClient for LcdClient {
    async fn fetch_transaction(&self, hash: &str) -> RpcResult<TransactionRecord> {
        let hash = normalize_tx_hash(hash)?;

        if let Some(cached) = self.transactions.get(&hash) {
            return Ok(cached);
        }

        let path = format!("/cosmos/tx/v1beta1/txs/{}", hash);
        let response: GetTxResponse = self
            .get_json(&path, &format!("get_tx({})", hash))
            .await
            .map_err(|e| match e {
                RpcError::HttpStatus { status, body, .. }
                    if status == 404 || body.contains("not found") =>
                {
                    RpcError::TransactionNotFound { hash: hash.clone() }
                }
                other => other,
            })?;

        let record = response.into_record()?;
        debug!(
            "Fetched transaction {} (code {}, {} messages)",
            record.hash,
            record.code,
            record.messages.len()
        );

        self.transactions.put(hash, record.clone());
        Ok(record)
    }

    async fn query_contract_info(&self, address: &str) -> RpcResult<ContractInfo> {
        if let Some(cached) = self.contracts.get(address) {
            return Ok(cached);
        }

        let path = format!("/compute/v1beta1/info/{}", address);
        let response: ContractInfoResponse = self
            .get_json(&path, &format!("contract_info({})", address))
            .await
            .map_err(|e| match e {
                RpcError::HttpStatus { status, body, .. } if status < 500 => {
                    RpcError::ContractQueryFailed {
                        address: address.to_string(),
                        message: body,
                    }
                }
                other => other,
            })?;

        if !response.contract_address.is_empty() && response.contract_address != address {
            warn!(
                "Contract info for {} reported address {}",
                address, response.contract_address
            );
        }

        self.contracts
            .put(address.to_string(), response.contract_info.clone());
        Ok(response.contract_info)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
