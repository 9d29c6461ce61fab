//! Retry logic utilities for network operations
//!
//! Helper functions for exponential backoff and for bounding a single
//! request by a timeout.

use crate::errors::{RpcError, RpcResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use secret_tx_decoder::rpc::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Run one network operation, failing with `RpcError::Timeout` if it takes
/// longer than `timeout_seconds`
pub async fn execute_with_timeout<T, F>(
    timeout_seconds: u64,
    operation: &str,
    future: F,
) -> RpcResult<T>
where
    F: Future<Output = RpcResult<T>>,
{
    match timeout(Duration::from_secs(timeout_seconds), future).await {
        Ok(result) => result,
        Err(_) => Err(RpcError::Timeout {
            timeout_seconds,
            operation: operation.to_string(),
        }),
    }
}
