//! Network client integration module
//!
//! This module provides everything that talks to a Secret Network node:
//! - **Traits** - The `NetworkClient` seam the decode pipeline depends on
//! - **Client** - Async LCD (REST) client with retry logic
//! - **Wire** - LCD JSON shapes and their mapping onto `TransactionRecord`
//! - **Proto** - Protobuf envelopes found inside transaction results
//! - **Cache** - Response caching per client
//! - **Retry** - Exponential backoff and timeout helpers

pub mod cache;
pub mod client;
pub mod proto;
pub mod retry;
pub mod traits;
pub mod wire;

// Re-export main types
pub use cache::{CacheStats, ResponseCache};
pub use client::{normalize_tx_hash, LcdClient};
pub use retry::{calculate_next_backoff, execute_with_timeout};
pub use traits::NetworkClient;
pub use wire::NodeInfo;
