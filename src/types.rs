//! Secret Network transaction lookup - Type System
//!
//! - `network`: Which chain a lookup targets (mainnet / testnet)
//! - `transaction`: The transaction record handed over by the network client
//! - `contract`: Contract metadata returned by the contract-info query
//! - `decoded`: Per-message output of the decode pipeline

mod contract;
mod decoded;
mod network;
pub(crate) mod serde_helpers;
mod transaction;

pub use contract::*;
pub use decoded::*;
pub use network::*;
pub use transaction::*;
