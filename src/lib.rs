//! Secret Network transaction lookup and contract message decoder
//!

pub mod cli;
pub mod config;
pub mod decoder;
pub mod errors;
pub mod rpc;
pub mod session;
pub mod shared;
pub mod types;
