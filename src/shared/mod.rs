//! Shared helpers used by the decode pipeline and the CLI.
//!
//! Pure, client-agnostic functions over `serde_json::Value` trees.

pub mod base64_helpers;
pub mod value_walk;

pub use base64_helpers::{
    decode_base64_text, expand_base64_strings, looks_like_base64, BASE64_LENIENT,
};
pub use value_walk::{ValueWalker, WalkError, WalkResult, MAX_WALK_DEPTH};
