//! Base64 detection and expansion helpers
//!
//! Contract payloads routinely carry base64 inside JSON: CosmWasm `Binary`
//! fields, callback messages for relay contracts, and so on. These helpers
//! recognise such strings and turn them back into text for display.

use super::value_walk::{ValueWalker, WalkResult};
use base64::{
    alphabet,
    engine::{self, general_purpose::GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use lazy_static::lazy_static;
use regex::Regex;

/// Base64 decoder that accepts both padded and unpadded input
///
/// Used for nested `msg` fields, which some clients encode without padding.
pub const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(engine::DecodePaddingMode::Indifferent),
);

lazy_static! {
    /// Whole-string match on the standard alphabet with canonical padding
    static ref BASE64_SHAPE: Regex =
        Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
            .expect("base64 shape regex is valid");
}

/// Key whose string values are never expanded
const TYPE_KEY: &str = "type";

/// Check whether a string has the shape of padded standard base64
///
/// A shape check only: plain words whose length is a multiple of four
/// (`"test"`, `"true"`) also match.
///
/// # Example
/// ```
/// use secret_tx_decoder::shared::looks_like_base64;
///
/// assert!(looks_like_base64("aGVsbG8="));
/// assert!(!looks_like_base64("not base64!!"));
/// ```
pub fn looks_like_base64(text: &str) -> bool {
    !text.is_empty() && BASE64_SHAPE.is_match(text)
}

/// Decode base64 into text, replacing invalid UTF-8 sequences
pub fn decode_base64_text(text: &str) -> Option<String> {
    engine::general_purpose::STANDARD
        .decode(text)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Replace every base64-shaped string in `value` with its decoded text
///
/// Strings under a key named `type` are left alone. Decoded text is not
/// checked for meaning, so this is a display aid only. Running it again on its
/// own output changes nothing unless some decoded text is itself
/// base64-shaped.
pub fn expand_base64_strings(value: &mut serde_json::Value) -> WalkResult<usize> {
    ValueWalker::default().rewrite_strings(value, |key, text| {
        if key == Some(TYPE_KEY) || !looks_like_base64(text) {
            return None;
        }
        decode_base64_text(text)
    })
}
