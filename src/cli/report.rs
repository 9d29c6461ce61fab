//! Terminal rendering of lookup results

use crate::errors::{AppError, AppResult};
use crate::shared::expand_base64_strings;
use crate::types::{Coin, DecodedMessage, TransactionRecord};
use clap::ValueEnum;
use serde_json::{json, Value};

/// Parts of the transaction JSON that carry payloads rather than identifiers
const EXPANDABLE_FIELDS: [&str; 2] = ["messages", "jsonLog"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable sections
    Pretty,
    /// One JSON document
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Replace base64-shaped strings in message payloads with decoded text
    pub expand_base64: bool,
    /// Leave the raw transaction out of the report
    pub hide_transaction: bool,
}

/// Transaction as JSON, optionally with its payloads base64-expanded
///
/// Hashes and response blobs are hex and never expanded.
pub fn transaction_value(transaction: &TransactionRecord, expand: bool) -> AppResult<Value> {
    let mut value = serde_json::to_value(transaction)?;
    if expand {
        for field in EXPANDABLE_FIELDS {
            if let Some(part) = value.get_mut(field) {
                expand_value(part)?;
            }
        }
    }
    Ok(value)
}

/// Apply base64 expansion to an arbitrary JSON document
pub fn expand_value(value: &mut Value) -> AppResult<usize> {
    expand_base64_strings(value).map_err(|e| AppError::InvalidData(e.to_string()))
}

/// Single JSON document holding the transaction and its decoded messages
pub fn render_json(
    transaction: &TransactionRecord,
    messages: &[DecodedMessage],
    options: ReportOptions,
) -> AppResult<String> {
    let mut report = json!({ "messages": messages });
    if !options.hide_transaction {
        report["transaction"] = transaction_value(transaction, options.expand_base64)?;
    }
    Ok(serde_json::to_string_pretty(&report)?)
}

/// What is left to show when decoding failed: the transaction alone
///
/// `None` when the transaction is hidden.
pub fn render_undecoded(
    transaction: &TransactionRecord,
    format: OutputFormat,
    options: ReportOptions,
) -> AppResult<Option<String>> {
    if options.hide_transaction {
        return Ok(None);
    }

    let rendered = match format {
        OutputFormat::Pretty => render_transaction(transaction, options.expand_base64)?,
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "transaction": transaction_value(transaction, options.expand_base64)?
        }))?,
    };
    Ok(Some(rendered))
}

/// Human readable report
pub fn render_pretty(
    transaction: &TransactionRecord,
    messages: &[DecodedMessage],
    options: ReportOptions,
) -> AppResult<String> {
    let mut output = String::new();

    if !options.hide_transaction {
        output.push_str(&render_transaction(transaction, options.expand_base64)?);
        output.push('\n');
    }

    if !transaction.is_success() {
        output.push_str("=== Transaction Error ===\n");
        output.push_str(&format!(
            "Code: {} ({})\n",
            transaction.code, transaction.codespace
        ));
        output.push_str(&format!("{}\n\n", transaction.raw_log));
    }

    output.push_str(&format!(
        "=== Contract Messages ({}) ===\n",
        messages.len()
    ));
    if messages.is_empty() {
        output.push_str("No contract execution messages in this transaction\n");
    }
    for message in messages {
        output.push_str(&render_message(message)?);
    }

    Ok(output)
}

/// Transaction header plus the raw record as JSON
pub fn render_transaction(transaction: &TransactionRecord, expand: bool) -> AppResult<String> {
    let mut output = String::new();
    output.push_str(&format!("=== Transaction {} ===\n", transaction.hash));
    output.push_str(&format!("Height: {}\n", transaction.height));

    if transaction.is_success() {
        output.push_str("Status: success\n");
    } else {
        output.push_str(&format!("Status: failed (code {})\n", transaction.code));
    }
    output.push_str(&format!(
        "Gas: {} used / {} wanted\n",
        transaction.gas_used, transaction.gas_wanted
    ));
    if let Some(timestamp) = transaction.timestamp {
        output.push_str(&format!("Time: {}\n", timestamp.to_rfc3339()));
    }

    output.push_str(&serde_json::to_string_pretty(&transaction_value(
        transaction,
        expand,
    )?)?);
    output.push('\n');
    Ok(output)
}

fn render_message(message: &DecodedMessage) -> AppResult<String> {
    let mut output = String::new();
    output.push_str(&format!("\n--- Message #{} ---\n", message.message_index));

    if let Some(info) = message.contract_info() {
        output.push_str(&format!(
            "Label: {}\n",
            message.label().unwrap_or("(none)")
        ));
        output.push_str(&format!(
            "Address: {}\n",
            message.contract().unwrap_or_default()
        ));
        output.push_str(&format!("Code ID: {}\n", info.code_id));
    }
    output.push_str(&format!(
        "Decrypted: {}\n",
        if message.is_decrypted { "yes" } else { "no" }
    ));
    output.push_str(&format!(
        "Sent funds: {}\n",
        format_funds(&message.sent_funds)
    ));

    output.push_str("Request:\n");
    output.push_str(&serde_json::to_string_pretty(&message.msg)?);
    output.push('\n');

    if let Some(response) = message.data_response() {
        output.push_str("Response:\n");
        output.push_str(&serde_json::to_string_pretty(response)?);
        output.push('\n');
    }
    Ok(output)
}

/// `250uscrt, 1000uatom`, `none` for an empty list, raw JSON otherwise
pub fn format_funds(sent_funds: &Value) -> String {
    match Coin::list_from_value(sent_funds) {
        Some(coins) if coins.is_empty() => "none".to_string(),
        Some(coins) => coins
            .iter()
            .map(Coin::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        None if sent_funds.is_null() => "none".to_string(),
        None => sent_funds.to_string(),
    }
}
