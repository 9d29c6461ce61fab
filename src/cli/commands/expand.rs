use crate::cli::report::expand_value;
use crate::errors::AppResult;
use clap::Args;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;

/// Expand base64-encoded strings inside a JSON document
#[derive(Args)]
pub struct ExpandCommand {
    /// JSON file to read (stdin if omitted)
    pub file: Option<PathBuf>,
}

impl ExpandCommand {
    pub fn run(&self) -> AppResult<()> {
        let input = match &self.file {
            Some(path) => fs::read_to_string(path)?,
            None => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        let mut value: Value = serde_json::from_str(&input)?;
        let rewritten = expand_value(&mut value)?;
        debug!("Expanded {} base64 string(s)", rewritten);

        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }
}
