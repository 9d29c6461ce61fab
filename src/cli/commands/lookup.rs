use crate::cli::load_config;
use crate::cli::report::{
    render_json, render_pretty, render_undecoded, OutputFormat, ReportOptions,
};
use crate::errors::{AppError, AppResult};
use crate::session::Session;
use crate::types::Network;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Fetch a transaction and decode its contract execution messages
#[derive(Args)]
pub struct LookupCommand {
    /// Transaction hash (64 hex characters, optional 0x prefix)
    pub tx_hash: String,

    /// Network to query: mainnet (secret-4) or testnet (pulsar-2)
    #[arg(long, short = 'n', default_value = "mainnet")]
    pub network: Network,

    /// LCD endpoint URL (overrides config.toml)
    #[arg(long)]
    pub lcd_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Decode base64-shaped strings in the printed transaction
    #[arg(long)]
    pub expand_base64: bool,

    /// Only print the decoded messages
    #[arg(long)]
    pub hide_transaction: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl LookupCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = load_config(self.network, self.lcd_url.as_deref())?;
        let mut session = Session::new(config);

        let lookup = session.lookup(self.network, &self.tx_hash).await?;
        let options = ReportOptions {
            expand_base64: self.expand_base64,
            hide_transaction: self.hide_transaction,
        };

        let messages = match lookup.messages {
            Ok(messages) => messages,
            Err(e) => {
                if let Some(rendered) =
                    render_undecoded(&lookup.transaction, self.format, options)?
                {
                    self.emit(&rendered)?;
                }
                return Err(AppError::Decoder(e));
            }
        };

        let rendered = match self.format {
            OutputFormat::Pretty => render_pretty(&lookup.transaction, &messages, options)?,
            OutputFormat::Json => render_json(&lookup.transaction, &messages, options)?,
        };

        self.emit(&rendered)
    }

    /// Print the report, or write it to `--output` when given
    fn emit(&self, rendered: &str) -> AppResult<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, rendered)?;
                info!("Report written to {}", path.display());
                println!("Report written to {}", path.display());
            }
            None => println!("{}", rendered),
        }
        Ok(())
    }
}
