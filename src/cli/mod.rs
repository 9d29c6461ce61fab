use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::types::Network;
use clap::{Parser, Subcommand};

pub mod commands;
pub mod report;

/// Secret Network transaction lookup and contract message decoder
#[derive(Parser)]
#[command(name = "secret-tx-decoder")]
#[command(about = "Look up Secret Network transactions and decode their contract messages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a transaction and decode its contract execution messages
    Lookup(commands::lookup::LookupCommand),
    /// Expand base64-encoded strings inside a JSON document
    Expand(commands::expand::ExpandCommand),
    /// Test LCD endpoint connectivity
    TestRpc(commands::test_rpc::TestRpcCommand),
    /// Print the effective configuration as TOML
    Config(commands::show_config::ShowConfigCommand),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup(command) => command.run().await,
        Commands::Expand(command) => command.run(),
        Commands::TestRpc(command) => command.run().await,
        Commands::Config(command) => command.run(),
    }
}

/// Load configuration and apply a command-line LCD URL override
pub(crate) fn load_config(network: Network, lcd_url: Option<&str>) -> AppResult<AppConfig> {
    let mut config = AppConfig::load()
        .map_err(|e| AppError::Config(format!("Failed to load configuration: {}", e)))?;
    if let Some(url) = lcd_url {
        config.network_mut(network).lcd_url = url.to_string();
    }
    Ok(config)
}
