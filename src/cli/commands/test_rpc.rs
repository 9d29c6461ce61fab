use crate::cli::load_config;
use crate::errors::{AppError, AppResult};
use crate::rpc::LcdClient;
use crate::types::Network;
use clap::Args;
use tracing::{error, info, warn};

/// Test LCD endpoint connectivity
#[derive(Args)]
pub struct TestRpcCommand {
    /// Network to test: mainnet (secret-4) or testnet (pulsar-2)
    #[arg(long, short = 'n', default_value = "mainnet")]
    pub network: Network,

    /// LCD endpoint URL (overrides config.toml)
    #[arg(long)]
    pub lcd_url: Option<String>,
}

impl TestRpcCommand {
    pub async fn run(&self) -> AppResult<()> {
        info!("=== Testing LCD Connection ===");

        let config = load_config(self.network, self.lcd_url.as_deref())?;
        let network_config = config.network(self.network);
        network_config.validate()?;

        info!("Testing connection to: {}", network_config.lcd_url);
        let client = LcdClient::new(network_config, config.rpc.clone())?;

        match client.test_connection().await {
            Ok(node) => {
                println!("LCD connection test PASSED");
                println!("Endpoint: {}", client.base_url());
                println!("Chain ID: {}", node.network);
                if !node.moniker.is_empty() {
                    println!("Moniker: {}", node.moniker);
                }
                if !node.version.is_empty() {
                    println!("Node version: {}", node.version);
                }

                if node.network != client.chain_id() {
                    warn!(
                        "Node reports chain {} but {} is configured for {}",
                        node.network,
                        client.chain_id(),
                        self.network
                    );
                    println!(
                        "Warning: expected chain {}, node is on {}",
                        client.chain_id(),
                        node.network
                    );
                }
                Ok(())
            }
            Err(e) => {
                error!("LCD connection test failed: {}", e);
                println!("LCD connection test FAILED");
                println!("Error: {}", e);
                println!("\nTroubleshooting tips:");
                println!("1. Check the LCD URL is correct and reachable");
                println!("2. Make sure the URL points at the REST (LCD) port, not RPC or gRPC");
                println!("3. Verify the node serves the chosen network ({})", self.network);

                Err(AppError::Rpc(e))
            }
        }
    }
}
