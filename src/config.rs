use crate::types::Network;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub mainnet: NetworkConfig,
    pub testnet: NetworkConfig,
    pub rpc: RpcConfig,
}

/// Endpoint and chain id for one network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub lcd_url: String,
}

impl NetworkConfig {
    pub fn mainnet_defaults() -> Self {
        Self {
            chain_id: Network::Mainnet.default_chain_id().to_string(),
            lcd_url: "https://lcd.secret.express".to_string(),
        }
    }

    pub fn testnet_defaults() -> Self {
        Self {
            chain_id: Network::Testnet.default_chain_id().to_string(),
            lcd_url: "https://api.pulsar.scrttestnet.com".to_string(),
        }
    }

    /// Check the LCD URL is usable before a client is built from it
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.lcd_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Message(format!(
                "No LCD URL configured for chain {}",
                self.chain_id
            )));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Message(format!(
                "LCD URL must start with http:// or https://, got {}",
                url
            )));
        }
        Ok(())
    }
}

/// HTTP behaviour shared by every network client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_retries: 3,
            initial_backoff_ms: 250,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 10,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mainnet: NetworkConfig::mainnet_defaults(),
            testnet: NetworkConfig::testnet_defaults(),
            rpc: RpcConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Same as [`AppConfig::load`] but reads the named file (extension optional)
    pub fn load_from(file_name: &str) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            .set_default("mainnet.chain_id", defaults.mainnet.chain_id)?
            .set_default("mainnet.lcd_url", defaults.mainnet.lcd_url)?
            .set_default("testnet.chain_id", defaults.testnet.chain_id)?
            .set_default("testnet.lcd_url", defaults.testnet.lcd_url)?
            .set_default("rpc.timeout_seconds", defaults.rpc.timeout_seconds)?
            .set_default("rpc.max_retries", defaults.rpc.max_retries as i64)?
            .set_default("rpc.initial_backoff_ms", defaults.rpc.initial_backoff_ms)?
            .set_default("rpc.backoff_multiplier", defaults.rpc.backoff_multiplier)?
            .set_default("rpc.max_backoff_seconds", defaults.rpc.max_backoff_seconds)?
            .add_source(File::with_name(file_name).required(false))
            // TX_DECODER_RPC__MAX_RETRIES=5, TX_DECODER_TESTNET__LCD_URL=...
            .add_source(
                config::Environment::with_prefix("TX_DECODER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(url) = env::var("MAINNET_LCD_URL") {
            app_config.mainnet.lcd_url = url;
        }
        if let Ok(url) = env::var("TESTNET_LCD_URL") {
            app_config.testnet.lcd_url = url;
        }

        Ok(app_config)
    }

    pub fn network(&self, network: Network) -> &NetworkConfig {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }

    pub fn network_mut(&mut self, network: Network) -> &mut NetworkConfig {
        match network {
            Network::Mainnet => &mut self.mainnet,
            Network::Testnet => &mut self.testnet,
        }
    }

    /// Render as TOML, the same shape `config.toml` accepts
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
