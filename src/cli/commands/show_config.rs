use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use clap::Args;

/// Print the effective configuration (config.toml plus environment overrides)
#[derive(Args)]
pub struct ShowConfigCommand {}

impl ShowConfigCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = AppConfig::load()
            .map_err(|e| AppError::Config(format!("Failed to load configuration: {}", e)))?;
        let rendered = config
            .to_toml()
            .map_err(|e| AppError::Config(format!("Failed to render configuration: {}", e)))?;
        print!("{}", rendered);
        Ok(())
    }
}
