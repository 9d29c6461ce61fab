use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which Secret Network chain a lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Chain id used when nothing else is configured
    pub fn default_chain_id(&self) -> &'static str {
        match self {
            Network::Mainnet => "secret-4",
            Network::Testnet => "pulsar-2",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "secret-4" => Ok(Network::Mainnet),
            "testnet" | "pulsar-2" => Ok(Network::Testnet),
            other => Err(format!(
                "unknown network '{}' (expected mainnet, testnet, secret-4 or pulsar-2)",
                other
            )),
        }
    }
}
