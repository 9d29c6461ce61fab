//! Lookup session
//!
//! Holds the configuration and at most one network client per network.
//! Clients are built on first use and reused for every later lookup in the
//! same session.

use crate::config::AppConfig;
use crate::decoder::{decode_transaction_messages, DecoderResult};
use crate::errors::{AppError, AppResult};
use crate::rpc::{LcdClient, NetworkClient};
use crate::types::{DecodedMessage, Network, TransactionRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of one lookup
///
/// The transaction is fetched before decoding starts, so it is available even
/// when decoding failed.
#[derive(Debug)]
pub struct Lookup {
    pub transaction: TransactionRecord,
    pub messages: DecoderResult<Vec<DecodedMessage>>,
}

pub struct Session {
    config: AppConfig,
    clients: HashMap<Network, Arc<dyn NetworkClient>>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            clients: HashMap::new(),
        }
    }

    /// Use `client` for `network` instead of building an LCD client
    pub fn with_client(mut self, network: Network, client: Arc<dyn NetworkClient>) -> Self {
        self.clients.insert(network, client);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether a client for `network` has been built or injected
    pub fn has_client(&self, network: Network) -> bool {
        self.clients.contains_key(&network)
    }

    /// Client for `network`, built from configuration on first use
    pub fn client(&mut self, network: Network) -> AppResult<Arc<dyn NetworkClient>> {
        if let Some(client) = self.clients.get(&network) {
            return Ok(Arc::clone(client));
        }

        let network_config = self.config.network(network);
        network_config.validate()?;

        let client: Arc<dyn NetworkClient> =
            Arc::new(LcdClient::new(network_config, self.config.rpc.clone())?);
        self.clients.insert(network, Arc::clone(&client));
        Ok(client)
    }

    /// Fetch a transaction and decode its contract execution messages
    ///
    /// Fails only when the transaction itself cannot be fetched; decode
    /// failures are reported in [`Lookup::messages`].
    pub async fn lookup(&mut self, network: Network, hash: &str) -> AppResult<Lookup> {
        let client = self.client(network)?;

        info!("Looking up transaction {} on {}", hash.trim(), network);
        let transaction = client.fetch_transaction(hash).await.map_err(AppError::Rpc)?;

        let messages = decode_transaction_messages(&transaction, client.as_ref()).await;
        match &messages {
            Ok(decoded) => info!(
                "Decoded {} contract execution message(s) from {}",
                decoded.len(),
                transaction.hash
            ),
            Err(e) => error!("Decoding {} failed: {}", transaction.hash, e),
        }

        Ok(Lookup {
            transaction,
            messages,
        })
    }
}
