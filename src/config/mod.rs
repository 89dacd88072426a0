//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::env;

use crate::{error::AppError, types::Network};

/// Network used when `NETWORK` is not set.
pub const DEFAULT_NETWORK: &str = "ethereum";

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Selected network preset, with the RPC override and API key applied.
    pub network: Network,
    /// Effective JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Private key to import (hex, with or without 0x prefix).
    pub private_key: Option<String>,
    /// Explorer API key for the selected network.
    pub api_key: Option<String>,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `NETWORK`: network preset name (default: ethereum)
    /// - `RPC_URL`: overrides the preset RPC endpoint
    /// - `PRIVATE_KEY`: private key of the account to import
    /// - `<NETWORK>_API_KEY`: explorer API key, e.g. `ETHEREUM_API_KEY`
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let name = var("NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.to_string());
        let mut network = Network::by_name(&name)
            .ok_or_else(|| AppError::Config(format!("Unknown network: {}", name)))?;

        if let Some(rpc_url) = var("RPC_URL") {
            network.rpc = rpc_url;
        }

        let api_key = var(&api_key_var(&network.name));
        if let Some(key) = api_key.as_deref() {
            network.set_api_key(key);
        }

        let private_key = var("PRIVATE_KEY");
        let log_level = var("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self { rpc_url: network.rpc.clone(), network, private_key, api_key, log_level })
    }
}

/// Name of the explorer key variable for a network, e.g. `ARBITRUM_NOVA_API_KEY`.
pub fn api_key_var(network: &str) -> String {
    format!("{}_API_KEY", network.to_uppercase())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("network", &self.network.name)
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("log_level", &self.log_level)
            .finish()
    }
}
