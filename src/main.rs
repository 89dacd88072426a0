//! eth-async
//!
//! Prints the configured account's address, coin balance and nonce.

use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eth_async::{AccountSource, Client, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(network = %config.network.name, "Starting eth-async");

    let client = match config.private_key.as_ref() {
        Some(_) => Client::from_config(&config)?,
        None => {
            tracing::warn!("PRIVATE_KEY not set, using a generated account");
            Client::new(config.network.clone(), AccountSource::Generate)?
        }
    };

    let balance = client.wallet.coin_balance(None).await?;
    let nonce = client.wallet.nonce(None).await?;

    let report = json!({
        "network": client.network.name,
        "address": client.address(),
        "balance_wei": balance.wei().to_string(),
        "balance": balance.ether()?.normalize().to_string(),
        "coin_symbol": client.network.coin_symbol,
        "nonce": nonce,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
