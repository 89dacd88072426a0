//! Common utilities for integration tests.

use eth_async::{AccountSource, Client, Config};

#[allow(dead_code)]
pub mod node;

/// Helper to create a test client from environment variables.
///
/// Requires `RPC_URL`; `PRIVATE_KEY` is optional and a read-only client is
/// built without it.
pub fn create_test_client() -> Option<Client> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let rpc_url = std::env::var("RPC_URL").ok()?;
    if rpc_url.is_empty() {
        return None;
    }

    let config = Config::from_env().ok()?;
    Client::from_config(&config).ok()
}

/// Helper to create a client with an imported account.
#[allow(dead_code)]
pub fn create_test_client_with_account() -> Option<Client> {
    let client = create_test_client()?;
    client.account.as_ref()?;
    Some(client)
}

/// Helper to create a read-only client for the configured network.
#[allow(dead_code)]
pub fn create_read_only_client() -> Option<Client> {
    let client = create_test_client()?;
    Client::new(client.network.clone(), AccountSource::None).ok()
}

/// Skip test if client cannot be created (missing env vars).
#[macro_export]
macro_rules! skip_if_no_client {
    () => {
        match common::create_test_client() {
            Some(client) => client,
            None => {
                eprintln!("Skipping test: RPC_URL not set");
                return;
            }
        }
    };
    (account) => {
        match common::create_test_client_with_account() {
            Some(client) => client,
            None => {
                eprintln!("Skipping test: RPC_URL or PRIVATE_KEY not set");
                return;
            }
        }
    };
}
