//! Ethereum RPC client.

use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{Transaction, TransactionReceipt, TransactionRequest},
};
use std::{sync::Arc, time::Duration};
use tokio::sync::OnceCell;

use crate::error::{AppError, Result};

/// Type alias for the HTTP provider.
pub type HttpProvider = RootProvider<Ethereum>;

/// Default receipt waiting timeout.
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// Receipt polling interval.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Ethereum RPC client wrapper with lazy initialization.
#[derive(Clone)]
pub struct EthereumClient {
    /// The underlying provider.
    provider: Arc<HttpProvider>,
    /// RPC URL for logging.
    rpc_url: String,
    /// Lazily initialized chain ID.
    chain_id: Arc<OnceCell<u64>>,
}

impl EthereumClient {
    /// Create a new Ethereum client.
    ///
    /// Note: This does NOT make any network calls. The connection is
    /// established lazily when the first operation is performed.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        #[allow(deprecated)]
        let provider = ProviderBuilder::new().connect_http(url).root().clone();

        tracing::info!(rpc_url = %rpc_url, "Ethereum client created (lazy initialization)");

        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: rpc_url.to_string(),
            chain_id: Arc::new(OnceCell::new()),
        })
    }

    /// Seed the chain ID so it is never fetched.
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        // A fresh cell is only ever set here, so the result can be ignored.
        let _ = self.chain_id.set(chain_id);
        self
    }

    /// Get the chain ID (fetches from network on first call).
    pub async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| async {
                let chain_id = self.provider.get_chain_id().await?;
                tracing::info!(
                    chain_id = chain_id,
                    rpc_url = %self.rpc_url,
                    "Connected to Ethereum node"
                );
                Ok(chain_id)
            })
            .await
            .copied()
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Get native coin balance for an address.
    pub async fn get_balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    /// Get the number of transactions sent from an address.
    pub async fn get_transaction_count(&self, address: Address) -> Result<u64> {
        let count = self.provider.get_transaction_count(address).await?;
        Ok(count)
    }

    /// Get the deployed bytecode at an address.
    pub async fn get_code(&self, address: Address) -> Result<Bytes> {
        let code = self.provider.get_code_at(address).await?;
        Ok(code)
    }

    /// Execute a call (simulate transaction without broadcasting).
    pub async fn call(&self, tx: &TransactionRequest) -> Result<Bytes> {
        let result = self.provider.call(tx.clone()).await?;
        Ok(result)
    }

    /// Estimate gas for a transaction.
    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        let gas = self.provider.estimate_gas(tx.clone()).await?;
        Ok(gas)
    }

    /// Get current gas price.
    pub async fn get_gas_price(&self) -> Result<u128> {
        let gas_price = self.provider.get_gas_price().await?;
        Ok(gas_price)
    }

    /// Get a transaction by hash.
    pub async fn get_transaction(&self, hash: B256) -> Result<Transaction> {
        self.provider
            .get_transaction_by_hash(hash)
            .await?
            .ok_or_else(|| AppError::Rpc(format!("Transaction not found: {}", hash)))
    }

    /// Broadcast a signed, EIP-2718 encoded transaction.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256> {
        let pending = self.provider.send_raw_transaction(raw).await?;
        let hash = *pending.tx_hash();
        tracing::info!(tx_hash = %hash, "Transaction broadcast");
        Ok(hash)
    }

    /// Get a receipt if the transaction is mined.
    pub async fn get_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        let receipt = self.provider.get_transaction_receipt(hash).await?;
        Ok(receipt)
    }

    /// Poll for a receipt until it appears or `timeout` elapses.
    pub async fn wait_for_receipt(
        &self,
        hash: B256,
        timeout: Duration,
    ) -> Result<TransactionReceipt> {
        let poll = async {
            loop {
                if let Some(receipt) = self.get_receipt(hash).await? {
                    return Ok::<_, AppError>(receipt);
                }
                tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
            }
        };

        match tokio::time::timeout(timeout, poll).await {
            Ok(result) => result,
            Err(_) => Err(AppError::PendingTransaction(format!(
                "Transaction {} is not in the chain after {} seconds",
                hash,
                timeout.as_secs()
            ))),
        }
    }
}

impl std::fmt::Debug for EthereumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumClient").field("rpc_url", &self.rpc_url).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rpc_url() {
        let result = EthereumClient::new("not a url");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_seeded_chain_id_skips_network() {
        // Nothing listens on this port; a network call would fail.
        let client = EthereumClient::new("http://127.0.0.1:1").unwrap().with_chain_id(5);
        assert_eq!(client.chain_id().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_unreachable_node_is_transport_error() {
        let client = EthereumClient::new("http://127.0.0.1:1").unwrap();
        let result = client.get_gas_price().await;
        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_wait_for_receipt_times_out() {
        let client = EthereumClient::new("http://127.0.0.1:1").unwrap();
        let result = client.wait_for_receipt(B256::ZERO, Duration::from_millis(1)).await;
        // Either the poll fails fast on transport or the timeout fires.
        assert!(matches!(
            result,
            Err(AppError::PendingTransaction(_)) | Err(AppError::Transport(_))
        ));
    }

    #[test]
    fn test_debug_shows_rpc_url() {
        let client = EthereumClient::new("http://localhost:8545").unwrap();
        assert!(format!("{:?}", client).contains("localhost:8545"));
    }
}
