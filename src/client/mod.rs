//! The client that ties one network, one optional account and all services together.

use alloy::primitives::Address;
use std::sync::Arc;

use crate::{
    abi::{FourByteDirectory, SignatureDirectory},
    config::Config,
    error::Result,
    ethereum::{EthereumClient, WalletManager},
    explorer::ExplorerClient,
    http::HttpClient,
    services::{ContractService, NftService, TransactionService, WalletService},
    types::Network,
};

/// Where the client's account comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum AccountSource {
    /// Import a hex private key.
    Import(String),
    /// Generate a fresh random key.
    Generate,
    /// Read-only client without an account.
    None,
}

impl std::fmt::Debug for AccountSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountSource::Import(_) => f.write_str("Import(<redacted>)"),
            AccountSource::Generate => f.write_str("Generate"),
            AccountSource::None => f.write_str("None"),
        }
    }
}

/// Entry point for all operations on one network.
#[derive(Clone)]
pub struct Client {
    pub network: Network,
    pub account: Option<WalletManager>,
    pub explorer: Option<ExplorerClient>,
    pub wallet: WalletService,
    pub contracts: ContractService,
    pub nfts: NftService,
    pub transactions: TransactionService,
    ethereum: Arc<EthereumClient>,
    http: HttpClient,
}

impl Client {
    /// Create a client. No network calls are made until the first operation.
    pub fn new(network: Network, account: AccountSource) -> Result<Self> {
        let http = HttpClient::new()?;
        let directory: Arc<dyn SignatureDirectory> = Arc::new(FourByteDirectory::new(http.clone()));
        Self::with_directory(network, account, http, directory)
    }

    /// Create a client with a custom signature directory.
    pub fn with_directory(
        network: Network,
        account: AccountSource,
        http: HttpClient,
        directory: Arc<dyn SignatureDirectory>,
    ) -> Result<Self> {
        let mut ethereum = EthereumClient::new(&network.rpc)?;
        if let Some(chain_id) = network.chain_id {
            ethereum = ethereum.with_chain_id(chain_id);
        }
        let ethereum = Arc::new(ethereum);

        let account = match account {
            AccountSource::Import(key) => Some(WalletManager::from_private_key(&key)?),
            AccountSource::Generate => Some(WalletManager::generate()),
            AccountSource::None => None,
        };

        let explorer = network.api.as_ref().map(|api| ExplorerClient::from_api(api, http.clone()));

        let wallet = WalletService::new(ethereum.clone(), account.clone());
        let contracts = ContractService::new(ethereum.clone(), explorer.clone(), directory);
        let nfts = NftService::new(ethereum.clone(), http.clone());
        let transactions = TransactionService::new(
            ethereum.clone(),
            account.clone(),
            wallet.clone(),
            explorer.clone(),
        );

        tracing::info!(
            network = %network.name,
            rpc_url = %network.rpc,
            account = ?account.as_ref().map(WalletManager::address),
            explorer_key = explorer.as_ref().is_some_and(ExplorerClient::has_key),
            "Client created"
        );

        Ok(Self {
            network,
            account,
            explorer,
            wallet,
            contracts,
            nfts,
            transactions,
            ethereum,
            http,
        })
    }

    /// Create a client from configuration; imports the configured key if any.
    pub fn from_config(config: &Config) -> Result<Self> {
        let account = match &config.private_key {
            Some(key) => AccountSource::Import(key.clone()),
            None => AccountSource::None,
        };
        Self::new(config.network.clone(), account)
    }

    /// Address of the imported account.
    pub fn address(&self) -> Option<Address> {
        self.account.as_ref().map(WalletManager::address)
    }

    /// The underlying RPC client.
    pub fn ethereum(&self) -> &Arc<EthereumClient> {
        &self.ethereum
    }

    /// Fill in the network's chain ID and coin symbol when they are unknown.
    pub async fn resolve_network(&mut self) {
        self.network.resolve(&self.ethereum, &self.http).await;
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("network", &self.network.name)
            .field("account", &self.account)
            .field("ethereum", &self.ethereum)
            .finish()
    }
}
