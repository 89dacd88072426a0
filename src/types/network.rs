//! Network descriptions and the built-in presets.

use alloy::primitives::{address, Address};
use serde::Deserialize;

use crate::{error::Result, ethereum::EthereumClient, http::HttpClient};

/// Public list of EVM chains with their native currencies.
pub const CHAIN_LIST_URL: &str = "https://chainid.network/chains.json";

/// Legacy transactions (`gasPrice`).
pub const TX_TYPE_LEGACY: u8 = 0;

/// EIP-1559 transactions.
pub const TX_TYPE_EIP1559: u8 = 2;

/// Block explorer API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerApi {
    /// API key; empty when not configured.
    pub key: String,
    /// API entrypoint URL.
    pub url: String,
    /// Documentation URL.
    pub docs: String,
}

impl ExplorerApi {
    pub fn new(url: &str, docs: &str) -> Self {
        Self { key: String::new(), url: url.to_string(), docs: docs.to_string() }
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }
}

/// A DEX deployed on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dex {
    pub name: String,
    pub factory: Option<Address>,
    pub router: Option<Address>,
}

impl Dex {
    pub fn new(name: &str, factory: Option<Address>, router: Option<Address>) -> Self {
        Self { name: name.to_string(), factory, router }
    }
}

/// An EVM network the client talks to.
#[derive(Debug, Clone)]
pub struct Network {
    /// Lowercase network name.
    pub name: String,
    /// JSON-RPC endpoint.
    pub rpc: String,
    /// Chain ID; resolved from the node when `None`.
    pub chain_id: Option<u64>,
    /// Main transaction type, [`TX_TYPE_LEGACY`] or [`TX_TYPE_EIP1559`].
    pub tx_type: u8,
    /// Uppercase native coin symbol.
    pub coin_symbol: Option<String>,
    /// Block explorer URL.
    pub explorer: Option<String>,
    /// Block explorer API.
    pub api: Option<ExplorerApi>,
    pub dex: Option<Dex>,
}

impl Network {
    /// Create a custom network. Missing fields can be filled with [`Network::resolve`].
    pub fn new(name: &str, rpc: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            rpc: rpc.to_string(),
            chain_id: None,
            tx_type: TX_TYPE_LEGACY,
            coin_symbol: None,
            explorer: None,
            api: None,
            dex: None,
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_tx_type(mut self, tx_type: u8) -> Self {
        self.tx_type = tx_type;
        self
    }

    pub fn with_coin_symbol(mut self, symbol: &str) -> Self {
        self.coin_symbol = Some(symbol.to_uppercase());
        self
    }

    pub fn with_explorer(mut self, explorer: &str) -> Self {
        self.explorer = Some(explorer.to_string());
        self
    }

    pub fn with_api(mut self, api: ExplorerApi) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_dex(mut self, dex: Dex) -> Self {
        self.dex = Some(dex);
        self
    }

    /// Set the explorer API key, if the network has an explorer API.
    pub fn set_api_key(&mut self, key: &str) {
        if let Some(api) = self.api.as_mut() {
            api.key = key.to_string();
        }
    }

    /// The explorer API when a key is configured.
    pub fn keyed_api(&self) -> Option<&ExplorerApi> {
        self.api.as_ref().filter(|api| api.has_key())
    }

    /// Whether both networks have the same chain ID.
    pub fn same_chain(&self, other: &Network) -> bool {
        self.chain_id == other.chain_id
    }

    /// Fill in a missing chain ID from the node and a missing coin symbol
    /// from the public chain list. Lookup failures are logged and skipped.
    pub async fn resolve(&mut self, client: &EthereumClient, http: &HttpClient) {
        if self.chain_id.is_none() {
            match client.chain_id().await {
                Ok(chain_id) => self.chain_id = Some(chain_id),
                Err(e) => {
                    tracing::warn!(network = %self.name, error = %e, "Failed to fetch chain ID")
                }
            }
        }

        if self.coin_symbol.is_none() {
            if let Some(chain_id) = self.chain_id {
                match fetch_coin_symbol(http, CHAIN_LIST_URL, chain_id).await {
                    Ok(symbol) => self.coin_symbol = symbol,
                    Err(e) => {
                        tracing::warn!(
                            chain_id = chain_id,
                            error = %e,
                            "Failed to fetch coin symbol"
                        )
                    }
                }
            }
        }

        if let Some(symbol) = self.coin_symbol.as_mut() {
            *symbol = symbol.to_uppercase();
        }
    }

    /// Look up a preset by name (case-insensitive, `-` and `_` are equivalent).
    pub fn by_name(name: &str) -> Option<Network> {
        let key = name.to_lowercase().replace('-', "_");
        Self::presets().into_iter().find(|n| n.name == key)
    }

    /// All built-in presets.
    pub fn presets() -> Vec<Network> {
        vec![
            Self::ethereum(),
            Self::arbitrum(),
            Self::arbitrum_nova(),
            Self::optimism(),
            Self::bsc(),
            Self::polygon(),
            Self::avalanche(),
            Self::moonbeam(),
            Self::fantom(),
            Self::celo(),
            Self::gnosis(),
            Self::heco(),
            Self::goerli(),
            Self::sepolia(),
        ]
    }

    // ------------------------------------------------------------------------
    // Mainnets
    // ------------------------------------------------------------------------

    pub fn ethereum() -> Self {
        Self::new("ethereum", "https://rpc.ankr.com/eth/")
            .with_chain_id(1)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("ETH")
            .with_explorer("https://etherscan.io/")
            .with_api(ExplorerApi::new(
                "https://api.etherscan.io/api",
                "https://docs.etherscan.io/",
            ))
            .with_dex(Dex::new(
                "uniswap_v2",
                Some(address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f")),
                Some(address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D")),
            ))
    }

    pub fn arbitrum() -> Self {
        Self::new("arbitrum", "https://rpc.ankr.com/arbitrum/")
            .with_chain_id(42161)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("ETH")
            .with_explorer("https://arbiscan.io/")
            .with_api(ExplorerApi::new("https://api.arbiscan.io/api", "https://docs.arbiscan.io/"))
            .with_dex(Dex::new(
                "uniswap_v3",
                Some(address!("1F98431c8aD98523631AE4a59f267346ea31F984")),
                Some(address!("E592427A0AEce92De3Edee1F18E0157C05861564")),
            ))
    }

    pub fn arbitrum_nova() -> Self {
        Self::new("arbitrum_nova", "https://nova.arbitrum.io/rpc/")
            .with_chain_id(42170)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("ETH")
            .with_explorer("https://nova.arbiscan.io/")
            .with_api(ExplorerApi::new(
                "https://api-nova.arbiscan.io/api",
                "https://nova.arbiscan.io/apis/",
            ))
    }

    pub fn optimism() -> Self {
        Self::new("optimism", "https://rpc.ankr.com/optimism/")
            .with_chain_id(10)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("ETH")
            .with_explorer("https://optimistic.etherscan.io/")
            .with_api(ExplorerApi::new(
                "https://api-optimistic.etherscan.io/api",
                "https://docs.optimism.etherscan.io/",
            ))
            .with_dex(Dex::new(
                "uniswap_v3",
                None,
                Some(address!("E592427A0AEce92De3Edee1F18E0157C05861564")),
            ))
    }

    pub fn bsc() -> Self {
        Self::new("bsc", "https://rpc.ankr.com/bsc/")
            .with_chain_id(56)
            .with_tx_type(TX_TYPE_LEGACY)
            .with_coin_symbol("BNB")
            .with_explorer("https://bscscan.com/")
            .with_api(ExplorerApi::new("https://api.bscscan.com/api", "https://docs.bscscan.com/"))
            .with_dex(Dex::new(
                "pancakeswap",
                Some(address!("cA143Ce32Fe78f1f7019d7d551a6402fC5350c73")),
                Some(address!("10ED43C718714eb63d5aA57B78B54704E256024E")),
            ))
    }

    pub fn polygon() -> Self {
        Self::new("polygon", "https://rpc.ankr.com/polygon/")
            .with_chain_id(137)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("MATIC")
            .with_explorer("https://polygonscan.com/")
            .with_api(ExplorerApi::new(
                "https://api.polygonscan.com/api",
                "https://docs.polygonscan.com/",
            ))
            .with_dex(Dex::new(
                "quickswap",
                Some(address!("5757371414417b8C6CAad45bAeF941aBc7d3Ab32")),
                Some(address!("a5E0829CaCEd8fFDD4De3c43696c57F7D7A678ff")),
            ))
    }

    pub fn avalanche() -> Self {
        Self::new("avalanche", "https://rpc.ankr.com/avalanche/")
            .with_chain_id(43114)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("AVAX")
            .with_explorer("https://snowtrace.io/")
            .with_api(ExplorerApi::new(
                "https://api.snowtrace.io/api",
                "https://docs.snowtrace.io/",
            ))
    }

    pub fn moonbeam() -> Self {
        Self::new("moonbeam", "https://rpc.api.moonbeam.network/")
            .with_chain_id(1284)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("GLMR")
            .with_explorer("https://moonscan.io/")
            .with_api(ExplorerApi::new(
                "https://api-moonbeam.moonscan.io/api",
                "https://moonscan.io/apis/",
            ))
    }

    pub fn fantom() -> Self {
        Self::new("fantom", "https://rpc.ankr.com/fantom/")
            .with_chain_id(250)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("FTM")
            .with_explorer("https://ftmscan.com/")
            .with_api(ExplorerApi::new("https://api.ftmscan.com/api", "https://docs.ftmscan.com/"))
    }

    pub fn celo() -> Self {
        Self::new("celo", "https://rpc.ankr.com/celo/")
            .with_chain_id(42220)
            .with_tx_type(TX_TYPE_LEGACY)
            .with_coin_symbol("CELO")
            .with_explorer("https://celoscan.io/")
            .with_api(ExplorerApi::new("https://api.celoscan.io/api", "https://celoscan.io/apis/"))
    }

    pub fn gnosis() -> Self {
        Self::new("gnosis", "https://rpc.ankr.com/gnosis/")
            .with_chain_id(100)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("xDAI")
            .with_explorer("https://gnosisscan.io/")
            .with_api(ExplorerApi::new(
                "https://api.gnosisscan.io/api",
                "https://docs.gnosisscan.io/",
            ))
    }

    pub fn heco() -> Self {
        Self::new("heco", "https://http-mainnet.hecochain.com/")
            .with_chain_id(128)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("HT")
            .with_explorer("https://hecoinfo.com/")
            .with_api(ExplorerApi::new("https://api.hecoinfo.com/api", "https://hecoinfo.com/apis"))
    }

    // ------------------------------------------------------------------------
    // Testnets
    // ------------------------------------------------------------------------

    pub fn goerli() -> Self {
        Self::new("goerli", "https://rpc.ankr.com/eth_goerli/")
            .with_chain_id(5)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("ETH")
            .with_explorer("https://goerli.etherscan.io/")
            .with_api(ExplorerApi::new(
                "https://api-goerli.etherscan.io/api",
                "https://docs.etherscan.io/v/goerli-etherscan/",
            ))
    }

    pub fn sepolia() -> Self {
        Self::new("sepolia", "https://rpc.ankr.com/eth_sepolia/")
            .with_chain_id(11155111)
            .with_tx_type(TX_TYPE_EIP1559)
            .with_coin_symbol("ETH")
            .with_explorer("https://sepolia.etherscan.io/")
            .with_api(ExplorerApi::new(
                "https://api-sepolia.etherscan.io/api",
                "https://docs.etherscan.io/v/sepolia-etherscan/",
            ))
    }
}

#[derive(Debug, Deserialize)]
struct ChainListEntry {
    #[serde(rename = "chainId")]
    chain_id: u64,
    #[serde(rename = "nativeCurrency")]
    native_currency: Option<NativeCurrency>,
}

#[derive(Debug, Deserialize)]
struct NativeCurrency {
    symbol: String,
}

/// Look up the native coin symbol of `chain_id` in a chain list.
///
/// Returns `Ok(None)` when the chain is not listed.
pub async fn fetch_coin_symbol(
    http: &HttpClient,
    chain_list_url: &str,
    chain_id: u64,
) -> Result<Option<String>> {
    let chains: Vec<ChainListEntry> = http.get_json(chain_list_url, &[]).await?;
    Ok(chains
        .into_iter()
        .find(|c| c.chain_id == chain_id)
        .and_then(|c| c.native_currency)
        .map(|c| c.symbol))
}
