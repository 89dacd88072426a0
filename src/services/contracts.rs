//! Contract ABI discovery and typed contract handles.

use std::{sync::Arc, time::Duration};

use alloy::{
    json_abi::{Function, JsonAbi},
    primitives::Address,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    abi::{self, SignatureDirectory},
    error::{AppError, Result},
    ethereum::{
        contracts::{IERC20, IERC721},
        EthereumClient, HttpProvider,
    },
    explorer::ExplorerClient,
    types::{functions_of, FunctionInfo, RawContract},
};

/// Lookups per selector before giving up on it.
pub const SIGNATURE_LOOKUP_ATTEMPTS: usize = 3;

/// Pause between failed signature lookups.
pub const SIGNATURE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Service for contract introspection.
#[derive(Clone)]
pub struct ContractService {
    client: Arc<EthereumClient>,
    explorer: Option<ExplorerClient>,
    directory: Arc<dyn SignatureDirectory>,
}

impl ContractService {
    /// Create a new contract service. `explorer` is only used when it has a key.
    pub fn new(
        client: Arc<EthereumClient>,
        explorer: Option<ExplorerClient>,
        directory: Arc<dyn SignatureDirectory>,
    ) -> Self {
        let explorer = explorer.filter(ExplorerClient::has_key);
        Self { client, explorer, directory }
    }

    /// Text signatures matching a `0x`-prefixed selector, oldest first.
    pub async fn get_signature(&self, hex_selector: &str) -> Option<Vec<String>> {
        self.directory.lookup(hex_selector).await
    }

    /// Build an ABI function from a text signature.
    pub fn parse_function(&self, text_signature: &str) -> Result<Function> {
        abi::parse_function(text_signature)
    }

    /// The ABI of a contract.
    ///
    /// Uses the explorer when a key is configured. Otherwise, or when the
    /// explorer has no ABI, the function list is recovered from the bytecode.
    /// Recovered ABIs may be incomplete and declare `uint256` outputs.
    pub async fn get_abi(&self, address: Address) -> Result<JsonAbi> {
        if let Some(abi) = self.explorer_abi(address).await {
            return Ok(abi);
        }

        let code = self.client.get_code(address).await?;
        let selectors = abi::selectors_from_bytecode(&code);
        debug!(contract = %address, selectors = selectors.len(), "Recovering ABI from bytecode");

        let abi =
            abi_from_selectors(self.directory.as_ref(), &selectors, SIGNATURE_RETRY_DELAY).await;
        info!(contract = %address, functions = abi.functions.len(), "Recovered ABI from bytecode");
        Ok(abi)
    }

    /// The ABI of a contract as JSON text.
    pub async fn get_abi_json(&self, address: Address) -> Result<String> {
        let abi = self.get_abi(address).await?;
        Ok(serde_json::to_string(&abi)?)
    }

    async fn explorer_abi(&self, address: Address) -> Option<JsonAbi> {
        let explorer = self.explorer.as_ref()?;

        let response = match explorer.contract().getabi(address).await {
            Ok(response) => response,
            Err(e) => {
                warn!(contract = %address, error = %e, "Explorer ABI lookup failed");
                return None;
            }
        };

        let text = response.get("result").and_then(Value::as_str)?;
        match serde_json::from_str::<JsonAbi>(text) {
            Ok(abi) if !abi.is_empty() => Some(abi),
            Ok(_) => None,
            Err(e) => {
                warn!(contract = %address, error = %e, "Explorer returned an invalid ABI");
                None
            }
        }
    }

    /// Typed handle with the default token interface.
    pub fn default_token(&self, address: Address) -> IERC20::IERC20Instance<HttpProvider> {
        IERC20::new(address, self.client.provider().clone())
    }

    /// Typed handle with the default NFT interface.
    pub fn default_nft(&self, address: Address) -> IERC721::IERC721Instance<HttpProvider> {
        IERC721::new(address, self.client.provider().clone())
    }

    /// A contract with its ABI.
    ///
    /// Without an explicit ABI it is fetched for `proxy` when given (the ABI
    /// lives with the implementation), else for `address` itself.
    pub async fn get(
        &self,
        address: Address,
        abi: Option<JsonAbi>,
        proxy: Option<Address>,
    ) -> Result<RawContract> {
        let abi = match abi {
            Some(abi) => abi,
            None => self.get_abi(proxy.unwrap_or(address)).await?,
        };
        Ok(RawContract::new(address, abi))
    }

    /// The functions of a contract in human-readable form.
    pub async fn get_functions(&self, address: Address) -> Result<Vec<FunctionInfo>> {
        let contract = self.get(address, None, None).await?;
        Ok(functions_of(&contract.abi))
    }
}

/// Resolve selectors to functions through `directory`.
///
/// Failed lookups are retried up to [`SIGNATURE_LOOKUP_ATTEMPTS`] times; the
/// oldest matching signature wins. Unresolvable selectors are skipped.
pub async fn abi_from_selectors(
    directory: &dyn SignatureDirectory,
    selectors: &[String],
    retry_delay: Duration,
) -> JsonAbi {
    let mut abi = JsonAbi::new();

    for selector in selectors {
        let mut signatures = None;
        for attempt in 1..=SIGNATURE_LOOKUP_ATTEMPTS {
            signatures = directory.lookup(selector).await;
            if signatures.is_some() {
                break;
            }
            if attempt < SIGNATURE_LOOKUP_ATTEMPTS {
                tokio::time::sleep(retry_delay).await;
            }
        }

        let Some(text_signature) = signatures.and_then(|s| s.into_iter().next()) else {
            debug!(selector = %selector, "No signature found");
            continue;
        };

        match abi::parse_function(&text_signature) {
            Ok(function) => {
                abi.functions.entry(function.name.clone()).or_default().push(function);
            }
            Err(e) => warn!(signature = %text_signature, error = %e, "Unparseable signature"),
        }
    }

    abi
}

/// Parse an ABI given as JSON text.
pub fn parse_abi(text: &str) -> Result<JsonAbi> {
    serde_json::from_str(text).map_err(|e| AppError::Contract(format!("Invalid ABI JSON: {}", e)))
}
