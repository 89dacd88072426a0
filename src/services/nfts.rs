//! NFT collection and token lookups.

use alloy::primitives::{Address, U256};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::{contracts::IERC721, EthereumClient},
    http::HttpClient,
    types::{
        nft::{decode_data_uri, is_data_uri, resolve_ipfs},
        Nft,
    },
};

/// Service for NFT metadata.
#[derive(Clone)]
pub struct NftService {
    client: Arc<EthereumClient>,
    http: HttpClient,
}

impl NftService {
    /// Create a new NFT service.
    pub fn new(client: Arc<EthereumClient>, http: HttpClient) -> Self {
        Self { client, http }
    }

    /// Collection name, symbol and total supply, plus owner, image and
    /// attributes when `token_id` is given.
    ///
    /// A token ID at or above the total supply is an error. Owner and
    /// metadata failures are logged and leave those fields empty.
    pub async fn get_info(&self, contract: Address, token_id: Option<U256>) -> Result<Nft> {
        let instance = IERC721::new(contract, self.client.provider().clone());

        let mut nft = Nft::new(contract);
        nft.name = Some(instance.name().call().await?);
        nft.symbol = Some(instance.symbol().call().await?);
        let total_supply = instance.totalSupply().call().await?;
        nft.total_supply = Some(total_supply);

        let Some(token_id) = token_id else {
            return Ok(nft);
        };

        if token_id >= total_supply {
            return Err(AppError::Nft(format!(
                "Token ID {} exceeds total supply {}",
                token_id, total_supply
            )));
        }
        nft.id = Some(token_id);

        match instance.ownerOf(token_id).call().await {
            Ok(owner) => nft.owner = Some(owner),
            Err(e) => tracing::warn!(
                contract = %contract,
                token_id = %token_id,
                error = %e,
                "Failed to fetch owner"
            ),
        }

        let uri = match instance.tokenURI(token_id).call().await {
            Ok(uri) => uri,
            Err(e) => {
                tracing::warn!(
                    contract = %contract,
                    token_id = %token_id,
                    error = %e,
                    "Failed to fetch token URI"
                );
                return Ok(nft);
            }
        };

        match self.metadata(&mut nft, &uri).await {
            Ok(metadata) => nft.parse_attributes(&metadata),
            Err(e) => tracing::warn!(uri = %uri, error = %e, "Failed to load NFT metadata"),
        }

        Ok(nft)
    }

    /// Load the metadata document behind a token URI.
    ///
    /// Sets the image URL to the resolved URI when the metadata is remote.
    async fn metadata(&self, nft: &mut Nft, uri: &str) -> Result<Value> {
        if is_data_uri(uri) {
            return decode_data_uri(uri);
        }

        let url = resolve_ipfs(uri);
        nft.image_url = Some(url.clone());
        self.http.get_value(&url).await
    }
}
