//! `token` module endpoints.

use alloy::primitives::Address;
use serde_json::Value;

use super::ExplorerClient;
use crate::error::Result;

const MODULE: &str = "token";

/// Supply endpoints are served by the `stats` module.
const SUPPLY_MODULE: &str = "stats";

/// `token` endpoints.
pub struct Token<'a> {
    client: &'a ExplorerClient,
}

impl<'a> Token<'a> {
    pub(super) fn new(client: &'a ExplorerClient) -> Self {
        Self { client }
    }

    /// Holders of a token and their balances.
    pub async fn tokenholderlist(
        &self,
        contract: Address,
        page: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Value> {
        let params = vec![
            ("contractaddress", contract.into()),
            ("page", page.into()),
            ("offset", offset.into()),
        ];
        self.client.request(MODULE, "tokenholderlist", params).await
    }

    /// Project information and social links of a token.
    pub async fn tokeninfo(&self, contract: Address) -> Result<Value> {
        self.client.request(MODULE, "tokeninfo", vec![("contractaddress", contract.into())]).await
    }

    /// Current total supply of a token.
    pub async fn tokensupply(&self, contract: Address) -> Result<Value> {
        let params = vec![("contractaddress", contract.into())];
        self.client.request(SUPPLY_MODULE, "tokensupply", params).await
    }

    /// Total supply of a token at a block.
    pub async fn tokensupplyhistory(&self, contract: Address, blockno: u64) -> Result<Value> {
        let params = vec![("contractaddress", contract.into()), ("blockno", blockno.into())];
        self.client.request(SUPPLY_MODULE, "tokensupplyhistory", params).await
    }
}
