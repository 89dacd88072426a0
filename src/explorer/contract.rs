//! `contract` module endpoints.

use alloy::primitives::Address;
use serde_json::Value;

use super::ExplorerClient;
use crate::error::Result;

const MODULE: &str = "contract";

/// `contract` endpoints.
pub struct Contract<'a> {
    client: &'a ExplorerClient,
}

impl<'a> Contract<'a> {
    pub(super) fn new(client: &'a ExplorerClient) -> Self {
        Self { client }
    }

    /// Published ABI of a verified contract, as a JSON string in `result`.
    pub async fn getabi(&self, address: Address) -> Result<Value> {
        self.client.request(MODULE, "getabi", vec![("address", address.into())]).await
    }

    /// Verified source code and compiler settings.
    pub async fn getsourcecode(&self, address: Address) -> Result<Value> {
        self.client.request(MODULE, "getsourcecode", vec![("address", address.into())]).await
    }

    /// Creator addresses and creation transactions.
    pub async fn getcontractcreation(&self, addresses: &[Address]) -> Result<Value> {
        let params = vec![("contractaddresses", addresses.into())];
        self.client.request(MODULE, "getcontractcreation", params).await
    }
}
