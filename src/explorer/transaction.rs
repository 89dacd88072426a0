//! `transaction` module endpoints.

use alloy::primitives::B256;
use serde_json::Value;

use super::ExplorerClient;
use crate::error::Result;

const MODULE: &str = "transaction";

/// `transaction` endpoints.
pub struct Transaction<'a> {
    client: &'a ExplorerClient,
}

impl<'a> Transaction<'a> {
    pub(super) fn new(client: &'a ExplorerClient) -> Self {
        Self { client }
    }

    /// Contract execution status.
    pub async fn getstatus(&self, txhash: B256) -> Result<Value> {
        self.client.request(MODULE, "getstatus", vec![("txhash", txhash.into())]).await
    }

    /// Receipt status (post-Byzantium transactions only).
    pub async fn gettxreceiptstatus(&self, txhash: B256) -> Result<Value> {
        self.client.request(MODULE, "gettxreceiptstatus", vec![("txhash", txhash.into())]).await
    }
}
