//! `gastracker` module endpoints.

use serde_json::Value;

use super::ExplorerClient;
use crate::error::Result;

const MODULE: &str = "gastracker";

/// `gastracker` endpoints.
pub struct GasTracker<'a> {
    client: &'a ExplorerClient,
}

impl<'a> GasTracker<'a> {
    pub(super) fn new(client: &'a ExplorerClient) -> Self {
        Self { client }
    }

    /// Estimated confirmation time in seconds for a gas price in wei.
    pub async fn gasestimate(&self, gasprice: u64) -> Result<Value> {
        self.client.request(MODULE, "gasestimate", vec![("gasprice", gasprice.into())]).await
    }

    /// Safe, proposed and fast gas prices.
    pub async fn gasoracle(&self) -> Result<Value> {
        self.client.request(MODULE, "gasoracle", Vec::new()).await
    }
}
