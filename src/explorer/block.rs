//! `block` module endpoints.

use serde_json::Value;

use super::{Closest, ExplorerClient};
use crate::error::Result;

const MODULE: &str = "block";

/// `block` endpoints.
pub struct Block<'a> {
    client: &'a ExplorerClient,
}

impl<'a> Block<'a> {
    pub(super) fn new(client: &'a ExplorerClient) -> Self {
        Self { client }
    }

    pub async fn getblockreward(&self, blockno: u64) -> Result<Value> {
        self.client.request(MODULE, "getblockreward", vec![("blockno", blockno.into())]).await
    }

    /// Estimated time until a future block.
    pub async fn getblockcountdown(&self, blockno: u64) -> Result<Value> {
        self.client.request(MODULE, "getblockcountdown", vec![("blockno", blockno.into())]).await
    }

    /// Block number closest to a unix timestamp.
    pub async fn getblocknobytime(&self, timestamp: u64, closest: Closest) -> Result<Value> {
        let params = vec![("timestamp", timestamp.into()), ("closest", closest.into())];
        self.client.request(MODULE, "getblocknobytime", params).await
    }
}
