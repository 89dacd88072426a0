//! `stats` module endpoints.

use serde_json::Value;

use super::{ClientType, DailyStat, ExplorerClient, Sort, SyncMode};
use crate::error::Result;

const MODULE: &str = "stats";

/// `stats` endpoints. Dates use the `yyyy-MM-dd` format.
pub struct Stats<'a> {
    client: &'a ExplorerClient,
}

impl<'a> Stats<'a> {
    pub(super) fn new(client: &'a ExplorerClient) -> Self {
        Self { client }
    }

    /// Total coin supply.
    pub async fn ethsupply(&self) -> Result<Value> {
        self.client.request(MODULE, "ethsupply", Vec::new()).await
    }

    /// Coin supply including staking rewards and burnt fees.
    pub async fn ethsupply2(&self) -> Result<Value> {
        self.client.request(MODULE, "ethsupply2", Vec::new()).await
    }

    /// Latest coin price.
    pub async fn ethprice(&self) -> Result<Value> {
        self.client.request(MODULE, "ethprice", Vec::new()).await
    }

    /// Chain size in bytes over a date range.
    pub async fn chainsize(
        &self,
        startdate: &str,
        enddate: &str,
        clienttype: ClientType,
        syncmode: SyncMode,
        sort: Sort,
    ) -> Result<Value> {
        let params = vec![
            ("startdate", startdate.into()),
            ("enddate", enddate.into()),
            ("clienttype", clienttype.into()),
            ("syncmode", syncmode.into()),
            ("sort", sort.into()),
        ];
        self.client.request(MODULE, "chainsize", params).await
    }

    /// Number of discoverable nodes.
    pub async fn nodecount(&self) -> Result<Value> {
        self.client.request(MODULE, "nodecount", Vec::new()).await
    }

    /// One of the daily statistics series over a date range.
    pub async fn daily(
        &self,
        stat: DailyStat,
        startdate: &str,
        enddate: &str,
        sort: Sort,
    ) -> Result<Value> {
        let params = vec![
            ("startdate", startdate.into()),
            ("enddate", enddate.into()),
            ("sort", sort.into()),
        ];
        self.client.request(MODULE, stat.as_str(), params).await
    }
}
