//! `account` module endpoints.

use alloy::primitives::{Address, B256};
use serde_json::Value;

use super::{BlockType, ExplorerClient, Sort, Tag};
use crate::{error::Result, http::QueryValue};

const MODULE: &str = "account";

/// Block range, pagination and ordering shared by the list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub startblock: Option<u64>,
    pub endblock: Option<u64>,
    pub page: Option<u64>,
    pub offset: Option<u64>,
    pub sort: Sort,
}

impl ListParams {
    pub fn page(page: u64, offset: u64) -> Self {
        Self { page: Some(page), offset: Some(offset), ..Default::default() }
    }

    fn query(&self) -> Vec<(&'static str, QueryValue)> {
        vec![
            ("startblock", self.startblock.into()),
            ("endblock", self.endblock.into()),
            ("page", self.page.into()),
            ("offset", self.offset.into()),
            ("sort", self.sort.into()),
        ]
    }
}

/// What to list internal transactions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalTxQuery {
    Address(Address),
    TxHash(B256),
    BlockRange { startblock: u64, endblock: u64 },
}

/// `account` endpoints.
pub struct Account<'a> {
    client: &'a ExplorerClient,
}

impl<'a> Account<'a> {
    pub(super) fn new(client: &'a ExplorerClient) -> Self {
        Self { client }
    }

    /// Coin balance of one address.
    pub async fn balance(&self, address: Address, tag: Tag) -> Result<Value> {
        let params = vec![("address", address.into()), ("tag", tag.into())];
        self.client.request(MODULE, "balance", params).await
    }

    /// Coin balances of several addresses.
    pub async fn balancemulti(&self, addresses: &[Address], tag: Tag) -> Result<Value> {
        let params = vec![("address", addresses.into()), ("tag", tag.into())];
        self.client.request(MODULE, "balancemulti", params).await
    }

    /// Normal transactions of an address.
    pub async fn txlist(&self, address: Address, list: ListParams) -> Result<Value> {
        let mut params = vec![("address", address.into())];
        params.extend(list.query());
        self.client.request(MODULE, "txlist", params).await
    }

    /// Internal transactions by address, by transaction hash, or in a block range.
    ///
    /// Pagination and ordering are ignored for hash lookups.
    pub async fn txlistinternal(&self, query: InternalTxQuery, list: ListParams) -> Result<Value> {
        let params = match query {
            InternalTxQuery::Address(address) => {
                let mut params = vec![("address", address.into())];
                params.extend(list.query());
                params
            }
            InternalTxQuery::TxHash(hash) => vec![("txhash", hash.into())],
            InternalTxQuery::BlockRange { startblock, endblock } => {
                let list = ListParams {
                    startblock: Some(startblock),
                    endblock: Some(endblock),
                    ..list
                };
                list.query()
            }
        };
        self.client.request(MODULE, "txlistinternal", params).await
    }

    /// ERC-20 transfers of an address, optionally for one token.
    pub async fn tokentx(
        &self,
        address: Address,
        contract: Option<Address>,
        list: ListParams,
    ) -> Result<Value> {
        self.token_transfers("tokentx", address, contract, list).await
    }

    /// ERC-721 transfers of an address, optionally for one collection.
    pub async fn tokennfttx(
        &self,
        address: Address,
        contract: Option<Address>,
        list: ListParams,
    ) -> Result<Value> {
        self.token_transfers("tokennfttx", address, contract, list).await
    }

    /// ERC-1155 transfers of an address, optionally for one contract.
    pub async fn token1155tx(
        &self,
        address: Address,
        contract: Option<Address>,
        list: ListParams,
    ) -> Result<Value> {
        self.token_transfers("token1155tx", address, contract, list).await
    }

    async fn token_transfers(
        &self,
        action: &str,
        address: Address,
        contract: Option<Address>,
        list: ListParams,
    ) -> Result<Value> {
        let mut params = vec![("address", address.into()), ("contractaddress", contract.into())];
        params.extend(list.query());
        self.client.request(MODULE, action, params).await
    }

    /// Blocks validated by an address.
    pub async fn getminedblocks(
        &self,
        address: Address,
        blocktype: BlockType,
        page: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Value> {
        let params = vec![
            ("address", address.into()),
            ("blocktype", blocktype.into()),
            ("page", page.into()),
            ("offset", offset.into()),
        ];
        self.client.request(MODULE, "getminedblocks", params).await
    }

    /// Historical coin balance at a block.
    pub async fn balancehistory(&self, address: Address, blockno: u64) -> Result<Value> {
        let params = vec![("address", address.into()), ("blockno", blockno.into())];
        self.client.request(MODULE, "balancehistory", params).await
    }

    /// Token balance of an address.
    pub async fn tokenbalance(&self, contract: Address, address: Address) -> Result<Value> {
        let params = vec![("contractaddress", contract.into()), ("address", address.into())];
        self.client.request(MODULE, "tokenbalance", params).await
    }

    /// Historical token balance at a block.
    pub async fn tokenbalancehistory(
        &self,
        contract: Address,
        address: Address,
        blockno: u64,
    ) -> Result<Value> {
        let params = vec![
            ("contractaddress", contract.into()),
            ("address", address.into()),
            ("blockno", blockno.into()),
        ];
        self.client.request(MODULE, "tokenbalancehistory", params).await
    }

    /// ERC-20 holdings of an address.
    pub async fn addresstokenbalance(
        &self,
        address: Address,
        page: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Value> {
        self.holdings("addresstokenbalance", address, page, offset).await
    }

    /// ERC-721 holdings of an address.
    pub async fn addresstokennftbalance(
        &self,
        address: Address,
        page: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Value> {
        self.holdings("addresstokennftbalance", address, page, offset).await
    }

    /// ERC-721 inventory of an address.
    pub async fn addresstokennftinventory(
        &self,
        address: Address,
        page: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Value> {
        self.holdings("addresstokennftinventory", address, page, offset).await
    }

    async fn holdings(
        &self,
        action: &str,
        address: Address,
        page: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Value> {
        let params =
            vec![("address", address.into()), ("page", page.into()), ("offset", offset.into())];
        self.client.request(MODULE, action, params).await
    }
}
