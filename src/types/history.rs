//! Transaction history records as returned by block explorers.
//!
//! Explorers encode every number as a decimal string, so the records use
//! small deserializer helpers instead of the default numeric impls.

use std::collections::HashMap;

use alloy::primitives::{Address, B256, U256};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

mod de {
    use super::*;

    pub fn u64_str<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u64, D::Error> {
        let s = String::deserialize(d)?;
        if s.is_empty() {
            return Ok(0);
        }
        s.parse().map_err(serde::de::Error::custom)
    }

    pub fn u256_str<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<U256, D::Error> {
        let s = String::deserialize(d)?;
        if s.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::from_str_radix(&s, 10).map_err(serde::de::Error::custom)
    }

    pub fn flag_str<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
        let s = String::deserialize(d)?;
        Ok(s == "1")
    }

    pub fn opt_address<'de, D: Deserializer<'de>>(
        d: D,
    ) -> std::result::Result<Option<Address>, D::Error> {
        let s = Option::<String>::deserialize(d)?.unwrap_or_default();
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some).map_err(serde::de::Error::custom)
    }
}

/// Common view over the history record kinds.
pub trait HistoryTx {
    fn hash(&self) -> B256;
    fn from(&self) -> Address;
    fn to(&self) -> Option<Address>;
}

macro_rules! impl_history_tx {
    ($($ty:ty),*) => {
        $(impl HistoryTx for $ty {
            fn hash(&self) -> B256 {
                self.hash
            }

            fn from(&self) -> Address {
                self.from
            }

            fn to(&self) -> Option<Address> {
                self.to
            }
        })*
    };
}

/// A normal (coin) transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinTx {
    pub hash: B256,
    pub from: Address,
    #[serde(deserialize_with = "de::opt_address")]
    pub to: Option<Address>,
    #[serde(default, deserialize_with = "de::opt_address")]
    pub contract_address: Option<Address>,
    #[serde(deserialize_with = "de::u256_str")]
    pub value: U256,
    #[serde(default)]
    pub method_id: String,
    #[serde(default)]
    pub function_name: String,
    #[serde(deserialize_with = "de::flag_str")]
    pub is_error: bool,
    #[serde(deserialize_with = "de::u64_str")]
    pub block_number: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub time_stamp: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub nonce: u64,
    pub block_hash: B256,
    #[serde(deserialize_with = "de::u64_str")]
    pub transaction_index: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub gas: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub gas_used: u64,
    #[serde(deserialize_with = "de::u256_str")]
    pub gas_price: U256,
    #[serde(rename = "txreceipt_status", default)]
    pub tx_receipt_status: String,
    pub input: String,
    #[serde(deserialize_with = "de::u64_str")]
    pub cumulative_gas_used: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub confirmations: u64,
}

/// An internal (message call) transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTx {
    pub hash: B256,
    pub from: Address,
    #[serde(deserialize_with = "de::opt_address")]
    pub to: Option<Address>,
    #[serde(default, deserialize_with = "de::opt_address")]
    pub contract_address: Option<Address>,
    #[serde(deserialize_with = "de::u256_str")]
    pub value: U256,
    #[serde(deserialize_with = "de::flag_str")]
    pub is_error: bool,
    #[serde(default)]
    pub err_code: String,
    #[serde(deserialize_with = "de::u64_str")]
    pub block_number: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub time_stamp: u64,
    #[serde(default)]
    pub input: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "de::u64_str")]
    pub gas: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub gas_used: u64,
    #[serde(default)]
    pub trace_id: String,
}

/// An ERC-20 token transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Tx {
    pub hash: B256,
    pub from: Address,
    #[serde(deserialize_with = "de::opt_address")]
    pub to: Option<Address>,
    #[serde(default, deserialize_with = "de::opt_address")]
    pub contract_address: Option<Address>,
    pub token_name: String,
    pub token_symbol: String,
    #[serde(deserialize_with = "de::u64_str")]
    pub token_decimal: u64,
    #[serde(deserialize_with = "de::u256_str")]
    pub value: U256,
    #[serde(deserialize_with = "de::u64_str")]
    pub block_number: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub time_stamp: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub nonce: u64,
    pub block_hash: B256,
    #[serde(deserialize_with = "de::u64_str")]
    pub transaction_index: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub gas: u64,
    #[serde(deserialize_with = "de::u256_str")]
    pub gas_price: U256,
    #[serde(deserialize_with = "de::u64_str")]
    pub gas_used: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub cumulative_gas_used: u64,
    pub input: String,
    #[serde(deserialize_with = "de::u64_str")]
    pub confirmations: u64,
}

/// An ERC-721 token transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc721Tx {
    pub hash: B256,
    pub from: Address,
    #[serde(deserialize_with = "de::opt_address")]
    pub to: Option<Address>,
    #[serde(default, deserialize_with = "de::opt_address")]
    pub contract_address: Option<Address>,
    #[serde(rename = "tokenID", deserialize_with = "de::u256_str")]
    pub token_id: U256,
    pub token_name: String,
    pub token_symbol: String,
    #[serde(deserialize_with = "de::u64_str")]
    pub token_decimal: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub block_number: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub time_stamp: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub nonce: u64,
    pub block_hash: B256,
    #[serde(deserialize_with = "de::u64_str")]
    pub transaction_index: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub gas: u64,
    #[serde(deserialize_with = "de::u256_str")]
    pub gas_price: U256,
    #[serde(deserialize_with = "de::u64_str")]
    pub gas_used: u64,
    #[serde(deserialize_with = "de::u64_str")]
    pub cumulative_gas_used: u64,
    pub input: String,
    #[serde(deserialize_with = "de::u64_str")]
    pub confirmations: u64,
}

impl_history_tx!(CoinTx, InternalTx, Erc20Tx, Erc721Tx);

/// Unparsed explorer lists for one address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawTxHistory {
    pub address: Address,
    pub coin: Vec<Value>,
    pub internal: Vec<Value>,
    pub erc20: Vec<Value>,
    pub erc721: Vec<Value>,
}

/// Transactions of one kind, keyed by hash.
#[derive(Debug, Clone)]
pub struct Txs<T> {
    pub incoming: HashMap<B256, T>,
    pub outgoing: HashMap<B256, T>,
    pub all: HashMap<B256, T>,
}

impl<T> Default for Txs<T> {
    fn default() -> Self {
        Self { incoming: HashMap::new(), outgoing: HashMap::new(), all: HashMap::new() }
    }
}

impl<T: HistoryTx + Clone + DeserializeOwned> Txs<T> {
    /// Split raw records into incoming and outgoing relative to `address`.
    ///
    /// Returns `None` for an empty list.
    pub fn categorize(address: Address, raw: &[Value]) -> Result<Option<Self>> {
        if raw.is_empty() {
            return Ok(None);
        }

        let mut txs = Txs::default();
        for value in raw {
            let tx: T = serde_json::from_value(value.clone())
                .map_err(|e| AppError::Parse(format!("Invalid history record: {}", e)))?;
            let hash = tx.hash();

            if tx.to() == Some(address) {
                txs.incoming.insert(hash, tx.clone());
            } else if tx.from() == address {
                txs.outgoing.insert(hash, tx.clone());
            }
            txs.all.insert(hash, tx);
        }

        Ok(Some(txs))
    }
}

/// Parsed history for one address; a category is `None` when it had no records.
#[derive(Debug, Clone)]
pub struct TxHistory {
    pub address: Address,
    pub coin: Option<Txs<CoinTx>>,
    pub internal: Option<Txs<InternalTx>>,
    pub erc20: Option<Txs<Erc20Tx>>,
    pub erc721: Option<Txs<Erc721Tx>>,
}

impl TryFrom<&RawTxHistory> for TxHistory {
    type Error = AppError;

    fn try_from(raw: &RawTxHistory) -> Result<Self> {
        Ok(Self {
            address: raw.address,
            coin: Txs::categorize(raw.address, &raw.coin)?,
            internal: Txs::categorize(raw.address, &raw.internal)?,
            erc20: Txs::categorize(raw.address, &raw.erc20)?,
            erc721: Txs::categorize(raw.address, &raw.erc721)?,
        })
    }
}
