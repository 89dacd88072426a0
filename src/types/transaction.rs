//! Transaction handles, options and amounts.

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{B256, U256},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use rust_decimal::Decimal;

use super::units::{TokenAmount, Unit};
use crate::error::{AppError, Result};

/// Named contract call arguments, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxArgs {
    args: Vec<(String, DynSolValue)>,
}

impl TxArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named argument.
    pub fn with(mut self, name: &str, value: DynSolValue) -> Self {
        self.args.push((name.to_string(), value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&DynSolValue> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Argument values in order, ready for ABI encoding.
    pub fn values(&self) -> Vec<DynSolValue> {
        self.args.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl FromIterator<(String, DynSolValue)> for TxArgs {
    fn from_iter<I: IntoIterator<Item = (String, DynSolValue)>>(iter: I) -> Self {
        Self { args: iter.into_iter().collect() }
    }
}

/// A sent or prepared transaction.
///
/// Follow-up operations (`cancel`, `speed_up`, receipt waiting) live on
/// [`crate::services::TransactionService`] and update the handle in place.
#[derive(Debug, Clone)]
pub struct Tx {
    pub hash: Option<B256>,
    pub params: Option<TransactionRequest>,
    pub receipt: Option<TransactionReceipt>,
    pub function_identifier: Option<String>,
    pub input_data: Option<TxArgs>,
}

impl Tx {
    /// Create a handle; at least one of `hash` and `params` is required.
    pub fn new(hash: Option<B256>, params: Option<TransactionRequest>) -> Result<Self> {
        if hash.is_none() && params.is_none() {
            return Err(AppError::Transaction(
                "Specify a transaction hash or transaction parameters".into(),
            ));
        }

        Ok(Self { hash, params, receipt: None, function_identifier: None, input_data: None })
    }

    pub fn from_hash(hash: B256) -> Self {
        Self {
            hash: Some(hash),
            params: None,
            receipt: None,
            function_identifier: None,
            input_data: None,
        }
    }

    pub fn from_params(params: TransactionRequest) -> Self {
        Self {
            hash: None,
            params: Some(params),
            receipt: None,
            function_identifier: None,
            input_data: None,
        }
    }

    /// Nonce of the known parameters.
    pub fn nonce(&self) -> Option<u64> {
        self.params.as_ref().and_then(|p| p.nonce)
    }

    /// Whether the transaction was sent.
    pub fn is_sent(&self) -> bool {
        self.hash.is_some()
    }
}

/// Per-call overrides for transaction building.
#[derive(Debug, Clone, Default)]
pub struct TxOptions {
    /// Gas price; the network price when absent.
    pub gas_price: Option<Unit>,
    /// Gas limit; estimated when absent.
    pub gas_limit: Option<u64>,
    /// Nonce; fetched from the node when absent.
    pub nonce: Option<u64>,
    /// Fail with `GasPriceTooHigh` when the network price exceeds `gas_price`.
    pub check_gas_price: bool,
    /// Return the prepared parameters without signing or sending.
    pub dry_run: bool,
}

impl TxOptions {
    pub fn dry_run() -> Self {
        Self { dry_run: true, ..Default::default() }
    }

    pub fn with_gas_price(mut self, gas_price: Unit) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Enable the gas price ceiling check against `limit`.
    pub fn with_max_gas_price(mut self, limit: Unit) -> Self {
        self.gas_price = Some(limit);
        self.check_gas_price = true;
        self
    }
}

/// An amount to send or approve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    /// Human-readable amount; scaled by the token decimals (or 18 for the coin).
    Human(Decimal),
    /// Exact amount in the smallest unit.
    Wei(U256),
}

impl Amount {
    /// Amount in the smallest unit for a token with `decimals`.
    pub fn to_wei(&self, decimals: u8) -> Result<U256> {
        match self {
            Amount::Wei(wei) => Ok(*wei),
            Amount::Human(amount) => Ok(TokenAmount::from_decimal(*amount, decimals)?.wei()),
        }
    }
}

impl From<Decimal> for Amount {
    fn from(amount: Decimal) -> Self {
        Amount::Human(amount)
    }
}

impl From<U256> for Amount {
    fn from(wei: U256) -> Self {
        Amount::Wei(wei)
    }
}

impl From<TokenAmount> for Amount {
    fn from(amount: TokenAmount) -> Self {
        Amount::Wei(amount.wei())
    }
}

impl From<Unit> for Amount {
    fn from(amount: Unit) -> Self {
        Amount::Wei(amount.wei())
    }
}
