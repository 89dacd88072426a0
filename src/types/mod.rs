//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod contract;
pub mod history;
pub mod network;
pub mod nft;
pub mod transaction;
pub mod units;

pub use contract::{functions_of, CommonValues, FunctionArgument, FunctionInfo, RawContract};
pub use history::{CoinTx, Erc20Tx, Erc721Tx, HistoryTx, InternalTx, RawTxHistory, TxHistory, Txs};
pub use network::{Dex, ExplorerApi, Network};
pub use nft::{Nft, NftAttribute};
pub use transaction::{Amount, Tx, TxArgs, TxOptions};
pub use units::{Denomination, TokenAmount, Unit};
