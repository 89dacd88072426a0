//! eth-async Library
//!
//! An asynchronous convenience layer over `alloy` for Ethereum-compatible
//! networks.
//!
//! # Features
//!
//! - **Units**: exact wei arithmetic with human-readable coin and token amounts
//! - **Transactions**: parameter auto-filling, coin and ERC-20 transfers,
//!   approvals, cancelling and speeding up sent transactions
//! - **Contracts**: ABI lookup through block explorers, or recovery from
//!   bytecode when no ABI is published
//! - **Explorers**: typed access to the Etherscan-family APIs
//! - **NFTs**: collection info, owners and metadata attributes
//!
//! # Example
//!
//! ```rust,ignore
//! use eth_async::{AccountSource, Client, Network};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(Network::sepolia(), AccountSource::Generate)?;
//!     let balance = client.wallet.balance(None, None).await?;
//!     println!("{}", balance.wei());
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod client;
pub mod config;
pub mod error;
pub mod ethereum;
pub mod explorer;
pub mod http;
pub mod services;
pub mod types;

pub use client::{AccountSource, Client};
pub use config::Config;
pub use error::{AppError, Result};
pub use types::{Amount, Network, TokenAmount, Tx, TxOptions, Unit};
