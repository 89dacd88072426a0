//! Business logic services module.

pub mod contracts;
pub mod nfts;
pub mod transactions;
pub mod wallet;

pub use contracts::ContractService;
pub use nfts::NftService;
pub use transactions::TransactionService;
pub use wallet::{Balance, WalletService};

use crate::{
    error::{AppError, Result},
    ethereum::WalletManager,
    explorer::ExplorerClient,
};

/// The imported account, or a wallet error when the client has none.
pub(crate) fn require_account(account: &Option<WalletManager>) -> Result<&WalletManager> {
    account
        .as_ref()
        .ok_or_else(|| AppError::Wallet("No account imported into the client".to_string()))
}

/// The keyed explorer client, or `ApiKeyRequired`.
pub(crate) fn require_explorer(explorer: &Option<ExplorerClient>) -> Result<&ExplorerClient> {
    explorer.as_ref().filter(|e| e.has_key()).ok_or(AppError::ApiKeyRequired)
}
