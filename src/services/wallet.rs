//! Balance and nonce queries.

use alloy::primitives::{Address, U256};
use std::sync::Arc;

use crate::{
    error::Result,
    ethereum::{contracts::IERC20, EthereumClient, WalletManager},
    types::{TokenAmount, Unit},
};

use super::require_account;

/// A coin or token balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Balance {
    Coin(Unit),
    Token(TokenAmount),
}

impl Balance {
    /// The balance in the smallest unit.
    pub fn wei(&self) -> U256 {
        match self {
            Balance::Coin(unit) => unit.wei(),
            Balance::Token(amount) => amount.wei(),
        }
    }

    /// Decimals of the balance; 18 for the coin.
    pub fn decimals(&self) -> u8 {
        match self {
            Balance::Coin(_) => 18,
            Balance::Token(amount) => amount.decimals(),
        }
    }
}

/// Service for account state queries.
#[derive(Clone)]
pub struct WalletService {
    client: Arc<EthereumClient>,
    account: Option<WalletManager>,
}

impl WalletService {
    /// Create a new wallet service.
    pub fn new(client: Arc<EthereumClient>, account: Option<WalletManager>) -> Self {
        Self { client, account }
    }

    fn resolve(&self, address: Option<Address>) -> Result<Address> {
        match address {
            Some(address) => Ok(address),
            None => Ok(require_account(&self.account)?.address()),
        }
    }

    /// Coin balance when `token` is `None`, otherwise the token balance.
    ///
    /// `address` defaults to the imported account.
    pub async fn balance(
        &self,
        token: Option<Address>,
        address: Option<Address>,
    ) -> Result<Balance> {
        match token {
            None => Ok(Balance::Coin(self.coin_balance(address).await?)),
            Some(token) => Ok(Balance::Token(self.token_balance(token, address).await?)),
        }
    }

    /// Coin balance in wei.
    pub async fn coin_balance(&self, address: Option<Address>) -> Result<Unit> {
        let address = self.resolve(address)?;
        tracing::debug!(address = %address, "Querying coin balance");

        let balance = self.client.get_balance(address).await?;
        Ok(Unit::from_wei(balance))
    }

    /// Token balance with the token's on-chain decimals.
    pub async fn token_balance(
        &self,
        token: Address,
        address: Option<Address>,
    ) -> Result<TokenAmount> {
        let address = self.resolve(address)?;
        tracing::debug!(address = %address, token = %token, "Querying token balance");

        let contract = IERC20::new(token, self.client.provider().clone());
        let balance = contract.balanceOf(address).call().await?;
        let decimals = contract.decimals().call().await?;

        Ok(TokenAmount::from_wei(balance, decimals))
    }

    /// Transaction count of `address` (the imported account by default).
    pub async fn nonce(&self, address: Option<Address>) -> Result<u64> {
        let address = self.resolve(address)?;
        self.client.get_transaction_count(address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn offline_client() -> Arc<EthereumClient> {
        Arc::new(EthereumClient::new("http://127.0.0.1:1").unwrap())
    }

    #[test]
    fn test_balance_accessors() {
        let coin = Balance::Coin(Unit::from_wei(U256::from(5)));
        assert_eq!(coin.wei(), U256::from(5));
        assert_eq!(coin.decimals(), 18);

        let token = Balance::Token(TokenAmount::from_wei(U256::from(7), 6));
        assert_eq!(token.wei(), U256::from(7));
        assert_eq!(token.decimals(), 6);
    }

    #[tokio::test]
    async fn test_default_address_requires_account() {
        let service = WalletService::new(offline_client(), None);

        let result = service.nonce(None).await;
        assert!(matches!(result, Err(AppError::Wallet(_))));

        let result = service.balance(None, None).await;
        assert!(matches!(result, Err(AppError::Wallet(_))));
    }
}
