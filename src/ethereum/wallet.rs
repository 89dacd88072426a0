//! Wallet management.

use alloy::{
    eips::eip2718::Encodable2718,
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};

use crate::error::{AppError, Result};

/// Wallet manager for transaction signing.
#[derive(Clone)]
pub struct WalletManager {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
}

impl WalletManager {
    /// Create a wallet manager from a private key string.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        // Remove 0x prefix if present
        let key = private_key.strip_prefix("0x").unwrap_or(private_key);

        let signer: PrivateKeySigner =
            key.parse().map_err(|e: alloy::signers::local::LocalSignerError| {
                AppError::Wallet(e.to_string())
            })?;

        Ok(Self::from_signer(signer))
    }

    /// Create a wallet with a freshly generated random key.
    pub fn generate() -> Self {
        let wallet = Self::from_signer(PrivateKeySigner::random());
        tracing::info!(address = %wallet.address, "Generated new account");
        wallet
    }

    fn from_signer(signer: PrivateKeySigner) -> Self {
        let address = signer.address();

        tracing::info!(address = %address, "Wallet initialized");

        Self { signer, address }
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The private key as `0x`-prefixed hex.
    pub fn private_key(&self) -> String {
        format!("0x{}", alloy::hex::encode(self.signer.to_bytes()))
    }

    /// Sign a complete transaction request into raw EIP-2718 bytes.
    pub async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes> {
        let wallet = EthereumWallet::from(self.signer.clone());
        let envelope = tx
            .build(&wallet)
            .await
            .map_err(|e| AppError::Wallet(format!("Failed to sign transaction: {}", e)))?;

        Ok(envelope.encoded_2718().into())
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager").field("address", &self.address).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};

    // Well-known Hardhat/Foundry test key; never holds real funds.
    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_PRIVATE_KEY_NO_PREFIX: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_wallet_from_private_key_with_and_without_prefix() {
        let expected = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address(), expected);

        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY_NO_PREFIX).unwrap();
        assert_eq!(wallet.address(), expected);
    }

    #[test]
    fn test_wallet_invalid_private_key() {
        for key in ["0x1234", "0xZZZZ", "", "invalid_key"] {
            let result = WalletManager::from_private_key(key);
            assert!(matches!(result, Err(AppError::Wallet(_))), "key {:?} accepted", key);
        }
    }

    #[test]
    fn test_generate_produces_distinct_accounts() {
        let a = WalletManager::generate();
        let b = WalletManager::generate();
        assert_ne!(a.address(), b.address());
        assert_ne!(a.address(), Address::ZERO);
    }

    #[test]
    fn test_private_key_round_trip() {
        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.private_key(), TEST_PRIVATE_KEY);

        let generated = WalletManager::generate();
        let restored = WalletManager::from_private_key(&generated.private_key()).unwrap();
        assert_eq!(restored.address(), generated.address());
    }

    #[test]
    fn test_wallet_debug_hides_key() {
        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug_str = format!("{:?}", wallet);

        assert!(debug_str.contains("WalletManager"));
        assert!(debug_str.contains("address"));
        assert!(!debug_str.contains(TEST_PRIVATE_KEY_NO_PREFIX));
    }

    #[tokio::test]
    async fn test_sign_legacy_transaction() {
        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let tx = TransactionRequest::default()
            .from(wallet.address())
            .to(address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"))
            .value(U256::from(1))
            .nonce(0)
            .gas_limit(21_000)
            .gas_price(1_000_000_000)
            .with_chain_id(1);

        let raw = wallet.sign_transaction(tx).await.unwrap();
        // Legacy transactions are plain RLP lists.
        assert!(raw[0] >= 0xc0);
    }

    #[tokio::test]
    async fn test_sign_incomplete_transaction_fails() {
        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let tx = TransactionRequest::default().to(wallet.address());

        let result = wallet.sign_transaction(tx).await;
        assert!(matches!(result, Err(AppError::Wallet(_))));
    }
}
