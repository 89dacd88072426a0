//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions.

use alloy::primitives::Address;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status from a REST endpoint.
    #[error("HTTP error: status {status} from {url}")]
    Http { status: u16, url: String },

    /// Explorer API reported a failure.
    #[error("Explorer API error: {0}")]
    Api(String),

    /// The operation needs an explorer API key and none is configured.
    #[error("To use this function, you must specify the explorer API key")]
    ApiKeyRequired,

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric overflow during conversion.
    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),

    /// Arithmetic between incompatible amounts.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// Contract lookup or ABI errors.
    #[error("Contract error: {0}")]
    Contract(String),

    /// NFT lookup errors.
    #[error("NFT error: {0}")]
    Nft(String),

    /// Transaction construction errors.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Token contract is unknown.
    #[error("No such token: {0}")]
    NoSuchToken(Address),

    /// Nothing left to send after clamping to the balance.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Network gas price is above the caller's limit.
    #[error("Gas price too high: network {current} wei, limit {limit} wei")]
    GasPriceTooHigh { current: String, limit: String },

    /// Pending transaction error.
    #[error("Pending transaction error: {0}")]
    PendingTransaction(String),
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<alloy::contract::Error> for AppError {
    fn from(err: alloy::contract::Error) -> Self {
        AppError::Rpc(err.to_string())
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::hex::FromHexError> for AppError {
    fn from(err: alloy::hex::FromHexError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<alloy::dyn_abi::Error> for AppError {
    fn from(err: alloy::dyn_abi::Error) -> Self {
        AppError::Contract(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Parse(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_app_error_config_display() {
        let err = AppError::Config("Unknown network: foo".to_string());
        assert_eq!(err.to_string(), "Configuration error: Unknown network: foo");
    }

    #[test]
    fn test_app_error_http_display() {
        let err = AppError::Http { status: 404, url: "https://example.org".to_string() };
        assert_eq!(err.to_string(), "HTTP error: status 404 from https://example.org");
    }

    #[test]
    fn test_app_error_api_key_required_display() {
        let err = AppError::ApiKeyRequired;
        assert!(err.to_string().contains("explorer API key"));
    }

    #[test]
    fn test_app_error_no_such_token_display() {
        let addr = address!("0000000000000000000000000000000000000001");
        let err = AppError::NoSuchToken(addr);
        assert!(err.to_string().contains("No such token"));
    }

    #[test]
    fn test_app_error_insufficient_balance_display() {
        assert_eq!(AppError::InsufficientBalance.to_string(), "Insufficient balance");
    }

    #[test]
    fn test_app_error_gas_price_too_high_display() {
        let err = AppError::GasPriceTooHigh {
            current: "30000000000".to_string(),
            limit: "20000000000".to_string(),
        };
        assert!(err.to_string().contains("network 30000000000 wei"));
        assert!(err.to_string().contains("limit 20000000000 wei"));
    }

    #[test]
    fn test_app_error_arithmetic_display() {
        let err = AppError::Arithmetic("The values have different decimals".to_string());
        assert_eq!(err.to_string(), "Arithmetic error: The values have different decimals");
    }

    #[test]
    fn test_app_error_pending_transaction_display() {
        let err = AppError::PendingTransaction("Tx stuck".to_string());
        assert_eq!(err.to_string(), "Pending transaction error: Tx stuck");
    }

    #[test]
    fn test_from_parse_int_error() {
        let parse_result: std::result::Result<i32, _> = "not_a_number".parse();
        let parse_err = parse_result.unwrap_err();
        let app_err: AppError = parse_err.into();

        match app_err {
            AppError::Parse(msg) => assert!(msg.contains("invalid")),
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Parse(_)));
    }

    #[test]
    fn test_app_error_debug_trait() {
        let err = AppError::Wallet("no account".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Wallet"));
    }
}
