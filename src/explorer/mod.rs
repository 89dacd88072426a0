//! Client for Etherscan-family block explorer APIs.
//!
//! Endpoints are grouped the same way the explorers group them (`account`,
//! `contract`, `transaction`, ...). Every call returns the raw JSON document;
//! explorer-level failures become [`AppError::Api`].

mod account;
mod block;
mod contract;
mod gastracker;
mod logs;
mod params;
mod stats;
mod token;
mod transaction;

pub use account::{Account, InternalTxQuery, ListParams};
pub use block::Block;
pub use contract::Contract;
pub use gastracker::GasTracker;
pub use logs::{LogFilter, Logs};
pub use params::{BlockType, ClientType, Closest, DailyStat, Sort, SyncMode, Tag, TopicOperator};
pub use stats::Stats;
pub use token::Token;
pub use transaction::Transaction;

use serde_json::Value;

use crate::{
    error::{AppError, Result},
    http::{build_query, HttpClient, QueryValue},
    types::ExplorerApi,
};

/// Message returned with status `0` when a list is merely empty.
const NO_TRANSACTIONS_FOUND: &str = "No transactions found";

/// Explorer API client.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    key: String,
    url: String,
    http: HttpClient,
}

impl ExplorerClient {
    pub fn new(key: &str, url: &str, http: HttpClient) -> Self {
        Self { key: key.to_string(), url: url.to_string(), http }
    }

    pub fn from_api(api: &ExplorerApi, http: HttpClient) -> Self {
        Self::new(&api.key, &api.url, http)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    pub fn contract(&self) -> Contract<'_> {
        Contract::new(self)
    }

    pub fn transaction(&self) -> Transaction<'_> {
        Transaction::new(self)
    }

    pub fn block(&self) -> Block<'_> {
        Block::new(self)
    }

    pub fn logs(&self) -> Logs<'_> {
        Logs::new(self)
    }

    pub fn token(&self) -> Token<'_> {
        Token::new(self)
    }

    pub fn gastracker(&self) -> GasTracker<'_> {
        GasTracker::new(self)
    }

    pub fn stats(&self) -> Stats<'_> {
        Stats::new(self)
    }

    /// Send one API request. `None` parameters are not sent.
    pub(crate) async fn request(
        &self,
        module: &str,
        action: &str,
        params: Vec<(&'static str, QueryValue)>,
    ) -> Result<Value> {
        let mut all = vec![
            ("module", QueryValue::from(module)),
            ("action", QueryValue::from(action)),
            ("apikey", QueryValue::from(self.key.as_str())),
        ];
        all.extend(params);
        let query = build_query(all);

        tracing::debug!(module = %module, action = %action, url = %self.url, "Explorer request");
        let response: Value = self.http.get_json(&self.url, &query).await?;
        check_status(response)
    }
}

/// Reject explorer responses that report a failure.
///
/// Status `0` with "No transactions found" is an empty result, not an error.
pub fn check_status(response: Value) -> Result<Value> {
    if response.get("status").and_then(Value::as_str) != Some("0") {
        return Ok(response);
    }

    let message = response.get("message").and_then(Value::as_str).unwrap_or_default();
    if message.starts_with(NO_TRANSACTIONS_FOUND) {
        return Ok(response);
    }

    let detail = match response.get("result") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Err(AppError::Api(format!("{}: {}", message, detail)))
}

/// The `result` field of a response.
pub fn result_of(response: &Value) -> Value {
    response.get("result").cloned().unwrap_or(Value::Null)
}

/// The `result` field of a list response; non-arrays are empty.
pub fn result_list(response: &Value) -> Vec<Value> {
    match response.get("result") {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_status_ok() {
        let response = json!({"status": "1", "message": "OK", "result": []});
        assert!(check_status(response).is_ok());

        // Proxy-style responses carry no status.
        let response = json!({"jsonrpc": "2.0", "id": 1, "result": "0x10"});
        assert!(check_status(response).is_ok());
    }

    #[test]
    fn test_check_status_empty_list() {
        let response = json!({"status": "0", "message": "No transactions found", "result": []});
        let response = check_status(response).unwrap();
        assert!(result_list(&response).is_empty());
    }

    #[test]
    fn test_check_status_error() {
        let response = json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"});
        match check_status(response) {
            Err(AppError::Api(msg)) => assert_eq!(msg, "NOTOK: Invalid API Key"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_result_helpers() {
        let response = json!({"status": "1", "result": [{"a": 1}, {"a": 2}]});
        assert_eq!(result_list(&response).len(), 2);
        assert_eq!(result_of(&json!({"result": "42"})), json!("42"));
        assert!(result_list(&json!({"result": "Max rate limit reached"})).is_empty());
    }
}
