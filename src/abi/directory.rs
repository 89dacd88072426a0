//! Function signature directories.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::http::HttpClient;

/// 4byte.directory signature search endpoint.
pub const FOUR_BYTE_URL: &str = "https://www.4byte.directory/api/v1/signatures/";

/// Resolves 4-byte selectors to text signatures.
///
/// Implementations can query a remote database or serve fixed answers in tests.
#[async_trait]
pub trait SignatureDirectory: Send + Sync {
    /// Find text signatures for a `0x`-prefixed selector, oldest first.
    ///
    /// Returns `None` when the lookup itself failed, so callers can retry;
    /// an unknown selector is `Some(vec![])`.
    async fn lookup(&self, hex_selector: &str) -> Option<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct SignatureEntry {
    text_signature: String,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct SignatureResponse {
    results: Vec<SignatureEntry>,
}

/// Directory backed by 4byte.directory, with an in-memory cache of answers.
pub struct FourByteDirectory {
    http: HttpClient,
    url: String,
    cache: RwLock<HashMap<String, Vec<String>>>,
}

impl FourByteDirectory {
    pub fn new(http: HttpClient) -> Self {
        Self::with_url(http, FOUR_BYTE_URL)
    }

    /// Use a custom endpoint that speaks the 4byte.directory API.
    pub fn with_url(http: HttpClient, url: &str) -> Self {
        Self { http, url: url.to_string(), cache: RwLock::new(HashMap::new()) }
    }
}

#[async_trait]
impl SignatureDirectory for FourByteDirectory {
    async fn lookup(&self, hex_selector: &str) -> Option<Vec<String>> {
        let key = hex_selector.to_lowercase();

        {
            let cache = self.cache.read().await;
            if let Some(hit) = cache.get(&key) {
                return Some(hit.clone());
            }
        }

        let query = [("hex_signature", key.clone())];
        let response: SignatureResponse = match self.http.get_json(&self.url, &query).await {
            Ok(response) => response,
            Err(e) => {
                warn!(selector = %key, error = %e, "Signature lookup failed");
                return None;
            }
        };

        let mut results = response.results;
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let signatures: Vec<String> = results.into_iter().map(|r| r.text_signature).collect();

        debug!(selector = %key, matches = signatures.len(), "Signature lookup");
        self.cache.write().await.insert(key, signatures.clone());
        Some(signatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_lookup_sorts_by_creation_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("hex_signature", "0xa9059cbb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "results": [
                    {"id": 2, "created_at": "2018-05-11T08:39:29.708250Z",
                     "text_signature": "many_msg_babbage(bytes1)", "hex_signature": "0xa9059cbb"},
                    {"id": 1, "created_at": "2016-07-09T03:58:28.234977Z",
                     "text_signature": "transfer(address,uint256)", "hex_signature": "0xa9059cbb"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let directory = FourByteDirectory::with_url(HttpClient::new().unwrap(), &server.uri());
        let first = directory.lookup("0xA9059CBB").await.unwrap();
        assert_eq!(first, vec!["transfer(address,uint256)", "many_msg_babbage(bytes1)"]);

        // Served from cache; the mock expects a single request.
        let second = directory.lookup("0xa9059cbb").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let directory = FourByteDirectory::with_url(HttpClient::new().unwrap(), &server.uri());
        assert!(directory.lookup("0x12345678").await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_selector_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 0, "results": []})),
            )
            .mount(&server)
            .await;

        let directory = FourByteDirectory::with_url(HttpClient::new().unwrap(), &server.uri());
        assert_eq!(directory.lookup("0xdeadbeef").await, Some(vec![]));
    }
}
