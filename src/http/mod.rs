//! Thin JSON-over-HTTP helper shared by the explorer, signature directory,
//! chain list and NFT metadata lookups.

use std::time::Duration;

use alloy::primitives::{Address, B256};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Browser-like user agent; several explorers reject default client agents.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A query parameter value; absent values are dropped from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Absent,
    One(String),
    Many(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::One(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::One(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::One(value.to_string())
    }
}

impl From<Address> for QueryValue {
    fn from(value: Address) -> Self {
        QueryValue::One(value.to_checksum(None))
    }
}

impl From<B256> for QueryValue {
    fn from(value: B256) -> Self {
        QueryValue::One(value.to_string())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(QueryValue::Absent)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Many(values)
    }
}

impl From<&[Address]> for QueryValue {
    fn from(values: &[Address]) -> Self {
        QueryValue::Many(values.iter().map(|a| a.to_checksum(None)).collect())
    }
}

/// Flatten query parameters: drop absent values and join lists with commas.
pub fn build_query(params: Vec<(&'static str, QueryValue)>) -> Vec<(&'static str, String)> {
    params
        .into_iter()
        .filter_map(|(key, value)| match value {
            QueryValue::Absent => None,
            QueryValue::One(v) => Some((key, v)),
            QueryValue::Many(vs) => Some((key, vs.join(","))),
        })
        .collect()
}

/// Shared HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the default timeout and headers.
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let inner = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { inner })
    }

    /// GET `url` with `query` and decode the body as JSON.
    ///
    /// Statuses above 201 are errors.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(url = %url, params = query.len(), "HTTP GET");

        let response = self.inner.get(url).query(query).send().await?;

        let status = response.status();
        if status.as_u16() > 201 {
            return Err(AppError::Http { status: status.as_u16(), url: url.to_string() });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Parse(format!("Invalid JSON from {}: {}", url, e)))
    }

    /// GET `url` and return the body as untyped JSON.
    pub async fn get_value(&self, url: &str) -> Result<Value> {
        self.get_json(url, &[]).await
    }
}
