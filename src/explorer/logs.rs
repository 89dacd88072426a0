//! `logs` module endpoints.

use alloy::primitives::{Address, B256};
use serde_json::Value;

use super::{ExplorerClient, TopicOperator};
use crate::{
    error::{AppError, Result},
    http::QueryValue,
};

const MODULE: &str = "logs";

const TOPIC_KEYS: [&str; 4] = ["topic0", "topic1", "topic2", "topic3"];

fn operator_key(a: usize, b: usize) -> Option<&'static str> {
    match (a.min(b), a.max(b)) {
        (0, 1) => Some("topic0_1_opr"),
        (0, 2) => Some("topic0_2_opr"),
        (0, 3) => Some("topic0_3_opr"),
        (1, 2) => Some("topic1_2_opr"),
        (1, 3) => Some("topic1_3_opr"),
        (2, 3) => Some("topic2_3_opr"),
        _ => None,
    }
}

/// Event log filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub address: Option<Address>,
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub page: Option<u64>,
    pub offset: Option<u64>,
    topics: [Option<B256>; 4],
    operators: Vec<(&'static str, TopicOperator)>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn blocks(mut self, from_block: u64, to_block: u64) -> Self {
        self.from_block = Some(from_block);
        self.to_block = Some(to_block);
        self
    }

    pub fn paginate(mut self, page: u64, offset: u64) -> Self {
        self.page = Some(page);
        self.offset = Some(offset);
        self
    }

    /// Match `topic` at position `index` (0 to 3).
    pub fn topic(mut self, index: usize, topic: B256) -> Result<Self> {
        let slot = self
            .topics
            .get_mut(index)
            .ok_or_else(|| AppError::Api(format!("Topic index out of range: {}", index)))?;
        *slot = Some(topic);
        Ok(self)
    }

    /// Combine the topics at positions `a` and `b` with `operator`.
    pub fn operator(mut self, a: usize, b: usize, operator: TopicOperator) -> Result<Self> {
        let key = operator_key(a, b)
            .ok_or_else(|| AppError::Api(format!("Invalid topic pair: {} and {}", a, b)))?;
        self.operators.retain(|(k, _)| *k != key);
        self.operators.push((key, operator));
        Ok(self)
    }

    fn query(&self) -> Vec<(&'static str, QueryValue)> {
        let mut params = vec![
            ("address", self.address.into()),
            ("fromBlock", self.from_block.into()),
            ("toBlock", self.to_block.into()),
            ("page", self.page.into()),
            ("offset", self.offset.into()),
        ];
        for (key, topic) in TOPIC_KEYS.iter().zip(self.topics.iter()) {
            params.push((*key, (*topic).into()));
        }
        for (key, operator) in &self.operators {
            params.push((*key, (*operator).into()));
        }
        params
    }
}

/// `logs` endpoints.
pub struct Logs<'a> {
    client: &'a ExplorerClient,
}

impl<'a> Logs<'a> {
    pub(super) fn new(client: &'a ExplorerClient) -> Self {
        Self { client }
    }

    /// Event logs matching a filter (`getLogs`).
    pub async fn get_logs(&self, filter: &LogFilter) -> Result<Value> {
        self.client.request(MODULE, "getLogs", filter.query()).await
    }
}
