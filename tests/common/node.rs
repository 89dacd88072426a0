//! A small JSON-RPC node served by wiremock.
//!
//! Answers the calls the transaction service makes and records gas
//! estimates and broadcast transactions for inspection.

use alloy::primitives::{keccak256, Bytes, U256};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use wiremock::{matchers::method, Mock, MockServer, Request, Respond, ResponseTemplate};

pub const GWEI: u128 = 1_000_000_000;
pub const ETHER: u128 = 1_000_000_000_000_000_000;

const DECIMALS_SELECTOR: &str = "0x313ce567";
const BALANCE_OF_SELECTOR: &str = "0x70a08231";
const ALLOWANCE_SELECTOR: &str = "0xdd62ed3e";

/// Chain state the node reports.
#[derive(Debug, Clone)]
pub struct NodeState {
    pub chain_id: u64,
    pub balance: U256,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas: u64,
    pub token_decimals: u8,
    pub token_balance: U256,
    pub allowance: U256,
    /// Transaction objects passed to `eth_estimateGas`, in call order.
    pub estimates: Vec<Value>,
    /// Raw transactions passed to `eth_sendRawTransaction`.
    pub sent: Vec<Bytes>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            chain_id: 31337,
            balance: U256::from(ETHER),
            nonce: 0,
            gas_price: GWEI,
            gas: 21_000,
            token_decimals: 6,
            token_balance: U256::ZERO,
            allowance: U256::ZERO,
            estimates: Vec::new(),
            sent: Vec::new(),
        }
    }
}

pub struct MockNode {
    server: MockServer,
    state: Arc<Mutex<NodeState>>,
}

impl MockNode {
    pub async fn start(state: NodeState) -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(Mutex::new(state));
        Mock::given(method("POST"))
            .respond_with(NodeResponder(state.clone()))
            .mount(&server)
            .await;
        Self { server, state }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> NodeState {
        self.state.lock().unwrap().clone()
    }
}

struct NodeResponder(Arc<Mutex<NodeState>>);

impl Respond for NodeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let mut state = self.0.lock().unwrap();
        let params = &body["params"];

        let outcome = match body["method"].as_str().unwrap_or_default() {
            "eth_chainId" => Ok(json!(format!("0x{:x}", state.chain_id))),
            "eth_gasPrice" => Ok(json!(format!("0x{:x}", state.gas_price))),
            "eth_getBalance" => Ok(json!(format!("0x{:x}", state.balance))),
            "eth_getTransactionCount" => Ok(json!(format!("0x{:x}", state.nonce))),
            "eth_estimateGas" => estimate_gas(&mut state, &params[0]),
            "eth_call" => call(&state, &params[0]),
            "eth_sendRawTransaction" => {
                let raw: Bytes = params[0].as_str().unwrap().parse().unwrap();
                let hash = keccak256(&raw);
                state.sent.push(raw);
                Ok(json!(hash))
            }
            other => Err(format!("the method {} does not exist/is not available", other)),
        };

        let reply = match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": body["id"], "result": result }),
            Err(message) => json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "error": { "code": -32000, "message": message }
            }),
        };
        ResponseTemplate::new(200).set_body_json(reply)
    }
}

/// Mirrors geth: a priced estimate from an account must leave room for
/// the gas after the value is paid.
fn estimate_gas(state: &mut NodeState, tx: &Value) -> Result<Value, String> {
    state.estimates.push(tx.clone());

    let gas_price = quantity(&tx["gasPrice"]);
    if tx.get("from").is_some() && !gas_price.is_zero() {
        let value = quantity(&tx["value"]);
        let available = state
            .balance
            .checked_sub(value)
            .ok_or_else(|| "insufficient funds for transfer".to_string())?;
        if available / gas_price < U256::from(state.gas) {
            return Err(format!("gas required exceeds allowance ({})", available / gas_price));
        }
    }
    Ok(json!(format!("0x{:x}", state.gas)))
}

fn call(state: &NodeState, tx: &Value) -> Result<Value, String> {
    let input = tx
        .get("input")
        .or_else(|| tx.get("data"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    let word = match input.get(..10) {
        Some(DECIMALS_SELECTOR) => U256::from(state.token_decimals),
        Some(BALANCE_OF_SELECTOR) => state.token_balance,
        Some(ALLOWANCE_SELECTOR) => state.allowance,
        _ => return Err("execution reverted".to_string()),
    };
    Ok(json!(format!("0x{}", alloy::hex::encode(word.to_be_bytes::<32>()))))
}

fn quantity(value: &Value) -> U256 {
    value
        .as_str()
        .map(|hex| U256::from_str_radix(hex.trim_start_matches("0x"), 16).unwrap())
        .unwrap_or_default()
}
