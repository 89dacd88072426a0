//! Client wiring tests against a mock block explorer.
//!
//! These run offline: the RPC endpoint is unreachable and only explorer
//! requests are answered.

use alloy::primitives::{address, Address};
use eth_async::{
    explorer::{ListParams, Sort},
    types::ExplorerApi,
    AccountSource, AppError, Client, Network,
};
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

fn local_network(explorer_url: &str, key: &str) -> Network {
    let mut network = Network::new("local", "http://127.0.0.1:1")
        .with_chain_id(31337)
        .with_api(ExplorerApi::new(explorer_url, ""));
    network.set_api_key(key);
    network
}

#[tokio::test]
async fn test_explorer_requests_carry_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("module", "account"))
        .and(query_param("action", "txlist"))
        .and(query_param("apikey", "LOCALKEY"))
        .and(query_param("sort", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "0", "message": "No transactions found", "result": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let network = local_network(&server.uri(), "LOCALKEY");
    let client = Client::new(network, AccountSource::None).unwrap();
    let explorer = client.explorer.as_ref().unwrap();

    let list = ListParams { sort: Sort::Desc, ..Default::default() };
    let response = explorer.account().txlist(OWNER, list).await.unwrap();
    assert_eq!(response["result"], json!([]));
}

#[tokio::test]
async fn test_history_through_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "0", "message": "No transactions found", "result": []
        })))
        .expect(4)
        .mount(&server)
        .await;

    let network = local_network(&server.uri(), "LOCALKEY");
    let client = Client::new(network, AccountSource::Generate).unwrap();

    let raw = client.transactions.raw_history(None).await.unwrap();
    assert_eq!(raw.address, client.address().unwrap());
    assert!(raw.coin.is_empty());
    assert!(raw.erc721.is_empty());
}

#[tokio::test]
async fn test_history_without_key() {
    let network = local_network("http://127.0.0.1:1", "");
    let client = Client::new(network, AccountSource::Generate).unwrap();

    let result = client.transactions.history(None).await;
    assert!(matches!(result, Err(AppError::ApiKeyRequired)));
}

#[tokio::test]
async fn test_contract_abi_from_explorer() {
    let server = MockServer::start().await;
    let abi = concat!(
        r#"[{"type":"function","name":"totalSupply","stateMutability":"view","#,
        r#""inputs":[],"outputs":[{"name":"","type":"uint256"}]}]"#
    );
    Mock::given(method("GET"))
        .and(query_param("action", "getabi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1", "message": "OK", "result": abi
        })))
        .mount(&server)
        .await;

    let network = local_network(&server.uri(), "LOCALKEY");
    let client = Client::new(network, AccountSource::None).unwrap();

    let text = client.contracts.get_abi_json(OWNER).await.unwrap();
    assert!(text.contains("totalSupply"));
}

#[tokio::test]
async fn test_read_only_client_cannot_send() {
    let client = Client::new(Network::sepolia(), AccountSource::None).unwrap();

    let result = client.transactions.send(None, OWNER, None, Default::default()).await;
    assert!(matches!(result, Err(AppError::Wallet(_))));

    let result = client.transactions.approve(OWNER, OWNER, None, Default::default()).await;
    assert!(matches!(result, Err(AppError::Wallet(_))));
}
