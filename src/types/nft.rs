//! NFT collection and token descriptions.

use alloy::primitives::{Address, U256};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Public gateway used for `ipfs://` URIs.
pub const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

const DATA_JSON_PREFIX: &str = "data:application/json";

/// A single metadata attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub name: String,
    pub value: Value,
}

/// An NFT collection, optionally narrowed to one token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nft {
    pub contract_address: Address,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub total_supply: Option<U256>,
    pub id: Option<U256>,
    pub owner: Option<Address>,
    pub image_url: Option<String>,
    pub attributes: Vec<NftAttribute>,
}

impl Nft {
    pub fn new(contract_address: Address) -> Self {
        Self { contract_address, ..Default::default() }
    }

    /// Replace the attributes with the ones found in a metadata document.
    pub fn parse_attributes(&mut self, metadata: &Value) {
        if let Some(Value::Array(raw)) = metadata.get("attributes") {
            self.attributes = parse_attributes(raw);
        }
    }
}

/// Convert raw metadata attributes.
///
/// The name is taken from `trait_type` when present, otherwise from the first
/// key other than `value`. Entries without such a key are skipped.
pub fn parse_attributes(raw: &[Value]) -> Vec<NftAttribute> {
    raw.iter()
        .filter_map(|attribute| {
            let object = attribute.as_object()?;
            let name = object
                .get("trait_type")
                .or_else(|| object.iter().find(|(k, _)| k.as_str() != "value").map(|(_, v)| v))?;
            let name = match name {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let value = object.get("value").cloned().unwrap_or(Value::Null);
            Some(NftAttribute { name, value })
        })
        .collect()
}

/// Whether a token URI embeds its JSON metadata.
pub fn is_data_uri(uri: &str) -> bool {
    uri.contains(DATA_JSON_PREFIX)
}

/// Decode an inline `data:application/json[;base64],...` URI.
pub fn decode_data_uri(uri: &str) -> Result<Value> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| AppError::Nft(format!("Malformed data URI: {}", uri)))?;

    let body = if header.ends_with(";base64") {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| AppError::Nft(format!("Invalid base64 metadata: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Nft(e.to_string()))?
    } else {
        percent_decode_str(payload)
            .decode_utf8()
            .map_err(|e| AppError::Nft(format!("Invalid percent-encoded metadata: {}", e)))?
            .into_owned()
    };

    Ok(serde_json::from_str(&body)?)
}

/// Rewrite `ipfs://` URIs to the public gateway.
pub fn resolve_ipfs(uri: &str) -> String {
    uri.replace("ipfs://", IPFS_GATEWAY)
}
