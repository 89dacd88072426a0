//! Contract descriptions and ABI listings.

use alloy::{
    json_abi::{JsonAbi, Param},
    primitives::{Address, B256, U256},
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Frequently used constant values.
pub struct CommonValues;

impl CommonValues {
    pub const NULL_HASH: B256 = B256::ZERO;
    /// `2^256 - 1` as a decimal string.
    pub const INFINITY_STR: &'static str =
        "115792089237316195423570985008687907853269984665640564039457584007913129639935";
    pub const INFINITY: U256 = U256::MAX;
}

/// A contract address with its ABI.
#[derive(Debug, Clone)]
pub struct RawContract {
    pub address: Address,
    pub abi: JsonAbi,
}

impl RawContract {
    pub fn new(address: Address, abi: JsonAbi) -> Self {
        Self { address, abi }
    }

    /// Build from an ABI given as JSON text.
    pub fn from_json(address: Address, abi: &str) -> Result<Self> {
        let abi: JsonAbi = serde_json::from_str(abi)
            .map_err(|e| AppError::Contract(format!("Invalid ABI JSON: {}", e)))?;
        Ok(Self { address, abi })
    }

    /// Build from an already parsed JSON value.
    pub fn from_value(address: Address, abi: serde_json::Value) -> Result<Self> {
        let abi: JsonAbi = serde_json::from_value(abi)
            .map_err(|e| AppError::Contract(format!("Invalid ABI JSON: {}", e)))?;
        Ok(Self { address, abi })
    }
}

/// A named, typed function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Human-readable description of a contract function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    pub inputs: Vec<FunctionArgument>,
    pub outputs: Vec<FunctionArgument>,
}

impl FunctionInfo {
    /// Canonical text signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|a| a.kind.as_str()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

fn arguments(params: &[Param]) -> Vec<FunctionArgument> {
    params
        .iter()
        .map(|p| FunctionArgument { name: p.name.clone(), kind: p.selector_type().into_owned() })
        .collect()
}

/// List the functions of an ABI, ordered by name.
pub fn functions_of(abi: &JsonAbi) -> Vec<FunctionInfo> {
    abi.functions()
        .map(|f| FunctionInfo {
            name: f.name.clone(),
            inputs: arguments(&f.inputs),
            outputs: arguments(&f.outputs),
        })
        .collect()
}
