//! ============================================================================
//! Contract ABI - Function lookup and call encoding
//! ============================================================================
//! Reads the contract ABI JSON (`{ "abi": [...] }` or a bare array) and
//! encodes calls / decodes return data against the declared parameter types.
//! ============================================================================

use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::{hex, Selector};
use serde_json::Value;

/// Minimal ABI covering the calls the gate flow makes
pub const DEFAULT_ABI: &str = r#"{
  "abi": [
    {
      "type": "function",
      "name": "mint",
      "stateMutability": "nonpayable",
      "inputs": [
        { "name": "to", "type": "address", "internalType": "address" },
        { "name": "amount", "type": "uint256", "internalType": "uint256" }
      ],
      "outputs": []
    },
    {
      "type": "function",
      "name": "donate",
      "stateMutability": "nonpayable",
      "inputs": [
        { "name": "from", "type": "address", "internalType": "address" },
        { "name": "to", "type": "address", "internalType": "address" },
        { "name": "amount", "type": "uint256", "internalType": "uint256" }
      ],
      "outputs": []
    },
    {
      "type": "function",
      "name": "balanceOf",
      "stateMutability": "view",
      "inputs": [
        { "name": "account", "type": "address", "internalType": "address" }
      ],
      "outputs": [
        { "name": "", "type": "uint256", "internalType": "uint256" }
      ]
    }
  ]
}"#;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AbiError {
    #[error("Failed to parse contract ABI: {0}")]
    Parse(String),

    #[error("Function '{0}' not found in contract ABI")]
    MissingFunction(String),

    #[error("Failed to encode call to '{name}': {reason}")]
    Encode { name: String, reason: String },

    #[error("Failed to decode '{name}' return data: {reason}")]
    Decode { name: String, reason: String },

    #[error("Invalid hex data: {0}")]
    Hex(String),
}

/// Parsed contract ABI
#[derive(Debug, Clone)]
pub struct ContractAbi {
    abi: JsonAbi,
}

impl ContractAbi {
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let doc: Value = serde_json::from_str(json).map_err(|e| AbiError::Parse(e.to_string()))?;
        let items = match doc {
            Value::Object(mut wrapped) => wrapped
                .remove("abi")
                .ok_or_else(|| AbiError::Parse("expected an \"abi\" array".into()))?,
            bare => bare,
        };
        let abi: JsonAbi = serde_json::from_value(items).map_err(|e| AbiError::Parse(e.to_string()))?;
        Ok(Self { abi })
    }

    /// First overload of a function by name
    pub fn function(&self, name: &str) -> Result<&Function, AbiError> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| AbiError::MissingFunction(name.to_string()))
    }

    /// Canonical signature, e.g. `mint(address,uint256)`
    pub fn signature(&self, name: &str) -> Result<String, AbiError> {
        Ok(self.function(name)?.signature())
    }

    pub fn selector(&self, name: &str) -> Result<Selector, AbiError> {
        Ok(self.function(name)?.selector())
    }

    /// Selector followed by the ABI-encoded arguments
    pub fn encode_call(&self, name: &str, args: &[DynSolValue]) -> Result<Vec<u8>, AbiError> {
        self.function(name)?
            .abi_encode_input(args)
            .map_err(|e| AbiError::Encode {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Decode `eth_call` return data against the function's outputs
    pub fn decode_output(&self, name: &str, data: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
        self.function(name)?
            .abi_decode_output(data)
            .map_err(|e| AbiError::Decode {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Default for ContractAbi {
    fn default() -> Self {
        // DEFAULT_ABI is a compile-time constant covered by tests
        Self::from_json(DEFAULT_ABI).unwrap_or(Self { abi: JsonAbi::default() })
    }
}

/// 0x-prefixed hex
pub fn to_hex(data: &[u8]) -> String {
    hex::encode_prefixed(data)
}

/// Decode 0x-prefixed hex into bytes
pub fn from_hex(data: &str) -> Result<Vec<u8>, AbiError> {
    hex::decode(data).map_err(|e| AbiError::Hex(e.to_string()))
}
