//! ============================================================================
//! Wallet Provider - Host wallet boundary
//! ============================================================================
//! Mirrors the injected browser wallet: a single `request({ method, params })`
//! entry point, with the handful of account/transaction calls the gate flow
//! needs layered on top as provided methods.
//! ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// EIP-1193 "user rejected request" error code
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("User rejected the request: {0}")]
    Rejected(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Build from a JSON-RPC error object, mapping 4001 to a rejection
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        if code == USER_REJECTED_CODE {
            ProviderError::Rejected(message)
        } else {
            ProviderError::Rpc { code, message }
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, ProviderError::Rejected(_))
    }
}

/// Transaction submitted through `eth_sendTransaction` / `eth_call`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    /// 0x-prefixed calldata
    pub data: String,
}

/// Subset of a transaction receipt the flow cares about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    /// "0x1" success, "0x0" reverted
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
}

impl TxReceipt {
    pub fn succeeded(&self) -> bool {
        // Pre-Byzantium receipts carry no status; treat inclusion as success
        !matches!(self.status.as_deref(), Some("0x0"))
    }
}

/// Wallet capability injected by the host environment
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Raw provider request
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Ask the wallet for account access (`eth_requestAccounts`)
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let result = self.request("eth_requestAccounts", json!([])).await?;
        serde_json::from_value(result)
            .map_err(|e| ProviderError::InvalidResponse(format!("accounts: {}", e)))
    }

    /// Address of the account that signs transactions
    async fn signer_address(&self) -> Result<String, ProviderError> {
        self.request_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("wallet returned no accounts".into()))
    }

    /// Sign and submit a transaction, returning its hash
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String, ProviderError> {
        let result = self.request("eth_sendTransaction", json!([tx])).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::InvalidResponse(format!("tx hash: {}", result)))
    }

    /// Read-only contract call, returning 0x-prefixed return data
    async fn call(&self, tx: &TransactionRequest) -> Result<String, ProviderError> {
        let result = self.request("eth_call", json!([tx, "latest"])).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::InvalidResponse(format!("call result: {}", result)))
    }

    /// Receipt for a submitted transaction, `None` while still pending
    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>, ProviderError> {
        let result = self
            .request("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        serde_json::from_value(result)
            .map(Some)
            .map_err(|e| ProviderError::InvalidResponse(format!("receipt: {}", e)))
    }
}
