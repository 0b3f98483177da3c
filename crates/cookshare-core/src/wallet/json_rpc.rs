//! ============================================================================
//! JSON-RPC Wallet - WalletProvider over HTTP
//! ============================================================================
//! Talks JSON-RPC 2.0 to a wallet/node endpoint that holds unlocked accounts
//! (a local dev node or a signing proxy). Signing happens on that side.
//! ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::provider::{ProviderError, WalletProvider};

/// WalletProvider backed by an HTTP JSON-RPC endpoint
pub struct JsonRpcWallet {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl JsonRpcWallet {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Turn a decoded JSON-RPC response into the provider result
fn into_result(response: RpcResponse) -> Result<Value, ProviderError> {
    if let Some(err) = response.error {
        return Err(ProviderError::from_rpc(err.code, err.message));
    }
    Ok(response.result.unwrap_or(Value::Null))
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("JSON-RPC #{} -> {}", id, method);

        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("{} failed: {}", method, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Transport(format!("HTTP {}: {}", status, body)));
        }

        let decoded: RpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", method, e)))?;

        into_result(decoded)
    }
}
