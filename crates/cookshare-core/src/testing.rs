//! Recording substitutes for the wallet provider and notifier.

use alloy_primitives::hex;
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::wallet::{Notifier, ProviderError, WalletProvider};

sol! {
    function mint(address to, uint256 amount);
    function donate(address from, address to, uint256 amount);
}

/// Scripted outcome of one receipt poll
#[derive(Debug, Clone, Copy)]
pub enum Poll {
    Pending,
    TransportError,
}

#[derive(Default)]
struct WalletScript {
    accounts: Option<Vec<String>>,
    reject_accounts: bool,
    reject_sends: bool,
    receipt_status: Option<String>,
    pending_polls: usize,
    poll_plan: VecDeque<Poll>,
    remaining_polls: HashMap<String, usize>,
    responses: HashMap<String, Value>,
    errors: HashMap<String, ProviderError>,
    sent: u64,
}

/// In-memory wallet that records every request it receives
#[derive(Default)]
pub struct RecordingWallet {
    script: Mutex<WalletScript>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: &[&str]) -> Self {
        let wallet = Self::new();
        wallet.script.lock().unwrap().accounts = Some(accounts.iter().map(|a| a.to_string()).collect());
        wallet
    }

    pub fn rejecting_accounts() -> Self {
        let wallet = Self::new();
        wallet.script.lock().unwrap().reject_accounts = true;
        wallet
    }

    /// Fixed response for a method
    pub fn respond(&self, method: &str, value: Value) {
        self.script
            .lock()
            .unwrap()
            .responses
            .insert(method.to_string(), value);
    }

    pub fn reject_sends(&self) {
        self.script.lock().unwrap().reject_sends = true;
    }

    /// Status reported by receipts ("0x1" by default)
    pub fn receipt_status(&self, status: &str) {
        self.script.lock().unwrap().receipt_status = Some(status.to_string());
    }

    /// Number of receipt polls that return `null` before a receipt appears
    pub fn pending_polls(&self, polls: usize) {
        self.script.lock().unwrap().pending_polls = polls;
    }

    /// Outcomes of the next receipt polls, before any receipt is returned
    pub fn receipt_polls(&self, polls: &[Poll]) {
        self.script.lock().unwrap().poll_plan.extend(polls.iter().copied());
    }

    /// Fixed error for a method
    pub fn respond_error(&self, method: &str, error: ProviderError) {
        self.script
            .lock()
            .unwrap()
            .errors
            .insert(method.to_string(), error);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(m, _)| m).collect()
    }

    /// Calldata of every `eth_sendTransaction`
    pub fn sent_calldata(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(m, _)| m == "eth_sendTransaction")
            .filter_map(|(_, p)| p[0]["data"].as_str().map(str::to_string))
            .collect()
    }

    /// Sent transactions decoded as `C`, skipping other functions
    pub fn sent_calls<C: SolCall>(&self) -> Vec<C> {
        self.sent_calldata()
            .iter()
            .map(|data| hex::decode(data).unwrap())
            .filter(|data| data.starts_with(&C::SELECTOR))
            .map(|data| C::abi_decode(&data).unwrap())
            .collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.methods().iter().filter(|m| *m == method).count()
    }
}

#[async_trait]
impl WalletProvider for RecordingWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params.clone()));

        let mut script = self.script.lock().unwrap();
        if let Some(error) = script.errors.get(method) {
            return Err(error.clone());
        }
        if let Some(value) = script.responses.get(method) {
            return Ok(value.clone());
        }

        match method {
            "eth_requestAccounts" | "eth_accounts" => {
                if script.reject_accounts {
                    return Err(ProviderError::from_rpc(4001, "User rejected the request."));
                }
                Ok(json!(script.accounts.clone().unwrap_or_default()))
            }
            "eth_sendTransaction" => {
                if script.reject_sends {
                    return Err(ProviderError::from_rpc(4001, "User denied transaction signature."));
                }
                script.sent += 1;
                let hash = format!("0x{:064x}", script.sent);
                let polls = script.pending_polls;
                script.remaining_polls.insert(hash.clone(), polls);
                Ok(json!(hash))
            }
            "eth_getTransactionReceipt" => {
                match script.poll_plan.pop_front() {
                    Some(Poll::Pending) => return Ok(Value::Null),
                    Some(Poll::TransportError) => {
                        return Err(ProviderError::Transport("connection reset".into()))
                    }
                    None => {}
                }
                let hash = params[0].as_str().unwrap_or_default().to_string();
                let remaining = script.remaining_polls.entry(hash.clone()).or_insert(0);
                if *remaining > 0 {
                    *remaining -= 1;
                    return Ok(Value::Null);
                }
                let status = script.receipt_status.clone().unwrap_or_else(|| "0x1".into());
                Ok(json!({
                    "transactionHash": hash,
                    "blockNumber": "0x1",
                    "status": status,
                    "gasUsed": "0x5208"
                }))
            }
            other => Err(ProviderError::Rpc {
                code: -32601,
                message: format!("method {} not scripted", other),
            }),
        }
    }
}

/// Notifier that collects alerts
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
