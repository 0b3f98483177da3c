//! ============================================================================
//! App Configuration - Environment-driven settings
//! ============================================================================
//! Reads `COOKSHARE_*` variables (load `.env` with dotenvy before calling
//! `AppConfig::from_env`). Without `COOKSHARE_RPC_URL` there is no wallet
//! provider and chain calls are skipped.
//!
//! Contract info mirrors the web app's `contractInfo/` files:
//! - `contractAddress.json`: `{ "address": "0x..." }`
//! - `contractAbi.json`: `{ "abi": [...] }`
//! ============================================================================

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::access::{DAILY_REWARD_TOKENS, DONATION_ADDRESS};
use crate::ledger::{ConfirmConfig, ContractAbi};
use crate::types::{parse_address, Address};

pub const ENV_RPC_URL: &str = "COOKSHARE_RPC_URL";
pub const ENV_CONTRACT_ADDRESS: &str = "COOKSHARE_CONTRACT_ADDRESS";
pub const ENV_CONTRACT_ADDRESS_FILE: &str = "COOKSHARE_CONTRACT_ADDRESS_FILE";
pub const ENV_CONTRACT_ABI_FILE: &str = "COOKSHARE_CONTRACT_ABI_FILE";
pub const ENV_DONATION_ADDRESS: &str = "COOKSHARE_DONATION_ADDRESS";
pub const ENV_DAILY_REWARD: &str = "COOKSHARE_DAILY_REWARD";
pub const ENV_CONFIRM_POLL_MS: &str = "COOKSHARE_CONFIRM_POLL_MS";
pub const ENV_CONFIRM_RETRIES: &str = "COOKSHARE_CONFIRM_RETRIES";

#[derive(Deserialize)]
struct ContractAddressFile {
    address: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Wallet JSON-RPC endpoint; `None` means no wallet provider
    pub rpc_url: Option<String>,
    pub contract_address: Option<Address>,
    pub abi: ContractAbi,
    pub donation_address: Address,
    pub daily_reward_tokens: u64,
    pub confirm: ConfirmConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            contract_address: None,
            abi: ContractAbi::default(),
            donation_address: DONATION_ADDRESS,
            daily_reward_tokens: DAILY_REWARD_TOKENS,
            confirm: ConfirmConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.rpc_url = get(ENV_RPC_URL);

        config.contract_address = match (get(ENV_CONTRACT_ADDRESS), get(ENV_CONTRACT_ADDRESS_FILE)) {
            (Some(addr), _) => Some(
                parse_address(&addr).with_context(|| format!("Invalid {}", ENV_CONTRACT_ADDRESS))?,
            ),
            (None, Some(path)) => Some(load_contract_address(Path::new(&path))?),
            (None, None) => None,
        };

        if let Some(path) = get(ENV_CONTRACT_ABI_FILE) {
            config.abi = load_contract_abi(Path::new(&path))?;
        }

        if let Some(addr) = get(ENV_DONATION_ADDRESS) {
            config.donation_address =
                parse_address(&addr).with_context(|| format!("Invalid {}", ENV_DONATION_ADDRESS))?;
        }

        if let Some(tokens) = get(ENV_DAILY_REWARD) {
            config.daily_reward_tokens = tokens
                .parse()
                .map_err(|e| anyhow!("Invalid {} '{}': {}", ENV_DAILY_REWARD, tokens, e))?;
        }

        if let Some(ms) = get(ENV_CONFIRM_POLL_MS) {
            config.confirm.base_delay_ms = ms
                .parse()
                .map_err(|e| anyhow!("Invalid {} '{}': {}", ENV_CONFIRM_POLL_MS, ms, e))?;
            config.confirm.max_delay_ms = config.confirm.max_delay_ms.max(config.confirm.base_delay_ms);
        }

        if let Some(retries) = get(ENV_CONFIRM_RETRIES) {
            config.confirm.max_polls = retries
                .parse()
                .map_err(|e| anyhow!("Invalid {} '{}': {}", ENV_CONFIRM_RETRIES, retries, e))?;
        }

        if config.rpc_url.is_some() && config.contract_address.is_none() {
            bail!(
                "{} is set but no ledger contract is configured (set {} or {})",
                ENV_RPC_URL,
                ENV_CONTRACT_ADDRESS,
                ENV_CONTRACT_ADDRESS_FILE
            );
        }

        info!(
            "Config: wallet provider {}, contract {}",
            config.rpc_url.as_deref().unwrap_or("<none>"),
            config
                .contract_address
                .map(|a| a.to_string())
                .unwrap_or_else(|| "<none>".into())
        );

        Ok(config)
    }
}

/// Read `{ "address": "0x..." }`
pub fn load_contract_address(path: &Path) -> Result<Address> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read contract address file {}: {}", path.display(), e))?;
    let parsed: ContractAddressFile = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("Failed to parse contract address file {}: {}", path.display(), e))?;
    parse_address(&parsed.address).with_context(|| format!("Invalid address in {}", path.display()))
}

/// Read `{ "abi": [...] }`
pub fn load_contract_abi(path: &Path) -> Result<ContractAbi> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read contract ABI file {}: {}", path.display(), e))?;
    let abi = ContractAbi::from_json(&raw).with_context(|| format!("In {}", path.display()))?;
    for function in ["mint", "donate", "balanceOf"] {
        abi.signature(function)
            .with_context(|| format!("Contract ABI {} is missing a required function", path.display()))?;
    }
    Ok(abi)
}
