//! ============================================================================
//! Receipt Confirmation - Polling with exponential backoff
//! ============================================================================
//! After a transaction is handed to the wallet, poll for its receipt:
//! - Exponential backoff with jitter between polls, capped
//! - Bounded number of polls, then a confirmation timeout
//! - Transport hiccups while polling are logged and polled through
//!
//! Sends themselves are never retried.
//! ============================================================================

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::wallet::{ProviderError, TxReceipt, WalletProvider};

/// Configuration for receipt polling
#[derive(Debug, Clone)]
pub struct ConfirmConfig {
    /// Maximum number of receipt polls
    pub max_polls: u32,
    /// First delay between polls (doubled each attempt)
    pub base_delay_ms: u64,
    /// Maximum delay between polls
    pub max_delay_ms: u64,
    /// Whether to add jitter to delays
    pub jitter: bool,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            max_polls: 30,
            base_delay_ms: 1000,
            max_delay_ms: 8000,
            jitter: true,
        }
    }
}

impl ConfirmConfig {
    /// Tight polling for local nodes and tests
    pub fn immediate() -> Self {
        Self {
            max_polls: 10,
            base_delay_ms: 1,
            max_delay_ms: 1,
            jitter: false,
        }
    }
}

/// How receipt polling ended
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Confirmed(TxReceipt),
    Reverted(TxReceipt),
    TimedOut,
}

/// Calculate delay with exponential backoff and optional jitter
pub fn calculate_delay(attempt: u32, config: &ConfirmConfig) -> Duration {
    let multiplier = 2u64.saturating_pow(attempt.min(63));
    let capped = config.base_delay_ms.saturating_mul(multiplier).min(config.max_delay_ms);

    let delay = if config.jitter {
        // 0-50% extra
        let factor = 1.0 + rand::thread_rng().gen_range(0.0..0.5);
        (capped as f64 * factor) as u64
    } else {
        capped
    };

    Duration::from_millis(delay)
}

/// Poll until the transaction has a receipt or the poll budget runs out.
///
/// A transport failure counts as one more pending poll, so an exhausted
/// budget is always `TimedOut`. Any other provider error ends polling.
pub async fn wait_for_receipt(
    provider: &dyn WalletProvider,
    tx_hash: &str,
    config: &ConfirmConfig,
) -> Result<Confirmation, ProviderError> {
    for attempt in 0..config.max_polls {
        match provider.transaction_receipt(tx_hash).await {
            Ok(Some(receipt)) if receipt.succeeded() => {
                info!("Transaction {} confirmed (poll {})", tx_hash, attempt + 1);
                return Ok(Confirmation::Confirmed(receipt));
            }
            Ok(Some(receipt)) => {
                warn!("Transaction {} reverted", tx_hash);
                return Ok(Confirmation::Reverted(receipt));
            }
            Ok(None) => {
                debug!("Transaction {} pending (poll {})", tx_hash, attempt + 1);
            }
            Err(ProviderError::Transport(e)) => {
                warn!("Receipt poll {} for {} failed: {}", attempt + 1, tx_hash, e);
            }
            Err(e) => return Err(e),
        }

        if attempt + 1 < config.max_polls {
            sleep(calculate_delay(attempt, config)).await;
        }
    }

    warn!("Transaction {} not confirmed after {} polls", tx_hash, config.max_polls);
    Ok(Confirmation::TimedOut)
}
