//! ============================================================================
//! Access Types - Gate states, chain call kinds, constants
//! ============================================================================

use alloy_primitives::address;
use serde::Serialize;

use crate::ledger::LedgerError;
use crate::types::{Address, Recipe};

/// Destination of unlock payments
pub const DONATION_ADDRESS: Address = address!("0x94A7Af5edB47c3B91d1B4Ffc2CA535d7aDA8CEDe");

/// Tokens minted by a daily reward claim
pub const DAILY_REWARD_TOKENS: u64 = 100;

/// Unlock cost used when an item carries none
pub const DEFAULT_UNLOCK_COST: u64 = 2;

/// Token gate state. Confirm and cancel both land back in `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GateState {
    #[default]
    Idle,
    PendingConfirmation(Recipe),
}

impl GateState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GateState::Idle)
    }
}

/// What a chain task is doing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainCallKind {
    /// `donate` paying for a recipe; `tokens` in whole units
    Unlock { recipe_id: String, tokens: u64 },
    /// `mint` of the daily reward; `tokens` in whole units
    DailyReward { tokens: u64 },
}

impl ChainCallKind {
    pub fn tokens(&self) -> u64 {
        match self {
            ChainCallKind::Unlock { tokens, .. } | ChainCallKind::DailyReward { tokens } => *tokens,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChainCallKind::Unlock { .. } => "unlock",
            ChainCallKind::DailyReward { .. } => "daily reward",
        }
    }
}

/// Failure observed when awaiting a chain task
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChainTaskError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Chain task ended abnormally: {0}")]
    Aborted(String),
}
