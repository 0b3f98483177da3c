//! ============================================================================
//! Access Module - Token-gated recipe unlocks
//! ============================================================================
//! The unlock confirmation flow, the daily reward claim, and balance lookups.
//!
//! ## Flow
//! - **request_unlock**: Idle -> PendingConfirmation (no wallet needed)
//! - **cancel**: back to Idle, no chain calls
//! - **confirm**: back to Idle, then a fire-and-forget `donate` transfer
//! - **claim_daily_reward**: independent fire-and-forget `mint`
//!
//! ## Usage
//! ```rust,ignore
//! use cookshare_core::access::{TokenGate, DONATION_ADDRESS};
//!
//! let mut gate = TokenGate::new();
//! gate.request_unlock(recipe);
//! if let Some(task) = gate.confirm(ledger.as_ref(), DONATION_ADDRESS) {
//!     let receipt = task.outcome().await?;
//! }
//! ```
//! ============================================================================

mod checker;
mod gate;
mod prompt;
mod task;
mod types;

pub use checker::{BalanceChecker, BalanceInfo};
pub use gate::{claim_daily_reward, effective_cost, unlock_prompt, TokenGate};
pub use prompt::{ConfirmationReply, PromptReply};
pub use task::ChainTask;
pub use types::{
    ChainCallKind, ChainTaskError, GateState, DAILY_REWARD_TOKENS, DEFAULT_UNLOCK_COST,
    DONATION_ADDRESS,
};
