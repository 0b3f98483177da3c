//! ============================================================================
//! Token Gate - Recipe unlock confirmation flow
//! ============================================================================
//! Idle -> PendingConfirmation -> (confirm | cancel) -> Idle.
//!
//! Confirming resets the gate first and then fires a `donate` transfer. The
//! gate does not wait for the transfer and keeps no "unlocked" state: the
//! outcome lives only in the returned `ChainTask`. Repeated confirms are not
//! de-duplicated.
//! ============================================================================

use std::sync::Arc;
use tracing::{debug, info};

use super::task::ChainTask;
use super::types::{ChainCallKind, GateState, DEFAULT_UNLOCK_COST};
use crate::ledger::LedgerContract;
use crate::types::{Address, Recipe};
use crate::units::to_base_units;

/// Confirmation prompt shown for a pending unlock. Quotes the amount that
/// will be charged, so a free item reads as the default cost.
pub fn unlock_prompt(recipe: &Recipe) -> String {
    format!(
        "To access {}, you need {} tokens.",
        recipe.title,
        effective_cost(recipe)
    )
}

/// Unlock cost in whole tokens, falling back to the default for free items
pub fn effective_cost(recipe: &Recipe) -> u64 {
    if recipe.coin_cost == 0 {
        DEFAULT_UNLOCK_COST
    } else {
        recipe.coin_cost
    }
}

#[derive(Debug, Default)]
pub struct TokenGate {
    state: GateState,
}

impl TokenGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn pending(&self) -> Option<&Recipe> {
        match &self.state {
            GateState::PendingConfirmation(recipe) => Some(recipe),
            GateState::Idle => None,
        }
    }

    pub fn prompt(&self) -> Option<String> {
        self.pending().map(unlock_prompt)
    }

    /// Select a recipe for unlocking. Replaces any pending selection.
    pub fn request_unlock(&mut self, recipe: Recipe) {
        info!("Unlock requested for recipe {} ({})", recipe.id, recipe.title);
        self.state = GateState::PendingConfirmation(recipe);
    }

    /// Discard the pending selection. No chain calls.
    pub fn cancel(&mut self) -> Option<Recipe> {
        match std::mem::take(&mut self.state) {
            GateState::PendingConfirmation(recipe) => {
                info!("Unlock cancelled for recipe {}", recipe.id);
                Some(recipe)
            }
            GateState::Idle => None,
        }
    }

    /// Reset to idle and fire the unlock transfer to `destination`.
    ///
    /// Returns `None` when nothing was pending or when there is no ledger
    /// (no wallet provider); the latter is skipped silently.
    ///
    /// # Panics
    ///
    /// Panics if a transfer is fired outside a Tokio runtime.
    pub fn confirm(&mut self, ledger: Option<&Arc<LedgerContract>>, destination: Address) -> Option<ChainTask> {
        let recipe = match std::mem::take(&mut self.state) {
            GateState::PendingConfirmation(recipe) => recipe,
            GateState::Idle => {
                debug!("Confirm with nothing pending; ignoring");
                return None;
            }
        };

        let Some(ledger) = ledger else {
            debug!("No wallet provider; skipping unlock transfer for {}", recipe.id);
            return None;
        };

        let tokens = effective_cost(&recipe);
        info!("Unlock confirmed for recipe {}: {} tokens", recipe.id, tokens);

        let ledger = Arc::clone(ledger);
        let kind = ChainCallKind::Unlock {
            recipe_id: recipe.id,
            tokens,
        };
        Some(ChainTask::spawn(kind, async move {
            let amount = to_base_units(tokens)?;
            let from = ledger.signer().await?;
            ledger.donate(&from, &destination, amount).await
        }))
    }
}

/// Fire the daily reward mint to the signer. Skipped without a ledger.
///
/// # Panics
///
/// Panics if a ledger is given and there is no current Tokio runtime.
pub fn claim_daily_reward(ledger: Option<&Arc<LedgerContract>>, tokens: u64) -> Option<ChainTask> {
    let Some(ledger) = ledger else {
        debug!("No wallet provider; skipping daily reward claim");
        return None;
    };

    info!("Claiming daily reward of {} tokens", tokens);
    let ledger = Arc::clone(ledger);
    Some(ChainTask::spawn(ChainCallKind::DailyReward { tokens }, async move {
        let amount = to_base_units(tokens)?;
        let recipient = ledger.signer().await?;
        ledger.mint(&recipient, amount).await
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::types::{ChainTaskError, DAILY_REWARD_TOKENS, DONATION_ADDRESS};
    use crate::catalog::Catalog;
    use crate::ledger::{ConfirmConfig, ContractAbi, LedgerError};
    use crate::testing::{donateCall, mintCall, RecordingWallet};
    use crate::types::U256;
    use crate::wallet::ProviderError;

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const USER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    fn ledger_for(wallet: &Arc<RecordingWallet>) -> Arc<LedgerContract> {
        Arc::new(LedgerContract::new(
            wallet.clone(),
            CONTRACT.parse().unwrap(),
            ContractAbi::default(),
            ConfirmConfig::immediate(),
        ))
    }

    fn donation() -> Address {
        DONATION_ADDRESS
    }

    fn user() -> Address {
        USER.parse().unwrap()
    }

    fn tokens(whole: u64) -> U256 {
        U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn test_request_and_cancel() {
        let mut gate = TokenGate::new();
        let recipe = Catalog::featured().get("2").unwrap().clone();

        gate.request_unlock(recipe.clone());
        assert_eq!(gate.pending(), Some(&recipe));
        assert_eq!(gate.prompt().unwrap(), "To access Tiramisu, you need 150 tokens.");

        assert_eq!(gate.cancel(), Some(recipe));
        assert!(gate.state().is_idle());
        assert_eq!(gate.cancel(), None);
    }

    #[test]
    fn test_request_replaces_pending() {
        let catalog = Catalog::featured();
        let mut gate = TokenGate::new();
        gate.request_unlock(catalog.get("1").unwrap().clone());
        gate.request_unlock(catalog.get("3").unwrap().clone());
        assert_eq!(gate.pending().unwrap().id, "3");
    }

    #[test]
    fn test_prompt_quotes_charged_amount_for_free_item() {
        let mut recipe = Catalog::featured().get("1").unwrap().clone();
        recipe.coin_cost = 0;

        assert_eq!(unlock_prompt(&recipe), "To access Japanese Ramen, you need 2 tokens.");
    }

    #[tokio::test]
    async fn test_every_recipe_confirm_issues_one_transfer() {
        for recipe in Catalog::featured().recipes() {
            let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
            let ledger = ledger_for(&wallet);
            let mut gate = TokenGate::new();

            gate.request_unlock(recipe.clone());
            let task = gate.confirm(Some(&ledger), donation()).unwrap();
            assert!(gate.state().is_idle());
            task.outcome().await.unwrap();

            let sends = wallet.sent_calls::<donateCall>();
            assert_eq!(sends.len(), 1, "recipe {}", recipe.id);
            assert_eq!(wallet.count("eth_sendTransaction"), 1);
            assert_eq!(sends[0].from, user());
            assert_eq!(sends[0].to, donation());
            assert_eq!(sends[0].amount, tokens(recipe.coin_cost));
        }
    }

    #[tokio::test]
    async fn test_ramen_unlock_amount_literal() {
        let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
        let ledger = ledger_for(&wallet);
        let mut gate = TokenGate::new();

        gate.request_unlock(Catalog::featured().get("1").unwrap().clone());
        gate.confirm(Some(&ledger), donation())
            .unwrap()
            .outcome()
            .await
            .unwrap();

        let sends = wallet.sent_calls::<donateCall>();
        assert_eq!(sends[0].amount.to_string(), "250000000000000000000");
    }

    #[tokio::test]
    async fn test_cancel_issues_no_calls() {
        let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
        let ledger = ledger_for(&wallet);
        let mut gate = TokenGate::new();

        gate.request_unlock(Catalog::featured().get("1").unwrap().clone());
        gate.cancel();
        assert!(gate.confirm(Some(&ledger), donation()).is_none());

        tokio::task::yield_now().await;
        assert!(wallet.calls().is_empty());
        assert!(gate.state().is_idle());
    }

    #[test]
    fn test_confirm_without_provider_needs_no_runtime() {
        let mut gate = TokenGate::new();
        gate.request_unlock(Catalog::featured().get("1").unwrap().clone());

        assert!(gate.confirm(None, donation()).is_none());
        assert!(gate.state().is_idle());
        assert!(claim_daily_reward(None, DAILY_REWARD_TOKENS).is_none());
    }

    #[test]
    #[should_panic]
    fn test_confirm_outside_runtime_panics() {
        let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
        let ledger = ledger_for(&wallet);
        let mut gate = TokenGate::new();
        gate.request_unlock(Catalog::featured().get("1").unwrap().clone());

        let _ = gate.confirm(Some(&ledger), donation());
    }

    #[tokio::test]
    async fn test_zero_cost_uses_default() {
        let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
        let ledger = ledger_for(&wallet);
        let mut recipe = Catalog::featured().get("1").unwrap().clone();
        recipe.coin_cost = 0;
        let mut gate = TokenGate::new();

        gate.request_unlock(recipe);
        let task = gate.confirm(Some(&ledger), donation()).unwrap();
        assert_eq!(task.kind().tokens(), DEFAULT_UNLOCK_COST);
        task.outcome().await.unwrap();

        let sends = wallet.sent_calls::<donateCall>();
        assert_eq!(sends[0].amount, tokens(2));
    }

    #[tokio::test]
    async fn test_double_confirm_is_not_deduplicated() {
        let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
        wallet.pending_polls(3);
        let ledger = ledger_for(&wallet);
        let recipe = Catalog::featured().get("3").unwrap().clone();
        let mut gate = TokenGate::new();

        gate.request_unlock(recipe.clone());
        let first = gate.confirm(Some(&ledger), donation()).unwrap();
        gate.request_unlock(recipe);
        let second = gate.confirm(Some(&ledger), donation()).unwrap();
        assert!(!first.is_finished() || !second.is_finished());

        first.outcome().await.unwrap();
        second.outcome().await.unwrap();
        assert_eq!(wallet.count("eth_sendTransaction"), 2);
    }

    #[tokio::test]
    async fn test_failed_transfer_does_not_touch_gate() {
        let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
        wallet.reject_sends();
        let ledger = ledger_for(&wallet);
        let mut gate = TokenGate::new();

        gate.request_unlock(Catalog::featured().get("1").unwrap().clone());
        let task = gate.confirm(Some(&ledger), donation()).unwrap();

        assert!(matches!(
            task.outcome().await,
            Err(ChainTaskError::Ledger(LedgerError::Provider(ProviderError::Rejected(_))))
        ));
        assert!(gate.state().is_idle());
    }

    #[tokio::test]
    async fn test_claim_daily_reward_mints_to_signer() {
        let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
        let ledger = ledger_for(&wallet);

        claim_daily_reward(Some(&ledger), DAILY_REWARD_TOKENS)
            .unwrap()
            .outcome()
            .await
            .unwrap();

        let mints = wallet.sent_calls::<mintCall>();
        assert_eq!(mints.len(), 1);
        assert_eq!(mints[0].to, user());
        assert_eq!(mints[0].amount, tokens(100));
    }

    #[test]
    #[should_panic]
    fn test_claim_outside_runtime_panics() {
        let wallet = Arc::new(RecordingWallet::with_accounts(&[USER]));
        let _ = claim_daily_reward(Some(&ledger_for(&wallet)), DAILY_REWARD_TOKENS);
    }
}
