//! ============================================================================
//! Balance Checker - Token balance lookups for the unlock prompt
//! ============================================================================
//! Queries the ledger's `balanceOf` so the front end can show what the user
//! holds next to a recipe's cost. Informational only; unlock confirmation
//! never waits on it.
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::gate::effective_cost;
use crate::ledger::{LedgerContract, LedgerError};
use crate::types::{Address, Recipe, U256};
use crate::units::{format_tokens, to_base_units};
use alloy_primitives::utils::UnitsError;

/// Balance with display formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub address: String,
    /// Base units as a decimal string (exceeds JSON number precision)
    pub balance_base_units: String,
    pub balance_formatted: String,
}

impl BalanceInfo {
    pub fn new(owner: &Address, balance: U256) -> Result<Self, UnitsError> {
        Ok(Self {
            address: owner.to_checksum(None),
            balance_base_units: balance.to_string(),
            balance_formatted: format_tokens(balance)?,
        })
    }
}

pub struct BalanceChecker {
    ledger: Arc<LedgerContract>,
}

impl BalanceChecker {
    pub fn new(ledger: Arc<LedgerContract>) -> Self {
        Self { ledger }
    }

    /// Raw balance in base units
    pub async fn balance(&self, owner: &Address) -> Result<U256, LedgerError> {
        let balance = self.ledger.balance_of(owner).await?;
        debug!("Token balance for {}: {} (raw)", owner, balance);
        Ok(balance)
    }

    pub async fn balance_info(&self, owner: &Address) -> Result<BalanceInfo, LedgerError> {
        let balance = self.balance(owner).await?;
        Ok(BalanceInfo::new(owner, balance)?)
    }

    /// Whether `owner` holds enough to pay for `recipe`
    pub async fn can_afford(&self, owner: &Address, recipe: &Recipe) -> Result<bool, LedgerError> {
        let cost = to_base_units(effective_cost(recipe))?;
        Ok(self.balance(owner).await? >= cost)
    }
}
