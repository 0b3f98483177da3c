//! ============================================================================
//! Explore Store - State holder for the explore page
//! ============================================================================
//! Owns the wallet session, the token gate, the catalog filter, and the
//! handles (provider, notifier, ledger) the flow needs. The front end keeps
//! one store per UI context and routes every interaction through it.
//! ============================================================================

use std::sync::Arc;
use tracing::info;

use crate::access::{claim_daily_reward, BalanceChecker, BalanceInfo, ChainTask, GateState, TokenGate};
use crate::catalog::{canonical_category, Catalog, ALL_CATEGORIES};
use crate::config::AppConfig;
use crate::ledger::{LedgerContract, LedgerError};
use crate::types::{parse_address, Address, CatalogError, Expert, Recipe, SessionInfo};
use crate::wallet::{ConnectOutcome, JsonRpcWallet, Notifier, WalletProvider, WalletSession};

pub struct ExploreStore {
    provider: Option<Arc<dyn WalletProvider>>,
    notifier: Arc<dyn Notifier>,
    ledger: Option<Arc<LedgerContract>>,
    donation_address: Address,
    daily_reward_tokens: u64,
    catalog: Catalog,
    session: WalletSession,
    gate: TokenGate,
    selected_category: &'static str,
    search_query: String,
}

impl ExploreStore {
    /// Build from config, using a JSON-RPC wallet when an RPC URL is set
    pub fn from_config(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        let provider = config
            .rpc_url
            .as_ref()
            .map(|url| Arc::new(JsonRpcWallet::new(url.clone())) as Arc<dyn WalletProvider>);
        Self::new(config, provider, notifier, Catalog::featured())
    }

    pub fn new(
        config: &AppConfig,
        provider: Option<Arc<dyn WalletProvider>>,
        notifier: Arc<dyn Notifier>,
        catalog: Catalog,
    ) -> Self {
        let ledger = match (&provider, config.contract_address) {
            (Some(p), Some(address)) => Some(Arc::new(LedgerContract::new(
                Arc::clone(p),
                address,
                config.abi.clone(),
                config.confirm.clone(),
            ))),
            _ => None,
        };

        Self {
            provider,
            notifier,
            ledger,
            donation_address: config.donation_address,
            daily_reward_tokens: config.daily_reward_tokens,
            catalog,
            session: WalletSession::new(),
            gate: TokenGate::new(),
            selected_category: ALL_CATEGORIES,
            search_query: String::new(),
        }
    }

    // ------------------------------------------------------------------
    // Wallet
    // ------------------------------------------------------------------

    pub async fn connect_wallet(&mut self) -> ConnectOutcome {
        self.session
            .connect(self.provider.as_deref(), self.notifier.as_ref())
            .await
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn session_info(&self) -> SessionInfo {
        self.session.info()
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn experts(&self) -> &[Expert] {
        self.catalog.experts()
    }

    pub fn select_category(&mut self, category: &str) -> Result<(), CatalogError> {
        self.selected_category = canonical_category(category)?;
        Ok(())
    }

    pub fn selected_category(&self) -> &str {
        self.selected_category
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Recipes matching the current category and search query
    pub fn visible_recipes(&self) -> Vec<&Recipe> {
        self.catalog
            .filter(Some(self.selected_category), Some(&self.search_query))
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Token gate
    // ------------------------------------------------------------------

    pub fn gate_state(&self) -> &GateState {
        self.gate.state()
    }

    pub fn unlock_prompt(&self) -> Option<String> {
        self.gate.prompt()
    }

    /// Open the confirmation prompt for a recipe
    pub fn request_unlock(&mut self, recipe_id: &str) -> Result<&Recipe, CatalogError> {
        let recipe = self.catalog.get(recipe_id)?.clone();
        self.gate.request_unlock(recipe);
        self.catalog.get(recipe_id)
    }

    pub fn cancel_unlock(&mut self) -> Option<Recipe> {
        self.gate.cancel()
    }

    /// Close the prompt and fire the transfer; see `TokenGate::confirm`
    ///
    /// # Panics
    ///
    /// Panics if a ledger is configured and there is no current Tokio runtime.
    pub fn confirm_unlock(&mut self) -> Option<ChainTask> {
        self.gate.confirm(self.ledger.as_ref(), self.donation_address)
    }

    /// Fire the daily reward mint; see `access::claim_daily_reward`
    ///
    /// # Panics
    ///
    /// Panics if a ledger is configured and there is no current Tokio runtime.
    pub fn claim_daily_reward(&self) -> Option<ChainTask> {
        info!("Daily reward claim requested");
        claim_daily_reward(self.ledger.as_ref(), self.daily_reward_tokens)
    }

    /// Balance of the connected account, `None` without a wallet or session
    pub async fn balance(&self) -> Result<Option<BalanceInfo>, LedgerError> {
        let (Some(ledger), Some(address)) = (&self.ledger, self.session.address()) else {
            return Ok(None);
        };
        let owner = parse_address(address)?;
        let info = BalanceChecker::new(Arc::clone(ledger)).balance_info(&owner).await?;
        Ok(Some(info))
    }
}
