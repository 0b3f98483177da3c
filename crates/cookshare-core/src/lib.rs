//! ============================================================================
//! COOKSHARE-CORE: Wallet session and token-gated recipes
//! ============================================================================
//! This crate handles the backend logic for CookShare:
//! - Wallet connection through an injected JSON-RPC provider
//! - Ledger contract calls (mint, donate, balanceOf) with receipt polling
//! - Token gate for recipe unlock confirmations
//! - Recipe catalog and explore-page state
//! ============================================================================

pub mod access;
pub mod catalog;
pub mod config;
pub mod ledger;
pub mod store;
pub mod types;
pub mod units;
pub mod wallet;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use types::*;
pub use access::{ChainTask, TokenGate};
pub use catalog::Catalog;
pub use config::AppConfig;
pub use ledger::LedgerContract;
pub use store::ExploreStore;
pub use wallet::{JsonRpcWallet, WalletProvider, WalletSession};
