//! ============================================================================
//! Wallet Module - Provider boundary and session state
//! ============================================================================
//! ## Usage
//! ```rust,ignore
//! use cookshare_core::wallet::{JsonRpcWallet, WalletSession};
//!
//! let wallet = JsonRpcWallet::new("http://127.0.0.1:8545");
//! let mut session = WalletSession::new();
//! session.connect(Some(&wallet), &notifier).await;
//! ```
//! ============================================================================

mod json_rpc;
mod provider;
mod session;

pub use json_rpc::JsonRpcWallet;
pub use provider::{ProviderError, TransactionRequest, TxReceipt, WalletProvider, USER_REJECTED_CODE};
pub use session::{shorten_address, ConnectOutcome, Notifier, WalletSession, NO_WALLET_NOTICE};
