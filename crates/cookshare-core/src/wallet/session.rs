//! ============================================================================
//! Wallet Session - Connected account tracking
//! ============================================================================
//! Holds the connected address for the lifetime of the UI context. There is
//! no disconnect; a fresh session starts with a fresh context.
//! ============================================================================

use tracing::{info, warn};

use super::provider::WalletProvider;
use crate::types::SessionInfo;

/// Notice shown when no wallet provider is available
pub const NO_WALLET_NOTICE: &str = "MetaMask is not installed. Please install it to use this feature.";

/// Blocking user-facing notice (the browser `alert`)
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Result of a connect attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    Connected(String),
    /// No provider present; the user was notified
    ProviderMissing,
    /// Rejected by the user or failed at the provider; recorded, not surfaced
    Failed(String),
}

/// Session state. `address` is `Some` iff connected.
#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    address: Option<String>,
    last_error: Option<String>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request account access and store the first account on success
    pub async fn connect(
        &mut self,
        provider: Option<&dyn WalletProvider>,
        notifier: &dyn Notifier,
    ) -> ConnectOutcome {
        let Some(provider) = provider else {
            warn!("Connect requested without a wallet provider");
            notifier.alert(NO_WALLET_NOTICE);
            return ConnectOutcome::ProviderMissing;
        };

        let first_account = match provider.request_accounts().await {
            Ok(accounts) => accounts.into_iter().find(|a| !a.is_empty()),
            Err(e) => {
                warn!("Error connecting to wallet: {}", e);
                self.last_error = Some(e.to_string());
                return ConnectOutcome::Failed(e.to_string());
            }
        };

        match first_account {
            Some(address) => {
                info!("Wallet connected: {}", address);
                self.address = Some(address.clone());
                self.last_error = None;
                ConnectOutcome::Connected(address)
            }
            None => {
                let msg = "wallet returned no accounts".to_string();
                warn!("Error connecting to wallet: {}", msg);
                self.last_error = Some(msg.clone());
                ConnectOutcome::Failed(msg)
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Last connection error, kept for diagnostics only
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Nav-button rendering: first 5 chars + "..." + last 4
    pub fn short_address(&self) -> Option<String> {
        self.address.as_deref().map(shorten_address)
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            connected: self.is_connected(),
            address: self.address.clone().unwrap_or_default(),
            short_address: self.short_address(),
        }
    }
}

pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 9 {
        return address.to_string();
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingNotifier, RecordingWallet};
    use serde_json::json;

    #[tokio::test]
    async fn test_connect_without_provider_notifies_once() {
        let mut session = WalletSession::new();
        let notifier = RecordingNotifier::default();

        let outcome = session.connect(None, &notifier).await;

        assert_eq!(outcome, ConnectOutcome::ProviderMissing);
        assert_eq!(notifier.alerts(), vec![NO_WALLET_NOTICE.to_string()]);
        assert!(!session.is_connected());
        assert_eq!(session.address(), None);
    }

    #[tokio::test]
    async fn test_connect_stores_literal_address() {
        let wallet = RecordingWallet::with_accounts(&["0xABC123"]);
        let notifier = RecordingNotifier::default();
        let mut session = WalletSession::new();

        let outcome = session.connect(Some(&wallet), &notifier).await;

        assert_eq!(outcome, ConnectOutcome::Connected("0xABC123".into()));
        assert!(session.is_connected());
        assert_eq!(session.address(), Some("0xABC123"));
        assert!(notifier.alerts().is_empty());
        assert_eq!(wallet.methods(), vec!["eth_requestAccounts".to_string()]);
    }

    #[tokio::test]
    async fn test_rejection_is_silent_and_recorded() {
        let wallet = RecordingWallet::rejecting_accounts();
        let notifier = RecordingNotifier::default();
        let mut session = WalletSession::new();

        let outcome = session.connect(Some(&wallet), &notifier).await;

        assert!(matches!(outcome, ConnectOutcome::Failed(_)));
        assert!(!session.is_connected());
        assert!(notifier.alerts().is_empty());
        assert!(session.last_error().unwrap().contains("rejected"));
        // no retry
        assert_eq!(wallet.methods().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_account_list_leaves_unconnected() {
        let wallet = RecordingWallet::new();
        wallet.respond("eth_requestAccounts", json!([]));
        let notifier = RecordingNotifier::default();
        let mut session = WalletSession::new();

        let outcome = session.connect(Some(&wallet), &notifier).await;

        assert!(matches!(outcome, ConnectOutcome::Failed(_)));
        assert!(!session.is_connected());
        assert_eq!(session.info().address, "");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            shorten_address("0x94A7Af5edB47c3B91d1B4Ffc2CA535d7aDA8CEDe"),
            "0x94A...CEDe"
        );
        assert_eq!(shorten_address("0xABC"), "0xABC");
    }
}
