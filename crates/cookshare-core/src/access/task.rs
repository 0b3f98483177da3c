//! Fire-and-forget chain calls with an observable outcome.
//!
//! A `ChainTask` is spawned and never awaited by the gate. Whoever holds it may
//! await `outcome()`; dropping it detaches the call, and a failure is then
//! only logged.

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::types::{ChainCallKind, ChainTaskError};
use crate::ledger::LedgerError;
use crate::wallet::TxReceipt;

pub struct ChainTask {
    kind: ChainCallKind,
    submitted_at: i64,
    handle: JoinHandle<Result<TxReceipt, LedgerError>>,
}

impl ChainTask {
    /// Spawn on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub(crate) fn spawn<F>(kind: ChainCallKind, call: F) -> Self
    where
        F: Future<Output = Result<TxReceipt, LedgerError>> + Send + 'static,
    {
        let label = kind.label();
        let handle = tokio::spawn(async move {
            let result = call.await;
            match &result {
                Ok(receipt) => info!("{} transaction {} confirmed", label, receipt.transaction_hash),
                Err(e) => warn!("{} transaction failed: {}", label, e),
            }
            result
        });

        Self {
            kind,
            submitted_at: chrono::Utc::now().timestamp(),
            handle,
        }
    }

    pub fn kind(&self) -> &ChainCallKind {
        &self.kind
    }

    /// Unix timestamp the call was issued at
    pub fn submitted_at(&self) -> i64 {
        self.submitted_at
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the call to settle
    pub async fn outcome(self) -> Result<TxReceipt, ChainTaskError> {
        match self.handle.await {
            Ok(result) => result.map_err(ChainTaskError::from),
            Err(e) => Err(ChainTaskError::Aborted(e.to_string())),
        }
    }
}

impl std::fmt::Debug for ChainTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainTask")
            .field("kind", &self.kind)
            .field("submitted_at", &self.submitted_at)
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}
