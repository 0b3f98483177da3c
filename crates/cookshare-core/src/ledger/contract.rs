//! ============================================================================
//! Ledger Contract - CookShare token contract calls
//! ============================================================================
//! Builds calldata from the contract ABI, hands transactions to the wallet
//! provider for signing, and waits for the receipt. The contract itself is an
//! opaque external service.
//! ============================================================================

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::utils::UnitsError;
use std::sync::Arc;
use tracing::info;

use super::abi::{self, AbiError, ContractAbi};
use super::confirmation::{wait_for_receipt, ConfirmConfig, Confirmation};
use crate::types::{parse_address, Address, AddressError, U256};
use crate::wallet::{ProviderError, TransactionRequest, TxReceipt, WalletProvider};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Invalid token amount: {0}")]
    Units(String),

    #[error("Transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },

    #[error("Transaction {tx_hash} was not confirmed in time")]
    ConfirmationTimeout { tx_hash: String },
}

impl From<UnitsError> for LedgerError {
    fn from(e: UnitsError) -> Self {
        LedgerError::Units(e.to_string())
    }
}

/// Client for the CookShare ledger contract
pub struct LedgerContract {
    provider: Arc<dyn WalletProvider>,
    address: Address,
    abi: ContractAbi,
    confirm: ConfirmConfig,
}

impl LedgerContract {
    pub fn new(provider: Arc<dyn WalletProvider>, address: Address, abi: ContractAbi, confirm: ConfirmConfig) -> Self {
        info!("Ledger contract at {}", address);
        Self {
            provider,
            address,
            abi,
            confirm,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Address of the wallet's signing account
    pub async fn signer(&self) -> Result<Address, LedgerError> {
        let raw = self.provider.signer_address().await?;
        Ok(parse_address(&raw)?)
    }

    /// `mint(recipient, amount)`; amount in base units
    pub async fn mint(&self, recipient: &Address, amount: U256) -> Result<TxReceipt, LedgerError> {
        info!("mint {} base units to {}", amount, recipient);
        let args = [DynSolValue::Address(*recipient), DynSolValue::Uint(amount, 256)];
        self.submit("mint", &args, recipient).await
    }

    /// `donate(from, to, amount)`; amount in base units
    pub async fn donate(&self, from: &Address, to: &Address, amount: U256) -> Result<TxReceipt, LedgerError> {
        info!("donate {} base units from {} to {}", amount, from, to);
        let args = [
            DynSolValue::Address(*from),
            DynSolValue::Address(*to),
            DynSolValue::Uint(amount, 256),
        ];
        self.submit("donate", &args, from).await
    }

    /// `balanceOf(owner)` via eth_call
    pub async fn balance_of(&self, owner: &Address) -> Result<U256, LedgerError> {
        let data = self.abi.encode_call("balanceOf", &[DynSolValue::Address(*owner)])?;
        let tx = TransactionRequest {
            from: None,
            to: self.address.to_checksum(None),
            data: abi::to_hex(&data),
        };

        let returned = abi::from_hex(&self.provider.call(&tx).await?)?;
        let outputs = self.abi.decode_output("balanceOf", &returned)?;
        outputs
            .first()
            .and_then(DynSolValue::as_uint)
            .map(|(balance, _)| balance)
            .ok_or_else(|| {
                LedgerError::Abi(AbiError::Decode {
                    name: "balanceOf".into(),
                    reason: "expected a uint return value".into(),
                })
            })
    }

    async fn submit(&self, function: &str, args: &[DynSolValue], from: &Address) -> Result<TxReceipt, LedgerError> {
        let data = self.abi.encode_call(function, args)?;
        let tx = TransactionRequest {
            from: Some(from.to_checksum(None)),
            to: self.address.to_checksum(None),
            data: abi::to_hex(&data),
        };

        let tx_hash = self.provider.send_transaction(&tx).await?;
        info!("{} submitted: {}", function, tx_hash);

        match wait_for_receipt(self.provider.as_ref(), &tx_hash, &self.confirm).await? {
            Confirmation::Confirmed(receipt) => Ok(receipt),
            Confirmation::Reverted(_) => Err(LedgerError::Reverted { tx_hash }),
            Confirmation::TimedOut => Err(LedgerError::ConfirmationTimeout { tx_hash }),
        }
    }
}
