//! ============================================================================
//! Ledger Module - CookShare token contract client
//! ============================================================================
//! Amounts are 18-decimal base units (see `crate::units`).
//!
//! ## Usage
//! ```rust,ignore
//! use cookshare_core::ledger::{ContractAbi, ConfirmConfig, LedgerContract};
//!
//! let ledger = LedgerContract::new(provider, address, ContractAbi::default(), ConfirmConfig::default());
//! let receipt = ledger.mint(&recipient, to_base_units(100)?).await?;
//! ```
//! ============================================================================

pub mod abi;
mod confirmation;
mod contract;

pub use abi::{AbiError, ContractAbi, DEFAULT_ABI};
pub use confirmation::{calculate_delay, wait_for_receipt, ConfirmConfig, Confirmation};
pub use contract::{LedgerContract, LedgerError};
