//! ============================================================================
//! Core Types for CookShare
//! ============================================================================
//! Defines the recipe content items, expert cards, ledger addresses, and the
//! serializable snapshots handed to the front end.
//! ============================================================================

use serde::{Deserialize, Serialize};

pub use alloy_primitives::{Address, U256};

/// Recipe difficulty as shown on the explore cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A token-gated recipe (content item). Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    /// Attribution shown as "By <chef>"
    pub chef: String,
    pub rating: f32,
    /// Unlock cost in whole tokens (scaled to base units at transfer time)
    pub coin_cost: u64,
    pub time: String,
    pub difficulty: Difficulty,
    pub category: String,
    /// Media reference (image URL)
    pub image: String,
}

/// Expert chef card on the explore page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub rating: f32,
    pub students: u32,
    /// Number of published recipes
    pub recipes: u32,
    pub image: String,
}

/// Parse a 0x-prefixed account address. Mixed-case input is not checksum
/// validated; wallets report addresses verbatim.
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
    let trimmed = input.trim();
    if !trimmed.starts_with("0x") {
        return Err(AddressError::MissingPrefix(input.to_string()));
    }
    trimmed.parse::<Address>().map_err(|e| AddressError::Invalid {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Address {0} must start with 0x")]
    MissingPrefix(String),

    #[error("Invalid address {input}: {reason}")]
    Invalid { input: String, reason: String },
}

/// Serializable view of the wallet session for the front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub connected: bool,
    pub address: String,
    pub short_address: Option<String>,
}

/// Errors surfaced by catalog lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}
