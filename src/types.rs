//! Common types shared across modules.

use crate::utils::{format_number, shorten_mint, to_fixed};
use serde::{Deserialize, Serialize};

/// A wallet account as listed in the account selector.
///
/// The panel refers to accounts only by their position in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub public_key: String,
    pub derivation_path: String,
}

impl WalletAccount {
    /// Selector label for the account at `index` ("Account 1" for index 0).
    pub fn label(index: usize) -> String {
        format!("Account {}", index + 1)
    }
}

/// A non-native token balance held by the selected account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenHolding {
    pub mint: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub amount: f64,
}

impl TokenHolding {
    /// Left-hand label: "Name (SYM)" when named, otherwise "Unknown token".
    pub fn display_name(&self) -> String {
        match (&self.name, &self.symbol) {
            (Some(name), Some(symbol)) => format!("{} ({})", name, symbol),
            (Some(name), None) => name.clone(),
            (None, _) => "Unknown token".to_string(),
        }
    }

    /// Right-hand label: the amount with the symbol, or with a shortened mint
    /// when the token has no symbol. Never both.
    pub fn display_amount(&self) -> String {
        match &self.symbol {
            Some(symbol) => format!("{} {}", format_number(self.amount), symbol),
            None => format!("{} {}", format_number(self.amount), shorten_mint(&self.mint)),
        }
    }
}

/// Read-only balances shown on the card.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceSnapshot {
    /// Fiat (USD) value of the selected account.
    pub fiat: f64,
    /// Balance in the chain's native token.
    pub native: f64,
}

impl BalanceSnapshot {
    pub fn new(fiat: f64, native: f64) -> Self {
        Self { fiat, native }
    }

    /// "Balance: $12.34 (0.500 SOL)"
    pub fn display(&self, native_token: &str) -> String {
        format!(
            "Balance: ${} ({} {})",
            to_fixed(self.fiat, 2),
            to_fixed(self.native, 3),
            native_token
        )
    }
}
