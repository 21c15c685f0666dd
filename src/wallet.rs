//! In-memory wallet used behind the card.
//!
//! Nothing here talks to a chain. Accounts are random keypair addresses and
//! every operation is applied to local balances after validation. Outcomes are
//! queued as messages for the UI and appended to the operation log.

use crate::config::{NATIVE_TOKEN, QUOTE_TOKEN, USDC_MINT};
use crate::operation_log;
use crate::types::{BalanceSnapshot, TokenHolding, WalletAccount};
use crate::utils::format_number;
use crate::validation::{
    ensure_funds, validate_account_index, validate_address, validate_amount, validate_token,
    ValidationError,
};
use crate::wallet_ops::WalletOperations;
use std::collections::VecDeque;

/// Outcome of one wallet operation, drained by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletEvent {
    Completed(String),
    Rejected(String),
}

impl WalletEvent {
    pub fn message(&self) -> &str {
        match self {
            WalletEvent::Completed(msg) | WalletEvent::Rejected(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct AccountLedger {
    native: f64,
    tokens: Vec<TokenHolding>,
}

pub struct SimulatedWallet {
    cluster: String,
    accounts: Vec<WalletAccount>,
    ledgers: Vec<AccountLedger>,
    selected: usize,
    usd_price: Option<f64>,
    events: VecDeque<WalletEvent>,
    log_operations: bool,
}

fn random_base58_key() -> String {
    let bytes: [u8; 32] = rand::random();
    bs58::encode(bytes).into_string()
}

fn derivation_path(index: usize) -> String {
    format!("m/44'/501'/{}'/0'", index)
}

impl SimulatedWallet {
    /// A wallet with one account holding `starting_balance` native tokens.
    pub fn new(cluster: impl Into<String>, starting_balance: f64, log_operations: bool) -> Self {
        let mut wallet = Self {
            cluster: cluster.into(),
            accounts: Vec::new(),
            ledgers: Vec::new(),
            selected: 0,
            usd_price: None,
            events: VecDeque::new(),
            log_operations,
        };
        wallet.push_account();
        if let Some(ledger) = wallet.ledgers.first_mut() {
            ledger.native = starting_balance;
        }
        wallet
    }

    pub fn accounts(&self) -> &[WalletAccount] {
        &self.accounts
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_account(&self) -> Option<&WalletAccount> {
        self.accounts.get(self.selected)
    }

    pub fn native_balance(&self) -> f64 {
        self.ledgers.get(self.selected).map(|l| l.native).unwrap_or(0.0)
    }

    /// Fiat value uses the last known USD price; 0 until one is known.
    pub fn balance(&self) -> BalanceSnapshot {
        let native = self.native_balance();
        let fiat = self.usd_price.map(|p| native * p).unwrap_or(0.0);
        BalanceSnapshot::new(fiat, native)
    }

    pub fn tokens(&self) -> &[TokenHolding] {
        self.ledgers
            .get(self.selected)
            .map(|l| l.tokens.as_slice())
            .unwrap_or(&[])
    }

    pub fn usd_price(&self) -> Option<f64> {
        self.usd_price
    }

    pub fn set_usd_price(&mut self, price: f64) {
        if price.is_finite() && price > 0.0 {
            self.usd_price = Some(price);
        }
    }

    pub fn set_cluster(&mut self, cluster: impl Into<String>) {
        self.cluster = cluster.into();
    }

    pub fn set_log_operations(&mut self, enabled: bool) {
        self.log_operations = enabled;
    }

    /// Take all queued outcomes, oldest first.
    pub fn drain_events(&mut self) -> Vec<WalletEvent> {
        self.events.drain(..).collect()
    }

    /// Credit (`is_adding`) or debit the selected account.
    pub fn adjust_funds(&mut self, is_adding: bool, amount: f64) {
        let operation = if is_adding { "Add Funds" } else { "Withdraw" };
        let result = self.try_adjust_funds(is_adding, amount);
        self.finish(operation, result);
    }

    fn try_adjust_funds(&mut self, is_adding: bool, amount: f64) -> Result<String, ValidationError> {
        let amount = validate_amount(amount)?;
        if !is_adding {
            ensure_funds(amount, self.native_balance())?;
        }
        let ledger = self.selected_ledger_mut()?;
        if is_adding {
            ledger.native += amount;
            Ok(format!("Added {} {}", format_number(amount), NATIVE_TOKEN))
        } else {
            ledger.native -= amount;
            Ok(format!("Withdrew {} {}", format_number(amount), NATIVE_TOKEN))
        }
    }

    fn try_send(&mut self, to_address: &str, amount: f64) -> Result<String, ValidationError> {
        let to_address = validate_address(to_address)?;
        let amount = validate_amount(amount)?;
        ensure_funds(amount, self.native_balance())?;

        self.selected_ledger_mut()?.native -= amount;
        // Transfers between local accounts land on the receiving side
        if let Some(index) = self.accounts.iter().position(|a| a.public_key == to_address) {
            self.ledgers[index].native += amount;
        }
        Ok(format!(
            "Sent {} {} to {}",
            format_number(amount),
            NATIVE_TOKEN,
            to_address
        ))
    }

    fn try_create_token(
        &mut self,
        decimals: f64,
        name: &str,
        symbol: &str,
        uri: &str,
        description: &str,
        mint_amount: f64,
    ) -> Result<String, ValidationError> {
        let spec = validate_token(decimals, name, symbol, uri, description, mint_amount)?;
        let mint = random_base58_key();
        let holding = TokenHolding {
            mint: mint.clone(),
            name: Some(spec.name.clone()),
            symbol: Some(spec.symbol.clone()),
            amount: spec.mint_amount as f64,
        };
        self.selected_ledger_mut()?.tokens.push(holding);
        Ok(format!(
            "Created {} ({}) with {} decimals, minted {} to {}",
            spec.name, spec.symbol, spec.decimals, spec.mint_amount, mint
        ))
    }

    fn try_swap(&mut self, amount: f64) -> Result<String, ValidationError> {
        let amount = validate_amount(amount)?;
        ensure_funds(amount, self.native_balance())?;
        let price = self.usd_price.ok_or(ValidationError::PriceUnavailable)?;
        let received = amount * price;

        let ledger = self.selected_ledger_mut()?;
        ledger.native -= amount;
        match ledger.tokens.iter_mut().find(|t| t.mint == USDC_MINT) {
            Some(holding) => holding.amount += received,
            None => ledger.tokens.push(TokenHolding {
                mint: USDC_MINT.to_string(),
                name: Some("USD Coin".to_string()),
                symbol: Some(QUOTE_TOKEN.to_string()),
                amount: received,
            }),
        }
        Ok(format!(
            "Swapped {} {} for {} {}",
            format_number(amount),
            NATIVE_TOKEN,
            format_number(received),
            QUOTE_TOKEN
        ))
    }

    fn selected_ledger_mut(&mut self) -> Result<&mut AccountLedger, ValidationError> {
        let selected = self.selected;
        self.ledgers
            .get_mut(selected)
            .ok_or_else(|| ValidationError::UnknownAccount(selected.to_string()))
    }

    fn push_account(&mut self) -> usize {
        let index = self.accounts.len();
        self.accounts.push(WalletAccount {
            public_key: random_base58_key(),
            derivation_path: derivation_path(index),
        });
        self.ledgers.push(AccountLedger::default());
        index
    }

    fn finish(&mut self, operation: &str, result: Result<String, ValidationError>) {
        let event = match result {
            Ok(details) => {
                tracing::info!("{}: {}", operation, details);
                WalletEvent::Completed(details)
            }
            Err(e) => {
                tracing::warn!("{} rejected: {}", operation, e);
                WalletEvent::Rejected(format!("{} rejected: {}", operation, e))
            }
        };
        if self.log_operations {
            if let Err(e) = operation_log::append_log(operation, &self.cluster, event.message()) {
                tracing::warn!("Failed to log {} operation: {}", operation, e);
            }
        }
        self.events.push_back(event);
    }
}

impl WalletOperations for SimulatedWallet {
    fn on_account_change(&mut self, index: &str) {
        match validate_account_index(index, self.accounts.len()) {
            Ok(i) => {
                self.selected = i;
                tracing::debug!("Selected account {}", i);
            }
            Err(e) => self.finish("Select Account", Err(e)),
        }
    }

    fn on_send(&mut self, to_address: &str, amount: f64) {
        let result = self.try_send(to_address, amount);
        self.finish("Send", result);
    }

    fn on_add_funds(&mut self, is_adding: bool, amount: f64) {
        self.adjust_funds(is_adding, amount);
    }

    fn on_withdraw(&mut self, is_withdrawing: bool, amount: f64) {
        // The flag means "is adding": the card passes false here, i.e. a debit
        self.adjust_funds(is_withdrawing, amount);
    }

    fn on_create_token(
        &mut self,
        decimals: f64,
        name: &str,
        symbol: &str,
        uri: &str,
        description: &str,
        mint_amount: f64,
    ) {
        let result = self.try_create_token(decimals, name, symbol, uri, description, mint_amount);
        self.finish("Create Token", result);
    }

    fn on_swap(&mut self, amount: f64) {
        let result = self.try_swap(amount);
        self.finish("Swap", result);
    }

    fn on_create_new_account(&mut self) {
        let index = self.push_account();
        let key = self.accounts[index].public_key.clone();
        self.finish(
            "Create Account",
            Ok(format!("Created {} ({})", WalletAccount::label(index), key)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ActionKind, FormField};
    use crate::panel::ActionPanel;

    fn wallet() -> SimulatedWallet {
        SimulatedWallet::new("devnet", 2.0, false)
    }

    fn last_event(wallet: &mut SimulatedWallet) -> WalletEvent {
        wallet.drain_events().pop().unwrap()
    }

    // ==================== account tests ====================

    #[test]
    fn test_new_wallet_has_one_funded_account() {
        let wallet = wallet();
        assert_eq!(wallet.accounts().len(), 1);
        assert_eq!(wallet.native_balance(), 2.0);
        assert_eq!(wallet.accounts()[0].derivation_path, "m/44'/501'/0'/0'");
        assert!(validate_address(&wallet.accounts()[0].public_key).is_ok());
    }

    #[test]
    fn test_create_and_select_account() {
        let mut wallet = wallet();
        wallet.on_create_new_account();
        assert_eq!(wallet.accounts().len(), 2);

        wallet.on_account_change("1");
        assert_eq!(wallet.selected_index(), 1);
        assert_eq!(wallet.native_balance(), 0.0);
    }

    #[test]
    fn test_select_unknown_account_is_rejected() {
        let mut wallet = wallet();
        wallet.on_account_change("7");
        assert_eq!(wallet.selected_index(), 0);
        assert!(matches!(last_event(&mut wallet), WalletEvent::Rejected(_)));
    }

    // ==================== funding tests ====================

    #[test]
    fn test_add_funds_and_withdraw_through_literal_flags() {
        let mut wallet = wallet();
        wallet.on_add_funds(true, 1.5);
        assert_eq!(wallet.native_balance(), 3.5);

        wallet.on_withdraw(false, 0.5);
        assert_eq!(wallet.native_balance(), 3.0);
    }

    #[test]
    fn test_withdraw_more_than_balance_is_rejected() {
        let mut wallet = wallet();
        wallet.on_withdraw(false, 5.0);
        assert_eq!(wallet.native_balance(), 2.0);
        match last_event(&mut wallet) {
            WalletEvent::Rejected(msg) => assert!(msg.contains("Insufficient balance")),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_nan_amount_is_rejected() {
        let mut wallet = wallet();
        wallet.on_add_funds(true, f64::NAN);
        assert_eq!(wallet.native_balance(), 2.0);
        assert!(matches!(last_event(&mut wallet), WalletEvent::Rejected(_)));
    }

    // ==================== send tests ====================

    #[test]
    fn test_send_between_local_accounts() {
        let mut wallet = wallet();
        wallet.on_create_new_account();
        let to = wallet.accounts()[1].public_key.clone();

        wallet.on_send(&to, 0.75);
        assert_eq!(wallet.native_balance(), 1.25);
        wallet.on_account_change("1");
        assert_eq!(wallet.native_balance(), 0.75);
    }

    #[test]
    fn test_send_to_invalid_address_is_rejected() {
        let mut wallet = wallet();
        wallet.on_send("nope", 1.0);
        assert_eq!(wallet.native_balance(), 2.0);
        assert!(matches!(last_event(&mut wallet), WalletEvent::Rejected(_)));
    }

    // ==================== token tests ====================

    #[test]
    fn test_create_token_adds_holding() {
        let mut wallet = wallet();
        wallet.on_create_token(6.0, "Test", "TST", "https://example.com/t.json", "", 500.0);

        let tokens = wallet.tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].symbol.as_deref(), Some("TST"));
        assert_eq!(tokens[0].amount, 500.0);
        assert!(matches!(last_event(&mut wallet), WalletEvent::Completed(_)));
    }

    #[test]
    fn test_create_token_with_nan_decimals_is_rejected() {
        let mut wallet = wallet();
        wallet.on_create_token(f64::NAN, "Test", "TST", "https://example.com", "", 5.0);
        assert!(wallet.tokens().is_empty());
    }

    // ==================== swap tests ====================

    #[test]
    fn test_swap_requires_price() {
        let mut wallet = wallet();
        wallet.on_swap(1.0);
        assert_eq!(wallet.native_balance(), 2.0);
        match last_event(&mut wallet) {
            WalletEvent::Rejected(msg) => assert!(msg.contains("USD price")),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_swap_credits_usdc_holding() {
        let mut wallet = wallet();
        wallet.set_usd_price(100.0);
        wallet.on_swap(0.5);
        wallet.on_swap(0.25);

        assert_eq!(wallet.native_balance(), 1.25);
        let usdc: Vec<_> = wallet.tokens().iter().filter(|t| t.mint == USDC_MINT).collect();
        assert_eq!(usdc.len(), 1);
        assert_eq!(usdc[0].amount, 75.0);
        assert_eq!(wallet.balance(), BalanceSnapshot::new(125.0, 1.25));
    }

    #[test]
    fn test_set_usd_price_ignores_bad_values() {
        let mut wallet = wallet();
        wallet.set_usd_price(f64::NAN);
        wallet.set_usd_price(-1.0);
        assert!(wallet.usd_price().is_none());
        assert_eq!(wallet.balance().fiat, 0.0);
    }

    // ==================== panel integration tests ====================

    #[test]
    fn test_panel_withdraw_debits_simulated_wallet() {
        let mut wallet = wallet();
        let mut panel = ActionPanel::default();

        panel.open(ActionKind::Withdraw);
        panel.set_field(ActionKind::Withdraw, FormField::Amount, "0.5");
        panel.submit(ActionKind::Withdraw, &mut wallet);

        assert_eq!(wallet.native_balance(), 1.5);
        assert!(panel.form(ActionKind::Withdraw).is_empty());
    }

    #[test]
    fn test_panel_reset_survives_rejected_request() {
        let mut wallet = wallet();
        let mut panel = ActionPanel::default();

        panel.open(ActionKind::Send);
        panel.set_field(ActionKind::Send, FormField::ToAddress, "bad");
        panel.set_field(ActionKind::Send, FormField::Amount, "abc");
        panel.submit(ActionKind::Send, &mut wallet);

        assert!(!panel.form(ActionKind::Send).is_open());
        assert!(panel.form(ActionKind::Send).is_empty());
        assert!(matches!(last_event(&mut wallet), WalletEvent::Rejected(_)));
    }
}
