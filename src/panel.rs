//! The wallet card's action panel.
//!
//! Holds the five dialog forms side by side plus the swap quote refresher.
//! Forms never share buffers: opening, typing into or submitting one dialog
//! leaves the other four exactly as they were.

use crate::form::{ActionForm, ActionKind, FormField};
use crate::quote::{QuoteFailurePolicy, QuoteRefresher, QuoteSource};
use crate::types::{BalanceSnapshot, TokenHolding, WalletAccount};
use crate::utils::{format_number, parse_decimal, to_fixed};
use crate::wallet_ops::WalletOperations;

pub const INSUFFICIENT_BALANCE_WARNING: &str = "Error: Insufficient balance";
pub const NO_TOKENS_MESSAGE: &str = "No non-native tokens found";

pub struct ActionPanel {
    send: ActionForm,
    add_funds: ActionForm,
    withdraw: ActionForm,
    create_token: ActionForm,
    swap: ActionForm,
    quote: QuoteRefresher,
}

impl Default for ActionPanel {
    fn default() -> Self {
        Self::new(QuoteFailurePolicy::default())
    }
}

impl ActionPanel {
    pub fn new(quote_failure_policy: QuoteFailurePolicy) -> Self {
        Self {
            send: ActionForm::new(ActionKind::Send),
            add_funds: ActionForm::new(ActionKind::AddFunds),
            withdraw: ActionForm::new(ActionKind::Withdraw),
            create_token: ActionForm::new(ActionKind::CreateToken),
            swap: ActionForm::new(ActionKind::Swap),
            quote: QuoteRefresher::new(quote_failure_policy),
        }
    }

    pub fn form(&self, kind: ActionKind) -> &ActionForm {
        match kind {
            ActionKind::Send => &self.send,
            ActionKind::AddFunds => &self.add_funds,
            ActionKind::Withdraw => &self.withdraw,
            ActionKind::CreateToken => &self.create_token,
            ActionKind::Swap => &self.swap,
        }
    }

    pub fn form_mut(&mut self, kind: ActionKind) -> &mut ActionForm {
        match kind {
            ActionKind::Send => &mut self.send,
            ActionKind::AddFunds => &mut self.add_funds,
            ActionKind::Withdraw => &mut self.withdraw,
            ActionKind::CreateToken => &mut self.create_token,
            ActionKind::Swap => &mut self.swap,
        }
    }

    pub fn open(&mut self, kind: ActionKind) {
        self.form_mut(kind).open();
    }

    pub fn close(&mut self, kind: ActionKind) {
        self.form_mut(kind).close();
    }

    pub fn set_field(&mut self, kind: ActionKind, field: FormField, value: impl Into<String>) -> bool {
        self.form_mut(kind).set_field(field, value)
    }

    /// Submit one dialog: parse, close and clear it, then invoke exactly one
    /// wallet callback with the parsed arguments.
    pub fn submit<W: WalletOperations + ?Sized>(&mut self, kind: ActionKind, ops: &mut W) {
        let request = self.form_mut(kind).submit();
        request.dispatch(ops);
    }

    /// Forward an account selector change verbatim.
    pub fn change_account<W: WalletOperations + ?Sized>(&self, index: &str, ops: &mut W) {
        tracing::debug!("Account selection changed to {}", index);
        ops.on_account_change(index);
    }

    pub fn create_new_account<W: WalletOperations + ?Sized>(&self, ops: &mut W) {
        ops.on_create_new_account();
    }

    /// Issue a quote request if the swap amount text changed since last call.
    pub fn refresh_quote<S: QuoteSource + ?Sized>(&mut self, source: &S) -> bool {
        self.quote.observe(self.swap.field(FormField::SwapAmount), source)
    }

    /// Collect finished quote requests. Returns true if the quote or its error
    /// changed.
    pub fn poll_quote(&mut self) -> bool {
        self.quote.poll()
    }

    pub fn quote(&self) -> &QuoteRefresher {
        &self.quote
    }

    pub fn quote_mut(&mut self) -> &mut QuoteRefresher {
        &mut self.quote
    }

    /// "You will receive: 145.5 USDC"
    pub fn receive_line(&self, quote_token: &str) -> String {
        format!(
            "You will receive: {} {}",
            format_number(self.quote.last_quote()),
            quote_token
        )
    }

    /// Advisory warning for the swap dialog. Never blocks submission.
    pub fn swap_warning(&self, native_balance: f64) -> Option<&'static str> {
        if exceeds_balance(self.swap.field(FormField::SwapAmount), native_balance) {
            Some(INSUFFICIENT_BALANCE_WARNING)
        } else {
            None
        }
    }
}

/// Whether the typed amount is larger than the balance as displayed
/// (3 decimals). Unparseable amounts never exceed.
pub fn exceeds_balance(amount_text: &str, native_balance: f64) -> bool {
    let amount = parse_decimal(amount_text);
    let shown_balance = parse_decimal(&to_fixed(native_balance, 3));
    amount > shown_balance
}

/// Read-only display inputs handed to the card each frame.
#[derive(Debug, Clone, Copy)]
pub struct PanelView<'a> {
    pub accounts: &'a [WalletAccount],
    pub selected_account: usize,
    pub balance: BalanceSnapshot,
    pub tokens: &'a [TokenHolding],
}

impl<'a> PanelView<'a> {
    /// (value, label) pairs for the account selector, in list order.
    pub fn account_options(&self) -> Vec<(String, String)> {
        (0..self.accounts.len())
            .map(|i| (i.to_string(), WalletAccount::label(i)))
            .collect()
    }

    pub fn selected_value(&self) -> String {
        self.selected_account.to_string()
    }

    pub fn selected_label(&self) -> String {
        WalletAccount::label(self.selected_account)
    }

    pub fn selected(&self) -> Option<&'a WalletAccount> {
        self.accounts.get(self.selected_account)
    }

    /// (name, amount) rows for the token list, in the given order.
    pub fn token_rows(&self) -> Vec<(String, String)> {
        self.tokens
            .iter()
            .map(|t| (t.display_name(), t.display_amount()))
            .collect()
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }
}
