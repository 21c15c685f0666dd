//! Callback contract between the wallet card and whatever manages the wallet.
//!
//! The card never awaits these calls and never sees their outcome. An
//! implementation that needs to reject input does so on its own side (see
//! [`crate::validation`]) and reports through its own channels.

use crate::form::ActionRequest;

/// Operations the wallet card hands off to the wallet layer.
pub trait WalletOperations {
    /// The account selector changed. `index` is the selected position as text.
    fn on_account_change(&mut self, index: &str);

    fn on_send(&mut self, to_address: &str, amount: f64);

    /// Always called with `is_adding == true` by the card.
    fn on_add_funds(&mut self, is_adding: bool, amount: f64);

    /// Always called with `is_withdrawing == false` by the card.
    fn on_withdraw(&mut self, is_withdrawing: bool, amount: f64);

    fn on_create_token(
        &mut self,
        decimals: f64,
        name: &str,
        symbol: &str,
        uri: &str,
        description: &str,
        mint_amount: f64,
    );

    fn on_swap(&mut self, amount: f64);

    fn on_create_new_account(&mut self);
}

impl ActionRequest {
    /// Invoke exactly one wallet callback for this request.
    ///
    /// The funding flags are fixed literals: add-funds passes `true` and
    /// withdraw passes `false`, whatever the caller may expect them to mean.
    pub fn dispatch<W: WalletOperations + ?Sized>(self, ops: &mut W) {
        match self {
            ActionRequest::Send { to_address, amount } => ops.on_send(&to_address, amount),
            ActionRequest::AddFunds { amount } => ops.on_add_funds(true, amount),
            ActionRequest::Withdraw { amount } => ops.on_withdraw(false, amount),
            ActionRequest::CreateToken {
                decimals,
                name,
                symbol,
                uri,
                description,
                mint_amount,
            } => ops.on_create_token(decimals, &name, &symbol, &uri, &description, mint_amount),
            ActionRequest::Swap { amount } => ops.on_swap(amount),
        }
    }
}
