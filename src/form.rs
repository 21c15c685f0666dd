//! Action forms: one small state machine per wallet dialog.
//!
//! Every form starts closed with empty fields, is opened by the user, collects
//! raw text one field at a time and, on submit, turns that text into an
//! [`ActionRequest`] while closing and clearing itself. Field text is never
//! validated while typing; parsing happens once at submit and cannot fail
//! (unparseable numbers become NaN).

use crate::utils::{parse_decimal, parse_integer};
use std::collections::BTreeMap;

/// The five dialogs on the wallet card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Send,
    AddFunds,
    Withdraw,
    CreateToken,
    Swap,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Send,
        ActionKind::AddFunds,
        ActionKind::Withdraw,
        ActionKind::CreateToken,
        ActionKind::Swap,
    ];

    /// Fields collected by this dialog, in display order.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            ActionKind::Send => &[FormField::ToAddress, FormField::Amount],
            ActionKind::AddFunds | ActionKind::Withdraw => &[FormField::Amount],
            ActionKind::CreateToken => &[
                FormField::Decimals,
                FormField::MintAmount,
                FormField::Name,
                FormField::Symbol,
                FormField::Uri,
                FormField::Description,
            ],
            ActionKind::Swap => &[FormField::SwapAmount],
        }
    }

    /// Label of the button that opens the dialog.
    pub fn button_label(self) -> &'static str {
        match self {
            ActionKind::Send => "Send",
            ActionKind::AddFunds => "Add Funds",
            ActionKind::Withdraw => "Withdraw",
            ActionKind::CreateToken => "Create Token",
            ActionKind::Swap => "Swap",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActionKind::Send => "Send Funds",
            ActionKind::AddFunds => "Add Funds",
            ActionKind::Withdraw => "Withdraw Funds",
            ActionKind::CreateToken => "Create and Mint Token",
            ActionKind::Swap => "Swap SOL to USDC",
        }
    }

    /// Label of the submit button inside the dialog.
    pub fn submit_label(self) -> &'static str {
        match self {
            ActionKind::Send => "Send",
            ActionKind::AddFunds => "Add",
            ActionKind::Withdraw => "Withdraw",
            ActionKind::CreateToken => "Create",
            ActionKind::Swap => "Swap SOL to USDC",
        }
    }
}

/// A named text buffer inside a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    ToAddress,
    Amount,
    Decimals,
    MintAmount,
    Name,
    Symbol,
    Uri,
    Description,
    SwapAmount,
}

impl FormField {
    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::ToAddress => "To Address",
            FormField::Amount => "Amount in SOL",
            FormField::Decimals => "Decimals",
            FormField::MintAmount => "Mint Amount",
            FormField::Name => "Name",
            FormField::Symbol => "Symbol",
            FormField::Uri => "URI",
            FormField::Description => "Description",
            FormField::SwapAmount => "Amount of SOL",
        }
    }

    /// Whether the input widget should be treated as a number entry.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FormField::Amount | FormField::Decimals | FormField::MintAmount | FormField::SwapAmount
        )
    }
}

/// Parsed arguments of a submitted form, ready for the wallet layer.
///
/// Numeric values may be NaN when the user typed something unparseable.
/// `decimals` and `mint_amount` are integral or NaN.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionRequest {
    Send {
        to_address: String,
        amount: f64,
    },
    AddFunds {
        amount: f64,
    },
    Withdraw {
        amount: f64,
    },
    CreateToken {
        decimals: f64,
        name: String,
        symbol: String,
        uri: String,
        description: String,
        mint_amount: f64,
    },
    Swap {
        amount: f64,
    },
}

impl ActionRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::Send { .. } => ActionKind::Send,
            ActionRequest::AddFunds { .. } => ActionKind::AddFunds,
            ActionRequest::Withdraw { .. } => ActionKind::Withdraw,
            ActionRequest::CreateToken { .. } => ActionKind::CreateToken,
            ActionRequest::Swap { .. } => ActionKind::Swap,
        }
    }
}

/// Open/closed flag plus raw text buffers for one dialog.
#[derive(Clone, Debug)]
pub struct ActionForm {
    kind: ActionKind,
    is_open: bool,
    fields: BTreeMap<FormField, String>,
}

impl ActionForm {
    pub fn new(kind: ActionKind) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|field| (*field, String::new()))
            .collect();
        Self {
            kind,
            is_open: false,
            fields,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close without submitting. Drafts stay in the buffers.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Current raw text of `field`, or `""` if this form has no such field.
    pub fn field(&self, field: FormField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Mutable buffer for text widgets. `None` if the field is not part of this form.
    pub fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        self.fields.get_mut(&field)
    }

    /// Store `value` verbatim. Returns false (and stores nothing) when the
    /// field does not belong to this form.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        match self.fields.get_mut(&field) {
            Some(buffer) => {
                *buffer = value.into();
                true
            }
            None => {
                tracing::warn!("{:?} form has no {:?} field", self.kind, field);
                false
            }
        }
    }

    /// Whether every buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(String::is_empty)
    }

    /// Parse the buffers into a request, then close and clear the form.
    ///
    /// The reset happens before the request reaches any wallet callback, so
    /// it holds no matter what the callback later does.
    pub fn submit(&mut self) -> ActionRequest {
        let request = self.parse();
        self.is_open = false;
        for buffer in self.fields.values_mut() {
            buffer.clear();
        }
        tracing::info!("Submitted {:?} form", self.kind);
        request
    }

    fn parse(&self) -> ActionRequest {
        let text = |field| self.field(field).to_string();
        let decimal = |field| parse_decimal(self.field(field));
        let integer = |field| parse_integer(self.field(field));

        match self.kind {
            ActionKind::Send => ActionRequest::Send {
                to_address: text(FormField::ToAddress),
                amount: decimal(FormField::Amount),
            },
            ActionKind::AddFunds => ActionRequest::AddFunds {
                amount: decimal(FormField::Amount),
            },
            ActionKind::Withdraw => ActionRequest::Withdraw {
                amount: decimal(FormField::Amount),
            },
            ActionKind::CreateToken => ActionRequest::CreateToken {
                decimals: integer(FormField::Decimals),
                name: text(FormField::Name),
                symbol: text(FormField::Symbol),
                uri: text(FormField::Uri),
                description: text(FormField::Description),
                mint_amount: integer(FormField::MintAmount),
            },
            ActionKind::Swap => ActionRequest::Swap {
                amount: decimal(FormField::SwapAmount),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== lifecycle tests ====================

    #[test]
    fn test_new_form_is_closed_and_empty() {
        for kind in ActionKind::ALL {
            let form = ActionForm::new(kind);
            assert!(!form.is_open());
            assert!(form.is_empty());
            for field in kind.fields() {
                assert_eq!(form.field(*field), "");
            }
        }
    }

    #[test]
    fn test_open_only_changes_visibility() {
        let mut form = ActionForm::new(ActionKind::Send);
        form.set_field(FormField::Amount, "3");
        form.open();
        assert!(form.is_open());
        assert_eq!(form.field(FormField::Amount), "3");
    }

    #[test]
    fn test_close_keeps_draft() {
        let mut form = ActionForm::new(ActionKind::Withdraw);
        form.open();
        form.set_field(FormField::Amount, "1.5");
        form.close();
        assert!(!form.is_open());
        assert_eq!(form.field(FormField::Amount), "1.5");
    }

    // ==================== set_field tests ====================

    #[test]
    fn test_set_field_stores_verbatim() {
        let mut form = ActionForm::new(ActionKind::Send);
        for raw in ["", "abc", "12abc", "  0.5  ", "-"] {
            assert!(form.set_field(FormField::Amount, raw));
            assert_eq!(form.field(FormField::Amount), raw);
        }
    }

    #[test]
    fn test_set_field_rejects_foreign_field() {
        let mut form = ActionForm::new(ActionKind::Swap);
        assert!(!form.set_field(FormField::ToAddress, "someone"));
        assert_eq!(form.field(FormField::ToAddress), "");
        assert!(form.field_mut(FormField::ToAddress).is_none());
    }

    // ==================== submit tests ====================

    #[test]
    fn test_submit_resets_every_form_kind() {
        for kind in ActionKind::ALL {
            let mut form = ActionForm::new(kind);
            form.open();
            for field in kind.fields() {
                form.set_field(*field, "not a number");
            }
            let request = form.submit();
            assert_eq!(request.kind(), kind);
            assert!(!form.is_open());
            assert!(form.is_empty());
        }
    }

    #[test]
    fn test_submit_send_with_garbage_amount_yields_nan() {
        let mut form = ActionForm::new(ActionKind::Send);
        form.open();
        form.set_field(FormField::ToAddress, "Dest1111");
        form.set_field(FormField::Amount, "abc");

        match form.submit() {
            ActionRequest::Send { to_address, amount } => {
                assert_eq!(to_address, "Dest1111");
                assert!(amount.is_nan());
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert!(!form.is_open());
        assert!(form.is_empty());
    }

    #[test]
    fn test_submit_create_token_parses_integers() {
        let mut form = ActionForm::new(ActionKind::CreateToken);
        form.set_field(FormField::Decimals, "6.9");
        form.set_field(FormField::MintAmount, "1000");
        form.set_field(FormField::Name, "Test Token");
        form.set_field(FormField::Symbol, "TST");
        form.set_field(FormField::Uri, "https://example.com/meta.json");
        form.set_field(FormField::Description, "A token");

        let request = form.submit();
        assert_eq!(
            request,
            ActionRequest::CreateToken {
                decimals: 6.0,
                name: "Test Token".to_string(),
                symbol: "TST".to_string(),
                uri: "https://example.com/meta.json".to_string(),
                description: "A token".to_string(),
                mint_amount: 1000.0,
            }
        );
    }

    #[test]
    fn test_submit_empty_swap_yields_nan() {
        let mut form = ActionForm::new(ActionKind::Swap);
        match form.submit() {
            ActionRequest::Swap { amount } => assert!(amount.is_nan()),
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_submit_on_closed_form_still_parses() {
        let mut form = ActionForm::new(ActionKind::AddFunds);
        form.set_field(FormField::Amount, "2");
        assert_eq!(form.submit(), ActionRequest::AddFunds { amount: 2.0 });
        assert!(form.is_empty());
    }
}
