//! View modules for the GUI
//!
//! Each submodule adds rendering methods to `WalletApp`.
//!
//! ## Module Structure
//!
//! - `wallet_card` - Account selector, balance, token list and action buttons
//! - `dialogs` - One window per open action form
//! - `activity` - Notifications, settings and the operation log

pub mod activity;
pub mod dialogs;
pub mod wallet_card;
