//! GUI module for the SolCard application
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main WalletApp struct, background job polling and the frame loop
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `notifications` - Bounded notification history
//! - `views` - Wallet card, action dialogs and the activity panel
//!
//! ## Usage
//!
//! ```no_run
//! use solcard::config::Config;
//! use solcard::gui;
//!
//! let config = Config::from_env();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod notifications;
pub mod theme;
pub mod views;

pub use app::{launch, WalletApp};
pub use notifications::{NotificationEntry, Notifications};
pub use theme::{configure_style, AppTheme};
