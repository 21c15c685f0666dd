pub mod async_job;
pub mod config;
pub mod form;
pub mod gui;
pub mod operation_log;
pub mod panel;
pub mod price_feed;
pub mod quote;
pub mod types;
pub mod user_settings;
pub mod utils;
pub mod validation;
pub mod wallet;
pub mod wallet_ops;
