//! Validation of wallet requests before they touch any balance.
//!
//! Forms pass through whatever the user typed (including NaN amounts), so the
//! wallet layer checks every request here and rejects malformed ones with a
//! typed error.

use thiserror::Error;
use url::Url;

/// Largest decimals value accepted for a new token mint.
pub const MAX_TOKEN_DECIMALS: u8 = 9;

/// Length in bytes of a decoded Solana public key.
const PUBKEY_LEN: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Amount must be a positive number (got {0})")]
    InvalidAmount(String),

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },

    #[error("Invalid recipient address '{0}'")]
    InvalidAddress(String),

    #[error("Decimals must be a whole number from 0 to {max} (got {got})")]
    InvalidDecimals { got: String, max: u8 },

    #[error("Mint amount must be a positive whole number (got {0})")]
    InvalidMintAmount(String),

    #[error("Token {0} must not be empty")]
    MissingField(&'static str),

    #[error("Invalid metadata URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("Account '{0}' does not exist")]
    UnknownAccount(String),

    #[error("USD price is not available yet")]
    PriceUnavailable,
}

/// A create-token request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpec {
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub uri: Url,
    pub description: String,
    pub mint_amount: u64,
}

/// Accept finite amounts greater than zero.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::InvalidAmount(amount.to_string()))
    }
}

pub fn ensure_funds(requested: f64, available: f64) -> Result<(), ValidationError> {
    if requested > available {
        return Err(ValidationError::InsufficientBalance {
            requested,
            available,
        });
    }
    Ok(())
}

/// Accept a base58 string that decodes to a 32-byte public key.
pub fn validate_address(address: &str) -> Result<String, ValidationError> {
    let trimmed = address.trim();
    match bs58::decode(trimmed).into_vec() {
        Ok(bytes) if bytes.len() == PUBKEY_LEN => Ok(trimmed.to_string()),
        _ => Err(ValidationError::InvalidAddress(address.to_string())),
    }
}

/// Resolve an account selector value against the number of accounts.
pub fn validate_account_index(index: &str, account_count: usize) -> Result<usize, ValidationError> {
    index
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|i| *i < account_count)
        .ok_or_else(|| ValidationError::UnknownAccount(index.to_string()))
}

fn whole_number(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

pub fn validate_token(
    decimals: f64,
    name: &str,
    symbol: &str,
    uri: &str,
    description: &str,
    mint_amount: f64,
) -> Result<TokenSpec, ValidationError> {
    let decimals = whole_number(decimals)
        .filter(|d| *d <= u64::from(MAX_TOKEN_DECIMALS))
        .map(|d| d as u8)
        .ok_or_else(|| ValidationError::InvalidDecimals {
            got: decimals.to_string(),
            max: MAX_TOKEN_DECIMALS,
        })?;

    let mint_amount = whole_number(mint_amount)
        .filter(|m| *m > 0)
        .ok_or_else(|| ValidationError::InvalidMintAmount(mint_amount.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ValidationError::MissingField("symbol"));
    }

    let uri = Url::parse(uri.trim()).map_err(|e| ValidationError::InvalidUri {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;

    Ok(TokenSpec {
        decimals,
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri,
        description: description.trim().to_string(),
        mint_amount,
    })
}
