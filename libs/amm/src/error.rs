//! Pool-level errors for reprice and trade calculations
//!
//! Every variant is recoverable: calculations are pure and commits are
//! all-or-nothing, so a caller receiving an `AmmError` still holds the pool
//! exactly as it was before the call.

use thiserror::Error;

/// Errors raised by pool calculations, commits and trade side parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmmError {
    /// Target price is zero, negative or not finite
    #[error("invalid price: {price} (target price must be positive and finite)")]
    InvalidPrice { price: f64 },

    /// Trade amount is zero, negative or not finite
    #[error("invalid amount: {amount} (trade amount must be positive and finite)")]
    InvalidAmount { amount: f64 },

    /// Trade would leave the base reserve at or below zero
    #[error("insufficient liquidity: trade of {amount} against base reserve {base_amount} exhausts the pool")]
    InsufficientLiquidity { base_amount: f64, amount: f64 },

    /// Reserves cannot back the requested operation
    #[error("invalid reserves: base {base_amount}, quote {quote_amount} (reserves must be positive and finite)")]
    InvalidReserves { base_amount: f64, quote_amount: f64 },

    /// Trade side string is neither BUY nor SELL
    #[error("invalid trade side '{0}': expected BUY or SELL")]
    InvalidSide(String),
}

impl AmmError {
    pub fn invalid_price(price: f64) -> Self {
        Self::InvalidPrice { price }
    }

    pub fn invalid_amount(amount: f64) -> Self {
        Self::InvalidAmount { amount }
    }

    pub fn invalid_reserves(base_amount: f64, quote_amount: f64) -> Self {
        Self::InvalidReserves {
            base_amount,
            quote_amount,
        }
    }
}

pub type Result<T> = std::result::Result<T, AmmError>;
