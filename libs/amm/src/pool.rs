//! Constant-product pool: reserve state, reprice and trade math, commits
//!
//! The pool keeps two reserves and the invariant `k` fixed when the pool was
//! built. Calculations are pure and return the reserves a change *would*
//! produce; commits run the same calculation and overwrite the reserves only
//! when it succeeds. `k` is never recomputed by a commit: the reprice and
//! trade formulas preserve it in real arithmetic, and the float drift they
//! leave behind is what [`InvariantValidator`](crate::InvariantValidator)
//! measures.

use crate::error::{AmmError, Result};
use crate::side::TradeSide;
use kpool_precision::format_minimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Base/quote reserve pair priced by `quote / base` and anchored to `k = base * quote`
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    base_amount: f64,
    quote_amount: f64,
    k: f64,
}

/// Read-only view of a pool for logs and serialization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub base_amount: f64,
    pub quote_amount: f64,
    pub k: f64,
    pub price: f64,
}

impl Pool {
    /// Build a pool without validating the reserves
    ///
    /// Zero and negative reserves are accepted; their consequences show up in
    /// the calculation methods. Use [`Pool::try_new`] to reject them up front.
    pub fn new(base_amount: f64, quote_amount: f64) -> Self {
        Self {
            base_amount,
            quote_amount,
            k: base_amount * quote_amount,
        }
    }

    /// Build a pool, rejecting reserves that are not positive and finite
    pub fn try_new(base_amount: f64, quote_amount: f64) -> Result<Self> {
        if !is_positive_finite(base_amount) || !is_positive_finite(quote_amount) {
            return Err(AmmError::invalid_reserves(base_amount, quote_amount));
        }
        Ok(Self::new(base_amount, quote_amount))
    }

    /// Reserves that would put the pool price at `target_price` while keeping `k`
    ///
    /// `new_base = sqrt(k / price)`, `new_quote = k / new_base`
    pub fn calc_new_pool_by_price(&self, target_price: f64) -> Result<(f64, f64)> {
        if !is_positive_finite(target_price) {
            return Err(AmmError::invalid_price(target_price));
        }
        if !is_positive_finite(self.k) {
            return Err(AmmError::invalid_reserves(
                self.base_amount,
                self.quote_amount,
            ));
        }

        let new_base = (self.k / target_price).sqrt();
        let new_quote = self.k / new_base;

        Ok((new_base, new_quote))
    }

    /// Move the pool to `target_price`; on error the pool is left untouched
    pub fn commit_by_price(&mut self, target_price: f64) -> Result<()> {
        debug!(pool = %self, target_price, "before commit by price");

        let reserves = self.calc_new_pool_by_price(target_price);
        self.apply("price", reserves)
    }

    /// Reserves after moving `amount` of base asset in (`Buy`) or out (`Sell`)
    ///
    /// `new_quote = k / new_base`. A sell that would take the base reserve to
    /// zero or below fails with [`AmmError::InsufficientLiquidity`].
    pub fn calc_new_pool_by_amount(&self, amount: f64, side: TradeSide) -> Result<(f64, f64)> {
        if !is_positive_finite(amount) {
            return Err(AmmError::invalid_amount(amount));
        }

        let new_base = match side {
            TradeSide::Buy => self.base_amount + amount,
            TradeSide::Sell => self.base_amount - amount,
        };
        if new_base <= 0.0 {
            return Err(AmmError::InsufficientLiquidity {
                base_amount: self.base_amount,
                amount,
            });
        }

        let new_quote = self.k / new_base;
        if !new_quote.is_finite() {
            return Err(AmmError::invalid_reserves(
                self.base_amount,
                self.quote_amount,
            ));
        }

        Ok((new_base, new_quote))
    }

    /// Execute a trade of `amount` base units; on error the pool is left untouched
    pub fn commit_by_amount(&mut self, amount: f64, side: TradeSide) -> Result<()> {
        debug!(pool = %self, amount, %side, "before commit by amount");

        let reserves = self.calc_new_pool_by_amount(amount, side);
        self.apply("amount", reserves)
    }

    /// Current price `quote / base`, zero when either reserve is exactly zero
    pub fn calc_pool_price(&self) -> f64 {
        if self.base_amount == 0.0 || self.quote_amount == 0.0 {
            return 0.0;
        }
        self.quote_amount / self.base_amount
    }

    /// Live product of the current reserves, zero when either reserve is exactly zero
    ///
    /// Distinct from [`Pool::invariant`], which is the constant fixed at construction.
    pub fn recompute_invariant(&self) -> f64 {
        if self.base_amount == 0.0 || self.quote_amount == 0.0 {
            return 0.0;
        }
        self.quote_amount * self.base_amount
    }

    pub fn base_amount(&self) -> f64 {
        self.base_amount
    }

    pub fn quote_amount(&self) -> f64 {
        self.quote_amount
    }

    /// Stored invariant `k`
    pub fn invariant(&self) -> f64 {
        self.k
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            base_amount: self.base_amount,
            quote_amount: self.quote_amount,
            k: self.k,
            price: self.calc_pool_price(),
        }
    }

    fn apply(&mut self, kind: &'static str, reserves: Result<(f64, f64)>) -> Result<()> {
        match reserves {
            Ok((new_base, new_quote)) => {
                self.base_amount = new_base;
                self.quote_amount = new_quote;
                debug!(pool = %self, kind, "after commit");
                Ok(())
            }
            Err(error) => {
                warn!(pool = %self, kind, %error, "commit rejected");
                Err(error)
            }
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{base: {}, quote: {}, price: {}}}",
            format_minimal(self.base_amount),
            format_minimal(self.quote_amount),
            format_minimal(self.calc_pool_price()),
        )
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
