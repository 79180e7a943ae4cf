//! Invariant validation at an asset pair's decimal precision
//!
//! Reserves of real assets are only meaningful to a fixed number of decimals,
//! so two invariants that agree at that precision can still differ in their
//! float bits after a few commits. The validator truncates the live product
//! of the reserves to the pair's combined precision (base + quote decimals)
//! and compares it with the pool's stored `k`.
//!
//! A precision of zero demands integer-level agreement and is the strictest
//! setting; pairs with fractional reserves will usually fail it.

use crate::pool_traits::AmmPool;
use crate::Pool;
use kpool_precision::{format_fixed_truncated, truncate_to_precision};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Decimal precisions of an asset pair, e.g. 5 for KLV and 4 for USDT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PairPrecision {
    pub base_precision: u32,
    pub quote_precision: u32,
}

impl PairPrecision {
    pub fn new(base_precision: u32, quote_precision: u32) -> Self {
        Self {
            base_precision,
            quote_precision,
        }
    }

    /// Decimal places significant for a product of base and quote amounts
    pub fn combined(&self) -> u32 {
        self.base_precision.saturating_add(self.quote_precision)
    }
}

/// Outcome of one invariant check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvariantCheck {
    /// Combined precision the check ran at
    pub precision: u32,
    /// Live reserve product truncated to `precision`
    pub expected_k: f64,
    /// Invariant stored in the pool
    pub stored_k: f64,
    pub matches: bool,
}

impl InvariantCheck {
    /// `expected_k` rendered with exactly `precision` decimals
    pub fn expected_k_fixed(&self) -> String {
        format_fixed_truncated(self.expected_k, self.precision)
    }
}

/// Read-only invariant checker over a borrowed pool
pub struct InvariantValidator<'a, P: AmmPool + ?Sized = Pool> {
    pool: &'a P,
}

impl<'a, P: AmmPool + ?Sized> InvariantValidator<'a, P> {
    pub fn new(pool: &'a P) -> Self {
        Self { pool }
    }

    /// True when the live invariant truncated to `base_precision +
    /// quote_precision` decimals equals the stored invariant exactly
    ///
    /// A mismatch is logged with the expected value; the return value is the
    /// only contract.
    pub fn validate_pool(&self, base_precision: u32, quote_precision: u32) -> bool {
        self.check(base_precision, quote_precision).matches
    }

    /// [`InvariantValidator::validate_pool`] with precisions taken from pair config
    pub fn validate_pair(&self, precision: &PairPrecision) -> bool {
        self.validate_pool(precision.base_precision, precision.quote_precision)
    }

    /// Run the comparison and return every value it used
    pub fn check(&self, base_precision: u32, quote_precision: u32) -> InvariantCheck {
        let precision = PairPrecision::new(base_precision, quote_precision).combined();

        let expected_k = truncate_to_precision(self.pool.recompute_invariant(), precision);
        let stored_k = self.pool.invariant();

        let check = InvariantCheck {
            precision,
            expected_k,
            stored_k,
            matches: expected_k == stored_k,
        };

        if !check.matches {
            warn!(
                expected_k = %check.expected_k_fixed(),
                stored_k,
                precision,
                "pool k differs from the invariant recomputed from reserves"
            );
        }

        check
    }
}

impl<P: AmmPool + ?Sized> Clone for InvariantValidator<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: AmmPool + ?Sized> Copy for InvariantValidator<'_, P> {}
