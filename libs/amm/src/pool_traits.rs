//! Pool trait definitions for the constant-product interface

use crate::error::Result;
use crate::{Pool, TradeSide};

/// Unified constant-product pool interface
///
/// Read-only queries are what [`InvariantValidator`](crate::InvariantValidator)
/// needs; the commit methods mutate the implementor in place.
pub trait AmmPool {
    /// Reserves that would move the pool to `target_price`, keeping `k`
    fn calc_new_pool_by_price(&self, target_price: f64) -> Result<(f64, f64)>;

    /// Reserves after trading `amount` of base asset on `side`
    fn calc_new_pool_by_amount(&self, amount: f64, side: TradeSide) -> Result<(f64, f64)>;

    /// Apply [`AmmPool::calc_new_pool_by_price`]
    fn commit_by_price(&mut self, target_price: f64) -> Result<()>;

    /// Apply [`AmmPool::calc_new_pool_by_amount`]
    fn commit_by_amount(&mut self, amount: f64, side: TradeSide) -> Result<()>;

    /// Current `quote / base` price
    fn calc_pool_price(&self) -> f64;

    /// Product of the current reserves
    fn recompute_invariant(&self) -> f64;

    /// Invariant fixed at construction
    fn invariant(&self) -> f64;

    fn base_amount(&self) -> f64;

    fn quote_amount(&self) -> f64;
}

impl AmmPool for Pool {
    fn calc_new_pool_by_price(&self, target_price: f64) -> Result<(f64, f64)> {
        Pool::calc_new_pool_by_price(self, target_price)
    }

    fn calc_new_pool_by_amount(&self, amount: f64, side: TradeSide) -> Result<(f64, f64)> {
        Pool::calc_new_pool_by_amount(self, amount, side)
    }

    fn commit_by_price(&mut self, target_price: f64) -> Result<()> {
        Pool::commit_by_price(self, target_price)
    }

    fn commit_by_amount(&mut self, amount: f64, side: TradeSide) -> Result<()> {
        Pool::commit_by_amount(self, amount, side)
    }

    fn calc_pool_price(&self) -> f64 {
        Pool::calc_pool_price(self)
    }

    fn recompute_invariant(&self) -> f64 {
        Pool::recompute_invariant(self)
    }

    fn invariant(&self) -> f64 {
        Pool::invariant(self)
    }

    fn base_amount(&self) -> f64 {
        Pool::base_amount(self)
    }

    fn quote_amount(&self) -> f64 {
        Pool::quote_amount(self)
    }
}
