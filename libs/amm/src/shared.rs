//! Lock-guarded pool handle for callers that share one pool across threads
//!
//! [`Pool`] itself has no interior locking. `SharedPool` holds it behind a
//! single `RwLock`: commits hold the write lock across their whole
//! read-compute-write sequence, while calculations and invariant checks share
//! the read lock and never observe a half-applied commit.

use crate::error::Result;
use crate::validator::{InvariantCheck, InvariantValidator, PairPrecision};
use crate::{Pool, PoolSnapshot, TradeSide};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SharedPool {
    inner: Arc<RwLock<Pool>>,
}

impl SharedPool {
    pub fn new(pool: Pool) -> Self {
        Self {
            inner: Arc::new(RwLock::new(pool)),
        }
    }

    pub fn commit_by_price(&self, target_price: f64) -> Result<()> {
        self.inner.write().commit_by_price(target_price)
    }

    pub fn commit_by_amount(&self, amount: f64, side: TradeSide) -> Result<()> {
        self.inner.write().commit_by_amount(amount, side)
    }

    pub fn calc_new_pool_by_price(&self, target_price: f64) -> Result<(f64, f64)> {
        self.inner.read().calc_new_pool_by_price(target_price)
    }

    pub fn calc_new_pool_by_amount(&self, amount: f64, side: TradeSide) -> Result<(f64, f64)> {
        self.inner.read().calc_new_pool_by_amount(amount, side)
    }

    pub fn calc_pool_price(&self) -> f64 {
        self.inner.read().calc_pool_price()
    }

    pub fn validate_pool(&self, base_precision: u32, quote_precision: u32) -> bool {
        self.check(base_precision, quote_precision).matches
    }

    pub fn validate_pair(&self, precision: &PairPrecision) -> bool {
        self.validate_pool(precision.base_precision, precision.quote_precision)
    }

    pub fn check(&self, base_precision: u32, quote_precision: u32) -> InvariantCheck {
        let pool = self.inner.read();
        InvariantValidator::new(&*pool).check(base_precision, quote_precision)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        self.inner.read().snapshot()
    }

    /// Run `f` against the pool under the read lock
    pub fn with_pool<R>(&self, f: impl FnOnce(&Pool) -> R) -> R {
        f(&*self.inner.read())
    }
}

impl From<Pool> for SharedPool {
    fn from(pool: Pool) -> Self {
        Self::new(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_buys_are_serialized() {
        let shared = SharedPool::new(Pool::new(10000.0, 10.0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.commit_by_amount(1.0, TradeSide::Buy).unwrap();
                        shared.validate_pool(5, 4);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.base_amount, 10400.0);
        assert_eq!(snapshot.k, 100000.0);
        assert!((snapshot.quote_amount - 100000.0 / 10400.0).abs() < 1e-12);
    }

    #[test]
    fn test_failed_commit_keeps_state() {
        let shared: SharedPool = Pool::new(10000.0, 10.0).into();

        assert!(shared.commit_by_price(0.0).is_err());
        assert!(shared.commit_by_amount(20000.0, TradeSide::Sell).is_err());

        shared.with_pool(|pool| assert_eq!(*pool, Pool::new(10000.0, 10.0)));
        assert_eq!(shared.calc_pool_price(), 0.001);
        assert!(shared.validate_pair(&PairPrecision::new(5, 4)));
    }

    #[test]
    fn test_calculations_do_not_commit() {
        let shared = SharedPool::new(Pool::new(10000.0, 10.0));

        let (base, _) = shared.calc_new_pool_by_amount(5.0, TradeSide::Sell).unwrap();
        let (by_price, _) = shared.calc_new_pool_by_price(0.002).unwrap();

        assert_eq!(base, 9995.0);
        assert!(by_price < 10000.0);
        assert_eq!(shared.snapshot().base_amount, 10000.0);
    }
}
