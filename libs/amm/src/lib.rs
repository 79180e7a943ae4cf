//! # kpool AMM Library - Constant-Product Pool Model
//!
//! ## Purpose
//!
//! Models a single constant-product pool (`base * quote = k`): computes how
//! the reserves move when the pool is repriced to a target price or when a
//! trade of a given base amount is executed, commits those changes, and checks
//! that the stored invariant still matches the reserves at an asset pair's
//! decimal precision.
//!
//! ## Integration Points
//!
//! - **Input Sources**: initial reserves and pair precisions (see `kpool-config`),
//!   target prices and trade sizes from the caller
//! - **Output Destinations**: new reserves, pool price, validation verdicts
//! - **Formatting**: all human-readable numbers go through `kpool-precision`
//! - **Logging**: `tracing` events for commits, rejected commits and invariant drift
//!
//! ## Architecture Role
//!
//! ```text
//! caller ──► Pool ──calc_*──► (new_base, new_quote)      pure
//!             │
//!             └──commit_*──► reserves overwritten        k untouched
//!
//! caller ──► InvariantValidator(&Pool) ──► truncate(live k, p) == stored k
//! ```
//!
//! ## Concurrency
//!
//! Everything is synchronous O(1) arithmetic. [`Pool`] is a plain value with a
//! single writer; share it through [`SharedPool`] when several threads need it.
//!
//! ## Example
//!
//! ```rust
//! use kpool_amm::{InvariantValidator, Pool, TradeSide};
//!
//! let mut pool = Pool::new(10000.0, 10.0);
//! pool.commit_by_price(0.00095).unwrap();
//! pool.commit_by_amount(0.2532, TradeSide::Sell).unwrap();
//!
//! assert_eq!(pool.invariant(), 100000.0);
//! assert!(InvariantValidator::new(&pool).validate_pool(5, 4));
//! ```

pub mod error;
pub mod pool;
pub mod pool_traits;
pub mod shared;
pub mod side;
pub mod validator;

pub use error::{AmmError, Result};
pub use pool::{Pool, PoolSnapshot};
pub use pool_traits::AmmPool;
pub use shared::SharedPool;
pub use side::TradeSide;
pub use validator::{InvariantCheck, InvariantValidator, PairPrecision};
