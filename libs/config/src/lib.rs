//! # kpool Configuration
//!
//! Asset pair configuration and logging setup shared by everything that
//! drives a kpool pool.
//!
//! ## Features
//!
//! - **Pair Configuration**: decimal precisions and initial reserves per pair
//! - **Layered Loading**: TOML file plus `KPOOL_` environment overrides
//! - **Logging**: `tracing-subscriber` installation with `EnvFilter`
//!
//! ## Usage
//!
//! ```rust
//! use kpool_config::KpoolConfig;
//!
//! let config = KpoolConfig::from_toml_str(r#"
//! [[pairs]]
//! symbol = "KLV/USDT"
//! base_amount = 10000.54321
//! quote_amount = 10.4321
//! precision = { base_precision = 5, quote_precision = 4 }
//! "#).unwrap();
//!
//! let pair = config.pair("KLV/USDT").unwrap();
//! let pool = pair.build_pool().unwrap();
//! assert!(kpool_amm::InvariantValidator::new(&pool).validate_pair(&pair.precision));
//! ```

pub mod logging;
pub mod pool_config;

// Re-export commonly used types
pub use kpool_amm::PairPrecision;
pub use logging::init_logging;
pub use pool_config::{load_config, KpoolConfig, LoggingConfig, PairConfig};
