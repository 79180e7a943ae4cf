//! Reprice, trade and validate a configured pool
//!
//! Run with `RUST_LOG=debug` to see every commit.

use anyhow::Result;
use kpool_amm::{InvariantValidator, TradeSide};
use kpool_config::KpoolConfig;
use kpool_precision::format_fixed_truncated;
use tracing::info;

const CONFIG: &str = r#"
[logging]
level = "debug"

[[pairs]]
symbol = "KLV/USDT"
base_amount = 10000.0
quote_amount = 10.0
precision = { base_precision = 5, quote_precision = 4 }
"#;

fn main() -> Result<()> {
    let config = KpoolConfig::from_toml_str(CONFIG)?;
    kpool_config::init_logging(&config.logging)?;

    let pair = &config.pairs[0];
    let mut pool = pair.build_pool()?;
    info!(pair = %pair.symbol, pool = %pool, "pool opened");

    let (base, quote) = pool.calc_new_pool_by_price(0.00095)?;
    info!(base, quote, "reserves at 0.00095");

    pool.commit_by_price(0.00095)?;
    pool.commit_by_amount(0.2532, "SELL".parse::<TradeSide>()?)?;
    pool.commit_by_amount(1.5, TradeSide::Buy)?;

    if let Err(error) = pool.commit_by_amount(20000.0, TradeSide::Sell) {
        info!(%error, "oversized sell rejected");
    }

    let check = InvariantValidator::new(&pool).check(
        pair.precision.base_precision,
        pair.precision.quote_precision,
    );
    info!(
        pool = %pool,
        live_k = %format_fixed_truncated(pool.recompute_invariant(), check.precision),
        valid = check.matches,
        "session finished"
    );

    Ok(())
}
