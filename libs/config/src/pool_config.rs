//! Pool Configuration Module
//!
//! Loads asset pair definitions (decimal precisions and initial reserves) and
//! logging settings from a TOML file with `KPOOL_`-prefixed environment
//! overrides.
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [[pairs]]
//! symbol = "KLV/USDT"
//! base_amount = 10000.54321
//! quote_amount = 10.4321
//! precision = { base_precision = 5, quote_precision = 4 }
//! ```
//!
//! Nested keys are overridden with a double underscore, e.g.
//! `KPOOL_LOGGING__LEVEL=debug`.

use anyhow::{bail, Context, Result};
use config_crate::{Config, ConfigError, Environment, File, FileFormat, Map};
use kpool_amm::{PairPrecision, Pool};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Config file read when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/kpool.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "KPOOL";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct KpoolConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub pairs: Vec<PairConfig>,
}

/// Logging settings consumed by [`init_logging`](crate::init_logging)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

/// One asset pair and the pool it starts with
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PairConfig {
    pub symbol: String,
    pub precision: PairPrecision,
    pub base_amount: f64,
    pub quote_amount: f64,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl PairConfig {
    /// Build the pool for this pair, rejecting non-positive reserves
    pub fn build_pool(&self) -> Result<Pool> {
        Pool::try_new(self.base_amount, self.quote_amount)
            .with_context(|| format!("Invalid initial reserves for pair {}", self.symbol))
    }
}

impl KpoolConfig {
    /// Load configuration from a TOML file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
        info!("Loading kpool config: {:?}", path);

        let built = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(env_source(env))
            .build();
        Self::from_built(built)
    }

    /// Parse configuration from an in-memory TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let built = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build();
        Self::from_built(built)
    }

    /// Render the configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Look up a pair by symbol
    pub fn pair(&self, symbol: &str) -> Option<&PairConfig> {
        self.pairs.iter().find(|pair| pair.symbol == symbol)
    }

    /// Reject empty or duplicate pair symbols
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for pair in &self.pairs {
            if pair.symbol.trim().is_empty() {
                bail!("Pair symbol must not be empty");
            }
            if !seen.insert(pair.symbol.as_str()) {
                bail!("Duplicate pair symbol: {}", pair.symbol);
            }
        }
        Ok(())
    }

    fn from_built(built: std::result::Result<Config, ConfigError>) -> Result<Self> {
        let config = built.context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;

        debug!(pairs = config.pairs.len(), "kpool config loaded");
        Ok(config)
    }
}

fn env_source(env: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(env)
}

/// Convenience function to load configuration from the default location
pub fn load_config() -> Result<KpoolConfig> {
    KpoolConfig::load(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
[logging]
level = "debug"

[[pairs]]
symbol = "KLV/USDT"
base_amount = 10000.54321
quote_amount = 10.4321
precision = { base_precision = 5, quote_precision = 4 }

[[pairs]]
symbol = "BTC/USDT"
base_amount = 10000.0
quote_amount = 10.0
precision = { base_precision = 8, quote_precision = 4 }
"#;

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("kpool.toml");
        fs::write(&config_path, SAMPLE).unwrap();

        let config = KpoolConfig::load_with_env(Some(&config_path), Some(Map::new())).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json);
        assert_eq!(config.pairs.len(), 2);

        let pair = config.pair("KLV/USDT").unwrap();
        assert_eq!(pair.precision, PairPrecision::new(5, 4));
        assert_eq!(pair.base_amount, 10000.54321);
        assert!(config.pair("ETH/USDT").is_none());
    }

    #[test]
    fn test_environment_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("kpool.toml");
        fs::write(&config_path, SAMPLE).unwrap();

        let mut env = Map::new();
        env.insert("KPOOL_LOGGING__LEVEL".to_string(), "warn".to_string());
        env.insert("KPOOL_LOGGING__JSON".to_string(), "true".to_string());

        let config = KpoolConfig::load_with_env(Some(&config_path), Some(env)).unwrap();

        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);
        assert_eq!(config.pairs.len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(KpoolConfig::load_with_env(Some(&missing), Some(Map::new())).is_err());
    }

    #[test]
    fn test_defaults_for_empty_document() {
        let config = KpoolConfig::from_toml_str("").unwrap();
        assert_eq!(config, KpoolConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let doc = r#"
[[pairs]]
symbol = "KLV/USDT"
base_amount = 1.0
quote_amount = 1.0
precision = { base_precision = 5, quote_precision = 4 }

[[pairs]]
symbol = "KLV/USDT"
base_amount = 2.0
quote_amount = 2.0
precision = { base_precision = 5, quote_precision = 4 }
"#;
        let err = KpoolConfig::from_toml_str(doc).unwrap_err();
        assert!(err.to_string().contains("Duplicate pair symbol"));
    }

    #[test]
    fn test_build_pool_reports_pair() {
        let pair = PairConfig {
            symbol: "KLV/USDT".to_string(),
            precision: PairPrecision::new(5, 4),
            base_amount: 0.0,
            quote_amount: 10.0,
        };

        let err = pair.build_pool().unwrap_err();
        assert!(err.to_string().contains("KLV/USDT"));
        assert!(format!("{err:#}").contains("invalid reserves"));
    }

    #[test]
    fn test_build_pool_and_validate() {
        let config = KpoolConfig::from_toml_str(SAMPLE).unwrap();
        let pair = config.pair("KLV/USDT").unwrap();

        let pool = pair.build_pool().unwrap();
        let validator = kpool_amm::InvariantValidator::new(&pool);

        assert!(validator.validate_pair(&pair.precision));
        assert!(!validator.validate_pool(0, 0));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = KpoolConfig::from_toml_str(SAMPLE).unwrap();
        let rendered = config.to_toml_string().unwrap();

        assert_eq!(KpoolConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
