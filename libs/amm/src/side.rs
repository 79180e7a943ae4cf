//! Trade direction relative to the pool's base reserve

use crate::error::AmmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a trade, seen from the pool's base reserve
///
/// - `Buy` adds the traded amount to the base reserve
/// - `Sell` removes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    #[serde(alias = "buy", alias = "Buy")]
    Buy,
    #[serde(alias = "sell", alias = "Sell")]
    Sell,
}

impl TradeSide {
    /// Legacy side parsing: case-insensitive `"SELL"` is a sell, every other
    /// string (empty and unknown ones included) is a buy
    ///
    /// Prefer [`TradeSide::from_str`], which rejects unknown sides.
    pub fn from_side_lenient(side: &str) -> Self {
        if side.eq_ignore_ascii_case("SELL") {
            TradeSide::Sell
        } else {
            TradeSide::Buy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl FromStr for TradeSide {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("BUY") {
            Ok(TradeSide::Buy)
        } else if s.eq_ignore_ascii_case("SELL") {
            Ok(TradeSide::Sell)
        } else {
            Err(AmmError::InvalidSide(s.to_string()))
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_parse_is_case_insensitive() {
        assert_eq!("BUY".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("buy".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("Sell".parse::<TradeSide>().unwrap(), TradeSide::Sell);
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        let err = "HOLD".parse::<TradeSide>().unwrap_err();
        assert_eq!(err, AmmError::InvalidSide("HOLD".to_string()));
        assert!("".parse::<TradeSide>().is_err());
    }

    #[test]
    fn test_lenient_parse_defaults_to_buy() {
        assert_eq!(TradeSide::from_side_lenient("sElL"), TradeSide::Sell);
        assert_eq!(TradeSide::from_side_lenient("BUY"), TradeSide::Buy);
        assert_eq!(TradeSide::from_side_lenient(""), TradeSide::Buy);
        assert_eq!(TradeSide::from_side_lenient("HOLD"), TradeSide::Buy);
    }

    #[test]
    fn test_serde_uses_upper_case() {
        assert_eq!(serde_json::to_string(&TradeSide::Sell).unwrap(), "\"SELL\"");
        let side: TradeSide = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(side, TradeSide::Buy);
    }
}
