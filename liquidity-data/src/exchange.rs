use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exchanges served by the upstream liquidity APIs.
///
/// The upstream identifies an exchange by a lowercase query parameter
/// (`?exchange=okx`), so the wire name is fixed per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Okx,
    Binance,
    Bybit,
}

impl Exchange {
    pub const ALL: [Exchange; 3] = [Exchange::Okx, Exchange::Binance, Exchange::Bybit];

    /// Lowercase identifier used in upstream query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Okx => "okx",
            Exchange::Binance => "binance",
            Exchange::Bybit => "bybit",
        }
    }

    /// Human-readable name for panel titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Exchange::Okx => "OKX",
            Exchange::Binance => "Binance",
            Exchange::Bybit => "Bybit",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "okx" => Ok(Exchange::Okx),
            "binance" => Ok(Exchange::Binance),
            "bybit" => Ok(Exchange::Bybit),
            other => Err(DataError::UnknownExchange(other.to_string())),
        }
    }
}
