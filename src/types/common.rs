//! Common domain types for the Cryptowatch API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A trading pair on a specific exchange, e.g. `kraken:btcusd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Market {
    /// Exchange symbol (e.g. "kraken", "bitflyer")
    pub exchange: String,
    /// Currency pair symbol (e.g. "btcusd")
    #[serde(rename = "currencyPair", alias = "pair")]
    pub currency_pair: String,
}

impl Market {
    /// Create a new market identifier.
    pub fn new(exchange: impl Into<String>, currency_pair: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            currency_pair: currency_pair.into(),
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.exchange, self.currency_pair)
    }
}

impl FromStr for Market {
    type Err = String;

    /// Parse `exchange:pair`, as used for keys of the all-market endpoints.
    /// A leading `market:` qualifier is accepted and dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("market:").unwrap_or(s);
        match s.split_once(':') {
            Some((exchange, pair))
                if !exchange.is_empty() && !pair.is_empty() && !pair.contains(':') =>
            {
                Ok(Self::new(exchange, pair))
            }
            _ => Err(format!("Invalid market symbol: {}", s)),
        }
    }
}

/// API cost accounting returned alongside every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// Cost of the last request
    pub cost: i64,
    /// Allowance remaining in the current period
    pub remaining: i64,
    /// Upgrade notice attached to anonymous responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<String>,
}

/// OHLC candle period in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum OhlcPeriod {
    /// 1 minute
    Min1,
    /// 3 minutes
    Min3,
    /// 5 minutes
    Min5,
    /// 15 minutes
    Min15,
    /// 30 minutes
    Min30,
    /// 1 hour
    Hour1,
    /// 2 hours
    Hour2,
    /// 4 hours
    Hour4,
    /// 6 hours
    Hour6,
    /// 12 hours
    Hour12,
    /// 1 day
    Day1,
    /// 3 days
    Day3,
    /// 1 week
    Week1,
}

impl OhlcPeriod {
    /// The key this period is returned under in an OHLC result.
    pub fn key(self) -> String {
        i64::from(self).to_string()
    }
}

impl From<OhlcPeriod> for i64 {
    fn from(period: OhlcPeriod) -> i64 {
        match period {
            OhlcPeriod::Min1 => 60,
            OhlcPeriod::Min3 => 180,
            OhlcPeriod::Min5 => 300,
            OhlcPeriod::Min15 => 900,
            OhlcPeriod::Min30 => 1800,
            OhlcPeriod::Hour1 => 3600,
            OhlcPeriod::Hour2 => 7200,
            OhlcPeriod::Hour4 => 14400,
            OhlcPeriod::Hour6 => 21600,
            OhlcPeriod::Hour12 => 43200,
            OhlcPeriod::Day1 => 86400,
            OhlcPeriod::Day3 => 259200,
            OhlcPeriod::Week1 => 604800,
        }
    }
}

impl TryFrom<i64> for OhlcPeriod {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            60 => Ok(OhlcPeriod::Min1),
            180 => Ok(OhlcPeriod::Min3),
            300 => Ok(OhlcPeriod::Min5),
            900 => Ok(OhlcPeriod::Min15),
            1800 => Ok(OhlcPeriod::Min30),
            3600 => Ok(OhlcPeriod::Hour1),
            7200 => Ok(OhlcPeriod::Hour2),
            14400 => Ok(OhlcPeriod::Hour4),
            21600 => Ok(OhlcPeriod::Hour6),
            43200 => Ok(OhlcPeriod::Hour12),
            86400 => Ok(OhlcPeriod::Day1),
            259200 => Ok(OhlcPeriod::Day3),
            604800 => Ok(OhlcPeriod::Week1),
            _ => Err(format!("Invalid OHLC period: {}", value)),
        }
    }
}
