//! Query parameters for endpoints that accept them.
//!
//! Parameters are only put on the wire when set to something meaningful:
//! integers when strictly positive, lists when non-empty. Everything else is
//! dropped silently, including negative values. Keys are encoded in
//! alphabetical order so the query string is deterministic.

use serde::Serialize;

use crate::error::CryptowatchError;
use crate::types::OhlcPeriod;
use crate::types::serde_helpers::{comma_separated, is_not_positive};

/// A parameter set that encodes into a URL query string.
pub trait QueryParams: Serialize {
    /// Encode as `key=value&...` without a leading `?`.
    ///
    /// Returns an empty string when no parameter is set.
    fn to_query(&self) -> Result<String, CryptowatchError> {
        Ok(serde_urlencoded::to_string(self)?)
    }
}

/// Request parameters for a market's trade history.
///
/// # Example
///
/// ```rust
/// use cryptowatch_api_client::rest::{QueryParams, TradesParams};
///
/// let params = TradesParams::new().limit(50);
/// assert_eq!(params.to_query().unwrap(), "limit=50");
/// assert_eq!(TradesParams::new().to_query().unwrap(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradesParams {
    /// Maximum number of trades to return.
    #[serde(skip_serializing_if = "is_not_positive")]
    pub limit: i64,
    /// Only return trades at or after this unix timestamp.
    #[serde(skip_serializing_if = "is_not_positive")]
    pub since: i64,
}

impl TradesParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trade limit.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the since timestamp.
    pub fn since(mut self, since: i64) -> Self {
        self.since = since;
        self
    }
}

impl QueryParams for TradesParams {}

/// Request parameters for OHLC candles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OhlcParams {
    /// Only return candles closing after this unix timestamp.
    #[serde(skip_serializing_if = "is_not_positive")]
    pub after: i64,
    /// Only return candles closing before this unix timestamp.
    #[serde(skip_serializing_if = "is_not_positive")]
    pub before: i64,
    /// Candle periods in seconds; all periods are returned when empty.
    #[serde(
        serialize_with = "comma_separated::serialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub periods: Vec<i64>,
}

impl OhlcParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower close-time bound.
    pub fn after(mut self, after: i64) -> Self {
        self.after = after;
        self
    }

    /// Set the upper close-time bound.
    pub fn before(mut self, before: i64) -> Self {
        self.before = before;
        self
    }

    /// Request one more candle period.
    pub fn period(mut self, period: OhlcPeriod) -> Self {
        self.periods.push(period.into());
        self
    }

    /// Replace the requested periods with raw second counts.
    pub fn periods(mut self, periods: impl IntoIterator<Item = i64>) -> Self {
        self.periods = periods.into_iter().collect();
        self
    }
}

impl QueryParams for OhlcParams {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trades_params_limit_only() {
        let params = TradesParams {
            limit: 50,
            since: 0,
        };
        let query = params.to_query().unwrap();
        assert!(query.contains("limit=50"));
        assert!(!query.contains("since"));
    }

    #[test]
    fn test_trades_params_empty() {
        assert_eq!(TradesParams::default().to_query().unwrap(), "");
    }

    #[test]
    fn test_trades_params_negative_values_are_dropped() {
        let params = TradesParams::new().limit(-1).since(-100);
        assert_eq!(params.to_query().unwrap(), "");
    }

    #[test]
    fn test_trades_params_both() {
        let params = TradesParams::new().since(1_500_000_000).limit(10);
        assert_eq!(params.to_query().unwrap(), "limit=10&since=1500000000");
    }

    #[test]
    fn test_ohlc_params_alphabetical() {
        let params = OhlcParams::new()
            .periods([60, 3600])
            .before(200)
            .after(100);
        assert_eq!(
            params.to_query().unwrap(),
            "after=100&before=200&periods=60%2C3600"
        );
    }

    #[test]
    fn test_ohlc_params_typed_periods() {
        let params = OhlcParams::new()
            .period(OhlcPeriod::Min1)
            .period(OhlcPeriod::Day1);
        assert_eq!(params.periods, vec![60, 86400]);
        assert_eq!(params.to_query().unwrap(), "periods=60%2C86400");
    }

    #[test]
    fn test_ohlc_params_empty() {
        let params = OhlcParams::new().after(0).before(-3);
        assert_eq!(params.to_query().unwrap(), "");
    }
}
