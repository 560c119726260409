//! Cryptowatch REST API endpoints.

use std::fmt;

use crate::types::Market;

/// Base URL for the Cryptowatch REST API.
pub const CRYPTOWATCH_BASE_URL: &str = "https://api.cryptowat.ch";

/// The API operations this client knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/markets`
    Markets,
    /// `/markets/{exchange}/{pair}/price`
    Price,
    /// `/markets/{exchange}/{pair}/summary`
    Summary,
    /// `/markets/{exchange}/{pair}/trades`
    Trades,
    /// `/markets/{exchange}/{pair}/orderbook`
    OrderBook,
    /// `/markets/{exchange}/{pair}/ohlc`
    Ohlc,
    /// `/markets/prices`
    MarketsPrices,
    /// `/markets/summaries`
    MarketsSummaries,
}

impl Endpoint {
    /// Short name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Markets => "markets",
            Endpoint::Price => "price",
            Endpoint::Summary => "summary",
            Endpoint::Trades => "trades",
            Endpoint::OrderBook => "orderbook",
            Endpoint::Ohlc => "ohlc",
            Endpoint::MarketsPrices => "markets/prices",
            Endpoint::MarketsSummaries => "markets/summaries",
        }
    }

    /// Final path segment, if any, after `markets[/{exchange}/{pair}]`.
    fn resource(self) -> Option<&'static str> {
        match self {
            Endpoint::Markets => None,
            Endpoint::Price => Some("price"),
            Endpoint::Summary => Some("summary"),
            Endpoint::Trades => Some("trades"),
            Endpoint::OrderBook => Some("orderbook"),
            Endpoint::Ohlc => Some("ohlc"),
            Endpoint::MarketsPrices => Some("prices"),
            Endpoint::MarketsSummaries => Some("summaries"),
        }
    }

    /// Path segments relative to the base URL.
    ///
    /// `market` is given for the market-scoped endpoints and `None` for the rest.
    pub(crate) fn segments(self, market: Option<&Market>) -> Vec<String> {
        let mut segments = vec!["markets".to_string()];
        if let Some(m) = market {
            segments.push(m.exchange.clone());
            segments.push(m.currency_pair.clone());
        }
        segments.extend(self.resource().map(str::to_string));
        segments
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
