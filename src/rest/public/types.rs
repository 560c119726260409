//! Types for the market data endpoints.

use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

/// Last, high and low price of a market over the trailing 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    /// Last traded price.
    pub last: f64,
    /// 24-hour high.
    pub high: f64,
    /// 24-hour low.
    pub low: f64,
    /// 24-hour change.
    pub change: Change,
}

/// Price change over the trailing 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    /// Relative change (0.01 is one percent).
    pub percentage: f64,
    /// Absolute change in quote currency.
    pub absolute: f64,
}

/// 24-hour market summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Price statistics.
    pub price: Price,
    /// Volume in base currency.
    pub volume: f64,
    /// Volume in quote currency, when the API reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_quote: Option<f64>,
}

/// A single executed trade.
/// Format: [id, timestamp, price, amount]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    /// Trade ID.
    pub id: i64,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    /// `timestamp` as a calendar time (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Trade price.
    pub price: f64,
    /// Traded amount in base currency.
    pub amount: f64,
}

/// Single order book level.
/// Format: [price, amount]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Book {
    /// Price level.
    pub price: f64,
    /// Amount at price level.
    pub amount: f64,
}

/// Order book of a market, best price first on both sides.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrderBook {
    /// Ask side entries.
    pub asks: Vec<Book>,
    /// Bid side entries.
    pub bids: Vec<Book>,
}

impl OrderBook {
    /// Lowest ask, if any.
    pub fn best_ask(&self) -> Option<&Book> {
        self.asks.first()
    }

    /// Highest bid, if any.
    pub fn best_bid(&self) -> Option<&Book> {
        self.bids.first()
    }
}

/// Single OHLC candle.
/// Format: [close_time, open, high, low, close, volume, quote_volume?]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcSummary {
    /// Unix timestamp of the candle close.
    pub close_timestamp: i64,
    /// `close_timestamp` as a calendar time (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub close_time: OffsetDateTime,
    /// Open price.
    pub open_price: f64,
    /// High price.
    pub high_price: f64,
    /// Low price.
    pub low_price: f64,
    /// Close price.
    pub close_price: f64,
    /// Volume in base currency.
    pub volume: f64,
    /// Volume in quote currency, present in the seven-element candle format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_volume: Option<f64>,
}

/// OHLC candles keyed by period in seconds (e.g. "60", "3600").
pub type Ohlc = HashMap<String, Vec<OhlcSummary>>;

/// Current price keyed by market symbol.
pub type MarketsPrices = HashMap<String, f64>;

/// 24-hour summary keyed by market symbol.
pub type MarketsSummaries = HashMap<String, Summary>;
