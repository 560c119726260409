//! Trait definition for the Cryptowatch REST API client.
//!
//! [`CryptowatchApi`] abstracts the market data operations so that code using
//! the client can be tested against a fake or wrapped with decorators.
//!
//! # Example
//!
//! ```rust,ignore
//! use cryptowatch_api_client::rest::{CryptowatchApi, CryptowatchClient};
//! use cryptowatch_api_client::types::Market;
//!
//! async fn spread<C: CryptowatchApi>(client: &C, market: &Market) -> Result<f64, cryptowatch_api_client::CryptowatchError> {
//!     let book = client.get_order_book(market).await?;
//!     Ok(book.asks[0].price - book.bids[0].price)
//! }
//! ```

use std::future::Future;

use crate::error::CryptowatchError;
use crate::rest::CryptowatchClient;
use crate::rest::params::{OhlcParams, TradesParams};
use crate::rest::public::{MarketsPrices, MarketsSummaries, Ohlc, OrderBook, Summary, Trade};
use crate::types::{Allowance, Market};

/// Trait defining all Cryptowatch REST API operations.
///
/// All methods are async and return `Result<T, CryptowatchError>`.
pub trait CryptowatchApi: Send + Sync {
    /// List all supported markets.
    fn get_markets(&self) -> impl Future<Output = Result<Vec<Market>, CryptowatchError>> + Send;

    /// Get a market's last price.
    fn get_price(
        &self,
        market: &Market,
    ) -> impl Future<Output = Result<f64, CryptowatchError>> + Send;

    /// Get a market's 24-hour summary.
    fn get_summary(
        &self,
        market: &Market,
    ) -> impl Future<Output = Result<Summary, CryptowatchError>> + Send;

    /// Get a market's most recent trades.
    fn get_trades(
        &self,
        market: &Market,
        params: &TradesParams,
    ) -> impl Future<Output = Result<Vec<Trade>, CryptowatchError>> + Send;

    /// Get a market's order book.
    fn get_order_book(
        &self,
        market: &Market,
    ) -> impl Future<Output = Result<OrderBook, CryptowatchError>> + Send;

    /// Get a market's OHLC candles.
    fn get_ohlc(
        &self,
        market: &Market,
        params: &OhlcParams,
    ) -> impl Future<Output = Result<Ohlc, CryptowatchError>> + Send;

    /// Get the current price of every market.
    fn get_markets_prices(
        &self,
    ) -> impl Future<Output = Result<MarketsPrices, CryptowatchError>> + Send;

    /// Get the 24-hour summary of every market.
    fn get_markets_summaries(
        &self,
    ) -> impl Future<Output = Result<MarketsSummaries, CryptowatchError>> + Send;

    /// The most recently observed allowance.
    fn allowance(&self) -> Allowance;
}

impl CryptowatchApi for CryptowatchClient {
    async fn get_markets(&self) -> Result<Vec<Market>, CryptowatchError> {
        CryptowatchClient::get_markets(self).await
    }

    async fn get_price(&self, market: &Market) -> Result<f64, CryptowatchError> {
        CryptowatchClient::get_price(self, market).await
    }

    async fn get_summary(&self, market: &Market) -> Result<Summary, CryptowatchError> {
        CryptowatchClient::get_summary(self, market).await
    }

    async fn get_trades(
        &self,
        market: &Market,
        params: &TradesParams,
    ) -> Result<Vec<Trade>, CryptowatchError> {
        CryptowatchClient::get_trades(self, market, params).await
    }

    async fn get_order_book(&self, market: &Market) -> Result<OrderBook, CryptowatchError> {
        CryptowatchClient::get_order_book(self, market).await
    }

    async fn get_ohlc(
        &self,
        market: &Market,
        params: &OhlcParams,
    ) -> Result<Ohlc, CryptowatchError> {
        CryptowatchClient::get_ohlc(self, market, params).await
    }

    async fn get_markets_prices(&self) -> Result<MarketsPrices, CryptowatchError> {
        CryptowatchClient::get_markets_prices(self).await
    }

    async fn get_markets_summaries(&self) -> Result<MarketsSummaries, CryptowatchError> {
        CryptowatchClient::get_markets_summaries(self).await
    }

    fn allowance(&self) -> Allowance {
        CryptowatchClient::allowance(self)
    }
}
