//! Market data endpoints.

mod types;

pub use types::*;

use crate::error::CryptowatchError;
use crate::rest::CryptowatchClient;
use crate::rest::decode;
use crate::rest::endpoints::Endpoint;
use crate::rest::params::{OhlcParams, QueryParams, TradesParams};
use crate::types::Market;

impl CryptowatchClient {
    /// List all supported markets.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use cryptowatch_api_client::rest::CryptowatchClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CryptowatchClient::new();
    ///     for market in client.get_markets().await? {
    ///         println!("{}", market);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_markets(&self) -> Result<Vec<Market>, CryptowatchError> {
        let result = self.fetch(Endpoint::Markets, None, "").await?;
        decode::decode_markets(&result)
    }

    /// Get a market's last price.
    pub async fn get_price(&self, market: &Market) -> Result<f64, CryptowatchError> {
        let result = self.fetch(Endpoint::Price, Some(market), "").await?;
        decode::decode_price(&result)
    }

    /// Get a market's last price along with 24-hour statistics.
    pub async fn get_summary(&self, market: &Market) -> Result<Summary, CryptowatchError> {
        let result = self.fetch(Endpoint::Summary, Some(market), "").await?;
        decode::decode_summary(&result)
    }

    /// Get a market's most recent trades, oldest first.
    ///
    /// # Arguments
    ///
    /// * `params` - Limit and lower time bound; unset values are not sent.
    pub async fn get_trades(
        &self,
        market: &Market,
        params: &TradesParams,
    ) -> Result<Vec<Trade>, CryptowatchError> {
        let query = params.to_query()?;
        let result = self.fetch(Endpoint::Trades, Some(market), &query).await?;
        decode::decode_trades(&result)
    }

    /// Get a market's order book.
    pub async fn get_order_book(&self, market: &Market) -> Result<OrderBook, CryptowatchError> {
        let result = self.fetch(Endpoint::OrderBook, Some(market), "").await?;
        decode::decode_order_book(&result)
    }

    /// Get a market's OHLC candles, keyed by period.
    ///
    /// # Arguments
    ///
    /// * `params` - Time bounds and periods; unset values are not sent.
    pub async fn get_ohlc(
        &self,
        market: &Market,
        params: &OhlcParams,
    ) -> Result<Ohlc, CryptowatchError> {
        let query = params.to_query()?;
        let result = self.fetch(Endpoint::Ohlc, Some(market), &query).await?;
        decode::decode_ohlc(&result)
    }

    /// Get the current price of every market.
    ///
    /// Some values may be a few seconds out of date.
    pub async fn get_markets_prices(&self) -> Result<MarketsPrices, CryptowatchError> {
        let result = self.fetch(Endpoint::MarketsPrices, None, "").await?;
        decode::decode_markets_prices(&result)
    }

    /// Get the 24-hour summary of every market.
    ///
    /// Some values may be a few seconds out of date.
    pub async fn get_markets_summaries(&self) -> Result<MarketsSummaries, CryptowatchError> {
        let result = self.fetch(Endpoint::MarketsSummaries, None, "").await?;
        decode::decode_markets_summaries(&result)
    }
}
