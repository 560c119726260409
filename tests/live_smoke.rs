use cryptowatch_api_client::auth::ApiKey;
use cryptowatch_api_client::rest::{CryptowatchClient, OhlcParams, TradesParams};
use cryptowatch_api_client::types::{Market, OhlcPeriod};

fn live_tests_enabled() -> bool {
    std::env::var("CRYPTOWATCH_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn live_client() -> CryptowatchClient {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mut builder = CryptowatchClient::builder();
    if let Some(key) = ApiKey::try_from_env() {
        builder = builder.api_key(key);
    }
    builder.build()
}

#[tokio::test]
#[ignore]
async fn live_market_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = live_client();
    let market = Market::new("kraken", "btcusd");

    let price = client.get_price(&market).await?;
    assert!(price > 0.0);
    assert!(client.allowance().cost >= 0);

    let trades = client
        .get_trades(&market, &TradesParams::new().limit(10))
        .await?;
    assert!(trades.len() <= 10);

    let ohlc = client
        .get_ohlc(&market, &OhlcParams::new().period(OhlcPeriod::Hour1))
        .await?;
    assert!(ohlc.contains_key(&OhlcPeriod::Hour1.key()));

    let book = client.get_order_book(&market).await?;
    if let (Some(ask), Some(bid)) = (book.best_ask(), book.best_bid()) {
        assert!(ask.price >= bid.price);
    }

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_aggregate_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = live_client();
    let markets = client.get_markets().await?;
    assert!(!markets.is_empty());

    let prices = client.get_markets_prices().await?;
    assert!(!prices.is_empty());

    Ok(())
}
