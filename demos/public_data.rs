//! Example: Fetching market data from Cryptowatch.
//!
//! Public endpoints need no API key. Set `CRYPTOWATCH_API_KEY` to use a
//! keyed allowance instead of the anonymous one.
//!
//! Run with: cargo run --example public_data

use cryptowatch_api_client::auth::ApiKey;
use cryptowatch_api_client::rest::{CryptowatchClient, OhlcParams, TradesParams};
use cryptowatch_api_client::types::{Market, OhlcPeriod};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = CryptowatchClient::builder();
    if let Some(key) = ApiKey::try_from_env() {
        builder = builder.api_key(key);
    }
    let client = builder.build();
    let market = Market::new("kraken", "btcusd");

    // List a few markets
    println!("=== Markets ===");
    let markets = client.get_markets().await?;
    println!("{} markets", markets.len());
    for m in markets.iter().take(5) {
        println!("  {}", m);
    }

    println!("\n=== Price ({}) ===", market);
    let price = client.get_price(&market).await?;
    println!("Last: {}", price);

    println!("\n=== Summary ({}) ===", market);
    let summary = client.get_summary(&market).await?;
    println!(
        "Last: {}, High: {}, Low: {}",
        summary.price.last, summary.price.high, summary.price.low
    );
    println!(
        "Change: {:.2}% ({})",
        summary.price.change.percentage * 100.0,
        summary.price.change.absolute
    );
    println!("Volume: {}", summary.volume);

    println!("\n=== Recent Trades ({}) ===", market);
    let trades = client
        .get_trades(&market, &TradesParams::new().limit(5))
        .await?;
    for trade in &trades {
        println!(
            "  #{} {} @ {} (time: {})",
            trade.id, trade.amount, trade.price, trade.time
        );
    }

    println!("\n=== Order Book ({}) ===", market);
    let book = client.get_order_book(&market).await?;
    println!("Asks (lowest first):");
    for ask in book.asks.iter().take(3) {
        println!("  {} @ {}", ask.amount, ask.price);
    }
    println!("Bids (highest first):");
    for bid in book.bids.iter().take(3) {
        println!("  {} @ {}", bid.amount, bid.price);
    }

    println!("\n=== OHLC ({}, 1 hour) ===", market);
    let ohlc = client
        .get_ohlc(&market, &OhlcParams::new().period(OhlcPeriod::Hour1))
        .await?;
    if let Some(candles) = ohlc.get(&OhlcPeriod::Hour1.key()) {
        for candle in candles.iter().rev().take(3) {
            println!(
                "  Close time: {}, O: {}, H: {}, L: {}, C: {}, Vol: {}",
                candle.close_time,
                candle.open_price,
                candle.high_price,
                candle.low_price,
                candle.close_price,
                candle.volume
            );
        }
    }

    println!("\n=== All Prices ===");
    let prices = client.get_markets_prices().await?;
    println!("{} prices", prices.len());

    let allowance = client.allowance();
    println!(
        "\nAllowance: last cost {}, remaining {}",
        allowance.cost, allowance.remaining
    );
    if let Some(upgrade) = allowance.upgrade {
        println!("{}", upgrade);
    }

    println!("\nDone!");
    Ok(())
}
