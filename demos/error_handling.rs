//! Example: Working with CryptowatchError and ApiError.
//!
//! Run with: cargo run --example error_handling

use cryptowatch_api_client::CryptowatchError;
use cryptowatch_api_client::error::ApiError;
use cryptowatch_api_client::rest::decode;
use cryptowatch_api_client::rest::{CryptowatchClient, Endpoint};
use cryptowatch_api_client::types::Market;

fn describe(err: &CryptowatchError) {
    match err {
        CryptowatchError::Api(api) if api.is_not_found() => {
            println!("Unknown market or route: {}", api.message);
        }
        CryptowatchError::Api(api) if api.is_out_of_allowance() => {
            println!("Out of allowance, try again later: {}", api);
        }
        CryptowatchError::Shape {
            endpoint, field, ..
        } => {
            println!("Unexpected payload from {} at `{}`", endpoint, field);
        }
        err if err.is_transport() => println!("Network problem: {}", err),
        other => println!("Other error: {}", other),
    }
}

#[tokio::main]
async fn main() {
    let api_error = ApiError::new(404, "Instrument not found");
    println!("API error: {}", api_error);
    println!("Is not found: {}", api_error.is_not_found());
    describe(&CryptowatchError::Api(api_error));

    // A short order book entry is rejected, not zero-filled
    let payload = serde_json::json!({ "asks": [[6432.0]], "bids": [] });
    match decode::decode_order_book(&payload) {
        Ok(book) => println!("Decoded {} asks", book.asks.len()),
        Err(err) => {
            println!("Decode error: {}", err);
            if err.endpoint() == Some(Endpoint::OrderBook) {
                describe(&err);
            }
        }
    }

    // An unknown market against the live API
    let client = CryptowatchClient::new();
    match client.get_price(&Market::new("nowhere", "btcusd")).await {
        Ok(price) => println!("Unexpected price: {}", price),
        Err(err) => describe(&err),
    }
}
