//! # Cryptowatch Client
//!
//! An async Rust client library for the Cryptowatch market data REST API.
//!
//! ## Features
//!
//! - Markets, prices, summaries, trades, order books and OHLC candles
//! - Strict shape decoding: malformed payloads fail with an error naming the
//!   endpoint and the offending element, never with zero-filled data
//! - Allowance tracking after every request
//! - Optional retries of transient transport failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cryptowatch_api_client::rest::{CryptowatchClient, TradesParams};
//! use cryptowatch_api_client::types::Market;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CryptowatchClient::new();
//!     let market = Market::new("bitflyer", "btcjpy");
//!
//!     let trades = client.get_trades(&market, &TradesParams::new().limit(50)).await?;
//!     println!("{} trades, allowance: {:?}", trades.len(), client.allowance());
//!     Ok(())
//! }
//! ```

pub mod allowance;
pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::CryptowatchError;
pub use rest::CryptowatchClient;
pub use types::{Allowance, Market};

/// Result type alias using CryptowatchError
pub type Result<T> = std::result::Result<T, CryptowatchError>;
