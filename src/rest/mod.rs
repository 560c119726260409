//! Cryptowatch REST API client.
//!
//! Every call is one GET request. The response envelope is split into the
//! endpoint-specific `result` payload, which goes through a shape decoder in
//! [`decode`], and the `allowance` report, which is recorded by the client's
//! [`AllowanceTracker`](crate::allowance::AllowanceTracker).
//!
//! # Trait-based API
//!
//! The [`CryptowatchApi`] trait abstracts all operations, enabling mock
//! implementations for testing.
//!
//! ```rust,ignore
//! use cryptowatch_api_client::rest::{CryptowatchApi, CryptowatchClient};
//!
//! async fn use_client<C: CryptowatchApi>(client: &C) -> Result<(), cryptowatch_api_client::CryptowatchError> {
//!     let prices = client.get_markets_prices().await?;
//!     println!("{} markets, allowance left: {}", prices.len(), client.allowance().remaining);
//!     Ok(())
//! }
//! ```

mod client;
pub mod decode;
mod endpoints;
mod params;
pub mod public;
mod traits;

pub use client::{CryptowatchClient, CryptowatchClientBuilder};
pub use endpoints::*;
pub use params::{OhlcParams, QueryParams, TradesParams};
pub use traits::CryptowatchApi;
