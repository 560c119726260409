//! Cryptowatch REST API client implementation.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use url::Url;

use crate::allowance::{AllowanceTracker, parse_allowance};
use crate::auth::ApiKey;
use crate::error::{ApiError, CryptowatchError};
use crate::rest::endpoints::{CRYPTOWATCH_BASE_URL, Endpoint};
use crate::types::{Allowance, Market};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-cw-api-key";

/// The Cryptowatch REST API client.
///
/// Each call issues one GET request, decodes the response envelope, records
/// the reported allowance and maps the `result` payload into typed records.
/// Each call is a single attempt unless retries are enabled on the builder.
///
/// # Example
///
/// ```rust,no_run
/// use cryptowatch_api_client::rest::CryptowatchClient;
/// use cryptowatch_api_client::types::Market;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CryptowatchClient::new();
///     let market = Market::new("kraken", "btcusd");
///
///     let price = client.get_price(&market).await?;
///     println!("{}: {} (allowance left: {})", market, price, client.allowance().remaining);
///
///     Ok(())
/// }
/// ```
///
/// With an API key for a higher allowance:
///
/// ```rust,no_run
/// use cryptowatch_api_client::auth::ApiKey;
/// use cryptowatch_api_client::rest::CryptowatchClient;
///
/// let client = CryptowatchClient::builder()
///     .api_key(ApiKey::new("my-api-key"))
///     .build();
/// ```
#[derive(Clone)]
pub struct CryptowatchClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    api_key: Option<ApiKey>,
    allowance: AllowanceTracker,
}

impl CryptowatchClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> CryptowatchClientBuilder {
        CryptowatchClientBuilder::new()
    }

    /// The allowance reported by the most recent successful request.
    ///
    /// Zero until the first request completes.
    pub fn allowance(&self) -> Allowance {
        self.allowance.current()
    }

    /// The tracker this client (and all its clones) records allowances into.
    pub fn allowance_tracker(&self) -> &AllowanceTracker {
        &self.allowance
    }

    /// Build the request URL for an endpoint.
    fn endpoint_url(
        &self,
        endpoint: Endpoint,
        market: Option<&Market>,
        query: &str,
    ) -> Result<Url, CryptowatchError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| CryptowatchError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(endpoint.segments(market));
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    /// Make a GET request and return the raw `result` payload.
    ///
    /// The allowance tracker is updated before the payload is returned.
    pub(crate) async fn fetch(
        &self,
        endpoint: Endpoint,
        market: Option<&Market>,
        query: &str,
    ) -> Result<Value, CryptowatchError> {
        let url = self.endpoint_url(endpoint, market, query)?;
        tracing::debug!(%endpoint, %url, "sending request");

        let response = self.http_client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_envelope(status, &body, &self.allowance)
    }
}

/// Decode a response envelope, record its allowance and extract `result`.
///
/// A missing `result` comes back as [`Value::Null`]; deciding whether that is
/// acceptable is left to the endpoint decoder.
pub(crate) fn parse_envelope(
    status: u16,
    body: &str,
    tracker: &AllowanceTracker,
) -> Result<Value, CryptowatchError> {
    let envelope: Value = serde_json::from_str(body).map_err(|e| {
        tracing::warn!(status, "response body is not JSON: {}", e);
        CryptowatchError::Envelope {
            status,
            reason: format!("failed to parse response: {}. Body: {}", e, body),
        }
    })?;

    let Value::Object(mut envelope) = envelope else {
        return Err(CryptowatchError::Envelope {
            status,
            reason: format!("expected a JSON object, got: {}", body),
        });
    };

    match envelope.get("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(message)) if message.is_empty() => {}
        Some(Value::String(message)) => {
            return Err(CryptowatchError::Api(ApiError::new(status, message.clone())));
        }
        Some(other) => {
            return Err(CryptowatchError::Api(ApiError::new(status, other.to_string())));
        }
    }

    let allowance = envelope
        .get("allowance")
        .ok_or_else(|| CryptowatchError::Envelope {
            status,
            reason: "response missing 'allowance' field".to_string(),
        })?;
    let allowance = parse_allowance(allowance).inspect_err(|e| {
        tracing::warn!(status, "{}", e);
    })?;
    tracing::debug!(
        cost = allowance.cost,
        remaining = allowance.remaining,
        "allowance updated"
    );
    tracker.update(allowance);

    Ok(envelope.remove("result").unwrap_or(Value::Null))
}

impl Default for CryptowatchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CryptowatchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptowatchClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("allowance", &self.allowance.current())
            .finish()
    }
}

/// Builder for [`CryptowatchClient`].
pub struct CryptowatchClientBuilder {
    base_url: String,
    api_key: Option<ApiKey>,
    allowance: Option<AllowanceTracker>,
    user_agent: Option<String>,
    max_retries: u32,
    timeout: Option<Duration>,
}

impl CryptowatchClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: CRYPTOWATCH_BASE_URL.to_string(),
            api_key: None,
            allowance: None,
            user_agent: None,
            max_retries: 0,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key sent with every request.
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Record allowances into an existing tracker instead of a fresh one.
    pub fn allowance_tracker(mut self, tracker: AllowanceTracker) -> Self {
        self.allowance = Some(tracker);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Retry transient failures up to `retries` times with exponential backoff.
    ///
    /// Defaults to 0.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set a timeout for each HTTP request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> CryptowatchClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("cryptowatch-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("cryptowatch-api-client"));
        headers.insert(USER_AGENT, header_value);

        if let Some(api_key) = &self.api_key {
            match HeaderValue::from_str(api_key.expose_secret()) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
                }
                Err(_) => tracing::warn!("API key is not a valid header value; sending requests without it"),
            }
        }

        // Build the HTTP client with middleware.
        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build().unwrap_or_else(|e| {
            tracing::warn!(
                "failed to build HTTP client, falling back to defaults without timeout or headers: {}",
                e
            );
            reqwest::Client::new()
        });

        let mut client = ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            client = client.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }
        let client = client.build();

        CryptowatchClient {
            http_client: client,
            base_url: self.base_url,
            api_key: self.api_key,
            allowance: self.allowance.unwrap_or_default(),
        }
    }
}

impl Default for CryptowatchClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_updates_allowance() {
        let tracker = AllowanceTracker::new();
        let body = r#"{"result":{"price":6431.0},"allowance":{"cost":1,"remaining":9999}}"#;
        let result = parse_envelope(200, body, &tracker).unwrap();
        assert_eq!(result["price"].as_f64(), Some(6431.0));
        assert_eq!(tracker.current().cost, 1);
        assert_eq!(tracker.current().remaining, 9999);
    }

    #[test]
    fn test_envelope_missing_result_is_null() {
        let tracker = AllowanceTracker::new();
        let body = r#"{"allowance":{"cost":1,"remaining":5}}"#;
        assert_eq!(parse_envelope(200, body, &tracker).unwrap(), Value::Null);
        assert_eq!(tracker.current().remaining, 5);
    }

    #[test]
    fn test_envelope_not_json() {
        let tracker = AllowanceTracker::new();
        let err = parse_envelope(502, "<html>Bad Gateway</html>", &tracker).unwrap_err();
        assert!(matches!(err, CryptowatchError::Envelope { status: 502, .. }));
        assert_eq!(tracker.current(), Allowance::default());
    }

    #[test]
    fn test_envelope_not_object() {
        let tracker = AllowanceTracker::new();
        let err = parse_envelope(200, "[1, 2, 3]", &tracker).unwrap_err();
        assert!(matches!(err, CryptowatchError::Envelope { .. }));
    }

    #[test]
    fn test_envelope_missing_allowance() {
        let tracker = AllowanceTracker::new();
        let err = parse_envelope(200, r#"{"result":{"price":1.0}}"#, &tracker).unwrap_err();
        assert!(matches!(err, CryptowatchError::Envelope { .. }));
    }

    #[test]
    fn test_envelope_malformed_allowance_fails_call() {
        let tracker = AllowanceTracker::new();
        tracker.update(Allowance {
            cost: 1,
            remaining: 10,
            upgrade: None,
        });
        let body = r#"{"result":{"price":6431.0},"allowance":{"cost":"free"}}"#;
        let err = parse_envelope(200, body, &tracker).unwrap_err();
        assert!(matches!(err, CryptowatchError::Allowance(_)));
        assert_eq!(tracker.current().remaining, 10);
    }

    #[test]
    fn test_envelope_out_of_range_allowance_keeps_tracker() {
        let tracker = AllowanceTracker::new();
        tracker.update(Allowance {
            cost: 1,
            remaining: 10,
            upgrade: None,
        });
        let body = r#"{"result":{"price":6431.0},"allowance":{"cost":1,"remaining":1e30}}"#;
        let err = parse_envelope(200, body, &tracker).unwrap_err();
        assert!(matches!(err, CryptowatchError::Allowance(_)));
        assert_eq!(tracker.current().remaining, 10);
    }

    #[test]
    fn test_envelope_api_error() {
        let tracker = AllowanceTracker::new();
        let err = parse_envelope(404, r#"{"error":"Route not found"}"#, &tracker).unwrap_err();
        match err {
            CryptowatchError::Api(api) => {
                assert_eq!(api.status, 404);
                assert_eq!(api.message, "Route not found");
                assert!(api.is_not_found());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_url() {
        let client = CryptowatchClient::builder()
            .base_url("http://localhost:1234/")
            .build();
        let market = Market::new("bitflyer", "btcjpy");
        let url = client
            .endpoint_url(Endpoint::Trades, Some(&market), "limit=50")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/markets/bitflyer/btcjpy/trades?limit=50"
        );

        let url = client
            .endpoint_url(Endpoint::MarketsPrices, None, "")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/markets/prices");
    }

    #[test]
    fn test_endpoint_url_encodes_segments() {
        let client = CryptowatchClient::new();
        let market = Market::new("kraken", "btc/usd");
        let url = client
            .endpoint_url(Endpoint::Price, Some(&market), "")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.cryptowat.ch/markets/kraken/btc%2Fusd/price"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = CryptowatchClient::builder()
            .api_key(ApiKey::new("secret-key"))
            .build();
        let debug = format!("{:?}", client);
        assert!(debug.contains("has_api_key: true"));
        assert!(!debug.contains("secret-key"));
    }
}
