//! Error types for the Cryptowatch client library.

use thiserror::Error;

use crate::rest::Endpoint;

/// The main error type for all Cryptowatch client operations.
#[derive(Error, Debug)]
pub enum CryptowatchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Query parameters could not be encoded
    #[error("query encoding failed: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// Cryptowatch API returned an error
    #[error("Cryptowatch API error: {0}")]
    Api(ApiError),

    /// The top-level response envelope was malformed
    #[error("invalid response envelope (HTTP {status}): {reason}")]
    Envelope {
        /// HTTP status code of the response
        status: u16,
        /// What was wrong with the envelope
        reason: String,
    },

    /// The `allowance` object of the envelope was malformed
    #[error("invalid allowance: {0}")]
    Allowance(String),

    /// The `result` payload did not have the shape the endpoint expects
    #[error("{endpoint}: malformed `{field}`: {reason}")]
    Shape {
        /// Endpoint whose payload failed to decode
        endpoint: Endpoint,
        /// Path of the offending element within `result`
        field: String,
        /// What was expected
        reason: String,
    },
}

impl CryptowatchError {
    pub(crate) fn shape(
        endpoint: Endpoint,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Shape {
            endpoint,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from the HTTP transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpMiddleware(_))
    }

    /// Check if this is a `result` shape mismatch.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape { .. })
    }

    /// The endpoint a shape error was raised for, if any.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Shape { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}

/// An error reported by the Cryptowatch API in the response body.
///
/// Failed requests come back as `{"error": "Route not found"}`, usually with a
/// non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Error message from the API
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {})", self.message, self.status)
    }
}

impl ApiError {
    /// Create a new API error from a status code and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Check if this is a route/market lookup failure.
    pub fn is_not_found(&self) -> bool {
        self.status == 404 || self.message.contains("not found")
    }

    /// Check if the allowance for the current period is exhausted.
    pub fn is_out_of_allowance(&self) -> bool {
        self.status == 429 || self.message.contains("Out of allowance")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(404, "Route not found");
        assert_eq!(error.to_string(), "Route not found (HTTP 404)");
        assert!(error.is_not_found());
        assert!(!error.is_out_of_allowance());
    }

    #[test]
    fn test_shape_error_names_endpoint_and_field() {
        let error = CryptowatchError::shape(Endpoint::OrderBook, "asks[0]", "expected 2 elements, got 1");
        assert_eq!(
            error.to_string(),
            "orderbook: malformed `asks[0]`: expected 2 elements, got 1"
        );
        assert!(error.is_shape());
        assert!(!error.is_transport());
        assert_eq!(error.endpoint(), Some(Endpoint::OrderBook));
    }
}
