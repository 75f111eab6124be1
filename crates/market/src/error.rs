//! Error types for market data access.

use thiserror::Error;

/// Result type alias for market data operations.
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors surfaced by the market data client.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarketError {
    /// The upstream API answered with a non-success status.
    #[error("market API returned {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// The request exceeded its deadline.
    #[error("market API request timed out")]
    Timeout,

    /// Transport-level failure reaching the API.
    #[error("failed to reach market API: {0}")]
    Connection(String),

    /// The response body could not be decoded.
    #[error("invalid market API response: {0}")]
    Decode(String),

    /// Configuration error.
    #[error("market configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for MarketError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MarketError::Timeout
        } else if err.is_decode() {
            MarketError::Decode(err.to_string())
        } else {
            MarketError::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::Upstream { status: 429, message: "rate limited".into() };
        assert_eq!(err.to_string(), "market API returned 429: rate limited");

        let err = MarketError::Timeout;
        assert_eq!(err.to_string(), "market API request timed out");

        let err = MarketError::Decode("missing prices field".into());
        assert_eq!(err.to_string(), "invalid market API response: missing prices field");
    }
}
