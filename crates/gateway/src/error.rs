//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hashgate_market::MarketError;
use thiserror::Error;

/// Errors a handler can surface to the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request's query parameters were missing or invalid.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The market data upstream failed.
    #[error("market data unavailable: {0}")]
    Market(#[from] MarketError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Market(err) => {
                tracing::warn!(error = %err, "market data request failed");
                (StatusCode::BAD_GATEWAY, "market data unavailable".to_string())
            },
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_maps_to_400() {
        let response = ApiError::BadRequest("missing todate".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_market_failure_maps_to_502() {
        let err = MarketError::Upstream { status: 503, message: "down".into() };
        let response = ApiError::Market(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
