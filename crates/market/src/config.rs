//! Configuration for the market data client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

/// Default base URL of the market data API.
pub const DEFAULT_API_URL: &str = "https://pro-api.coingecko.com/api/v3";

/// Default asset identifier to serve prices for.
pub const DEFAULT_COIN_ID: &str = "near";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`RestMarketData`](crate::RestMarketData).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketConfig {
    /// Base URL of the market data API.
    #[serde(default = "default_api_url")]
    pub(crate) api_url: String,

    /// API key sent with every request, if the tier requires one.
    #[serde(default)]
    pub(crate) api_key: Option<String>,

    /// Asset identifier for current price lookups.
    #[serde(default = "default_coin_id")]
    pub(crate) coin_id: String,

    /// Request timeout.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub(crate) timeout: Duration,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_coin_id() -> String {
    DEFAULT_COIN_ID.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

#[bon::bon]
impl MarketConfig {
    /// Creates a new configuration, validating all fields.
    ///
    /// # Optional Fields
    ///
    /// * `api_url` - Base URL of the market API (defaults to the hosted
    ///   endpoint).
    /// * `api_key` - API key for authenticated tiers.
    /// * `coin_id` - Asset identifier (default: `near`).
    /// * `timeout` - Request timeout (default: 10 seconds).
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` or `coin_id` is empty.
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_API_URL.to_string())] api_url: String,
        #[builder(into)] api_key: Option<String>,
        #[builder(into, default = DEFAULT_COIN_ID.to_string())] coin_id: String,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Result<Self> {
        if api_url.is_empty() {
            return Err(MarketError::Config("api_url cannot be empty".into()));
        }
        if coin_id.is_empty() {
            return Err(MarketError::Config("coin_id cannot be empty".into()));
        }

        Ok(Self { api_url: api_url.trim_end_matches('/').to_string(), api_key, coin_id, timeout })
    }

    /// Returns the API base URL, without a trailing slash.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the API key if configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Returns the configured asset identifier.
    #[must_use]
    pub fn coin_id(&self) -> &str {
        &self.coin_id
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
