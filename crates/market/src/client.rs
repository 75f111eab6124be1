//! Market data trait and REST client implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    config::MarketConfig,
    error::{MarketError, Result},
    history::PricePoint,
};

/// Header carrying the API key on authenticated tiers.
const API_KEY_HEADER: &str = "x-cg-pro-api-key";

/// Read-only market data source.
///
/// The gateway depends on this trait rather than the REST client so
/// tests can substitute canned data without a network.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetches the current spot price of the configured asset in every
    /// quote currency the upstream supports.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] if the upstream is unreachable or
    /// answers with an error or an undecodable body.
    async fn current_prices(&self) -> Result<BTreeMap<String, f64>>;

    /// Fetches the price series of `base` quoted in `currency` over the
    /// half-open range `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketError`] if the upstream is unreachable or
    /// answers with an error or an undecodable body.
    async fn price_range(
        &self,
        base: &str,
        currency: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>>;
}

/// Shape of the coin detail response; only the price map is consumed.
#[derive(Debug, Deserialize)]
struct CoinDetail {
    market_data: CoinMarketData,
}

#[derive(Debug, Deserialize)]
struct CoinMarketData {
    current_price: BTreeMap<String, f64>,
}

/// Shape of the range response: `prices` is a list of
/// `[millis, price]` pairs.
#[derive(Debug, Deserialize)]
struct RangeResponse {
    prices: Vec<(i64, f64)>,
}

/// REST implementation of [`MarketData`].
#[derive(Debug, Clone)]
pub struct RestMarketData {
    http: reqwest::Client,
    config: MarketConfig,
}

impl RestMarketData {
    /// Creates a market data client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Config`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: MarketConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| MarketError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let url = format!("{}{path}", self.config.api_url());
        let mut request = self.http.get(&url).query(query);

        if let Some(key) = self.config.api_key() {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(MarketError::Upstream { status: status.as_u16(), message });
        }

        Ok(response)
    }
}

#[async_trait]
impl MarketData for RestMarketData {
    #[tracing::instrument(skip(self), fields(coin = %self.config.coin_id()))]
    async fn current_prices(&self) -> Result<BTreeMap<String, f64>> {
        let path = format!("/coins/{}", self.config.coin_id());
        let detail: CoinDetail = self.get(&path, &[]).await?.json().await?;

        tracing::debug!(currencies = detail.market_data.current_price.len(), "fetched spot prices");
        Ok(detail.market_data.current_price)
    }

    #[tracing::instrument(skip(self))]
    async fn price_range(
        &self,
        base: &str,
        currency: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>> {
        let path = format!("/coins/{base}/market_chart/range");
        let query = [
            ("vs_currency", currency.to_string()),
            ("from", from.timestamp().to_string()),
            ("to", to.timestamp().to_string()),
        ];
        let range: RangeResponse = self.get(&path, &query).await?.json().await?;

        tracing::debug!(points = range.prices.len(), "fetched price range");
        Ok(range
            .prices
            .into_iter()
            .map(|(timestamp_millis, price)| PricePoint { timestamp_millis, price })
            .collect())
    }
}
