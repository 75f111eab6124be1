//! Canned market data sources for tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    client::MarketData,
    error::{MarketError, Result},
    history::PricePoint,
};

/// [`MarketData`] backed by fixed in-memory data.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    prices: BTreeMap<String, f64>,
    series: Vec<PricePoint>,
}

impl StaticMarketData {
    /// Creates a source with the given spot prices and history series.
    #[must_use]
    pub fn new(prices: BTreeMap<String, f64>, series: Vec<PricePoint>) -> Self {
        Self { prices, series }
    }

    /// Sets a spot price for a quote currency.
    #[must_use]
    pub fn with_price(mut self, currency: &str, price: f64) -> Self {
        self.prices.insert(currency.to_string(), price);
        self
    }

    /// Appends a history sample.
    #[must_use]
    pub fn with_sample(mut self, timestamp_millis: i64, price: f64) -> Self {
        self.series.push(PricePoint::new(timestamp_millis, price));
        self
    }
}

#[async_trait]
impl MarketData for StaticMarketData {
    async fn current_prices(&self) -> Result<BTreeMap<String, f64>> {
        Ok(self.prices.clone())
    }

    async fn price_range(
        &self,
        _base: &str,
        _currency: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>> {
        let from_millis = from.timestamp_millis();
        let to_millis = to.timestamp_millis();

        Ok(self
            .series
            .iter()
            .filter(|p| p.timestamp_millis >= from_millis && p.timestamp_millis < to_millis)
            .copied()
            .collect())
    }
}

/// [`MarketData`] that fails every call, for exercising upstream error
/// paths.
#[derive(Debug, Clone, Default)]
pub struct FailingMarketData;

#[async_trait]
impl MarketData for FailingMarketData {
    async fn current_prices(&self) -> Result<BTreeMap<String, f64>> {
        Err(MarketError::Upstream { status: 503, message: "service unavailable".into() })
    }

    async fn price_range(
        &self,
        _base: &str,
        _currency: &str,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>> {
        Err(MarketError::Upstream { status: 503, message: "service unavailable".into() })
    }
}
