//! Day-keyed aggregation of price series.
//!
//! The upstream returns intraday samples; the history endpoint serves
//! one price per calendar day. Aggregation keeps the last sample seen
//! for each day, so a series in chronological order yields each day's
//! closing sample.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Sample time in milliseconds since the Unix epoch.
    pub timestamp_millis: i64,

    /// Price in the quote currency.
    pub price: f64,
}

impl PricePoint {
    /// Creates a sample from a timestamp and price.
    #[must_use]
    pub const fn new(timestamp_millis: i64, price: f64) -> Self {
        Self { timestamp_millis, price }
    }
}

/// Folds a price series into a map keyed by UTC calendar day
/// (`YYYY-MM-DD`).
///
/// Later samples overwrite earlier ones within the same day. Samples
/// whose timestamp does not map to a representable instant are skipped
/// with a warning rather than failing the whole series.
#[must_use]
pub fn aggregate_daily(series: &[PricePoint]) -> BTreeMap<String, f64> {
    let mut daily = BTreeMap::new();

    for point in series {
        let Some(instant) = DateTime::<Utc>::from_timestamp_millis(point.timestamp_millis) else {
            tracing::warn!(timestamp = point.timestamp_millis, "skipping unrepresentable sample");
            continue;
        };
        daily.insert(instant.format("%Y-%m-%d").to_string(), point.price);
    }

    daily
}
