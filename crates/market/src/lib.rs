//! Market data access for the gateway.
//!
//! Wraps the upstream market data REST API behind the [`MarketData`]
//! trait: current spot prices across quote currencies, and historical
//! price series over a time range. The [`history`] module folds a raw
//! series into the day-keyed map the price history endpoint serves.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
pub mod history;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use client::{MarketData, RestMarketData};
pub use config::{DEFAULT_API_URL, DEFAULT_COIN_ID, MarketConfig};
pub use error::{MarketError, Result};
pub use history::{PricePoint, aggregate_daily};
