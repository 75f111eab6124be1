//! Shared application state.

use std::sync::Arc;

use hashgate_authn::Authorizer;
use hashgate_market::{MarketData, RestMarketData};
use hashgate_registry::RpcTokenRegistry;

use crate::config::GatewayConfig;

/// State shared by every request handler.
///
/// Built once at startup; everything inside is read-only afterwards, so
/// cloning per request is just reference count bumps.
#[derive(Clone)]
pub struct AppState {
    /// Capability token verification pipeline.
    pub authorizer: Arc<Authorizer>,

    /// Market data source.
    pub market: Arc<dyn MarketData>,
}

impl AppState {
    /// Builds production state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either collaborator client cannot be
    /// constructed.
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let registry = RpcTokenRegistry::new(config.registry.clone())?;
        let market = RestMarketData::new(config.market.clone())?;

        Ok(Self {
            authorizer: Arc::new(Authorizer::new(Arc::new(registry))),
            market: Arc::new(market),
        })
    }

    /// Builds state from explicit collaborators, for tests and embedding.
    #[must_use]
    pub fn with_collaborators(authorizer: Authorizer, market: Arc<dyn MarketData>) -> Self {
        Self { authorizer: Arc::new(authorizer), market }
    }
}

/// Identity extracted by the capability middleware.
///
/// Present as a request extension on every request that reaches an
/// `/api` handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Account the request's token is bound to.
    pub account_id: String,
}
