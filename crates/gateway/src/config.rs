//! Gateway configuration from the process environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use hashgate_market::MarketConfig;
use hashgate_registry::RegistryConfig;
use thiserror::Error;

/// Default listen port when `HASHGATE_PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors raised while loading gateway configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable holds an unparseable value.
    #[error("invalid value for {name}: {detail}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        detail: String,
    },
}

/// Fully resolved gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,

    /// Registry collaborator configuration.
    pub registry: RegistryConfig,

    /// Market data collaborator configuration.
    pub market: MarketConfig,
}

impl GatewayConfig {
    /// Loads configuration from `HASHGATE_*` environment variables.
    ///
    /// Required: `HASHGATE_RPC_URL`, `HASHGATE_CONTRACT_ID`.
    /// Optional: `HASHGATE_PORT` (default 8080), `HASHGATE_NETWORK_ID`,
    /// `HASHGATE_MARKET_API_URL`, `HASHGATE_MARKET_API_KEY`,
    /// `HASHGATE_MARKET_COIN`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or any
    /// value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match optional_var("HASHGATE_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                name: "HASHGATE_PORT",
                detail: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let registry = RegistryConfig::builder()
            .rpc_url(required_var("HASHGATE_RPC_URL")?)
            .contract_id(required_var("HASHGATE_CONTRACT_ID")?)
            .maybe_network_id(optional_var("HASHGATE_NETWORK_ID"))
            .build()
            .map_err(|e| ConfigError::InvalidVar {
                name: "HASHGATE_RPC_URL",
                detail: e.to_string(),
            })?;

        let market = MarketConfig::builder()
            .maybe_api_url(optional_var("HASHGATE_MARKET_API_URL"))
            .maybe_api_key(optional_var("HASHGATE_MARKET_API_KEY"))
            .maybe_coin_id(optional_var("HASHGATE_MARKET_COIN"))
            .build()
            .map_err(|e| ConfigError::InvalidVar {
                name: "HASHGATE_MARKET_API_URL",
                detail: e.to_string(),
            })?;

        Ok(Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            registry,
            market,
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    optional_var(name).ok_or(ConfigError::MissingVar(name))
}

fn optional_var(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
